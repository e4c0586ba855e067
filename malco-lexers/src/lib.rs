//! Highlighting lexers for Malco (`*.mlc`) and the Radix assembler
//! (`*.rasm`).
//!
//! ```
//! use malco_lexers::{malco, Category};
//!
//! let tokens: Vec<_> = malco::tokenize("$re = /zomg/i;").collect();
//! assert_eq!(tokens[4].pair(), (Category::StringRegex, "/zomg/i"));
//! ```

pub mod category;
pub mod malco;
pub mod rasm;
pub mod registry;

pub use category::Category;
pub use registry::{Language, LexerInfo, LookupError};

/// A token produced by either lexer.
pub type Token = modal_lexer::Token<Category>;

/// Token stream of either lexer.
pub type Lexer = modal_lexer::Lexer<'static, Category>;
