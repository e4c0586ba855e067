//! A small scanning engine for highlighting lexers.
//!
//! Languages are described as a [`Grammar`]: named modes, each an ordered list
//! of rules. The [`Lexer`] walks the input, tries the rules of the mode on top
//! of the [`ModeStack`] in declared order and takes the first that matches.
//! When nothing matches it emits a single fallback character, so every input
//! is tokenized completely.

pub mod context;
pub mod cursor;
pub mod grammar;
pub mod lexer;
pub mod mode;
pub mod pattern;
pub mod rule;
pub mod token;
pub mod traits;

pub use context::{LexContext, ScanContext};
pub use cursor::Cursor;
pub use grammar::{Grammar, GrammarBuilder, GrammarError, Mode, ModeBuilder};
pub use lexer::{Lexer, MAX_STALLED_TRANSITIONS};
pub use lexer_common::{Checkpoint, Position, TextSlice};
pub use mode::{ModeId, ModeStack, Transition};
pub use pattern::{CharClass, Match, Pattern};
pub use rule::{Action, Rule};
pub use token::Token;
pub use traits::{LexingRule, TokenKind};
