//! Radix assembler lexer. A single mode; unknown words fall back to
//! per-character error tokens.

use crate::registry::LexerInfo;
use crate::{Category, Lexer};
use modal_lexer::{CharClass, Grammar, GrammarBuilder, GrammarError, Pattern, Transition};
use std::sync::OnceLock;

pub const INFO: LexerInfo = LexerInfo {
    name: "Radix assembler language lexer",
    aliases: &["rasm"],
    filenames: &["*.rasm"],
    mimetypes: &["text/rasm"],
};

/// Every command the assembler accepts.
pub const COMMANDS: &[&str] = &[
    // data transfer
    "LOADAX", "LOADBX", "SAVEAX", "SAVEBX", "XCHG", "ASSIGN", "UNSPLASSIGN",
    // arithmetic and logic
    "ADD", "SUB", "MUL", "DIV", "MOD", "POW", "SHL", "SHR", "BAND", "BOR", "BXOR", "AND", "OR",
    "XOR", "INC", "DEC", "NEG",
    // comparison and jumps
    "EQ", "EQ_STRICT", "REL", "LESS", "LESS_EQ", "GREATER", "GREATER_EQ", "CMP", "JTRUE",
    "JFALSE", "JMP",
    // stacks
    "PUSHUS", "POPUS", "PUSHSRC", "POPSRC", "PUSHDST", "POPDST", "SPLAT", "UNSPLAT", "CLRSRC",
    "CLRDST",
    // objects
    "NEW", "CALL", "RETURN", "NSP", "BINDLAMBDA", "INDEX",
    // interpreter
    "INCLUDE", "REQUIRE", "GC", "SETPTY", "SETFILE", "SETLINE", "THROW", "TRY", "TRIED", "EXIT",
    // class table
    "REGCLASS", "REGPROPERTY", "REGMETHOD", "INSPECT",
];

pub const TYPES: &[&str] = &["INT", "FLOAT", "STR", "VAL"];

/// Commands that declare rather than execute.
pub const PSEUDO_COMMANDS: &[&str] = &["LABEL", "FUNC", "CLASS", "VAR", "END"];

pub const MODIFIERS: &[&str] = &["final", "stub", "static", "private", "public"];

/// Special argument forms such as `LOADAX NULL` or `LOADAX PROPERTY "x"`.
pub const ARGUMENTS: &[&str] = &[
    "NULL", "SELF", "TRUE", "FALSE", "UNDEF", "PROPERTY", "VAR", "CONST",
];

const NOT_NEWLINE: CharClass = CharClass::new("not newline", is_not_newline);

fn is_not_newline(ch: char) -> bool {
    ch != '\n'
}

/// The shared Rasm grammar.
pub fn grammar() -> &'static Grammar<Category> {
    static GRAMMAR: OnceLock<Grammar<Category>> = OnceLock::new();
    GRAMMAR.get_or_init(|| build_grammar().expect("Rasm rule table is well-formed"))
}

/// Scans Rasm source.
pub fn tokenize<S: Into<String>>(source: S) -> Lexer {
    grammar().lexer(source)
}

pub fn build_grammar() -> Result<Grammar<Category>, GrammarError> {
    GrammarBuilder::new("root", Category::Error)
        .mode("root", |m| {
            m.rule(Pattern::one_or_more(CharClass::SPACE), Category::Text)
                .rule(
                    Pattern::seq(vec![Pattern::literal(";"), Pattern::zero_or_more(NOT_NEWLINE)]),
                    Category::CommentSingle,
                )
                .rule(Pattern::words(COMMANDS), Category::NameBuiltin)
                .rule(Pattern::words(TYPES), Category::KeywordType)
                .by_groups(
                    Pattern::groups(vec![
                        Pattern::any_of(PSEUDO_COMMANDS),
                        Pattern::one_or_more(CharClass::SPACE),
                        Pattern::optional(Pattern::words(MODIFIERS)),
                    ]),
                    [
                        Category::NameBuiltinPseudo,
                        Category::Text,
                        Category::KeywordReserved,
                    ],
                    Transition::Stay,
                )
                .rule(Pattern::words(ARGUMENTS), Category::KeywordConstant)
                .rule(
                    Pattern::seq(vec![
                        Pattern::one_or_more(CharClass::DIGIT),
                        Pattern::optional(Pattern::seq(vec![
                            Pattern::literal("."),
                            Pattern::zero_or_more(CharClass::DIGIT),
                        ])),
                    ]),
                    Category::Number,
                )
                .rule(
                    Pattern::seq(vec![
                        Pattern::optional(Pattern::literal("@")),
                        Pattern::literal("$"),
                        Pattern::zero_or_more(CharClass::NON_SPACE),
                    ]),
                    Category::NameVariable,
                )
                .rule(Pattern::quoted('"', false), Category::String)
        })
        .build()
}
