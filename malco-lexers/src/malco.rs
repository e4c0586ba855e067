//! Malco lexer.
//!
//! Besides the root mode there is `slashstartsregex`, pushed after every
//! operator or punctuation mark that may be followed by a regex literal. It
//! recognises at most one `/.../flags` literal and then hands control back.

use crate::registry::LexerInfo;
use crate::{Category, Lexer};
use modal_lexer::{CharClass, Grammar, GrammarBuilder, GrammarError, Pattern, Transition};
use std::sync::OnceLock;

pub const INFO: LexerInfo = LexerInfo {
    name: "Malco programming language lexer",
    aliases: &["malco"],
    filenames: &["*.mlc"],
    mimetypes: &["text/malco"],
};

const ROOT: &str = "root";
const WHITESPACE_AND_COMMENTS: &str = "whitespaceandcomments";
const SLASH_STARTS_REGEX: &str = "slashstartsregex";

const REGEX: Transition<&str> = Transition::Push(SLASH_STARTS_REGEX);
const STAY: Transition<&str> = Transition::Stay;

const REGEX_FLAG: CharClass = CharClass::new("regex flag", is_regex_flag);
const BINARY_DIGIT: CharClass = CharClass::new("binary digit", is_binary_digit);
const NOT_NEWLINE: CharClass = CharClass::new("not newline", is_not_newline);

fn is_regex_flag(ch: char) -> bool {
    matches!(ch, 'i' | 's' | 'm' | 'x')
}

fn is_binary_digit(ch: char) -> bool {
    matches!(ch, '0' | '1')
}

fn is_not_newline(ch: char) -> bool {
    ch != '\n'
}

/// The shared Malco grammar.
pub fn grammar() -> &'static Grammar<Category> {
    static GRAMMAR: OnceLock<Grammar<Category>> = OnceLock::new();
    GRAMMAR.get_or_init(|| build_grammar().expect("Malco rule table is well-formed"))
}

/// Scans Malco source.
pub fn tokenize<S: Into<String>>(source: S) -> Lexer {
    grammar().lexer(source)
}

pub fn build_grammar() -> Result<Grammar<Category>, GrammarError> {
    GrammarBuilder::new(ROOT, Category::Error)
        .mode(WHITESPACE_AND_COMMENTS, |m| {
            m.rule(bad_code_marker(), Category::GenericError)
                .rule(
                    Pattern::seq(vec![
                        Pattern::literal("//"),
                        Pattern::zero_or_more(NOT_NEWLINE),
                        Pattern::optional(Pattern::literal("\n")),
                    ]),
                    Category::CommentSingle,
                )
                .rule(
                    Pattern::custom("block comment", block_comment),
                    Category::CommentMultiline,
                )
                .rule(Pattern::char(CharClass::SPACE), Category::Text)
        })
        .mode(SLASH_STARTS_REGEX, |m| {
            m.include(WHITESPACE_AND_COMMENTS)
                .rule_then(
                    Pattern::seq(vec![
                        Pattern::quoted('/', true),
                        Pattern::optional(Pattern::bounded(Pattern::one_or_more(REGEX_FLAG))),
                    ]),
                    Category::StringRegex,
                    Transition::Pop,
                )
                .rule_then(Pattern::Lookahead, Category::GenericError, Transition::Pop)
        })
        .mode(ROOT, |m| {
            let m = m.include(WHITESPACE_AND_COMMENTS);
            let m = keywords(m);
            let m = literals(m);
            let m = operators(m);
            m.rule_then(
                Pattern::any_of(&["(", "{", "[", ",", ";"]),
                Category::Punctuation,
                REGEX,
            )
            .rule(Pattern::any_of(&[")", "}", "]", "@"]), Category::Punctuation)
            .by_groups(
                Pattern::groups(vec![
                    Pattern::seq(vec![
                        Pattern::one_or_more(CharClass::WORD),
                        Pattern::literal("!"),
                    ]),
                    Pattern::zero_or_more(CharClass::SPACE),
                    Pattern::literal("("),
                ]),
                [Category::Name, Category::Text, Category::Punctuation],
                STAY,
            )
            .rule(Pattern::one_or_more(CharClass::WORD), Category::Name)
        })
        .build()
}

type Mode = modal_lexer::ModeBuilder<Category>;

fn keywords(m: Mode) -> Mode {
    m.rule(
        Pattern::words(&[
            "if", "elseif", "else", "for", "while", "switch", "case", "break", "try", "catch",
            "throw", "in",
        ]),
        Category::Keyword,
    )
    .rule(
        Pattern::words(&["class", "extend", "func", "op"]),
        Category::KeywordDeclaration,
    )
    .rule(
        Pattern::words(&["public", "private", "internal", "static", "stub", "final"]),
        Category::Keyword,
    )
    .rule(
        Pattern::words(&["include", "require"]),
        Category::KeywordNamespace,
    )
    .rule(Pattern::words(&["once"]), Category::Keyword)
    .rule(Pattern::words(&["new", "return"]), Category::Keyword)
}

fn literals(m: Mode) -> Mode {
    let minus = || Pattern::optional(Pattern::literal("-"));
    let digits = || Pattern::one_or_more(CharClass::DIGIT);

    m.rule(
        Pattern::words(&["undef", "false", "true"]),
        Category::KeywordConstant,
    )
    .rule(
        Pattern::bounded(Pattern::seq(vec![
            minus(),
            digits(),
            Pattern::literal("."),
            digits(),
            Pattern::optional(Pattern::seq(vec![
                Pattern::literal("e"),
                Pattern::any_of(&["+", "-"]),
                digits(),
            ])),
        ])),
        Category::NumberFloat,
    )
    .rule(
        Pattern::bounded(Pattern::seq(vec![minus(), digits()])),
        Category::NumberInteger,
    )
    .rule(
        Pattern::bounded(Pattern::seq(vec![
            minus(),
            Pattern::literal("0x"),
            Pattern::one_or_more(CharClass::HEX_DIGIT),
        ])),
        Category::NumberHex,
    )
    .rule(
        Pattern::bounded(Pattern::seq(vec![
            minus(),
            Pattern::literal("0b"),
            Pattern::one_or_more(BINARY_DIGIT),
        ])),
        Category::Number,
    )
    .rule(Pattern::quoted('"', true), Category::String)
    .rule(Pattern::quoted('\'', true), Category::String)
    .rule(
        Pattern::seq(vec![
            Pattern::literal("$"),
            Pattern::optional(Pattern::literal("@")),
            Pattern::zero_or_more(CharClass::WORD),
        ]),
        Category::NameVariable,
    )
}

/// Longer operators come before their prefixes.
fn operators(m: Mode) -> Mode {
    m.rule_then(
        Pattern::any_of(&["===", "!==", "<=>"]),
        Category::Operator,
        REGEX,
    )
    .rule_then(
        Pattern::any_of(&["+=", "-=", "*=", "/=", "%=", "^=", "!=", "&=", "|=", "~="]),
        Category::Operator,
        REGEX,
    )
    .rule_then(Pattern::literal(".."), Category::Operator, REGEX)
    .rule(Pattern::any_of(&["++", "--"]), Category::Operator)
    .rule_then(Pattern::any_of(&["&&", "||"]), Category::Operator, REGEX)
    .rule_then(
        Pattern::any_of(&["==", "!=", ">=", "<="]),
        Category::Operator,
        REGEX,
    )
    .rule_then(Pattern::literal("<<"), Category::Operator, REGEX)
    .rule(Pattern::literal("::"), Category::Operator)
    .rule_then(Pattern::literal("?:"), Category::Operator, REGEX)
    .rule_then(
        Pattern::any_of(&["+", "-", "*", "/", "%", "^"]),
        Category::Operator,
        REGEX,
    )
    .rule_then(Pattern::any_of(&["!", "&", "|"]), Category::Operator, REGEX)
    .rule_then(Pattern::words(&["xor"]), Category::OperatorWord, REGEX)
    .rule_then(Pattern::any_of(&["<", ">"]), Category::Operator, REGEX)
    .rule_then(Pattern::literal("~"), Category::Operator, REGEX)
    .rule(Pattern::literal("."), Category::Operator)
    .rule_then(Pattern::any_of(&["?", ":"]), Category::Operator, REGEX)
    .rule_then(Pattern::literal("="), Category::Operator, REGEX)
}

/// `// BAD CODE` on a line of its own, used to flag counter-examples.
fn bad_code_marker() -> Pattern {
    Pattern::seq(vec![
        Pattern::literal("//"),
        Pattern::zero_or_more(CharClass::SPACE),
        Pattern::literal("BAD"),
        Pattern::zero_or_more(CharClass::SPACE),
        Pattern::literal("CODE"),
        Pattern::custom("blank line end", blank_line_end),
    ])
}

/// Whitespace up to and including its last newline. Trailing whitespace at
/// the end of the input also counts.
fn blank_line_end(input: &str) -> Option<usize> {
    let run = input
        .char_indices()
        .find(|(_, ch)| !ch.is_whitespace())
        .map_or(input.len(), |(index, _)| index);
    match input[..run].rfind('\n') {
        Some(newline) => Some(newline + 1),
        None if run == input.len() => Some(run),
        None => None,
    }
}

fn block_comment(input: &str) -> Option<usize> {
    let body = input.strip_prefix("/*")?;
    body.find("*/").map(|end| 2 + end + 2)
}
