use modal_lexer::{
    CharClass, Grammar, GrammarBuilder, LexContext, Lexer, LexingRule, Pattern, Position,
    ScanContext, Token, TokenKind, Transition, MAX_STALLED_TRANSITIONS,
};
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Space,
    Keyword,
    Name,
    Op,
    Paren,
    Regex,
    Error,
}

impl TokenKind for Kind {
    fn name(&self) -> &'static str {
        match self {
            Kind::Space => "Space",
            Kind::Keyword => "Keyword",
            Kind::Name => "Name",
            Kind::Op => "Op",
            Kind::Paren => "Paren",
            Kind::Regex => "Regex",
            Kind::Error => "Error",
        }
    }
}

/// A toy language: `=` opens a slot where `/.../` is a regex literal.
fn toy_grammar() -> Grammar<Kind> {
    GrammarBuilder::new("root", Kind::Error)
        .mode("space", |m| m.rule(Pattern::char(CharClass::SPACE), Kind::Space))
        .mode("regex", |m| {
            m.include("space")
                .rule(Pattern::quoted('/', true), Kind::Regex)
                .rule_then(Pattern::Lookahead, Kind::Error, Transition::Pop)
        })
        .mode("root", |m| {
            m.include("space")
                .rule(Pattern::words(&["if", "for"]), Kind::Keyword)
                .rule_then(Pattern::any_of(&["==", "="]), Kind::Op, Transition::Push("regex"))
                .rule(Pattern::literal("/"), Kind::Op)
                .by_groups(
                    Pattern::groups(vec![
                        Pattern::seq(vec![
                            Pattern::one_or_more(CharClass::WORD),
                            Pattern::literal("!"),
                        ]),
                        Pattern::zero_or_more(CharClass::SPACE),
                        Pattern::literal("("),
                    ]),
                    [Kind::Name, Kind::Space, Kind::Paren],
                    Transition::Stay,
                )
                .rule(Pattern::any_of(&["(", ")"]), Kind::Paren)
                .rule(Pattern::one_or_more(CharClass::WORD), Kind::Name)
        })
        .build()
        .unwrap()
}

fn pairs(tokens: &[Token<Kind>]) -> Vec<(Kind, &str)> {
    tokens.iter().map(Token::pair).collect()
}

#[test]
fn test_first_match_wins() {
    let grammar = toy_grammar();
    let tokens = grammar.tokenize("if foreach for");
    assert_eq!(
        pairs(&tokens),
        vec![
            (Kind::Keyword, "if"),
            (Kind::Space, " "),
            (Kind::Name, "foreach"),
            (Kind::Space, " "),
            (Kind::Keyword, "for"),
        ]
    );
}

#[test]
fn test_fallback_consumes_one_char() {
    let grammar = toy_grammar();
    let tokens = grammar.tokenize("a#é");
    assert_eq!(
        pairs(&tokens),
        vec![(Kind::Name, "a"), (Kind::Error, "#"), (Kind::Name, "é")]
    );
    let tokens = grammar.tokenize("§§");
    assert_eq!(pairs(&tokens), vec![(Kind::Error, "§"), (Kind::Error, "§")]);
}

#[test]
fn test_push_and_zero_width_pop() {
    let grammar = toy_grammar();
    let tokens = grammar.tokenize("x = /a\\/b/ / y");
    assert_eq!(
        pairs(&tokens),
        vec![
            (Kind::Name, "x"),
            (Kind::Space, " "),
            (Kind::Op, "="),
            (Kind::Space, " "),
            (Kind::Regex, "/a\\/b/"),
            (Kind::Space, " "),
            (Kind::Op, "/"),
            (Kind::Space, " "),
            (Kind::Name, "y"),
        ]
    );
}

#[test]
fn test_mode_stack_after_partial_input() {
    let grammar = toy_grammar();
    let mut lexer = grammar.lexer("a = b");

    assert_eq!(lexer.mode_names(), vec!["root"]);
    lexer.next(); // a
    lexer.next(); // ' '
    assert_eq!(lexer.next().map(|t| t.kind), Some(Kind::Op));
    assert_eq!(lexer.mode_names(), vec!["root", "regex"]);
    assert_eq!(lexer.current_mode(), "regex");

    lexer.next(); // ' ', still in the regex slot
    assert_eq!(lexer.current_mode(), "regex");
    assert_eq!(lexer.next().map(|t| t.pair().1.to_string()), Some("b".to_string()));
    assert_eq!(lexer.mode_names(), vec!["root"]);
    assert_eq!(lexer.next(), None);
}

#[test]
fn test_pop_at_end_of_input_keeps_stack() {
    let grammar = toy_grammar();
    let mut lexer = grammar.lexer("a =");
    let tokens = lexer.tokenize();
    assert_eq!(tokens.len(), 3);
    assert_eq!(lexer.mode_stack().depth(), 2);
}

#[test]
fn test_by_groups_split() {
    let grammar = toy_grammar();
    let tokens = grammar.tokenize("print! (x)");
    assert_eq!(
        pairs(&tokens),
        vec![
            (Kind::Name, "print!"),
            (Kind::Space, " "),
            (Kind::Paren, "("),
            (Kind::Name, "x"),
            (Kind::Paren, ")"),
        ]
    );
}

#[test]
fn test_by_groups_skips_empty_group() {
    let grammar = toy_grammar();
    let tokens = grammar.tokenize("go!(");
    assert_eq!(
        pairs(&tokens),
        vec![(Kind::Name, "go!"), (Kind::Paren, "(")]
    );
}

#[test]
fn test_token_positions() {
    let grammar = toy_grammar();
    let tokens = grammar.tokenize("if\n  x");
    let positions: Vec<Position> = tokens.iter().map(|t| t.position).collect();
    assert_eq!(
        positions,
        vec![
            Position::at(1, 1, 0),
            Position::at(1, 3, 2),
            Position::at(2, 1, 3),
            Position::at(2, 2, 4),
            Position::at(2, 3, 5),
        ]
    );
    assert_eq!(tokens[4].span(), 5..6);
}

#[test]
fn test_total_coverage() {
    let grammar = toy_grammar();
    let input = "if (a == /x\ny/)\n  go!  (b) # / = ";
    let rebuilt: String = grammar.lexer(input).map(|t| t.text().to_string()).collect();
    assert_eq!(rebuilt, input);
}

#[test]
fn test_empty_input() {
    let grammar = toy_grammar();
    let mut lexer = grammar.lexer("");
    assert_eq!(lexer.next(), None);
    assert_eq!(lexer.next(), None);
}

#[test]
fn test_zero_width_rule_without_transition_is_skipped() {
    let grammar = GrammarBuilder::new("root", Kind::Error)
        .mode("root", |m| {
            m.rule(Pattern::Lookahead, Kind::Space)
                .rule(Pattern::one_or_more(CharClass::WORD), Kind::Name)
        })
        .build()
        .unwrap();
    let tokens = grammar.tokenize("ab.");
    assert_eq!(pairs(&tokens), vec![(Kind::Name, "ab"), (Kind::Error, ".")]);
}

#[test]
fn test_zero_width_ping_pong_is_bounded() {
    // Two modes that hand control back and forth without consuming anything.
    let grammar = GrammarBuilder::new("root", Kind::Error)
        .mode("root", |m| m.rule_then(Pattern::Lookahead, Kind::Space, Transition::Push("other")))
        .mode("other", |m| m.rule_then(Pattern::Lookahead, Kind::Space, Transition::Pop))
        .build()
        .unwrap();
    let tokens = grammar.tokenize("ab");
    assert_eq!(pairs(&tokens), vec![(Kind::Error, "a"), (Kind::Error, "b")]);
    assert!(MAX_STALLED_TRANSITIONS > 1);
}

/// Hand-written rule: a `#` comment up to the end of the line.
struct HashComment;

impl LexingRule<ScanContext, Kind> for HashComment {
    fn try_match(&self, ctx: &mut ScanContext, out: &mut VecDeque<Token<Kind>>) -> bool {
        if ctx.peek() != Some('#') {
            return false;
        }
        let position = ctx.position();
        let text = ctx.consume_while(|c| c != '\n');
        out.push_back(Token::new(Kind::Space, text, position));
        true
    }

    fn quick_check(&self, first_char: Option<char>) -> Option<bool> {
        Some(first_char == Some('#'))
    }
}

/// Consumes input and then gives up; the lexer must rewind it.
struct GreedyThenFail;

impl LexingRule<ScanContext, Kind> for GreedyThenFail {
    fn try_match(&self, ctx: &mut ScanContext, _out: &mut VecDeque<Token<Kind>>) -> bool {
        ctx.consume_while(|_| true);
        false
    }
}

#[test]
fn test_custom_rules() {
    let grammar = GrammarBuilder::new("root", Kind::Error)
        .mode("root", |m| {
            m.custom(Arc::new(GreedyThenFail))
                .custom(Arc::new(HashComment))
                .rule(Pattern::char(CharClass::SPACE), Kind::Space)
                .rule(Pattern::one_or_more(CharClass::WORD), Kind::Name)
        })
        .build()
        .unwrap();
    let tokens = grammar.tokenize("x # note\ny");
    assert_eq!(
        pairs(&tokens),
        vec![
            (Kind::Name, "x"),
            (Kind::Space, " "),
            (Kind::Space, "# note"),
            (Kind::Space, "\n"),
            (Kind::Name, "y"),
        ]
    );
}

/// Emits the next character and nests the current mode, then gives up.
struct EmitThenFail;

impl LexingRule<ScanContext, Kind> for EmitThenFail {
    fn try_match(&self, ctx: &mut ScanContext, out: &mut VecDeque<Token<Kind>>) -> bool {
        if let Some((text, position)) = ctx.take(1) {
            out.push_back(Token::new(Kind::Keyword, text, position));
        }
        let mode = ctx.mode();
        ctx.mode_stack_mut().push(mode);
        false
    }
}

/// Queues a copy of the next character without consuming it.
struct QueueWithoutConsuming;

impl LexingRule<ScanContext, Kind> for QueueWithoutConsuming {
    fn try_match(&self, ctx: &mut ScanContext, out: &mut VecDeque<Token<Kind>>) -> bool {
        let start = ctx.offset();
        let end = start + ctx.peek().map_or(0, char::len_utf8);
        let text = ctx.cursor().slice(start, end);
        out.push_back(Token::new(Kind::Keyword, text, ctx.position()));
        true
    }
}

#[test]
fn test_failed_rule_is_rolled_back() {
    let grammar = GrammarBuilder::new("root", Kind::Error)
        .mode("root", |m| {
            m.custom(Arc::new(EmitThenFail))
                .rule(Pattern::one_or_more(CharClass::WORD), Kind::Name)
        })
        .build()
        .unwrap();
    let mut lexer = grammar.lexer("ab");
    let tokens = lexer.tokenize();
    assert_eq!(pairs(&tokens), vec![(Kind::Name, "ab")]);
    assert_eq!(lexer.mode_stack().depth(), 1);
}

#[test]
fn test_zero_width_rule_output_is_dropped() {
    let grammar = GrammarBuilder::new("root", Kind::Error)
        .mode("root", |m| {
            m.custom(Arc::new(QueueWithoutConsuming))
                .rule(Pattern::one_or_more(CharClass::WORD), Kind::Name)
        })
        .build()
        .unwrap();
    let tokens = grammar.tokenize("ab.");
    let rebuilt: String = tokens.iter().map(|t| t.text().to_string()).collect();
    assert_eq!(rebuilt, "ab.");
    assert_eq!(pairs(&tokens), vec![(Kind::Name, "ab"), (Kind::Error, ".")]);
}

#[test]
fn test_deterministic() {
    let grammar = toy_grammar();
    let input = "for x = /re/ y!(1) ==";
    assert_eq!(grammar.tokenize(input), grammar.tokenize(input));
}

#[test]
fn test_lexer_with_cursor_shares_buffer() {
    let grammar = toy_grammar();
    let cursor = modal_lexer::Cursor::new("if x");
    let buffer = cursor.remaining().buffer();
    let tokens: Vec<_> = Lexer::with_cursor(&grammar, cursor).collect();
    assert!(Arc::ptr_eq(&tokens[0].text.buffer(), &buffer));
}
