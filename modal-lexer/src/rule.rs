use crate::context::LexContext;
use crate::mode::Transition;
use crate::pattern::Pattern;
use crate::token::Token;
use crate::traits::{LexingRule, TokenKind};
use std::collections::VecDeque;

/// How a matched span becomes tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<K> {
    /// The whole match is one token.
    Token(K),
    /// One token per pattern group. Empty groups produce no token.
    ByGroups(Vec<K>),
}

/// A table entry: pattern, action and the mode transition taken on a match.
#[derive(Debug, Clone)]
pub struct Rule<K> {
    pattern: Pattern,
    action: Action<K>,
    transition: Transition,
}

impl<K: TokenKind> Rule<K> {
    pub fn new(pattern: Pattern, action: Action<K>, transition: Transition) -> Self {
        Self {
            pattern,
            action,
            transition,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn action(&self) -> &Action<K> {
        &self.action
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }
}

impl<Ctx, K> LexingRule<Ctx, K> for Rule<K>
where
    Ctx: LexContext,
    K: TokenKind,
{
    fn try_match(&self, ctx: &mut Ctx, out: &mut VecDeque<Token<K>>) -> bool {
        let Some(found) = self.pattern.find(ctx.rest()) else {
            return false;
        };

        match &self.action {
            Action::Token(kind) => emit(ctx, *kind, found.len(), out),
            Action::ByGroups(kinds) => {
                for (kind, len) in kinds.iter().zip(found.groups()) {
                    emit(ctx, *kind, *len, out);
                }
            }
        }

        ctx.apply_transition(self.transition);
        true
    }

    fn quick_check(&self, first_char: Option<char>) -> Option<bool> {
        self.pattern.first_char_hint(first_char)
    }
}

fn emit<Ctx, K>(ctx: &mut Ctx, kind: K, len: usize, out: &mut VecDeque<Token<K>>)
where
    Ctx: LexContext,
    K: TokenKind,
{
    if let Some((text, position)) = ctx.take(len) {
        out.push_back(Token::new(kind, text, position));
    }
}
