use crate::context::{LexContext, ScanContext};
use crate::cursor::Cursor;
use crate::grammar::Grammar;
use crate::mode::ModeStack;
use crate::token::Token;
use crate::traits::TokenKind;
use lexer_common::{Checkpoint, Position};
use std::collections::VecDeque;
use std::iter::FusedIterator;
use tracing::{debug, trace, warn};

/// Zero-width mode transitions tolerated at a single offset before the lexer
/// emits a fallback character to guarantee progress.
pub const MAX_STALLED_TRANSITIONS: usize = 32;

/// Scans one input with a [`Grammar`].
///
/// At every position the rules of the active mode are tried in declared
/// order and the first match wins. A match may produce any number of tokens
/// and change the mode stack. When no rule matches, one character is emitted
/// under the grammar's fallback category. The lexer is a one-shot iterator;
/// the concatenated token texts always equal the input.
pub struct Lexer<'g, K: TokenKind> {
    grammar: &'g Grammar<K>,
    context: ScanContext,
    pending: VecDeque<Token<K>>,
    stalled: usize,
}

impl<'g, K: TokenKind> Lexer<'g, K> {
    /// Starts scanning `input` in the grammar's root mode.
    pub fn new<S: Into<String>>(grammar: &'g Grammar<K>, input: S) -> Self {
        Self::with_cursor(grammar, Cursor::new(input))
    }

    /// Scans a cursor that may already share its buffer with other owners.
    pub fn with_cursor(grammar: &'g Grammar<K>, cursor: Cursor) -> Self {
        Self {
            grammar,
            context: ScanContext::with_cursor(cursor, grammar.root()),
            pending: VecDeque::new(),
            stalled: 0,
        }
    }

    /// The grammar this lexer scans with.
    pub fn grammar(&self) -> &'g Grammar<K> {
        self.grammar
    }

    /// Cursor and mode stack as they are between tokens.
    pub fn context(&self) -> &ScanContext {
        &self.context
    }

    /// The mode stack after the tokens returned so far.
    ///
    /// Tokens are produced lazily, so this reflects exactly the consumed
    /// prefix of the input.
    pub fn mode_stack(&self) -> &ModeStack {
        self.context.mode_stack()
    }

    /// Name of the active mode.
    pub fn current_mode(&self) -> &'static str {
        self.grammar.mode_name(self.context.mode())
    }

    /// Mode names from the root up.
    pub fn mode_names(&self) -> Vec<&'static str> {
        self.mode_stack()
            .as_slice()
            .iter()
            .map(|id| self.grammar.mode_name(*id))
            .collect()
    }

    /// Position of the next unscanned character.
    pub fn position(&self) -> Position {
        self.context.position()
    }

    /// Collects all remaining tokens. The lexer is exhausted afterwards but
    /// its mode stack can still be inspected.
    pub fn tokenize(&mut self) -> Vec<Token<K>> {
        self.by_ref().collect()
    }

    /// Scans one rule match (or one fallback character) into `pending`.
    ///
    /// 1. If too many zero-width transitions happened here, force progress.
    /// 2. Skip rules whose `quick_check` rules out the next character.
    /// 3. Try each remaining rule in order; the first real match wins.
    /// 4. Otherwise emit one fallback character.
    fn step(&mut self) {
        let offset = self.context.offset();
        if self.stalled >= MAX_STALLED_TRANSITIONS {
            warn!(
                offset,
                mode = self.current_mode(),
                "mode transitions made no progress, forcing a fallback character"
            );
            self.emit_fallback();
            return;
        }

        let grammar = self.grammar;
        let mode = self.context.mode();
        let first_char = self.context.peek();

        for rule in grammar.mode(mode).rules() {
            if let Some(false) = rule.quick_check(first_char) {
                continue;
            }

            // Undo point for this attempt.
            let checkpoint = self.context.checkpoint();
            let queued = self.pending.len();
            let modes = self.context.mode_stack().clone();
            if !rule.try_match(&mut self.context, &mut self.pending) {
                self.rollback(checkpoint, queued, modes);
                continue;
            }

            let stack = self.context.mode_stack();
            let moved = *stack != modes;
            if moved {
                trace!(
                    from = grammar.mode_name(mode),
                    to = grammar.mode_name(stack.current()),
                    depth = stack.depth(),
                    offset = self.context.offset(),
                    "mode transition"
                );
            }

            if self.context.offset() > offset {
                self.stalled = 0;
                return;
            }
            if moved {
                self.stalled += 1;
                return;
            }
            // Zero-width and nothing changed: the rule did not really match.
            self.rollback(checkpoint, queued, modes);
        }

        self.emit_fallback();
    }

    /// Undoes a rule attempt.
    fn rollback(&mut self, checkpoint: Checkpoint, queued: usize, modes: ModeStack) {
        self.context.restore(checkpoint);
        self.pending.truncate(queued);
        *self.context.mode_stack_mut() = modes;
    }

    /// Emits the next character under the grammar's fallback category.
    fn emit_fallback(&mut self) {
        self.stalled = 0;
        let Some(ch) = self.context.peek() else {
            return;
        };
        let kind = self.grammar.fallback();
        debug!(
            offset = self.context.offset(),
            mode = self.current_mode(),
            ?ch,
            ?kind,
            "no rule matched"
        );
        if let Some((text, position)) = self.context.take(ch.len_utf8()) {
            self.pending.push_back(Token::new(kind, text, position));
        }
    }
}

impl<K: TokenKind> Iterator for Lexer<'_, K> {
    type Item = Token<K>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.context.is_eof() {
                return None;
            }
            self.step();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Tokens are never empty, so each remaining byte yields at most one.
        let remaining = self.context.rest().len();
        let lower = self.pending.len() + usize::from(remaining > 0);
        (lower, Some(self.pending.len() + remaining))
    }
}

impl<K: TokenKind> FusedIterator for Lexer<'_, K> {}
