use crate::cursor::Cursor;
use crate::mode::{ModeId, ModeStack, Transition};
use lexer_common::{Checkpoint, Position, TextSlice};

/// What a rule can see and change while it matches: the cursor and the mode
/// stack.
pub trait LexContext {
    fn cursor(&self) -> &Cursor;

    fn cursor_mut(&mut self) -> &mut Cursor;

    fn mode_stack(&self) -> &ModeStack;

    fn mode_stack_mut(&mut self) -> &mut ModeStack;

    fn position(&self) -> Position {
        self.cursor().position()
    }

    fn offset(&self) -> usize {
        self.cursor().offset()
    }

    fn is_eof(&self) -> bool {
        self.cursor().is_eof()
    }

    fn peek(&self) -> Option<char> {
        self.cursor().peek()
    }

    /// Unconsumed input.
    fn rest(&self) -> &str {
        self.cursor().rest()
    }

    fn advance(&mut self) -> Option<char> {
        self.cursor_mut().advance()
    }

    /// Consumes `len` bytes, returning the slice and where it started.
    /// Returns `None` for an empty span.
    fn take(&mut self, len: usize) -> Option<(TextSlice, Position)> {
        if len == 0 {
            return None;
        }
        let position = self.position();
        let text = self.cursor_mut().advance_bytes(len);
        Some((text, position))
    }

    fn consume_while<F>(&mut self, predicate: F) -> TextSlice
    where
        F: FnMut(char) -> bool,
    {
        self.cursor_mut().consume_while(predicate)
    }

    fn checkpoint(&self) -> Checkpoint {
        self.cursor().checkpoint()
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor_mut().restore(checkpoint);
    }

    /// The active mode.
    fn mode(&self) -> ModeId {
        self.mode_stack().current()
    }

    /// Applies a transition and reports whether the stack changed.
    fn apply_transition(&mut self, transition: Transition) -> bool {
        self.mode_stack_mut().apply(transition)
    }
}

/// The context every [`Lexer`](crate::Lexer) scans with.
#[derive(Debug, Clone)]
pub struct ScanContext {
    cursor: Cursor,
    modes: ModeStack,
}

impl ScanContext {
    pub fn with_cursor(cursor: Cursor, root: ModeId) -> Self {
        Self {
            cursor,
            modes: ModeStack::new(root),
        }
    }
}

impl LexContext for ScanContext {
    fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    fn mode_stack(&self) -> &ModeStack {
        &self.modes
    }

    fn mode_stack_mut(&mut self) -> &mut ModeStack {
        &mut self.modes
    }
}
