use lexer_common::{Checkpoint, Position, TextSlice};
use std::sync::Arc;

/// A cursor over the source text.
///
/// The buffer is shared with every token produced from it, so slicing is
/// cheap and tokens outlive the lexer.
#[derive(Debug, Clone)]
pub struct Cursor {
    buffer: Arc<str>,
    current: usize,
    position: Position,
}

impl Cursor {
    /// Creates a cursor at the start of `input`. The text is moved into a
    /// fresh shared buffer.
    pub fn new<S: Into<String>>(input: S) -> Self {
        let input: String = input.into();
        Self::with_arc(Arc::from(input))
    }

    /// Scans a buffer that is already shared.
    pub fn with_arc(buffer: Arc<str>) -> Self {
        Self {
            buffer,
            current: 0,
            position: Position::new(),
        }
    }

    /// Line, column and offset of the next character.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Byte offset of the next character.
    pub fn offset(&self) -> usize {
        self.current
    }

    /// True once every byte has been consumed.
    pub fn is_eof(&self) -> bool {
        self.current >= self.buffer.len()
    }

    /// The next character, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Unconsumed input as a plain string slice.
    pub fn rest(&self) -> &str {
        &self.buffer[self.current..]
    }

    /// Unconsumed input as a shared slice.
    pub fn remaining(&self) -> TextSlice {
        self.slice(self.current, self.buffer.len())
    }

    /// Shared slice of the buffer between two byte offsets.
    pub fn slice(&self, start: usize, end: usize) -> TextSlice {
        TextSlice::new(Arc::clone(&self.buffer), start, end)
    }

    /// Consumes one character and updates the position.
    ///
    /// Returns `None` at the end of input; the cursor does not move then.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position.step(ch);
        self.current += ch.len_utf8();
        Some(ch)
    }

    /// Advances the cursor by `len` bytes and returns the consumed slice.
    ///
    /// `len` must end on a character boundary; patterns always report match
    /// lengths that do.
    pub fn advance_bytes(&mut self, len: usize) -> TextSlice {
        let start = self.current;
        let target = (start + len).min(self.buffer.len());
        while self.current < target {
            if self.advance().is_none() {
                break;
            }
        }
        self.slice(start, self.current)
    }

    /// Longest run of characters accepted by `predicate`.
    pub fn consume_while<F>(&mut self, mut predicate: F) -> TextSlice
    where
        F: FnMut(char) -> bool,
    {
        let start = self.current;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.advance();
        }
        self.slice(start, self.current)
    }

    /// Saves the offset and position so a failed match can be undone.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.current, self.position)
    }

    /// Moves back to a saved [`Checkpoint`]. Line and column are restored
    /// as well, no rescanning happens.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.current = checkpoint.offset();
        self.position = checkpoint.position();
    }
}
