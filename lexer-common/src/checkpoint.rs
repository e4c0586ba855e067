use crate::Position;

/// Saved cursor state used to rewind after a failed match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    offset: usize,
    position: Position,
}

impl Checkpoint {
    /// Creates a new checkpoint at the given byte offset and position.
    pub fn new(offset: usize, position: Position) -> Self {
        Self { offset, position }
    }

    /// Byte offset stored in this checkpoint.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn position(&self) -> Position {
        self.position
    }
}
