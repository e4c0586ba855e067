use crate::traits::TokenKind;
use lexer_common::{Position, TextSlice};
use std::ops::Range;

/// A classified span of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<K> {
    pub kind: K,
    pub text: TextSlice,
    pub position: Position,
}

impl<K: TokenKind> Token<K> {
    pub fn new(kind: K, text: TextSlice, position: Position) -> Self {
        Self {
            kind,
            text,
            position,
        }
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Byte range in the source.
    pub fn span(&self) -> Range<usize> {
        self.text.range()
    }

    /// The `(category, text)` pair hosts usually want.
    pub fn pair(&self) -> (K, &str) {
        (self.kind, self.text())
    }
}
