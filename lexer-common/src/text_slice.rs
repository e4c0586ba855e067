use std::fmt;
use std::ops::{Deref, Range};
use std::sync::Arc;

/// Immutable slice of a shared source buffer.
///
/// Every token keeps the buffer alive through an `Arc<str>`, so tokens can be
/// cloned and moved freely without borrowing the input. Derefs to `str`.
#[derive(Clone)]
pub struct TextSlice {
    buffer: Arc<str>,
    start: usize,
    end: usize,
}

impl TextSlice {
    /// Creates a new slice from the given shared buffer and byte range.
    pub fn new(buffer: Arc<str>, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= buffer.len());
        debug_assert!(buffer.is_char_boundary(start) && buffer.is_char_boundary(end));
        Self { buffer, start, end }
    }

    /// Creates a slice that covers the entire buffer.
    pub fn from_arc(buffer: Arc<str>) -> Self {
        let end = buffer.len();
        Self {
            buffer,
            start: 0,
            end,
        }
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_str(&self) -> &str {
        &self.buffer[self.start..self.end]
    }

    /// Returns the underlying shared buffer.
    pub fn buffer(&self) -> Arc<str> {
        Arc::clone(&self.buffer)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Byte range of the slice within its buffer.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Debug for TextSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}..{}", self.as_str(), self.start, self.end)
    }
}

impl fmt::Display for TextSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Deref for TextSlice {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for TextSlice {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<&str> for TextSlice {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<TextSlice> for &str {
    fn eq(&self, other: &TextSlice) -> bool {
        *self == other.as_str()
    }
}

/// Two slices are equal when they cover the same range with the same text,
/// whether or not they share a buffer.
impl PartialEq for TextSlice {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end && self.as_str() == other.as_str()
    }
}

impl Eq for TextSlice {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_of_shared_buffer() {
        let buffer: Arc<str> = Arc::from("$a = 1;");
        let slice = TextSlice::new(buffer.clone(), 0, 2);
        assert_eq!(slice, "$a");
        assert_eq!(slice.len(), 2);
        assert_eq!(slice.range(), 0..2);
        assert!(Arc::ptr_eq(&slice.buffer(), &buffer));
    }

    #[test]
    fn test_empty_slice() {
        let slice = TextSlice::new(Arc::from("abc"), 3, 3);
        assert!(slice.is_empty());
        assert_eq!(slice.as_str(), "");
    }

    #[test]
    fn test_from_arc_covers_everything() {
        let slice = TextSlice::from_arc(Arc::from("LOADAX 0"));
        assert_eq!(slice.to_string(), "LOADAX 0");
        assert_eq!(format!("{:?}", slice), "\"LOADAX 0\"@0..8");
    }

    #[test]
    fn test_equality_ignores_buffer_identity() {
        let a = TextSlice::new(Arc::from("x y"), 2, 3);
        let b = TextSlice::new(Arc::from("x y"), 2, 3);
        let c = TextSlice::new(Arc::from("y x"), 0, 1);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
