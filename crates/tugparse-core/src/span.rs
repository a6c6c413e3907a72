//! Byte spans into source text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte offsets into source text.
///
/// Spans are half-open intervals: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: u32,
    /// End byte offset (exclusive).
    pub end: u32,
}

impl Span {
    /// Create a new span.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: u32, end: u32) -> Self {
        assert!(
            start <= end,
            "Span start ({}) must be <= end ({})",
            start,
            end
        );
        Span { start, end }
    }

    /// An empty span positioned at `offset`.
    pub fn empty(offset: u32) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span overlaps with another.
    ///
    /// Two spans overlap if they share any byte positions.
    /// Adjacent spans (one ends where another starts) do NOT overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check if this span contains another span entirely.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Check if `offset` falls inside the span.
    pub fn contains_offset(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end
    }

    /// The smallest span covering both `self` and `other`.
    #[must_use]
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// The text this span covers, or `None` if it is out of bounds or not on
    /// a character boundary.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start as usize..self.end as usize)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_basics() {
        let span = Span::new(2, 7);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(Span::empty(4).is_empty());
        assert_eq!(span.to_string(), "[2, 7)");
    }

    #[test]
    #[should_panic(expected = "must be <= end")]
    fn span_rejects_inverted_bounds() {
        let _ = Span::new(5, 1);
    }

    #[test]
    fn span_containment_and_overlap() {
        let outer = Span::new(0, 10);
        let inner = Span::new(3, 5);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.contains(&Span::empty(10)));

        assert!(Span::new(0, 5).overlaps(&Span::new(4, 8)));
        assert!(!Span::new(0, 5).overlaps(&Span::new(5, 8)));

        assert!(inner.contains_offset(3));
        assert!(!inner.contains_offset(5));
    }

    #[test]
    fn span_cover_and_slice() {
        let joined = Span::new(4, 6).cover(Span::new(1, 2));
        assert_eq!(joined, Span::new(1, 6));
        assert_eq!(Span::new(1, 4).slice("abcdef"), Some("bcd"));
        assert_eq!(Span::new(1, 40).slice("abcdef"), None);
    }

    #[test]
    fn span_serializes_as_offsets() {
        let json = serde_json::to_string(&Span::new(1, 3)).expect("serialize");
        assert_eq!(json, r#"{"start":1,"end":3}"#);
        let back: Span = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Span::new(1, 3));
    }
}
