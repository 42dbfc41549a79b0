//! Byte spans into the original input
//!
//! Every run and token remembers where it came from in the text handed to
//! the engine, so a viewer can map results back onto the source.

use serde::Serialize;

/// A half-open byte range `[start, end)` in the original text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct CharSpan {
    /// Start position (inclusive)
    pub start: usize,
    /// End position (exclusive)
    pub end: usize,
}

impl CharSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Borrow the covered slice of `text`, if the span lies on char boundaries
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basics() {
        let span = CharSpan::new(2, 5);
        assert_eq!(span.len(), 3);
        assert!(span.contains(2));
        assert!(!span.contains(5));
        assert!(CharSpan::new(4, 4).is_empty());
    }

    #[test]
    fn test_slice_respects_char_boundaries() {
        let text = "ab世界";
        assert_eq!(CharSpan::new(2, 5).slice(text), Some("世"));
        assert_eq!(CharSpan::new(2, 4).slice(text), None);
    }
}
