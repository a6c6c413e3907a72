//! Text position utilities for byte offset and line:column conversions.
//!
//! ## Coordinate Conventions
//!
//! - Lines and columns are **1-indexed** (matching editor conventions)
//! - Byte offsets are **0-indexed**
//! - Columns count Unicode scalar values (chars), not bytes
//! - `\n`, `\r\n` and a lone `\r` each end a line, matching the tokenizer

use crate::span::Span;

// ============================================================================
// Line Index
// ============================================================================

/// Precomputed start offsets of every line in a text.
///
/// Building the index is linear in the text length; each lookup afterwards
/// is a binary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<u32>,
    len: u32,
}

impl LineIndex {
    /// Index the line starts of `content`.
    pub fn new(content: &str) -> Self {
        let bytes = content.as_bytes();
        let mut line_starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    i += 2;
                    line_starts.push(i as u32);
                }
                b'\r' | b'\n' => {
                    i += 1;
                    line_starts.push(i as u32);
                }
                _ => i += 1,
            }
        }
        Self {
            line_starts,
            len: content.len() as u32,
        }
    }

    /// Number of lines. A trailing line break does not open a new line.
    pub fn line_count(&self) -> u32 {
        let count = self.line_starts.len() as u32;
        if self.len == 0 {
            0
        } else if self.line_starts.last() == Some(&self.len) {
            count - 1
        } else {
            count
        }
    }

    /// The 1-indexed line containing `offset`. Offsets past the end map to
    /// the last line.
    pub fn line_of(&self, offset: u32) -> u32 {
        let offset = offset.min(self.len);
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx as u32 + 1,
            Err(idx) => idx as u32,
        }
    }

    /// Byte offset where the 1-indexed `line` starts.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        let idx = line.checked_sub(1)? as usize;
        self.line_starts.get(idx).copied()
    }
}

// ============================================================================
// Char-based Conversions (for &str)
// ============================================================================

/// Convert a byte offset to 1-indexed line and column (Unicode-aware).
///
/// Columns count Unicode scalar values (chars), not bytes.
/// If `offset` exceeds the content length, returns the position at the end
/// of the content.
pub fn byte_offset_to_position(content: &str, offset: u32) -> (u32, u32) {
    let index = LineIndex::new(content);
    let offset = offset.min(content.len() as u32);
    let line = index.line_of(offset);
    let start = index.line_start(line).unwrap_or(0);
    let col = content
        .get(start as usize..offset as usize)
        .map(|prefix| prefix.chars().count() as u32)
        .unwrap_or(0);
    (line, col + 1)
}

/// Convert 1-indexed line and column to a byte offset (Unicode-aware).
///
/// Line/column values of 0 are treated as 1. A column past the end of the
/// line clamps to the line end; a line past the end of the content returns
/// the content length.
pub fn position_to_byte_offset(content: &str, line: u32, col: u32) -> u32 {
    let line = line.max(1);
    let col = col.max(1);
    let Some(span) = line_span(content, line) else {
        return content.len() as u32;
    };
    let text = &content[span.start as usize..span.end as usize];
    text.char_indices()
        .nth((col - 1) as usize)
        .map(|(i, _)| span.start + i as u32)
        .unwrap_or(span.end)
}

// ============================================================================
// Line Utilities
// ============================================================================

/// The span of the 1-indexed `line`, excluding its line break.
pub fn line_span(content: &str, line: u32) -> Option<Span> {
    let index = LineIndex::new(content);
    let start = index.line_start(line)?;
    if start == content.len() as u32 && line > 1 {
        return None;
    }
    let rest = &content.as_bytes()[start as usize..];
    let end = rest
        .iter()
        .position(|&b| b == b'\n' || b == b'\r')
        .map(|p| start + p as u32)
        .unwrap_or(content.len() as u32);
    Some(Span::new(start, end))
}

/// Get the line range spanned by a byte span.
///
/// Returns `(start_line, end_line)` both 1-indexed.
pub fn span_to_line_range(content: &str, span: &Span) -> (u32, u32) {
    let index = LineIndex::new(content);
    let start_line = index.line_of(span.start);
    let end_line = index.line_of(span.end.saturating_sub(1).max(span.start));
    (start_line, end_line)
}

/// Count the number of lines in the content.
pub fn line_count(content: &str) -> u32 {
    LineIndex::new(content).line_count()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_to_position_simple() {
        let content = "def foo():\n    pass\n";
        assert_eq!(byte_offset_to_position(content, 0), (1, 1));
        assert_eq!(byte_offset_to_position(content, 4), (1, 5));
        assert_eq!(byte_offset_to_position(content, 10), (1, 11)); // newline char
        assert_eq!(byte_offset_to_position(content, 11), (2, 1));
    }

    #[test]
    fn offset_to_position_counts_chars() {
        let content = "é = 1";
        assert_eq!(byte_offset_to_position(content, 3), (1, 3));
    }

    #[test]
    fn carriage_returns_end_lines() {
        let content = "a\rb\r\nc";
        assert_eq!(byte_offset_to_position(content, 2), (2, 1));
        assert_eq!(byte_offset_to_position(content, 5), (3, 1));
        assert_eq!(line_count(content), 3);
    }

    #[test]
    fn position_to_offset_simple() {
        let content = "line1\nline2\nline3\n";
        assert_eq!(position_to_byte_offset(content, 1, 1), 0);
        assert_eq!(position_to_byte_offset(content, 1, 5), 4);
        assert_eq!(position_to_byte_offset(content, 2, 1), 6);
        assert_eq!(position_to_byte_offset(content, 3, 1), 12);
        assert_eq!(position_to_byte_offset(content, 2, 99), 11);
        assert_eq!(position_to_byte_offset(content, 99, 1), 18);
    }

    #[test]
    fn roundtrip_offsets() {
        let content = "line1\nline2\nline3\n";
        for offset in 0..content.len() as u32 {
            let (line, col) = byte_offset_to_position(content, offset);
            let recovered = position_to_byte_offset(content, line, col);
            assert_eq!(
                recovered, offset,
                "roundtrip failed for offset {}: got line={}, col={}, recovered={}",
                offset, line, col, recovered
            );
        }
    }

    #[test]
    fn offset_beyond_content() {
        assert_eq!(byte_offset_to_position("short", 100), (1, 6));
    }

    #[test]
    fn empty_content() {
        assert_eq!(byte_offset_to_position("", 0), (1, 1));
        assert_eq!(position_to_byte_offset("", 1, 1), 0);
        assert_eq!(line_count(""), 0);
    }

    #[test]
    fn line_span_excludes_terminator() {
        let content = "one\ntwo\r\nthree";
        assert_eq!(line_span(content, 1), Some(Span::new(0, 3)));
        assert_eq!(line_span(content, 2), Some(Span::new(4, 7)));
        assert_eq!(line_span(content, 3), Some(Span::new(9, 14)));
        assert_eq!(line_span(content, 4), None);
        assert_eq!(line_span(content, 0), None);
    }

    #[test]
    fn span_to_line_range_multi_line() {
        let content = "line1\nline2\nline3\n";
        assert_eq!(span_to_line_range(content, &Span::new(0, 11)), (1, 2));
        assert_eq!(span_to_line_range(content, &Span::new(6, 6)), (2, 2));
    }

    #[test]
    fn line_count_ignores_trailing_break() {
        assert_eq!(line_count("a\nb\n"), 2);
        assert_eq!(line_count("a\nb"), 2);
        assert_eq!(line_count("\n"), 1);
    }
}
