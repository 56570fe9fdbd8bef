//! Cursor position type.
//!
//! ## Learning: Newtype Pattern
//!
//! `Position` wraps line/column coordinates instead of passing a bare
//! `(usize, usize)` around, so a line can never be swapped for a column
//! by accident.

use serde::{Deserialize, Serialize};

/// A cursor position in the line buffer.
///
/// Both line and column are 0-indexed. The column counts characters,
/// not bytes, so multi-byte text never splits a code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed, in characters not bytes)
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position at the start of the document.
    pub const ZERO: Position = Position { line: 0, column: 0 };
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.column.cmp(&other.column),
            other => other,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display as 1-indexed for user-facing output
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Converts a character column into a byte offset within `line`.
///
/// Columns past the end map to `line.len()`.
pub(crate) fn byte_offset(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}

/// Length of a line in characters.
#[inline]
pub(crate) fn char_len(line: &str) -> usize {
    line.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        let p1 = Position::new(1, 5);
        let p2 = Position::new(2, 3);
        let p3 = Position::new(1, 10);

        assert!(p1 < p2);
        assert!(p1 < p3);
        assert!(p2 > p3);
        assert_eq!(p1.max(p3), p3);
    }

    #[test]
    fn test_position_display_is_one_indexed() {
        assert_eq!(Position::new(0, 0).to_string(), "1:1");
        assert_eq!(Position::new(4, 9).to_string(), "5:10");
    }

    #[test]
    fn test_byte_offset_multibyte() {
        let line = "héllo";
        assert_eq!(byte_offset(line, 0), 0);
        assert_eq!(byte_offset(line, 2), 3);
        assert_eq!(byte_offset(line, 5), line.len());
        assert_eq!(byte_offset(line, 99), line.len());
        assert_eq!(char_len(line), 5);
    }
}
