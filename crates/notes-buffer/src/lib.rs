//! # Notes Buffer
//!
//! The in-memory text model behind the note editor: a list of lines plus a
//! 2-D cursor.
//!
//! ## Invariants
//!
//! Every operation in this crate preserves two invariants:
//! - the buffer always holds at least one line
//! - the cursor sits inside the buffer: `line < len_lines()` and
//!   `column <= line_len(line)`
//!
//! ## Learning: Ownership & Borrowing
//! - `LineBuffer` owns its lines (`Vec<String>`)
//! - Accessors like `line()` return borrowed `&str`
//! - Edits require `&mut self`, so only one owner can mutate at a time

mod buffer;
mod cursor;
mod event;

pub use buffer::LineBuffer;
pub use cursor::Position;
pub use event::{Applied, EditEvent};

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur when building a buffer from parts
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("Position {line}:{column} is out of bounds")]
    PositionOutOfBounds { line: usize, column: usize },

    #[error("A buffer must contain at least one line")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = LineBuffer::new();
        assert_eq!(buffer.len_lines(), 1);
        assert_eq!(buffer.cursor(), Position::ZERO);
        assert_eq!(buffer.text(), "");
    }

    #[test]
    fn test_buffer_from_string() {
        let buffer = LineBuffer::from("Hello, World!");
        assert_eq!(buffer.len_chars(), 13);
        assert_eq!(buffer.text(), "Hello, World!");
    }

    #[test]
    fn test_typing_a_short_note() {
        let mut buffer = LineBuffer::new();
        for ch in "Hello".chars() {
            buffer.insert_char(ch);
        }
        buffer.new_line();
        for ch in "World".chars() {
            buffer.insert_char(ch);
        }
        assert_eq!(buffer.text(), "Hello\nWorld");
        assert_eq!(buffer.cursor(), Position::new(1, 5));
    }

    #[test]
    fn test_error_messages() {
        let err = BufferError::PositionOutOfBounds { line: 2, column: 7 };
        assert_eq!(err.to_string(), "Position 2:7 is out of bounds");
        assert_eq!(
            BufferError::Empty.to_string(),
            "A buffer must contain at least one line"
        );
    }
}
