//! Line-oriented text buffer with a single cursor.
//!
//! ## Why a `Vec<String>`?
//!
//! Notes are small. Every edit the editor supports touches one line or
//! splits/joins two neighbouring lines, and rendering walks the lines in
//! order, so a plain vector of lines is both the simplest and the fastest
//! fit.
//!
//! ## Learning: Ownership in Action
//!
//! ```rust
//! use notes_buffer::LineBuffer;
//!
//! let mut buffer = LineBuffer::from("abc");  // buffer OWNS the lines
//! let first = buffer.line(0).unwrap();        // first BORROWS from buffer
//! assert_eq!(first, "abc");
//! buffer.insert_char('!');                    // borrow ended, mutation is fine
//! assert_eq!(buffer.text(), "!abc");
//! ```

use crate::cursor::{byte_offset, char_len};
use crate::{BufferError, BufferResult, Position};

/// An ordered list of lines plus a cursor.
///
/// The buffer is never empty and the cursor is always in range; see the
/// crate docs for the exact invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    /// Lines in top-to-bottom order, without line terminators
    lines: Vec<String>,

    /// Current cursor position
    cursor: Position,
}

impl LineBuffer {
    /// Creates a buffer holding a single empty line.
    ///
    /// # Example
    /// ```
    /// use notes_buffer::LineBuffer;
    ///
    /// let buffer = LineBuffer::new();
    /// assert_eq!(buffer.len_lines(), 1);
    /// assert_eq!(buffer.text(), "");
    /// ```
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::ZERO,
        }
    }

    /// Splits `text` on `'\n'` into a buffer with the cursor at the start.
    ///
    /// Carriage returns stay part of the line content so that
    /// [`text`](Self::text) reproduces the input byte for byte.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_owned).collect(),
            cursor: Position::ZERO,
        }
    }

    /// Builds a buffer from explicit lines and a cursor, validating both
    /// invariants.
    pub fn from_lines(lines: Vec<String>, cursor: Position) -> BufferResult<Self> {
        if lines.is_empty() {
            return Err(BufferError::Empty);
        }
        let in_bounds = lines
            .get(cursor.line)
            .is_some_and(|line| cursor.column <= char_len(line));
        if !in_bounds {
            return Err(BufferError::PositionOutOfBounds {
                line: cursor.line,
                column: cursor.column,
            });
        }
        Ok(Self { lines, cursor })
    }

    // ==================== Access ====================

    /// Returns all lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns a specific line (0-indexed).
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// Returns the cursor position.
    #[inline]
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Returns the number of lines (always at least one).
    #[inline]
    pub fn len_lines(&self) -> usize {
        self.lines.len()
    }

    /// Returns the number of characters, not counting line breaks.
    pub fn len_chars(&self) -> usize {
        self.lines.iter().map(|l| char_len(l)).sum()
    }

    /// Length of a line in characters, or 0 if the line does not exist.
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map_or(0, |l| char_len(l))
    }

    /// Joins the lines with `'\n'`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Consumes the buffer and returns the joined text.
    pub fn into_text(self) -> String {
        self.text()
    }

    fn current_line_len(&self) -> usize {
        self.line_len(self.cursor.line)
    }

    fn is_last_line(&self) -> bool {
        self.cursor.line + 1 == self.lines.len()
    }

    // ==================== Editing ====================

    /// Inserts `ch` at the cursor and advances the column by one.
    ///
    /// Line breaks and other control characters are ignored; a line break
    /// must go through [`new_line`](Self::new_line) so lines never contain
    /// an embedded `'\n'`. Tabs are accepted.
    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() && ch != '\t' {
            return;
        }
        let Position { line, column } = self.cursor;
        let text = &mut self.lines[line];
        let at = byte_offset(text, column);
        text.insert(at, ch);
        self.cursor.column += 1;
    }

    /// Deletes the character before the cursor, joining with the previous
    /// line when the cursor is at column 0.
    pub fn backspace(&mut self) {
        let Position { line, column } = self.cursor;
        if column > 0 {
            let text = &mut self.lines[line];
            let at = byte_offset(text, column - 1);
            text.remove(at);
            self.cursor.column -= 1;
        } else if line > 0 {
            let current = self.lines.remove(line);
            let previous = &mut self.lines[line - 1];
            let join_column = char_len(previous);
            previous.push_str(&current);
            self.cursor = Position::new(line - 1, join_column);
        }
    }

    /// Splits the current line at the cursor; the tail becomes a new line
    /// directly below and the cursor moves to its start.
    pub fn new_line(&mut self) {
        let Position { line, column } = self.cursor;
        let text = &mut self.lines[line];
        let at = byte_offset(text, column);
        let tail = text.split_off(at);
        self.lines.insert(line + 1, tail);
        self.cursor = Position::new(line + 1, 0);
    }

    // ==================== Movement ====================

    /// Moves up one line, clamping the column to the new line's length.
    ///
    /// The original column is not remembered: moving back down lands on
    /// the clamped column.
    pub fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.column = self.cursor.column.min(self.current_line_len());
        }
    }

    /// Moves down one line, clamping the column to the new line's length.
    pub fn move_down(&mut self) {
        if !self.is_last_line() {
            self.cursor.line += 1;
            self.cursor.column = self.cursor.column.min(self.current_line_len());
        }
    }

    /// Moves left one character, wrapping to the end of the previous line.
    pub fn move_left(&mut self) {
        if self.cursor.column > 0 {
            self.cursor.column -= 1;
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.column = self.current_line_len();
        }
    }

    /// Moves right one character, wrapping to the start of the next line.
    pub fn move_right(&mut self) {
        if self.cursor.column < self.current_line_len() {
            self.cursor.column += 1;
        } else if !self.is_last_line() {
            self.cursor = Position::new(self.cursor.line + 1, 0);
        }
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for LineBuffer {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for LineBuffer {
    fn from(text: String) -> Self {
        Self::from_text(&text)
    }
}
