//! Logical edit events and their application to a buffer.
//!
//! ## Learning: Enum Variants
//!
//! Each input step, whatever device it came from, is decoded into one
//! `EditEvent`. The buffer only ever sees these values, which keeps key
//! decoding, rendering and mutation independent of each other.

use crate::LineBuffer;

/// A single logical edit instruction derived from one input step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditEvent {
    InsertChar(char),
    Backspace,
    NewLine,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Save,
    Cancel,
    /// Undecodable or unmapped input
    Ignore,
}

/// What the input loop should do after an event was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Continue,
    Save,
    Cancel,
}

impl LineBuffer {
    /// Applies an event to the buffer.
    ///
    /// `Save`, `Cancel` and `Ignore` leave the buffer untouched.
    pub fn apply(&mut self, event: &EditEvent) -> Applied {
        match *event {
            EditEvent::InsertChar(ch) => self.insert_char(ch),
            EditEvent::Backspace => self.backspace(),
            EditEvent::NewLine => self.new_line(),
            EditEvent::MoveUp => self.move_up(),
            EditEvent::MoveDown => self.move_down(),
            EditEvent::MoveLeft => self.move_left(),
            EditEvent::MoveRight => self.move_right(),
            EditEvent::Save => return Applied::Save,
            EditEvent::Cancel => return Applied::Cancel,
            EditEvent::Ignore => {}
        }
        Applied::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_apply_sequence() {
        let mut buffer = LineBuffer::new();
        let events = [
            EditEvent::InsertChar('h'),
            EditEvent::InsertChar('i'),
            EditEvent::NewLine,
            EditEvent::InsertChar('x'),
            EditEvent::MoveUp,
            EditEvent::MoveRight,
            EditEvent::Backspace,
        ];
        for event in &events {
            assert_eq!(buffer.apply(event), Applied::Continue);
        }
        assert_eq!(buffer.text(), "h\nx");
        assert_eq!(buffer.cursor(), Position::new(0, 1));
    }

    #[test]
    fn test_terminal_events_do_not_mutate() {
        let mut buffer = LineBuffer::from("note");
        let before = buffer.clone();
        assert_eq!(buffer.apply(&EditEvent::Save), Applied::Save);
        assert_eq!(buffer.apply(&EditEvent::Cancel), Applied::Cancel);
        assert_eq!(buffer.apply(&EditEvent::Ignore), Applied::Continue);
        assert_eq!(buffer, before);
    }
}
