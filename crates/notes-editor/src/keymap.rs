//! Key decoding.
//!
//! ## Learning: Pure Functions at the Edge
//!
//! Turning input into an [`EditEvent`] is kept free of rendering and
//! mutation, so every binding can be tested without a terminal.
//!
//! | Key              | Event        |
//! |------------------|--------------|
//! | Ctrl+C           | `Cancel`     |
//! | Ctrl+S           | `Save`       |
//! | Backspace        | `Backspace`  |
//! | Enter            | `NewLine`    |
//! | Arrow keys       | `Move*`      |
//! | printable char   | `InsertChar` |
//! | anything else    | `Ignore`     |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use notes_buffer::EditEvent;

const CTRL_C: u8 = 0x03;
const CTRL_S: u8 = 0x13;
const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7f;
const ESC: u8 = 0x1b;

/// Prefix bytes used by PC console key codes for arrow keys.
pub(crate) const CONSOLE_PREFIXES: [u8; 2] = [0xe0, 0x00];

/// Decodes a crossterm key event.
pub fn decode_key(key: &KeyEvent) -> EditEvent {
    if key.kind == KeyEventKind::Release {
        return EditEvent::Ignore;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') if ctrl => EditEvent::Cancel,
        KeyCode::Char('s') | KeyCode::Char('S') if ctrl => EditEvent::Save,
        KeyCode::Char(_) if ctrl || alt => EditEvent::Ignore,
        KeyCode::Char(ch) if !ch.is_control() => EditEvent::InsertChar(ch),
        KeyCode::Tab => EditEvent::InsertChar('\t'),
        KeyCode::Backspace => EditEvent::Backspace,
        KeyCode::Enter => EditEvent::NewLine,
        KeyCode::Up => EditEvent::MoveUp,
        KeyCode::Down => EditEvent::MoveDown,
        KeyCode::Left => EditEvent::MoveLeft,
        KeyCode::Right => EditEvent::MoveRight,
        _ => EditEvent::Ignore,
    }
}

/// Decodes one raw key unit: a single byte, an escape sequence, a
/// console prefix pair, or the UTF-8 bytes of one character.
pub fn decode_bytes(bytes: &[u8]) -> EditEvent {
    match bytes {
        [CTRL_C] => EditEvent::Cancel,
        [CTRL_S] => EditEvent::Save,
        [BACKSPACE] | [DELETE] => EditEvent::Backspace,
        [b'\r'] | [b'\n'] | [b'\r', b'\n'] => EditEvent::NewLine,
        [b'\t'] => EditEvent::InsertChar('\t'),
        [ESC, b'[' | b'O', dir] => match dir {
            b'A' => EditEvent::MoveUp,
            b'B' => EditEvent::MoveDown,
            b'C' => EditEvent::MoveRight,
            b'D' => EditEvent::MoveLeft,
            _ => EditEvent::Ignore,
        },
        [prefix, dir] if CONSOLE_PREFIXES.contains(prefix) => match dir {
            b'H' => EditEvent::MoveUp,
            b'P' => EditEvent::MoveDown,
            b'K' => EditEvent::MoveLeft,
            b'M' => EditEvent::MoveRight,
            _ => EditEvent::Ignore,
        },
        _ => decode_char(bytes),
    }
}

fn decode_char(bytes: &[u8]) -> EditEvent {
    let Ok(text) = std::str::from_utf8(bytes) else {
        return EditEvent::Ignore;
    };
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if !ch.is_control() => EditEvent::InsertChar(ch),
        _ => EditEvent::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            decode_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            EditEvent::Cancel
        );
        assert_eq!(
            decode_key(&key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            EditEvent::Save
        );
        assert_eq!(
            decode_key(&key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            EditEvent::Ignore
        );
        assert_eq!(
            decode_key(&key(KeyCode::Char('s'), KeyModifiers::ALT)),
            EditEvent::Ignore
        );
    }

    #[test]
    fn test_editing_keys() {
        assert_eq!(
            decode_key(&key(KeyCode::Backspace, KeyModifiers::NONE)),
            EditEvent::Backspace
        );
        assert_eq!(
            decode_key(&key(KeyCode::Enter, KeyModifiers::NONE)),
            EditEvent::NewLine
        );
        assert_eq!(
            decode_key(&key(KeyCode::Left, KeyModifiers::NONE)),
            EditEvent::MoveLeft
        );
        assert_eq!(
            decode_key(&key(KeyCode::Down, KeyModifiers::NONE)),
            EditEvent::MoveDown
        );
        assert_eq!(
            decode_key(&key(KeyCode::F(5), KeyModifiers::NONE)),
            EditEvent::Ignore
        );
    }

    #[test]
    fn test_printable_chars() {
        assert_eq!(
            decode_key(&key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            EditEvent::InsertChar('A')
        );
        assert_eq!(
            decode_key(&key(KeyCode::Char('ß'), KeyModifiers::NONE)),
            EditEvent::InsertChar('ß')
        );
    }

    #[test]
    fn test_release_events_ignored() {
        let mut release = key(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(decode_key(&release), EditEvent::Ignore);
    }

    #[test]
    fn test_decode_single_bytes() {
        assert_eq!(decode_bytes(&[0x03]), EditEvent::Cancel);
        assert_eq!(decode_bytes(&[0x13]), EditEvent::Save);
        assert_eq!(decode_bytes(&[0x08]), EditEvent::Backspace);
        assert_eq!(decode_bytes(&[0x7f]), EditEvent::Backspace);
        assert_eq!(decode_bytes(b"\r"), EditEvent::NewLine);
        assert_eq!(decode_bytes(b"q"), EditEvent::InsertChar('q'));
        assert_eq!(decode_bytes(&[0x01]), EditEvent::Ignore);
    }

    #[test]
    fn test_decode_arrow_sequences() {
        assert_eq!(decode_bytes(b"\x1b[A"), EditEvent::MoveUp);
        assert_eq!(decode_bytes(b"\x1b[B"), EditEvent::MoveDown);
        assert_eq!(decode_bytes(b"\x1b[C"), EditEvent::MoveRight);
        assert_eq!(decode_bytes(b"\x1b[D"), EditEvent::MoveLeft);
        assert_eq!(decode_bytes(b"\x1bOA"), EditEvent::MoveUp);
        assert_eq!(decode_bytes(b"\x1b[Z"), EditEvent::Ignore);

        assert_eq!(decode_bytes(&[0xe0, b'H']), EditEvent::MoveUp);
        assert_eq!(decode_bytes(&[0xe0, b'P']), EditEvent::MoveDown);
        assert_eq!(decode_bytes(&[0xe0, b'K']), EditEvent::MoveLeft);
        assert_eq!(decode_bytes(&[0xe0, b'M']), EditEvent::MoveRight);
        assert_eq!(decode_bytes(&[0x00, b'H']), EditEvent::MoveUp);
        assert_eq!(decode_bytes(&[0xe0, b'S']), EditEvent::Ignore);
    }

    #[test]
    fn test_decode_utf8_and_garbage() {
        assert_eq!(decode_bytes("é".as_bytes()), EditEvent::InsertChar('é'));
        assert_eq!(decode_bytes("€".as_bytes()), EditEvent::InsertChar('€'));
        assert_eq!(decode_bytes(&[0xff]), EditEvent::Ignore);
        assert_eq!(decode_bytes(&[0xc3]), EditEvent::Ignore);
        assert_eq!(decode_bytes(b"ab"), EditEvent::Ignore);
        assert_eq!(decode_bytes(&[]), EditEvent::Ignore);
    }
}
