//! Raw-key input: one keystroke at a time, re-rendering after each.

use std::io::{self, Read, Write};

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use notes_buffer::{Applied, EditEvent, LineBuffer};

use crate::keymap::{CONSOLE_PREFIXES, decode_bytes, decode_key};
use crate::render::{RenderOptions, render};
use crate::{EditorOutcome, EditorResult, InputController};

/// A source of decoded key events.
pub trait KeySource {
    /// Blocks until the next event is available.
    ///
    /// Returns `None` once the source is exhausted.
    fn next_event(&mut self) -> io::Result<Option<EditEvent>>;
}

/// The interactive terminal, in raw mode for as long as the value lives.
///
/// Dropping it restores cooked mode and the main screen, including when
/// the editor loop returns early with an error.
pub struct CrosstermTerminal {
    _private: (),
}

impl CrosstermTerminal {
    /// Switches the terminal to raw mode on the alternate screen.
    pub fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let term = Self { _private: () };
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(term)
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl KeySource for CrosstermTerminal {
    fn next_event(&mut self) -> io::Result<Option<EditEvent>> {
        loop {
            match event::read()? {
                Event::Key(key) => return Ok(Some(decode_key(&key))),
                // Redraw at the new size
                Event::Resize(..) => return Ok(Some(EditEvent::Ignore)),
                _ => continue,
            }
        }
    }
}

/// Key source over a raw byte stream.
///
/// Bytes are grouped into key units (an escape sequence, a console prefix
/// pair, or the bytes of one UTF-8 character) and each unit is decoded
/// with [`decode_bytes`].
pub struct ByteKeys<R> {
    reader: R,
    /// Byte read ahead after a bare ESC, starting the next unit
    pending: Option<u8>,
}

impl<R: Read> ByteKeys<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: None,
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pending.take() {
            return Ok(Some(byte));
        }
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Reads the bytes of one key unit.
    fn next_unit(&mut self) -> io::Result<Option<Vec<u8>>> {
        let Some(first) = self.next_byte()? else {
            return Ok(None);
        };
        let mut unit = vec![first];

        if first == 0x1b {
            match self.next_byte()? {
                Some(second @ (b'[' | b'O')) => {
                    unit.push(second);
                    // Parameter bytes, then one final byte in 0x40..=0x7e
                    while let Some(byte) = self.next_byte()? {
                        unit.push(byte);
                        if (0x40..=0x7e).contains(&byte) {
                            break;
                        }
                    }
                }
                // A lone ESC; the byte after it is a key of its own
                Some(other) => self.pending = Some(other),
                None => {}
            }
            return Ok(Some(unit));
        }

        let continuation = match first {
            0xc0..=0xdf => 1,
            0xe0..=0xef => 2,
            0xf0..=0xf7 => 3,
            _ => 0,
        };
        let console_prefix = CONSOLE_PREFIXES.contains(&first);

        for idx in 0..continuation.max(usize::from(console_prefix)) {
            let Some(byte) = self.next_byte()? else {
                break;
            };
            unit.push(byte);
            // A console arrow pair is a prefix plus one ASCII byte
            if idx == 0 && console_prefix && byte.is_ascii() {
                break;
            }
        }
        Ok(Some(unit))
    }
}

impl<R: Read> KeySource for ByteKeys<R> {
    fn next_event(&mut self) -> io::Result<Option<EditEvent>> {
        Ok(self.next_unit()?.map(|unit| decode_bytes(&unit)))
    }
}

/// Drives an edit loop one key at a time.
///
/// Each iteration renders the buffer, waits for one key, and applies the
/// decoded event. Rendering and mutation never overlap.
pub struct RawInputController<K, W> {
    keys: K,
    out: W,
    options: RenderOptions,
}

impl<K: KeySource, W: Write> RawInputController<K, W> {
    pub fn new(keys: K, out: W) -> Self {
        Self {
            keys,
            out,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the output writer.
    pub fn into_output(self) -> W {
        self.out
    }
}

impl<K: KeySource, W: Write> InputController for RawInputController<K, W> {
    fn run(&mut self, buffer: &mut LineBuffer, title: &str) -> EditorResult<EditorOutcome> {
        loop {
            render(&mut self.out, buffer, title, &self.options)?;

            let Some(event) = self.keys.next_event()? else {
                tracing::debug!("Key source closed, cancelling edit");
                return Ok(EditorOutcome::Cancelled);
            };
            tracing::trace!(?event, cursor = %buffer.cursor(), "key");

            match buffer.apply(&event) {
                Applied::Continue => {}
                Applied::Save => return Ok(EditorOutcome::Saved(buffer.text())),
                Applied::Cancel => return Ok(EditorOutcome::Cancelled),
            }
        }
    }
}
