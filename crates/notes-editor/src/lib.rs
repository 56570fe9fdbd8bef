//! # Notes Editor
//!
//! A small interactive editor that runs inside the terminal.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                EditorSession                  │
//! │   owns the LineBuffer, probes the terminal   │
//! │                     │                         │
//! │        ┌────────────┴─────────────┐           │
//! │  RawInputController     LineInputFallback     │
//! │  key -> EditEvent       sentinel lines        │
//! │  render after each key  ---SAVE--- / ---CANCEL---
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Both controllers implement [`InputController`], so the session picks
//! one once at start-up and never branches on the platform again.

pub mod config;
pub mod fallback;
pub mod keymap;
pub mod raw;
pub mod render;
pub mod session;

pub use config::{EditorConfig, InputMode};
pub use fallback::{CANCEL_SENTINEL, LineInputFallbackController, SAVE_SENTINEL};
pub use keymap::{decode_bytes, decode_key};
pub use raw::{ByteKeys, CrosstermTerminal, KeySource, RawInputController};
pub use render::RenderOptions;
pub use session::{EditorSession, raw_input_available, wants_raw_input};

use notes_buffer::LineBuffer;

/// Terminal result of one editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    /// The user saved; holds the lines joined with `'\n'`
    Saved(String),
    /// The user cancelled; the caller must not change anything
    Cancelled,
}

impl EditorOutcome {
    /// Returns the saved text, if any.
    pub fn saved_text(&self) -> Option<&str> {
        match self {
            EditorOutcome::Saved(text) => Some(text),
            EditorOutcome::Cancelled => None,
        }
    }
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors raised while driving the terminal.
///
/// Malformed key input is never an error; it decodes to
/// [`EditEvent::Ignore`](notes_buffer::EditEvent::Ignore).
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Terminal IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Drives one editing session over a buffer.
///
/// ## Learning: Traits as Strategy
///
/// Implementations differ only in how they obtain input. The session
/// holds a `&mut dyn InputController` and does not care which one it got.
pub trait InputController {
    /// Runs until the user saves or cancels.
    fn run(&mut self, buffer: &mut LineBuffer, title: &str) -> EditorResult<EditorOutcome>;
}
