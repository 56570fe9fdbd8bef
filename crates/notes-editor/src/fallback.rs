//! Line-buffered input for terminals without raw key support.
//!
//! The user types whole lines. A line that reads exactly `---SAVE---`
//! (ignoring surrounding whitespace) saves, `---CANCEL---` cancels, and
//! end-of-input saves whatever was typed so far. The typed text replaces
//! the previous content.

use std::io::{BufRead, Write};

use crossterm::{
    queue,
    style::{Print, PrintStyledContent, Stylize},
};
use notes_buffer::LineBuffer;

use crate::{EditorOutcome, EditorResult, InputController};

/// Line that ends input and saves.
pub const SAVE_SENTINEL: &str = "---SAVE---";

/// Line that ends input and discards everything typed.
pub const CANCEL_SENTINEL: &str = "---CANCEL---";

/// Sentinel-driven line input.
pub struct LineInputFallbackController<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> LineInputFallbackController<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    fn print_instructions(&mut self, current: &str, title: &str) -> std::io::Result<()> {
        queue!(
            self.out,
            Print("\n"),
            PrintStyledContent(title.cyan().bold()),
            Print("\n"),
            PrintStyledContent("Multi-line input mode".yellow().bold()),
            Print("\n"),
            PrintStyledContent(
                format!("Enter your content. Type '{SAVE_SENTINEL}' on a new line to save and exit.")
                    .dim()
            ),
            Print("\n"),
            PrintStyledContent(format!("Type '{CANCEL_SENTINEL}' on a new line to cancel.").dim()),
            Print("\n\n"),
        )?;

        if !current.is_empty() {
            queue!(
                self.out,
                PrintStyledContent("Current content:".dim()),
                Print("\n"),
                Print(current),
                Print("\n\n"),
                PrintStyledContent("Enter new content (will replace current content):".dim()),
                Print("\n"),
            )?;
        }
        self.out.flush()
    }
}

impl<R: BufRead, W: Write> InputController for LineInputFallbackController<R, W> {
    fn run(&mut self, buffer: &mut LineBuffer, title: &str) -> EditorResult<EditorOutcome> {
        self.print_instructions(&buffer.text(), title)?;

        let mut accumulated = Vec::new();
        let mut raw = Vec::new();
        loop {
            raw.clear();
            if self.input.read_until(b'\n', &mut raw)? == 0 {
                tracing::debug!(lines = accumulated.len(), "End of input, saving");
                break;
            }
            // Undecodable bytes become U+FFFD instead of ending the session
            let line = String::from_utf8_lossy(&raw);
            let content = line.strip_suffix('\n').unwrap_or(&line);
            let content = content.strip_suffix('\r').unwrap_or(content);

            match content.trim() {
                SAVE_SENTINEL => break,
                CANCEL_SENTINEL => return Ok(EditorOutcome::Cancelled),
                _ => accumulated.push(content.to_owned()),
            }
        }

        let text = accumulated.join("\n");
        *buffer = LineBuffer::from_text(&text);
        Ok(EditorOutcome::Saved(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn run(initial: &str, input: &str) -> (EditorOutcome, LineBuffer, String) {
        let mut buffer = LineBuffer::from_text(initial);
        let mut out = Vec::new();
        let outcome = LineInputFallbackController::new(input.as_bytes(), &mut out)
            .run(&mut buffer, "Editing: note")
            .unwrap();
        (outcome, buffer, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_save_sentinel() {
        let (outcome, buffer, _) = run("", "hello\nworld\n---SAVE---\n");
        assert_eq!(outcome, EditorOutcome::Saved("hello\nworld".into()));
        assert_eq!(buffer.text(), "hello\nworld");
    }

    #[test]
    fn test_cancel_sentinel_discards_text() {
        let (outcome, buffer, _) = run("old", "partial text\n---CANCEL---\n");
        assert_eq!(outcome, EditorOutcome::Cancelled);
        assert_eq!(buffer.text(), "old");
    }

    #[test]
    fn test_end_of_input_saves() {
        let (outcome, _, _) = run("", "only line");
        assert_eq!(outcome, EditorOutcome::Saved("only line".into()));

        let (outcome, _, _) = run("", "only line\n");
        assert_eq!(outcome, EditorOutcome::Saved("only line".into()));
    }

    #[test]
    fn test_empty_input_saves_empty_text() {
        let (outcome, _, _) = run("old content", "");
        assert_eq!(outcome, EditorOutcome::Saved(String::new()));
    }

    #[test]
    fn test_sentinel_matching_is_exact_after_trim() {
        let (outcome, _, _) = run(
            "",
            "see ---SAVE--- here\n---save---\n  ---SAVE---  \nnever read\n",
        );
        assert_eq!(
            outcome,
            EditorOutcome::Saved("see ---SAVE--- here\n---save---".into())
        );
    }

    #[test]
    fn test_lines_kept_verbatim() {
        let (outcome, _, _) = run("", "  indented  \r\n\n\ttab\n---SAVE---\n");
        assert_eq!(
            outcome,
            EditorOutcome::Saved("  indented  \n\n\ttab".into())
        );
    }

    #[test]
    fn test_invalid_utf8_line_is_kept() {
        let mut buffer = LineBuffer::new();
        let outcome = LineInputFallbackController::new(
            &b"kept line\n\xff\xfe bad\nmore\n---SAVE---\n"[..],
            io::sink(),
        )
        .run(&mut buffer, "t")
        .unwrap();
        assert_eq!(
            outcome,
            EditorOutcome::Saved("kept line\n\u{fffd}\u{fffd} bad\nmore".into())
        );
    }

    #[test]
    fn test_instructions_echo_current_content() {
        let (_, _, screen) = run("# Existing", "---CANCEL---\n");
        assert!(screen.contains("Editing: note"));
        assert!(screen.contains(SAVE_SENTINEL));
        assert!(screen.contains(CANCEL_SENTINEL));
        assert!(screen.contains("Current content:"));
        assert!(screen.contains("# Existing"));

        let (_, _, screen) = run("", "---CANCEL---\n");
        assert!(!screen.contains("Current content:"));
    }
}
