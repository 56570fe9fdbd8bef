//! Screen rendering for the raw-key editor.
//!
//! The screen has three panels:
//!
//! ```text
//! ── Editing: groceries ─────────────────────────────
//! Ctrl+S: Save & Exit | Ctrl+C: Cancel | Arrow keys: Navigate
//! ── Content ────────────────────────────────────────
//!   1 # Groceries
//!   2 milk█
//!   3 ~
//! ───────────────────────────────────────────────────
//! Line 2, Col 5 | 2 lines | 15 chars
//! ```
//!
//! Output goes through `crossterm::queue!`, so it works on any `Write`
//! and tests can render into a `Vec<u8>`.

use std::io::Write;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
};
use notes_buffer::LineBuffer;
use unicode_width::UnicodeWidthStr;

/// Glyph drawn at the cursor position.
pub const CURSOR_GLYPH: char = '█';

/// Key help shown under the title.
pub const INSTRUCTIONS: &str = "Ctrl+S: Save & Exit | Ctrl+C: Cancel | Arrow keys: Navigate";

// Raw mode does not translate `\n`, so every row ends with an explicit CR.
const EOL: &str = "\r\n";

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Content rows drawn even when the buffer is shorter
    pub min_rows: usize,
    /// Upper bound for panel rule width
    pub max_width: usize,
    /// Clear the screen before drawing
    pub clear: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            min_rows: 15,
            max_width: 80,
            clear: true,
        }
    }
}

/// One-line summary: cursor (1-indexed), line count and character count.
pub fn status_line(buffer: &LineBuffer) -> String {
    let cursor = buffer.cursor();
    format!(
        "Line {}, Col {} | {} lines | {} chars",
        cursor.line + 1,
        cursor.column + 1,
        buffer.len_lines(),
        buffer.len_chars()
    )
}

/// Returns `line` with the cursor glyph inserted at character `column`.
pub fn with_cursor(line: &str, column: usize) -> String {
    let mut out = String::with_capacity(line.len() + CURSOR_GLYPH.len_utf8());
    let mut inserted = false;
    for (idx, ch) in line.chars().enumerate() {
        if idx == column {
            out.push(CURSOR_GLYPH);
            inserted = true;
        }
        out.push(ch);
    }
    if !inserted {
        out.push(CURSOR_GLYPH);
    }
    out
}

/// Draws the full editor screen for `buffer`.
pub fn render<W: Write>(
    out: &mut W,
    buffer: &LineBuffer,
    title: &str,
    options: &RenderOptions,
) -> std::io::Result<()> {
    let width = panel_width(buffer, title, options);

    if options.clear {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    }

    // Header
    queue!(
        out,
        PrintStyledContent(rule(Some(title), width).blue()),
        Print(EOL),
        PrintStyledContent(INSTRUCTIONS.dim()),
        Print(EOL),
    )?;

    // Content
    queue!(
        out,
        PrintStyledContent(rule(Some("Content"), width).green()),
        Print(EOL)
    )?;
    let cursor = buffer.cursor();
    for (idx, line) in buffer.lines().iter().enumerate() {
        let number = format!("{:3} ", idx + 1);
        if idx == cursor.line {
            queue!(
                out,
                PrintStyledContent(number.yellow().bold()),
                PrintStyledContent(with_cursor(line, cursor.column).white()),
            )?;
        } else {
            queue!(out, PrintStyledContent(number.dim()), Print(line))?;
        }
        queue!(out, Print(EOL))?;
    }
    for idx in buffer.len_lines()..options.min_rows {
        queue!(
            out,
            PrintStyledContent(format!("{:3} ", idx + 1).dim()),
            Print("~"),
            Print(EOL)
        )?;
    }

    // Status
    queue!(
        out,
        PrintStyledContent(rule(None, width).blue()),
        Print(EOL),
        PrintStyledContent(status_line(buffer).blue()),
        Print(EOL),
    )?;

    out.flush()
}

fn panel_width(buffer: &LineBuffer, title: &str, options: &RenderOptions) -> usize {
    let widest = buffer
        .lines()
        .iter()
        .map(|line| line.width() + 5)
        .chain([title.width() + 4, INSTRUCTIONS.width()])
        .max()
        .unwrap_or(0);
    widest.min(options.max_width)
}

fn rule(label: Option<&str>, width: usize) -> String {
    match label {
        Some(label) => {
            let head = format!("── {label} ");
            let fill = width.saturating_sub(head.width());
            format!("{head}{}", "─".repeat(fill))
        }
        None => "─".repeat(width),
    }
}
