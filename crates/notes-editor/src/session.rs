//! Editor session: owns the buffer and picks an input controller.

use std::io::{self, IsTerminal};

use notes_buffer::LineBuffer;

use crate::config::InputMode;
use crate::fallback::LineInputFallbackController;
use crate::raw::{CrosstermTerminal, RawInputController};
use crate::render::RenderOptions;
use crate::{EditorOutcome, EditorResult, InputController};

/// One edit of one note.
///
/// # Example
///
/// ```no_run
/// use notes_editor::{EditorOutcome, EditorSession};
///
/// match EditorSession::new("# Groceries\n", "Editing: groceries").run()? {
///     EditorOutcome::Saved(text) => println!("{text}"),
///     EditorOutcome::Cancelled => println!("no changes"),
/// }
/// # Ok::<(), notes_editor::EditorError>(())
/// ```
#[derive(Debug)]
pub struct EditorSession {
    buffer: LineBuffer,
    title: String,
    mode: InputMode,
    options: RenderOptions,
}

impl EditorSession {
    /// Creates a session over `initial_content`.
    pub fn new(initial_content: &str, title: impl Into<String>) -> Self {
        Self {
            buffer: LineBuffer::from_text(initial_content),
            title: title.into(),
            mode: InputMode::Auto,
            options: RenderOptions::default(),
        }
    }

    pub fn with_mode(mut self, mode: InputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the buffer being edited.
    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// Runs the session on the process terminal.
    ///
    /// The raw-key controller is used when the mode allows it and the
    /// terminal supports it; otherwise line input over stdin. The choice is
    /// made once, before the first key is read.
    pub fn run(self) -> EditorResult<EditorOutcome> {
        if wants_raw_input(self.mode, raw_input_available()) {
            match CrosstermTerminal::acquire() {
                Ok(terminal) => {
                    tracing::debug!("Using raw key input");
                    let options = self.options.clone();
                    let mut controller =
                        RawInputController::new(terminal, io::stdout()).with_options(options);
                    return self.run_with(&mut controller);
                }
                Err(e) if self.mode == InputMode::Auto => {
                    tracing::debug!("Raw mode unavailable ({}), using line input", e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::debug!("Using line input");
        let mut controller = LineInputFallbackController::new(io::stdin().lock(), io::stdout());
        self.run_with(&mut controller)
    }

    /// Runs the session with an explicit controller.
    pub fn run_with(mut self, controller: &mut dyn InputController) -> EditorResult<EditorOutcome> {
        let outcome = controller.run(&mut self.buffer, &self.title)?;
        match outcome.saved_text() {
            Some(text) => tracing::info!(
                lines = self.buffer.len_lines(),
                bytes = text.len(),
                "Edit saved"
            ),
            None => tracing::info!("Edit cancelled"),
        }
        Ok(outcome)
    }
}

/// Decides whether a session in `mode` should try raw key input.
///
/// `terminal` is the result of [`raw_input_available`]. `Raw` is tried
/// even without a terminal so that the failure is reported.
pub fn wants_raw_input(mode: InputMode, terminal: bool) -> bool {
    match mode {
        InputMode::Auto => terminal,
        InputMode::Raw => true,
        InputMode::Line => false,
    }
}

/// Probes whether single-key reads are possible: both ends of the
/// session must be attached to a terminal.
pub fn raw_input_available() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}
