//! Command implementations.
//!
//! `App` holds the note store, the config and the output stream. Anything
//! interactive (the editor, yes/no questions) goes through [`Prompt`] so
//! commands can be driven by scripted input in tests.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use crossterm::style::Stylize;
use notes_core::store::default_content;
use notes_core::{Config, NoteStore, SearchTool, search};
use notes_editor::{EditorConfig, EditorOutcome, EditorResult, EditorSession};

use crate::markdown::render_markdown;

const PANEL_WIDTH: usize = 60;

/// Interactive input needed by the commands.
pub trait Prompt {
    /// Opens the editor on `initial` and returns the outcome.
    fn edit(&mut self, initial: &str, title: &str) -> EditorResult<EditorOutcome>;

    /// Asks a yes/no question; anything but "y"/"yes" is no.
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Prompt backed by the process terminal.
pub struct TerminalPrompt {
    editor: EditorConfig,
}

impl TerminalPrompt {
    pub fn new(editor: EditorConfig) -> Self {
        Self { editor }
    }
}

impl Prompt for TerminalPrompt {
    fn edit(&mut self, initial: &str, title: &str) -> EditorResult<EditorOutcome> {
        EditorSession::new(initial, title)
            .with_mode(self.editor.input_mode)
            .with_render_options(self.editor.render_options())
            .run()
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let mut stdout = io::stdout();
        write!(stdout, "{question} [y/N]: ")?;
        stdout.flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(is_yes(&answer))
    }
}

pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// The notes application.
pub struct App<P, W> {
    store: NoteStore,
    config: Config,
    prompt: P,
    out: W,
}

impl<P: Prompt, W: Write> App<P, W> {
    pub fn new(store: NoteStore, config: Config, prompt: P, out: W) -> Self {
        Self {
            store,
            config,
            prompt,
            out,
        }
    }

    /// Creates a note (or edits it, after confirmation, if it exists).
    pub fn new_note(
        &mut self,
        title: &str,
        notebook: Option<&str>,
        template: Option<&str>,
    ) -> anyhow::Result<()> {
        let path = self.store.note_path(title, notebook)?;
        let exists = path.exists();
        if exists {
            writeln!(
                self.out,
                "Note '{}' already exists.",
                format!("{title}.md").red().bold()
            )?;
            if !self.prompt.confirm("Do you want to edit the existing note?")? {
                return Ok(());
            }
        }

        let mut initial = default_content(title);
        if let Some(template) = template {
            match self.store.template(template) {
                Ok(content) => {
                    initial = content;
                    writeln!(
                        self.out,
                        "Using template '{}'.",
                        format!("{template}.md").blue().bold()
                    )?;
                }
                Err(notes_core::CoreError::TemplateNotFound(_)) => {
                    writeln!(
                        self.out,
                        "Template '{}' not found.",
                        format!("{template}.md").red().bold()
                    )?;
                }
                Err(e) => return Err(e.into()),
            }
        } else if exists {
            initial = self.store.read(&path)?;
        }

        self.edit_and_save(&path, &initial, title)
    }

    /// Opens an existing note in the editor.
    pub fn edit_note(&mut self, title: &str) -> anyhow::Result<()> {
        let path = self.store.locate(title)?;
        let initial = self.store.read(&path)?;
        self.edit_and_save(&path, &initial, title)
    }

    fn edit_and_save(&mut self, path: &Path, initial: &str, title: &str) -> anyhow::Result<()> {
        let outcome = self
            .prompt
            .edit(initial, &format!("Editing: {title}"))
            .context("Editor failed")?;

        match outcome {
            EditorOutcome::Saved(content) => {
                self.store.write(path, &content)?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                writeln!(self.out, "Saved note: '{}'", name.green().bold())?;
                writeln!(
                    self.out,
                    "{}",
                    format!("Note saved to: {}", path.display()).dim()
                )?;
            }
            EditorOutcome::Cancelled => {
                writeln!(self.out, "{}", "Note editing cancelled.".yellow().bold())?;
            }
        }
        Ok(())
    }

    /// Prints all notes as a table, or as JSON.
    pub fn list(&mut self, json: bool) -> anyhow::Result<()> {
        let entries = self.store.list();

        if json {
            writeln!(self.out, "{}", serde_json::to_string_pretty(&entries)?)?;
            return Ok(());
        }

        if entries.is_empty() {
            writeln!(
                self.out,
                "{}",
                "No notes found. Create one with `notes new <title>`!"
                    .yellow()
                    .bold()
            )?;
            return Ok(());
        }

        let notebook_width = entries
            .iter()
            .map(|e| e.notebook.chars().count())
            .chain(["Notebook".len()])
            .max()
            .unwrap_or(0);

        writeln!(self.out, "{}", "My Notes".bold())?;
        writeln!(
            self.out,
            "{}",
            format!("{:<notebook_width$}  {}", "Notebook", "Note Title")
                .magenta()
                .bold()
        )?;
        for entry in &entries {
            writeln!(
                self.out,
                "{}  {}",
                format!("{:<notebook_width$}", entry.notebook).cyan(),
                entry.title.as_str().green()
            )?;
        }
        Ok(())
    }

    /// Prints a note rendered as Markdown inside a titled panel.
    pub fn show(&mut self, title: &str) -> anyhow::Result<()> {
        let path = self.store.locate(title)?;
        let content = self.store.read(&path)?;

        let heading = format!("── {title}.md ");
        let fill = PANEL_WIDTH.saturating_sub(heading.chars().count());
        writeln!(self.out, "{}", format!("{heading}{}", "─".repeat(fill)).cyan().bold())?;
        writeln!(self.out, "{}", render_markdown(&content))?;
        writeln!(self.out, "{}", "─".repeat(PANEL_WIDTH).blue())?;
        Ok(())
    }

    /// Deletes a note.
    pub fn delete(&mut self, title: &str) -> anyhow::Result<()> {
        self.store.delete(title)?;
        writeln!(
            self.out,
            "Deleted note '{}'.",
            format!("{title}.md").red().bold()
        )?;
        Ok(())
    }

    /// Searches all notes with `rg` or `grep`.
    pub fn search(&mut self, query: &str) -> anyhow::Result<()> {
        let tool = self
            .config
            .search
            .tool
            .as_deref()
            .map(str::parse::<SearchTool>)
            .transpose()?;

        let results = search::search(self.store.notes_dir(), query, tool)?;
        writeln!(
            self.out,
            "Searching for '{}' using {}...",
            query.yellow().bold(),
            results.tool
        )?;

        if results.is_empty() {
            writeln!(self.out, "{}", "No results found.".yellow())?;
        } else {
            writeln!(self.out, "{}", "Search Results".green().bold())?;
            write!(self.out, "{}", results.output)?;
        }
        Ok(())
    }

    /// Appends a line to the inbox note.
    pub fn add(&mut self, text: &str) -> anyhow::Result<()> {
        self.store.append_to_inbox(text)?;
        writeln!(self.out, "Appended to '{}'.", "inbox.md".green().bold())?;
        Ok(())
    }
}
