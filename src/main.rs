//! # Notes - Notes in your terminal
//!
//! Create, edit, list, show, delete and search plain-text notes stored
//! under the user's config directory.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a new note in the built-in editor
//! cargo run -- new groceries
//!
//! # Put it in a notebook, starting from a template
//! cargo run -- new standup --notebook work --template meeting
//!
//! # Capture a thought without opening the editor
//! cargo run -- add "call the plumber"
//! ```

mod commands;
mod markdown;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notes_core::{Config, NoteStore};
use notes_editor::InputMode;

use crate::commands::{App, TerminalPrompt};

/// Notes in your terminal.
#[derive(Parser, Debug)]
#[command(name = "notes")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Always use line input (type ---SAVE--- to finish) instead of raw keys
    #[arg(long, global = true)]
    line_mode: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Create a new note and edit it in the terminal
    New {
        /// The title of the note
        title: String,

        /// Notebook to store the note in
        #[arg(short, long)]
        notebook: Option<String>,

        /// Name of the template to use
        #[arg(short, long)]
        template: Option<String>,
    },

    /// Edit an existing note in the terminal
    Edit {
        /// The title of the note to edit
        title: String,
    },

    /// List all available notes
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display the content of a note
    Show {
        /// The title of the note to show
        title: String,
    },

    /// Delete a note
    Delete {
        /// The title of the note to delete
        title: String,
    },

    /// Search for text within your notes
    Search {
        /// The text to search for
        query: String,
    },

    /// Quickly append text to your inbox
    Add {
        /// Text to append
        text: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // Logs go to stderr so they never interleave with editor output on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::debug!("Starting notes v{}", env!("CARGO_PKG_VERSION"));

    let app_dir = notes_core::app_dir()?;
    let mut config = Config::load_from_dir(&app_dir)
        .with_context(|| format!("Failed to load config from {}", app_dir.display()))?;
    if args.line_mode {
        config.editor.input_mode = InputMode::Line;
    }

    let store = NoteStore::open(&app_dir, &config.storage)
        .with_context(|| format!("Failed to open notes directory under {}", app_dir.display()))?;

    let prompt = TerminalPrompt::new(config.editor.clone());
    let mut app = App::new(store, config, prompt, std::io::stdout());

    match args.command {
        Commands::New {
            title,
            notebook,
            template,
        } => app.new_note(&title, notebook.as_deref(), template.as_deref()),
        Commands::Edit { title } => app.edit_note(&title),
        Commands::List { json } => app.list(json),
        Commands::Show { title } => app.show(&title),
        Commands::Delete { title } => app.delete(&title),
        Commands::Search { query } => app.search(&query),
        Commands::Add { text } => app.add(&text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_new_with_options() {
        let args = Args::parse_from(["notes", "new", "standup", "-n", "work", "-t", "meeting"]);
        assert_eq!(
            args.command,
            Commands::New {
                title: "standup".into(),
                notebook: Some("work".into()),
                template: Some("meeting".into()),
            }
        );
        assert!(!args.line_mode);
    }

    #[test]
    fn test_args_global_flags() {
        let args = Args::parse_from(["notes", "edit", "ideas", "--line-mode", "-vv"]);
        assert_eq!(args.command, Commands::Edit { title: "ideas".into() });
        assert!(args.line_mode);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_args_list_json() {
        let args = Args::parse_from(["notes", "list", "--json"]);
        assert_eq!(args.command, Commands::List { json: true });
    }

    #[test]
    fn test_args_require_subcommand() {
        assert!(Args::try_parse_from(["notes"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
