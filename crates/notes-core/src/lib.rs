//! # Notes Core
//!
//! Everything around the editor: where notes live, how they are found,
//! listed and searched, and how the application is configured.
//!
//! ## Layout on disk
//!
//! ```text
//! <config dir>/terminal-notes-app/
//! ├── config.toml
//! ├── notes/
//! │   ├── inbox.md
//! │   ├── ideas.md
//! │   └── work/           <- a notebook
//! │       └── standup.md
//! └── templates/
//!     └── meeting.md
//! ```

pub mod config;
pub mod search;
pub mod store;

pub use config::{Config, ConfigError};
pub use search::{SearchResults, SearchTool};
pub use store::{HOME_NOTEBOOK, NoteEntry, NoteStore};

/// Directory name under the platform config dir.
pub const APP_NAME: &str = "terminal-notes-app";

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Note '{0}.md' not found")]
    NoteNotFound(String),

    #[error("Template '{0}.md' not found")]
    TemplateNotFound(String),

    #[error("Application directory not found")]
    NoAppDir,

    #[error("Search failed: {0}")]
    Search(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Returns the application directory (`<config dir>/terminal-notes-app`).
pub fn app_dir() -> CoreResult<std::path::PathBuf> {
    let config_dir = dirs::config_dir().ok_or(CoreError::NoAppDir)?;
    Ok(config_dir.join(APP_NAME))
}
