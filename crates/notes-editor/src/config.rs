//! Editor settings.
//!
//! These are embedded in the application config file under `[editor]`;
//! `#[serde(default)]` keeps older files loading when fields are added.

use serde::{Deserialize, Serialize};

use crate::render::RenderOptions;

/// Editor behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// How keystrokes are read
    pub input_mode: InputMode,

    /// Minimum number of content rows drawn (padded with `~`)
    pub min_rows: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            input_mode: InputMode::Auto,
            min_rows: 15,
        }
    }
}

impl EditorConfig {
    /// Render settings derived from this config.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            min_rows: self.min_rows,
            ..RenderOptions::default()
        }
    }
}

/// Input strategy for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Use raw keys when the terminal supports them, lines otherwise
    #[default]
    Auto,
    /// Always use raw keys
    Raw,
    /// Always use sentinel-terminated line input
    Line,
}
