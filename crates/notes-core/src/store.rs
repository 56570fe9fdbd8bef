//! Note storage on the local file system.
//!
//! Notes are `<title>.md` files under the notes directory. A notebook is
//! simply a sub-directory. Titles are looked up across all notebooks, so
//! commands other than `new` only need the title.

use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::StorageConfig;
use crate::{CoreError, CoreResult};

/// Notebook name reported for notes stored directly in the notes directory.
pub const HOME_NOTEBOOK: &str = "[Home]";

/// Title of the quick-capture note.
pub const INBOX: &str = "inbox";

const EXTENSION: &str = "md";

/// A note found while listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteEntry {
    /// Notebook path relative to the notes directory, or `[Home]`
    pub notebook: String,
    /// File name without the `.md` extension
    pub title: String,
    /// Full path
    pub path: PathBuf,
}

/// The notes and templates directories.
#[derive(Debug, Clone)]
pub struct NoteStore {
    notes_dir: PathBuf,
    templates_dir: PathBuf,
}

impl NoteStore {
    /// Opens the store under `app_dir`, creating both directories.
    pub fn open(app_dir: impl AsRef<Path>, storage: &StorageConfig) -> CoreResult<Self> {
        let app_dir = app_dir.as_ref();
        let resolve = |configured: &Option<PathBuf>, default: &str| match configured {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => app_dir.join(path),
            None => app_dir.join(default),
        };
        Self::with_dirs(
            resolve(&storage.notes_dir, "notes"),
            resolve(&storage.templates_dir, "templates"),
        )
    }

    /// Opens a store over explicit directories, creating them.
    pub fn with_dirs(notes_dir: PathBuf, templates_dir: PathBuf) -> CoreResult<Self> {
        std::fs::create_dir_all(&notes_dir)?;
        std::fs::create_dir_all(&templates_dir)?;
        Ok(Self {
            notes_dir,
            templates_dir,
        })
    }

    /// Returns the notes directory.
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Returns the templates directory.
    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Path for a note, optionally inside a notebook.
    ///
    /// The notebook directory is created if needed.
    pub fn note_path(&self, title: &str, notebook: Option<&str>) -> CoreResult<PathBuf> {
        let dir = match notebook {
            Some(notebook) => {
                let dir = self.notes_dir.join(notebook);
                std::fs::create_dir_all(&dir)?;
                dir
            }
            None => self.notes_dir.clone(),
        };
        Ok(dir.join(file_name(title)))
    }

    /// Finds a note by title across all notebooks.
    pub fn find(&self, title: &str) -> Option<PathBuf> {
        let wanted = file_name(title);
        let mut found = None;
        walk(&self.notes_dir, &mut |path: &Path| {
            if found.is_none() && path.file_name().is_some_and(|n| n == wanted.as_str()) {
                found = Some(path.to_path_buf());
            }
        });
        found
    }

    /// Like [`find`](Self::find), but a missing note is an error.
    pub fn locate(&self, title: &str) -> CoreResult<PathBuf> {
        self.find(title)
            .ok_or_else(|| CoreError::NoteNotFound(title.to_string()))
    }

    /// Lists all notes, notebooks and files in sorted order.
    pub fn list(&self) -> Vec<NoteEntry> {
        let mut entries = Vec::new();
        walk(&self.notes_dir, &mut |path: &Path| {
            if path.extension().is_none_or(|ext| ext != EXTENSION) {
                return;
            }
            let Some(title) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                return;
            };
            let notebook = path
                .parent()
                .and_then(|dir| dir.strip_prefix(&self.notes_dir).ok())
                .filter(|rel| !rel.as_os_str().is_empty())
                .map(|rel| rel.to_string_lossy().into_owned())
                .unwrap_or_else(|| HOME_NOTEBOOK.to_string());
            entries.push(NoteEntry {
                notebook,
                title,
                path: path.to_path_buf(),
            });
        });
        entries
    }

    /// Reads a note's content.
    pub fn read(&self, path: &Path) -> CoreResult<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Writes a note, replacing its content.
    pub fn write(&self, path: &Path, content: &str) -> CoreResult<()> {
        std::fs::write(path, content)?;
        tracing::info!("Saved note {}", path.display());
        Ok(())
    }

    /// Deletes a note by title and returns the removed path.
    pub fn delete(&self, title: &str) -> CoreResult<PathBuf> {
        let path = self.locate(title)?;
        std::fs::remove_file(&path)?;
        tracing::info!("Deleted note {}", path.display());
        Ok(path)
    }

    /// Reads a template by name.
    pub fn template(&self, name: &str) -> CoreResult<String> {
        let path = self.templates_dir.join(file_name(name));
        if !path.is_file() {
            return Err(CoreError::TemplateNotFound(name.to_string()));
        }
        self.read(&path)
    }

    /// Appends `- {text}` as a new line of the inbox note.
    pub fn append_to_inbox(&self, text: &str) -> CoreResult<PathBuf> {
        let path = self.note_path(INBOX, None)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "- {text}")?;
        Ok(path)
    }
}

/// Starting content for a new note: a heading built from the title.
///
/// Dashes become spaces and every word is title-cased, so
/// `weekly-review` becomes `# Weekly Review`.
pub fn default_content(title: &str) -> String {
    format!("# {}\n\n", title_case(&title.replace('-', " ")))
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

fn file_name(title: &str) -> String {
    format!("{title}.{EXTENSION}")
}

/// Visits every file under `dir`, files before sub-directories, each
/// group sorted by name.
fn walk(dir: &Path, visit: &mut dyn FnMut(&Path)) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        } else {
            files.push(path);
        }
    }
    files.sort();
    dirs.sort();

    for file in &files {
        visit(file);
    }
    for sub in &dirs {
        walk(sub, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{TempDir, tempdir};

    fn store() -> (TempDir, NoteStore) {
        let dir = tempdir().unwrap();
        let store = NoteStore::open(dir.path(), &StorageConfig::default()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_open_creates_directories() {
        let (dir, store) = store();
        assert!(dir.path().join("notes").is_dir());
        assert!(dir.path().join("templates").is_dir());
        assert_eq!(store.notes_dir(), dir.path().join("notes"));
    }

    #[test]
    fn test_open_with_configured_dirs() {
        let dir = tempdir().unwrap();
        let storage = StorageConfig {
            notes_dir: Some("mine".into()),
            templates_dir: Some(dir.path().join("tpl")),
        };
        let store = NoteStore::open(dir.path(), &storage).unwrap();
        assert_eq!(store.notes_dir(), dir.path().join("mine"));
        assert_eq!(store.templates_dir(), dir.path().join("tpl"));
    }

    #[test]
    fn test_note_path_creates_notebook() {
        let (_dir, store) = store();
        let path = store.note_path("standup", Some("work")).unwrap();
        assert_eq!(path, store.notes_dir().join("work").join("standup.md"));
        assert!(store.notes_dir().join("work").is_dir());

        let home = store.note_path("ideas", None).unwrap();
        assert_eq!(home, store.notes_dir().join("ideas.md"));
    }

    #[test]
    fn test_find_across_notebooks() {
        let (_dir, store) = store();
        let path = store.note_path("standup", Some("work")).unwrap();
        store.write(&path, "notes").unwrap();

        assert_eq!(store.find("standup"), Some(path));
        assert_eq!(store.find("missing"), None);
        assert!(matches!(
            store.locate("missing"),
            Err(CoreError::NoteNotFound(t)) if t == "missing"
        ));
    }

    #[test]
    fn test_list_sorted_with_notebooks() {
        let (_dir, store) = store();
        for (title, notebook) in [
            ("zeta", None),
            ("alpha", None),
            ("standup", Some("work")),
            ("retro", Some("work")),
        ] {
            let path = store.note_path(title, notebook).unwrap();
            store.write(&path, "").unwrap();
        }
        std::fs::write(store.notes_dir().join("scratch.txt"), "").unwrap();

        let listed: Vec<(String, String)> = store
            .list()
            .into_iter()
            .map(|e| (e.notebook, e.title))
            .collect();
        assert_eq!(
            listed,
            vec![
                (HOME_NOTEBOOK.to_string(), "alpha".to_string()),
                (HOME_NOTEBOOK.to_string(), "zeta".to_string()),
                ("work".to_string(), "retro".to_string()),
                ("work".to_string(), "standup".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_empty() {
        let (_dir, store) = store();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_delete() {
        let (_dir, store) = store();
        let path = store.note_path("old", None).unwrap();
        store.write(&path, "bye").unwrap();

        assert_eq!(store.delete("old").unwrap(), path);
        assert!(!path.exists());
        assert!(matches!(store.delete("old"), Err(CoreError::NoteNotFound(_))));
    }

    #[test]
    fn test_template() {
        let (_dir, store) = store();
        std::fs::write(store.templates_dir().join("meeting.md"), "## Agenda\n").unwrap();
        assert_eq!(store.template("meeting").unwrap(), "## Agenda\n");
        assert!(matches!(
            store.template("nope"),
            Err(CoreError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn test_append_to_inbox() {
        let (_dir, store) = store();
        store.append_to_inbox("buy milk").unwrap();
        let path = store.append_to_inbox("call bob").unwrap();
        assert_eq!(store.read(&path).unwrap(), "- buy milk\n- call bob\n");
    }

    #[test]
    fn test_default_content() {
        assert_eq!(default_content("weekly-review"), "# Weekly Review\n\n");
        assert_eq!(default_content("TODO"), "# Todo\n\n");
        assert_eq!(default_content("v2-plan"), "# V2 Plan\n\n");
    }
}
