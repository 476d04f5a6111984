use std::{
    env, fs,
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;

use crate::book::{Book, MonthKey, CURRENT_SCHEMA_VERSION};
use crate::errors::BudgetError;

use super::{Result, StorageBackend};

const DEFAULT_DIR_NAME: &str = ".monthbook";
const BOOK_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Returns the application data directory, defaulting to `~/.monthbook`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("MONTHBOOK_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// JSON-file persistence for budget documents.
#[derive(Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn book_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, BOOK_EXTENSION))
    }
}

impl StorageBackend for JsonStore {
    fn save(&self, book: &Book, name: &str) -> Result<()> {
        save_book_to_path(book, &self.book_path(name))
    }

    fn load(&self, name: &str) -> Result<Book> {
        load_book_from_path(&self.book_path(name))
    }

    fn load_or_default(&self, name: &str, start: MonthKey) -> Result<Book> {
        let path = self.book_path(name);
        if !path.exists() {
            return Ok(Book::new(start));
        }
        match load_book_from_path(&path) {
            Ok(book) => Ok(book),
            // A malformed document is discarded, never partially repaired.
            Err(BudgetError::Serde(err)) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "discarding corrupt document, starting fresh"
                );
                Ok(Book::new(start))
            }
            Err(other) => Err(other),
        }
    }
}

/// Serializes `book` as pretty JSON through a temp file and rename, so a
/// failed write never clobbers the previous document.
pub fn save_book_to_path(book: &Book, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(book)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), "saved document");
    Ok(())
}

pub fn load_book_from_path(path: &Path) -> Result<Book> {
    let data = fs::read_to_string(path)?;
    let book: Book = serde_json::from_str(&data)?;
    if book.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(BudgetError::Storage(format!(
            "document schema v{} is newer than supported v{}",
            book.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(book)
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
