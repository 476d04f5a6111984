use std::path::Path;

use crate::book::{Book, MonthKey};
use crate::errors::BudgetError;

pub mod json_backend;

pub type Result<T> = std::result::Result<T, BudgetError>;

/// Abstraction over persistence backends for the budget document.
///
/// The core never performs I/O; a backend loads a document, hands it to the
/// core, and serializes the mutated document back after each operation.
pub trait StorageBackend: Send + Sync {
    fn save(&self, book: &Book, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Book>;

    /// Loads `name`, falling back to a freshly-initialized document seeded
    /// at `start` when the file is missing or its contents are corrupt.
    fn load_or_default(&self, name: &str, start: MonthKey) -> Result<Book>;

    /// Ad-hoc file operations; default implementations use the JSON codec.
    fn save_to_path(&self, book: &Book, path: &Path) -> Result<()> {
        json_backend::save_book_to_path(book, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Book> {
        json_backend::load_book_from_path(path)
    }
}

pub use json_backend::JsonStore;
