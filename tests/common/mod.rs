use std::sync::Mutex;

use monthbook::book::MonthKey;
use monthbook::storage::JsonStore;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the
/// test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated JSON store backed by a unique directory.
pub fn setup_test_store() -> JsonStore {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    JsonStore::new(Some(base)).expect("create json store")
}

pub fn start_key() -> MonthKey {
    MonthKey::new(2025, 6).expect("valid month")
}
