//! Test fixtures for multilog: a counter domain algebra, an in-memory
//! partition source, recording consumers, and the golden wire files.
//!
//! Helpers in this crate panic on misuse; they are only linked into tests
//! and benches.

pub mod consumers;
pub mod counter;
pub mod source;

use std::path::PathBuf;

use serde::de::DeserializeOwned;

pub use consumers::{FailingConsumer, RecordingConsumer, SumConsumer};
pub use counter::{CounterAlgebra, CounterOp, CounterState};
pub use source::{record_position, MemorySource, RECORD_LOG};

/// Directory holding the golden wire files.
fn golden_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Absolute path of a golden file.
pub fn golden_path(relative_path: &str) -> PathBuf {
    golden_root().join(relative_path)
}

/// Raw text of a golden file, trailing newline stripped.
///
/// # Panics
/// Panics if the file doesn't exist.
pub fn load_golden_str(relative_path: &str) -> String {
    let path = golden_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read golden file {}: {}", path.display(), e));
    content.trim_end().to_string()
}

/// Load and deserialize a golden file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_golden<T: DeserializeOwned>(relative_path: &str) -> T {
    let content = load_golden_str(relative_path);
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse golden file {relative_path}: {e}"))
}

/// Every golden file in a sub-directory, sorted by name.
pub fn golden_files(dir: &str) -> Vec<String> {
    let root = golden_root().join(dir);
    let mut names: Vec<String> = std::fs::read_dir(&root)
        .unwrap_or_else(|e| panic!("Failed to list {}: {}", root.display(), e))
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".json"))
        .map(|name| format!("{dir}/{name}"))
        .collect();
    names.sort();
    names
}
