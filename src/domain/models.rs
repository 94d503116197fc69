use crate::domain::error::ReadError;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_NAME: &str = "CLAUSEGUARD-SNAPSHOT.md";

#[derive(Debug)]
pub struct CollectedFile {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub label: String,
    pub content: Result<String, ReadError>,
}

#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    pub root_path: PathBuf,
    pub output_name: String,
    pub to_stdout: bool,
    pub clipboard: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            to_stdout: false,
            clipboard: false,
        }
    }
}

#[derive(Debug)]
pub struct SnapshotOutput {
    pub document: String,
    pub file_count: usize,
    pub unreadable_count: usize,
    pub char_count: usize,
}
