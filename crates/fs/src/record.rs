use std::path::PathBuf;

/// One local file or directory to mirror on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRecord {
    pub full_path: PathBuf,
    /// Path below the artifact root with `/` separators; the file name for a
    /// single-file artifact.
    pub relative: String,
    /// File name
    pub name: String,
    /// File size when collected, 0 for directories
    pub size: u64,
    pub is_dir: bool,
}
