use std::path::{Path, PathBuf};

use ftpdeploy_fs::IgnoreOptions;
use ftpdeploy_runtime::DEFAULT_REMOTE_ROOT;

/// Name of the remote project directory for `artifact`.
///
/// The file stem for files (`bin/Release/App.exe` -> `App`), the name for
/// directories. `None` when the path has no usable final component.
pub fn project_name(artifact: &Path) -> Option<String> {
    let stem = if artifact.is_dir() {
        artifact.file_name()
    } else {
        artifact.file_stem()
    };
    stem.and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// What to deploy and where.
#[derive(Debug, Clone)]
pub struct DeployPlan {
    /// Local file or directory to upload
    pub artifact: PathBuf,

    /// Remote directory holding one subdirectory per project
    pub remote_root: String,

    /// Empty an existing project directory before uploading
    pub replace: bool,

    pub ignore: IgnoreOptions,

    /// Build configuration label (e.g. `Release`), logged only
    pub configuration: Option<String>,
}

impl DeployPlan {
    pub fn new(artifact: impl Into<PathBuf>) -> Self {
        Self {
            artifact: artifact.into(),
            remote_root: DEFAULT_REMOTE_ROOT.to_string(),
            replace: false,
            ignore: IgnoreOptions::default(),
            configuration: None,
        }
    }
}

/// Outcome of a finished deploy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
    pub project: String,
    /// `remote_root/project`
    pub remote_path: String,
    pub created_dirs: usize,
    pub uploaded_files: usize,
    pub bytes: u64,
    /// Remote files and directories deleted by `replace`
    pub removed: usize,
    /// Uploaded files whose transferred size differs from the local size
    /// seen when the artifact was collected
    pub size_mismatches: Vec<String>,
}
