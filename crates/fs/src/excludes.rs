use ftpdeploy_runtime::DEFAULT_IGNORE_PATTERNS;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use log::warn;
use std::path::{Path, PathBuf};

/// Gitignore-style matcher deciding which local paths are never uploaded.
pub struct IgnoreEngine {
    matcher: Gitignore,
}

#[derive(Debug, Clone)]
pub struct IgnoreOptions {
    /// Whether to use the default ignore patterns
    pub use_default_patterns: bool,

    /// Additional patterns, e.g. from `--exclude`
    pub extra_patterns: Vec<String>,

    /// Gitignore-format files, e.g. from `--ignore-file`
    pub extra_ignore_files: Box<[PathBuf]>,
}

impl Default for IgnoreOptions {
    fn default() -> Self {
        Self {
            use_default_patterns: true,
            extra_patterns: Vec::new(),
            extra_ignore_files: Box::default(),
        }
    }
}

impl IgnoreEngine {
    /// Build an engine rooted at `root` (the artifact directory).
    pub fn new(root: &Path, options: IgnoreOptions) -> Result<Self, ignore::Error> {
        let IgnoreOptions {
            use_default_patterns,
            extra_patterns,
            extra_ignore_files,
        } = options;
        let mut builder = GitignoreBuilder::new(root);

        if use_default_patterns {
            for pat in DEFAULT_IGNORE_PATTERNS {
                builder.add_line(None, pat)?;
            }
        }

        for pat in &extra_patterns {
            builder.add_line(None, pat)?;
        }

        for path in &*extra_ignore_files {
            if let Some(e) = builder.add(path) {
                warn!("[ignore] failed to read {}: {e}", path.display());
            }
        }

        Ok(IgnoreEngine {
            matcher: builder.build()?,
        })
    }

    /// `relative` is relative to the root the engine was built with.
    #[inline]
    #[must_use]
    pub fn is_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        self.matcher
            .matched_path_or_any_parents(relative, is_dir)
            .is_ignore()
    }
}

#[cfg(test)]
#[path = "excludes_tests.rs"]
mod tests;
