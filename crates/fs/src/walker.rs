use std::{
    fs::{self, read_dir},
    io::{Error, ErrorKind, Result},
    path::Path,
};

use log::{debug, warn};

use crate::{excludes::IgnoreEngine, record::LocalRecord};

/// Collect everything to upload for `artifact`.
///
/// A single file yields exactly one record whose relative path is its name.
/// A directory is walked depth first in name order, each directory listed
/// before its contents; the root itself is not included. Ignored paths and
/// symlinks are skipped, and an ignored directory is not descended into.
/// `ignore` must be rooted at `artifact` for directory artifacts.
pub fn collect_artifact(artifact: &Path, ignore: &IgnoreEngine) -> Result<Vec<LocalRecord>> {
    let metadata = fs::metadata(artifact)?;

    if metadata.is_file() {
        let name = utf8_name(artifact)?;
        return Ok(vec![LocalRecord {
            full_path: artifact.to_path_buf(),
            relative: name.clone(),
            name,
            size: metadata.len(),
            is_dir: false,
        }]);
    }

    if !metadata.is_dir() {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!("{} is neither a file nor a directory", artifact.display()),
        ));
    }

    let mut out = Vec::new();
    walk_dir(artifact, "", ignore, &mut out)?;
    debug!(
        "[collect_artifact] {} entries under {}",
        out.len(),
        artifact.display()
    );
    Ok(out)
}

fn walk_dir(
    dir: &Path,
    prefix: &str,
    ignore: &IgnoreEngine,
    out: &mut Vec<LocalRecord>,
) -> Result<()> {
    let mut entries = read_dir(dir)?.collect::<Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            warn!("[walk] skipping non-UTF-8 name in {}", dir.display());
            continue;
        };

        let file_type = entry.file_type()?;
        if file_type.is_symlink() {
            debug!("[walk] skipping symlink {}", entry.path().display());
            continue;
        }

        let is_dir = file_type.is_dir();
        let relative = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };

        if ignore.is_ignored(Path::new(&relative), is_dir) {
            debug!("[walk] ignored {relative}");
            continue;
        }

        if is_dir {
            out.push(LocalRecord {
                full_path: entry.path(),
                relative: relative.clone(),
                name,
                size: 0,
                is_dir: true,
            });
            walk_dir(&entry.path(), &relative, ignore, out)?;
        } else if file_type.is_file() {
            let metadata = entry.metadata()?;
            out.push(LocalRecord {
                full_path: entry.path(),
                relative,
                name,
                size: metadata.len(),
                is_dir: false,
            });
        }
    }

    Ok(())
}

fn utf8_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidInput,
                format!("{} has no UTF-8 file name", path.display()),
            )
        })
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
