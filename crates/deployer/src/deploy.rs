use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result, bail};
use ftpdeploy_fs::{IgnoreEngine, collect_artifact};
use ftpdeploy_listing::{Listing, ListingStyle, is_empty_response, parse_listing_today};
use ftpdeploy_remote::{RemoteClient, join_remote};
use log::{debug, info, warn};

use crate::plan::{DeployPlan, DeployReport, project_name};

/// `LIST` a remote directory and parse it, warning when the server's format
/// was not recognised.
pub fn list_remote<C: RemoteClient + ?Sized>(client: &mut C, path: &str) -> Result<Listing> {
    let raw = client
        .list(path)
        .with_context(|| format!("Failed to list remote directory '{path}'"))?;
    let listing = parse_listing_today(&raw);

    if listing.style() == ListingStyle::Unknown && !is_empty_response(&raw) {
        warn!("[deploy] unrecognised listing format for '{path}'; treating it as empty");
    }
    debug!(
        "[deploy] '{}': {} style, {} entries",
        path,
        listing.style(),
        listing.len()
    );

    Ok(listing)
}

/// Upload `plan.artifact` into `remote_root/<project>`.
pub fn deploy<C: RemoteClient + ?Sized>(client: &mut C, plan: &DeployPlan) -> Result<DeployReport> {
    let project = project_name(&plan.artifact).with_context(|| {
        format!(
            "Cannot derive a project name from {}",
            plan.artifact.display()
        )
    })?;
    let remote_path = join_remote(&plan.remote_root, &project);

    if let Some(conf) = &plan.configuration {
        info!("[deploy] {project} ({conf}) -> {remote_path}");
    } else {
        info!("[deploy] {project} -> {remote_path}");
    }

    let mut report = DeployReport {
        project: project.clone(),
        remote_path: remote_path.clone(),
        ..DeployReport::default()
    };

    let records = {
        let ignore_root = if plan.artifact.is_dir() {
            plan.artifact.as_path()
        } else {
            plan.artifact
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
        };
        let engine = IgnoreEngine::new(ignore_root, plan.ignore.clone())
            .context("Failed to build ignore patterns")?;
        collect_artifact(&plan.artifact, &engine)
            .with_context(|| format!("Failed to read {}", plan.artifact.display()))?
    };

    let (file_count, total_bytes) = records
        .iter()
        .filter(|r| !r.is_dir)
        .fold((0usize, 0u64), |(n, bytes), r| (n + 1, bytes + r.size));
    info!("[deploy] {file_count} files, {total_bytes} bytes to upload");

    let root_listing = list_remote(client, &plan.remote_root)?;
    let existing = root_listing.find(&project);

    match existing {
        Some(entry) if !entry.is_directory => {
            bail!("'{remote_path}' exists on the server and is not a directory");
        }
        Some(_) => {
            if plan.replace {
                report.removed = clear_remote_dir(client, &remote_path)?;
                info!("[deploy] removed {} entries from {remote_path}", report.removed);
            }
        }
        None => {
            client
                .make_directory(&remote_path)
                .with_context(|| format!("Failed to create '{remote_path}'"))?;
            report.created_dirs += 1;
            info!("[deploy] created directory {remote_path}");
        }
    }

    // Subdirectory names per remote directory, filled from listings on demand.
    let mut known_dirs: HashMap<String, HashSet<String>> = HashMap::new();
    if existing.is_none() || plan.replace {
        known_dirs.insert(remote_path.clone(), HashSet::new());
    }

    for record in &records {
        let target = join_remote(&remote_path, &record.relative);

        if record.is_dir {
            let parent = parent_remote(&target);
            let siblings = match known_dirs.entry(parent.to_string()) {
                Entry::Occupied(o) => o.into_mut(),
                Entry::Vacant(v) => {
                    let listing = list_remote(client, parent)?;
                    v.insert(listing.directories().map(|e| e.name.clone()).collect())
                }
            };

            if siblings.contains(&record.name) {
                debug!("[deploy] directory {target} already present");
                continue;
            }

            client
                .make_directory(&target)
                .with_context(|| format!("Failed to create '{target}'"))?;
            siblings.insert(record.name.clone());
            known_dirs.insert(target, HashSet::new());
            report.created_dirs += 1;
        } else {
            let bytes = client.upload(&target, &record.full_path).with_context(|| {
                format!(
                    "Failed to upload {} to '{target}'",
                    record.full_path.display()
                )
            })?;
            debug!("[deploy] uploaded {target} ({bytes} bytes)");
            if bytes != record.size {
                warn!(
                    "[deploy] {target}: sent {bytes} bytes, local file had {}",
                    record.size
                );
                report.size_mismatches.push(target);
            }
            report.uploaded_files += 1;
            report.bytes += bytes;
        }
    }

    info!(
        "[deploy] {} files ({} bytes) uploaded to {}",
        report.uploaded_files, report.bytes, report.remote_path
    );

    Ok(report)
}

/// Delete everything below `path`, leaving the directory itself in place.
///
/// Returns the number of removed files and directories.
pub fn clear_remote_dir<C: RemoteClient + ?Sized>(client: &mut C, path: &str) -> Result<usize> {
    let listing = list_remote(client, path)?;
    let mut removed = 0;

    for entry in listing.entries() {
        let child = join_remote(path, &entry.name);
        if entry.is_directory {
            removed += clear_remote_dir(client, &child)?;
            client
                .remove_directory(&child)
                .with_context(|| format!("Failed to remove directory '{child}'"))?;
        } else {
            client
                .delete(&child)
                .with_context(|| format!("Failed to delete '{child}'"))?;
        }
        removed += 1;
    }

    Ok(removed)
}

/// Download one remote file to `local`, returning the bytes written.
pub fn fetch<C: RemoteClient + ?Sized>(client: &mut C, remote: &str, local: &Path) -> Result<u64> {
    let bytes = client
        .download(remote, local)
        .with_context(|| format!("Failed to download '{remote}' to {}", local.display()))?;
    info!("[fetch] {remote} -> {} ({bytes} bytes)", local.display());
    Ok(bytes)
}

fn parent_remote(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => "",
    }
}

#[cfg(test)]
#[path = "deploy_tests.rs"]
mod tests;
