use super::*;
use crate::plan::DeployPlan;
use ftpdeploy_fs::IgnoreOptions;
use ftpdeploy_remote::{RemoteError, RemoteResult};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use tempfile::tempdir;

/// In-memory server answering `LIST` in Unix or Windows format.
#[derive(Default)]
struct MemoryRemote {
    dirs: BTreeSet<String>,
    files: BTreeMap<String, Vec<u8>>,
    windows: bool,
    /// Unix listings without `.` and `..`, so an empty directory is `total 0`
    bare: bool,
    /// Drop the last byte of every upload
    short_writes: bool,
    commands: Vec<String>,
}

fn norm(path: &str) -> String {
    path.trim_matches('/').to_string()
}

fn parent_of(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(p, _)| p)
}

fn name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

impl MemoryRemote {
    fn with_dirs(dirs: &[&str]) -> Self {
        Self {
            dirs: dirs.iter().map(|d| d.to_string()).collect(),
            ..Self::default()
        }
    }

    fn with_file(mut self, path: &str, data: &[u8]) -> Self {
        self.files.insert(path.to_string(), data.to_vec());
        self
    }

    fn dir_exists(&self, path: &str) -> bool {
        path.is_empty() || self.dirs.contains(path)
    }

    fn dir_line(&self, name: &str) -> String {
        if self.windows {
            format!("09-07-16  07:33PM       <DIR>          {name}")
        } else {
            format!("drwxr-xr-x 2 0 0 4096 Sep 07 19:33 {name}")
        }
    }

    fn file_line(&self, name: &str, size: usize) -> String {
        if self.windows {
            format!("09-07-16  07:29PM {size:>20} {name}")
        } else {
            format!("-rw-r--r-- 1 106 114 {size} Sep 07 19:29 {name}")
        }
    }

    fn issued(&self, prefix: &str) -> Vec<&str> {
        self.commands
            .iter()
            .filter(|c| c.starts_with(prefix))
            .map(String::as_str)
            .collect()
    }
}

impl RemoteClient for MemoryRemote {
    fn list(&mut self, path: &str) -> RemoteResult<String> {
        let path = norm(path);
        self.commands.push(format!("LIST {path}"));
        if !self.dir_exists(&path) {
            return Err(RemoteError::NotFound(path));
        }

        let mut lines = Vec::new();
        if !self.windows {
            if self.bare {
                lines.push("total 0".to_string());
            } else {
                lines.push("total 8".to_string());
                lines.push(self.dir_line("."));
                lines.push(self.dir_line(".."));
            }
        }
        for d in self.dirs.iter().filter(|d| parent_of(d) == path) {
            lines.push(self.dir_line(name_of(d)));
        }
        for (f, data) in self.files.iter().filter(|(f, _)| parent_of(f) == path) {
            lines.push(self.file_line(name_of(f), data.len()));
        }
        Ok(lines.join("\r\n"))
    }

    fn upload(&mut self, remote_path: &str, local_file: &Path) -> RemoteResult<u64> {
        let path = norm(remote_path);
        self.commands.push(format!("STOR {path}"));
        if !self.dir_exists(parent_of(&path)) {
            return Err(RemoteError::NotFound(path));
        }
        let mut data = fs::read(local_file)?;
        if self.short_writes {
            data.pop();
        }
        let len = data.len() as u64;
        self.files.insert(path, data);
        Ok(len)
    }

    fn download(&mut self, remote_path: &str, local_file: &Path) -> RemoteResult<u64> {
        let path = norm(remote_path);
        self.commands.push(format!("RETR {path}"));
        let data = self
            .files
            .get(&path)
            .ok_or_else(|| RemoteError::NotFound(path.clone()))?;
        fs::write(local_file, data)?;
        Ok(data.len() as u64)
    }

    fn make_directory(&mut self, path: &str) -> RemoteResult<()> {
        let path = norm(path);
        self.commands.push(format!("MKD {path}"));
        if self.dirs.contains(&path) || self.files.contains_key(&path) {
            return Err(RemoteError::Other(format!("{path} exists")));
        }
        if !self.dir_exists(parent_of(&path)) {
            return Err(RemoteError::NotFound(path));
        }
        self.dirs.insert(path);
        Ok(())
    }

    fn remove_directory(&mut self, path: &str) -> RemoteResult<()> {
        let path = norm(path);
        self.commands.push(format!("RMD {path}"));
        let has_children = self.dirs.iter().any(|d| parent_of(d) == path)
            || self.files.keys().any(|f| parent_of(f) == path);
        if has_children {
            return Err(RemoteError::PermissionDenied(format!("{path} not empty")));
        }
        if !self.dirs.remove(&path) {
            return Err(RemoteError::NotFound(path));
        }
        Ok(())
    }

    fn delete(&mut self, path: &str) -> RemoteResult<()> {
        let path = norm(path);
        self.commands.push(format!("DELE {path}"));
        self.files
            .remove(&path)
            .map(|_| ())
            .ok_or(RemoteError::NotFound(path))
    }
}

fn write_file(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, contents).expect("write file");
}

#[test]
fn project_name_cases() {
    let tmp = tempdir().expect("create temp dir");
    let site = tmp.path().join("Site.v2");
    fs::create_dir(&site).expect("create dir");

    assert_eq!(
        project_name(Path::new("bin/Release/App.exe")).as_deref(),
        Some("App")
    );
    assert_eq!(project_name(Path::new("Setup")).as_deref(), Some("Setup"));
    assert_eq!(project_name(&site).as_deref(), Some("Site.v2"));
    assert_eq!(project_name(Path::new("/")), None);
}

#[test]
fn single_file_creates_project_directory() {
    let tmp = tempdir().expect("create temp dir");
    let artifact = tmp.path().join("App.exe");
    write_file(&artifact, b"MZ123");

    let mut remote = MemoryRemote::with_dirs(&["software", "software/Other"]);
    let report = deploy(&mut remote, &DeployPlan::new(&artifact)).expect("deploy");

    assert_eq!(report.project, "App");
    assert_eq!(report.remote_path, "software/App");
    assert_eq!(report.created_dirs, 1);
    assert_eq!(report.uploaded_files, 1);
    assert_eq!(report.bytes, 5);
    assert_eq!(report.removed, 0);
    assert!(report.size_mismatches.is_empty());
    assert_eq!(remote.files["software/App/App.exe"], b"MZ123");
    assert_eq!(remote.issued("MKD"), vec!["MKD software/App"]);
}

#[test]
fn existing_project_directory_is_reused() {
    let tmp = tempdir().expect("create temp dir");
    let artifact = tmp.path().join("App.exe");
    write_file(&artifact, b"new");

    let mut remote = MemoryRemote::with_dirs(&["software", "software/App"])
        .with_file("software/App/old.txt", b"old");
    let report = deploy(&mut remote, &DeployPlan::new(&artifact)).expect("deploy");

    assert_eq!(report.created_dirs, 0);
    assert!(remote.issued("MKD").is_empty());
    assert!(remote.files.contains_key("software/App/old.txt"));
    assert_eq!(remote.files["software/App/App.exe"], b"new");
}

#[test]
fn file_with_project_name_is_not_mistaken_for_directory() {
    let tmp = tempdir().expect("create temp dir");
    let artifact = tmp.path().join("App.exe");
    write_file(&artifact, b"x");

    let mut remote = MemoryRemote::with_dirs(&["software"]).with_file("software/App", b"");
    let err = deploy(&mut remote, &DeployPlan::new(&artifact)).unwrap_err();

    assert!(err.to_string().contains("not a directory"), "{err}");
    assert!(remote.issued("STOR").is_empty());
}

#[test]
fn replace_clears_nested_contents_first() {
    let tmp = tempdir().expect("create temp dir");
    let artifact = tmp.path().join("App.exe");
    write_file(&artifact, b"fresh");

    let mut remote = MemoryRemote::with_dirs(&["software", "software/App", "software/App/sub"])
        .with_file("software/App/old.txt", b"old")
        .with_file("software/App/sub/x.bin", b"x");

    let plan = DeployPlan {
        replace: true,
        ..DeployPlan::new(&artifact)
    };
    let report = deploy(&mut remote, &plan).expect("deploy");

    assert_eq!(report.removed, 3);
    assert_eq!(report.uploaded_files, 1);
    assert!(remote.dirs.contains("software/App"));
    assert!(!remote.dirs.contains("software/App/sub"));
    assert_eq!(
        remote.files.keys().collect::<Vec<_>>(),
        vec!["software/App/App.exe"]
    );
    assert_eq!(remote.issued("RMD"), vec!["RMD software/App/sub"]);
}

#[test]
fn directory_artifact_mirrors_tree_and_skips_known_directories() {
    let tmp = tempdir().expect("create temp dir");
    let site = tmp.path().join("Site");
    write_file(&site.join("index.html"), b"<html>");
    write_file(&site.join("css/site.css"), b"body{}");
    write_file(&site.join("img/logo.png"), b"png");
    write_file(&site.join(".git/HEAD"), b"ref");
    write_file(&site.join("debug.log"), b"noise");

    let mut remote = MemoryRemote::with_dirs(&["www", "www/Site", "www/Site/css"]);
    let plan = DeployPlan {
        remote_root: "www".into(),
        ignore: IgnoreOptions {
            extra_patterns: vec!["*.log".into()],
            ..IgnoreOptions::default()
        },
        ..DeployPlan::new(&site)
    };
    let report = deploy(&mut remote, &plan).expect("deploy");

    assert_eq!(report.created_dirs, 1);
    assert_eq!(report.uploaded_files, 3);
    assert_eq!(report.bytes, 6 + 6 + 3);
    assert_eq!(remote.issued("MKD"), vec!["MKD www/Site/img"]);
    assert!(remote.files.contains_key("www/Site/css/site.css"));
    assert!(remote.files.contains_key("www/Site/img/logo.png"));
    assert!(!remote.files.keys().any(|k| k.contains(".git") || k.ends_with(".log")));
}

#[test]
fn windows_style_server_is_understood() {
    let tmp = tempdir().expect("create temp dir");
    let site = tmp.path().join("Site");
    write_file(&site.join("css/site.css"), b"body{}");

    let mut remote = MemoryRemote {
        windows: true,
        ..MemoryRemote::with_dirs(&["software", "software/Site", "software/Site/css"])
    };
    let report = deploy(&mut remote, &DeployPlan::new(&site)).expect("deploy");

    assert_eq!(report.created_dirs, 0);
    assert!(remote.issued("MKD").is_empty());
    assert_eq!(remote.files["software/Site/css/site.css"], b"body{}");
}

#[test]
fn missing_remote_root_is_an_error() {
    let tmp = tempdir().expect("create temp dir");
    let artifact = tmp.path().join("App.exe");
    write_file(&artifact, b"x");

    let mut remote = MemoryRemote::default();
    let err = deploy(&mut remote, &DeployPlan::new(&artifact)).unwrap_err();

    assert!(err.to_string().contains("software"), "{err}");
    assert!(
        err.chain()
            .any(|c| matches!(c.downcast_ref::<RemoteError>(), Some(RemoteError::NotFound(_))))
    );
}

#[test]
fn missing_artifact_is_an_error() {
    let tmp = tempdir().expect("create temp dir");
    let mut remote = MemoryRemote::with_dirs(&["software"]);
    let err = deploy(&mut remote, &DeployPlan::new(tmp.path().join("Gone.exe"))).unwrap_err();
    assert!(err.to_string().contains("Gone.exe"), "{err}");
}

#[test]
fn clear_remote_dir_leaves_directory_in_place() {
    let mut remote = MemoryRemote::with_dirs(&["a", "a/b", "a/b/c"])
        .with_file("a/one", b"1")
        .with_file("a/b/c/two", b"2");

    let removed = clear_remote_dir(&mut remote, "a").expect("clear");
    assert_eq!(removed, 4);
    assert!(remote.dirs.contains("a"));
    assert_eq!(remote.dirs.len(), 1);
    assert!(remote.files.is_empty());
}

#[test]
fn list_remote_drops_navigation_entries() {
    let mut remote = MemoryRemote::with_dirs(&["software", "software/App"])
        .with_file("software/readme.txt", b"hi");
    let listing = list_remote(&mut remote, "software").expect("list");

    assert_eq!(listing.style(), ListingStyle::Unix);
    let names: Vec<_> = listing.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["App", "readme.txt"]);
}

#[test]
fn fetch_downloads_file() {
    let tmp = tempdir().expect("create temp dir");
    let local = tmp.path().join("App.exe");
    let mut remote = MemoryRemote::with_dirs(&["software", "software/App"])
        .with_file("software/App/App.exe", b"binary");

    let bytes = fetch(&mut remote, "software/App/App.exe", &local).expect("fetch");
    assert_eq!(bytes, 6);
    assert_eq!(fs::read(&local).expect("read"), b"binary");

    let err = fetch(&mut remote, "software/App/missing", &local).unwrap_err();
    assert!(err.to_string().contains("missing"), "{err}");
}

#[test]
fn parent_remote_cases() {
    assert_eq!(parent_remote("software/App/x"), "software/App");
    assert_eq!(parent_remote("/App"), "/");
    assert_eq!(parent_remote("App"), "");
}

#[test]
fn empty_directory_listing_is_an_empty_listing() {
    let mut remote = MemoryRemote {
        bare: true,
        ..MemoryRemote::with_dirs(&["software", "software/App"])
    };
    let listing = list_remote(&mut remote, "software/App").expect("list");
    assert_eq!(listing.style(), ListingStyle::Unknown);
    assert!(listing.is_empty());
}

#[test]
fn deploy_into_empty_directory_on_bare_server() {
    let tmp = tempdir().expect("create temp dir");
    let site = tmp.path().join("Site");
    write_file(&site.join("css/site.css"), b"body{}");

    let mut remote = MemoryRemote {
        bare: true,
        ..MemoryRemote::with_dirs(&["software", "software/Site"])
    };
    let report = deploy(&mut remote, &DeployPlan::new(&site)).expect("deploy");

    assert_eq!(report.created_dirs, 1);
    assert_eq!(remote.issued("MKD"), vec!["MKD software/Site/css"]);
    assert_eq!(remote.files["software/Site/css/site.css"], b"body{}");
}

#[test]
fn short_transfers_are_reported() {
    let tmp = tempdir().expect("create temp dir");
    let site = tmp.path().join("Site");
    write_file(&site.join("a.txt"), b"aaaa");
    write_file(&site.join("b.txt"), b"");

    let mut remote = MemoryRemote {
        short_writes: true,
        ..MemoryRemote::with_dirs(&["software"])
    };
    let report = deploy(&mut remote, &DeployPlan::new(&site)).expect("deploy");

    assert_eq!(report.uploaded_files, 2);
    assert_eq!(report.bytes, 3);
    assert_eq!(report.size_mismatches, vec!["software/Site/a.txt"]);
}
