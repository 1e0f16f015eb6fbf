use std::path::Path;

use ftpdeploy_listing::{Listing, parse_listing_today};

use crate::error::RemoteResult;

/// Line-oriented FTP operations used by the deploy workflow.
///
/// Remote paths are plain strings with `/` separators, relative to the login
/// directory unless they start with `/`.
pub trait RemoteClient {
    /// Raw `LIST` body, lines joined with `\n`.
    fn list(&mut self, path: &str) -> RemoteResult<String>;

    /// `STOR` a local file at `remote_path`, returning the bytes sent.
    fn upload(&mut self, remote_path: &str, local_file: &Path) -> RemoteResult<u64>;

    /// `RETR` `remote_path` into `local_file`, returning the bytes written.
    fn download(&mut self, remote_path: &str, local_file: &Path) -> RemoteResult<u64>;

    fn make_directory(&mut self, path: &str) -> RemoteResult<()>;

    fn remove_directory(&mut self, path: &str) -> RemoteResult<()>;

    fn delete(&mut self, path: &str) -> RemoteResult<()>;

    /// `LIST` parsed into entries, with today's date filling in missing years.
    fn list_entries(&mut self, path: &str) -> RemoteResult<Listing> {
        let raw = self.list(path)?;
        Ok(parse_listing_today(&raw))
    }
}

impl<C: RemoteClient + ?Sized> RemoteClient for &mut C {
    fn list(&mut self, path: &str) -> RemoteResult<String> {
        (**self).list(path)
    }

    fn upload(&mut self, remote_path: &str, local_file: &Path) -> RemoteResult<u64> {
        (**self).upload(remote_path, local_file)
    }

    fn download(&mut self, remote_path: &str, local_file: &Path) -> RemoteResult<u64> {
        (**self).download(remote_path, local_file)
    }

    fn make_directory(&mut self, path: &str) -> RemoteResult<()> {
        (**self).make_directory(path)
    }

    fn remove_directory(&mut self, path: &str) -> RemoteResult<()> {
        (**self).remove_directory(path)
    }

    fn delete(&mut self, path: &str) -> RemoteResult<()> {
        (**self).delete(path)
    }

    fn list_entries(&mut self, path: &str) -> RemoteResult<Listing> {
        (**self).list_entries(path)
    }
}

/// Join remote path segments with exactly one `/` between them.
///
/// An empty `base` yields `name` unchanged; a `/` base stays absolute.
pub fn join_remote(base: &str, name: &str) -> String {
    let name = name.trim_start_matches('/');
    if base.is_empty() {
        return name.to_owned();
    }
    let base = base.trim_end_matches('/');
    if name.is_empty() {
        return if base.is_empty() { "/".to_owned() } else { base.to_owned() };
    }
    format!("{base}/{name}")
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
