use chrono::NaiveDate;
use log::debug;

use super::LineExtractor;
use crate::entry::{Entry, PermissionFlags};
use crate::layout::{WIN_DATE, WIN_DIR_MARKER, WIN_TIME};
use crate::timestamp::Timestamp;

/// Extractor for DOS `dir` style lines:
///
/// ```text
/// 08-14-16  09:59PM                43378 License.rtf
/// 08-16-16  10:29PM       <DIR>          RegexTester
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsExtractor;

impl LineExtractor for WindowsExtractor {
    fn extract(&self, line: &str, _reference: NaiveDate) -> Option<Entry> {
        let line = line.trim();

        let Some(date) = WIN_DATE.slice(line) else {
            debug!("[windows] discarding short line {:?}", line);
            return None;
        };
        let rest = WIN_DATE.rest(line)?.trim_start();

        let time = WIN_TIME.slice(rest).unwrap_or(rest);
        let rest = WIN_TIME.rest(rest).unwrap_or_default().trim();

        let (is_directory, name) = match rest.strip_prefix(WIN_DIR_MARKER) {
            Some(name) => (true, name.trim()),
            // Skip the size column.
            None => match rest.split_once(char::is_whitespace) {
                Some((_size, name)) => (false, name.trim()),
                None => (false, ""),
            },
        };

        Some(Entry {
            name: name.to_owned(),
            is_directory,
            permissions: PermissionFlags::NotDeterminable,
            owner: None,
            modified: Timestamp::from_windows(date, time),
        })
    }
}

#[cfg(test)]
#[path = "windows_tests.rs"]
mod tests;
