use std::sync::LazyLock;

use chrono::NaiveDate;
use log::debug;
use regex::{Captures, Regex};

use super::LineExtractor;
use crate::entry::{Entry, PermissionFlags};
use crate::layout::{UNIX_FLAGS, UNIX_TYPE};
use crate::timestamp::Timestamp;

/// `Sep 07 19:33`, `Nov 25 2013`
static DATE_COLUMNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\s+(\d{1,2})\s+(\d{4}|\d{1,2}:\d{2})\b",
    )
    .expect("valid date column pattern")
});

/// Same shape with any three letters in the month slot, so a garbled month
/// still locates the name.
static LOOSE_DATE_COLUMNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z]{3})\s+(\d{1,2})\s+(\d{4}|\d{1,2}:\d{2})\b")
        .expect("valid loose date column pattern")
});

/// ACL (`+`), extended attribute (`@`) or SELinux context (`.`) marker that
/// some servers print right after the flags.
const FLAG_SUFFIXES: [char; 3] = ['+', '@', '.'];

/// Fields before the date: link count, owner, group, size. Some servers omit
/// the group.
const FIELDS_BEFORE_DATE: [usize; 2] = [4, 3];

/// Extractor for `ls -l` style lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixExtractor;

impl LineExtractor for UnixExtractor {
    fn extract(&self, line: &str, reference: NaiveDate) -> Option<Entry> {
        let line = line.trim();

        let is_directory = match UNIX_TYPE.slice(line) {
            Some("d") => true,
            Some("-") => false,
            _ => {
                debug!("[unix] discarding line {:?}", line);
                return None;
            }
        };

        let flags = UNIX_FLAGS.slice(line)?;
        let rest = UNIX_FLAGS.rest(line)?;
        let rest = rest.strip_prefix(FLAG_SUFFIXES).unwrap_or(rest);

        // Link count, then owner.
        let owner = rest.split_whitespace().nth(1).map(str::to_owned);

        let (modified, name) = match find_date_columns(rest) {
            Some((caps, end)) => {
                let modified = Timestamp::from_unix(&caps[1], &caps[2], &caps[3], reference);
                (modified, rest[end..].trim())
            }
            None => {
                debug!("[unix] no date columns in {:?}", line);
                let name = rest.split_whitespace().last().unwrap_or_default();
                (Timestamp::UNKNOWN, name)
            }
        };

        Some(Entry {
            name: name.to_owned(),
            is_directory,
            permissions: PermissionFlags::Unix(flags.to_owned()),
            owner,
            modified,
        })
    }
}

/// Date captures and the byte offset in `rest` where the date ends.
///
/// The date must start right after the fixed fields; searching the whole
/// remainder is the last resort, since owner, group and size can themselves
/// look like a date (`jan 10 2048`).
fn find_date_columns(rest: &str) -> Option<(Captures<'_>, usize)> {
    for skip in FIELDS_BEFORE_DATE {
        let Some(tail) = skip_fields(rest, skip) else {
            continue;
        };
        let offset = rest.len() - tail.len();
        for pattern in [&*DATE_COLUMNS, &*LOOSE_DATE_COLUMNS] {
            if let Some(caps) = pattern.captures(tail)
                && let Some(m) = caps.get(0)
                && m.start() == 0
            {
                return Some((caps, offset + m.end()));
            }
        }
    }

    let caps = DATE_COLUMNS
        .captures(rest)
        .or_else(|| LOOSE_DATE_COLUMNS.captures(rest))?;
    let end = caps.get(0)?.end();
    Some((caps, end))
}

/// `s` with its first `n` whitespace-separated fields removed.
fn skip_fields(s: &str, n: usize) -> Option<&str> {
    let mut tail = s.trim_start();
    for _ in 0..n {
        let end = tail.find(char::is_whitespace)?;
        tail = tail[end..].trim_start();
    }
    Some(tail)
}

#[cfg(test)]
#[path = "unix_tests.rs"]
mod tests;
