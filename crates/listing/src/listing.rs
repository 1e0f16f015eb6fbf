use chrono::{Local, NaiveDate};
use log::debug;
use serde::Serialize;

use crate::entry::{Entry, is_synthetic_name};
use crate::style::{ListingStyle, detect_style};

/// Parsed response of one `LIST` command.
///
/// Entries keep the order of their source lines. The file and directory views
/// are computed on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    style: ListingStyle,
    entries: Vec<Entry>,
}

impl Listing {
    /// Style detected for the whole response.
    #[inline]
    pub fn style(&self) -> ListingStyle {
        self.style
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.iter().filter(|e| !e.is_directory)
    }

    pub fn directories(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.iter().filter(|e| e.is_directory)
    }

    /// First entry with exactly this name.
    pub fn find(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Listing {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Parse the raw body of a `LIST` response.
///
/// Lines are split on `\n`; a trailing `\r` is tolerated. The style is detected
/// once from the first line that carries a signature and every non-empty line
/// is run through that style's extractor. Discarded lines and `.`, `..`, or
/// empty names are dropped. Undetectable responses yield an empty listing.
///
/// `reference` supplies the year for Unix dates printed with a clock instead
/// of a year.
pub fn parse_listing(text: &str, reference: NaiveDate) -> Listing {
    let style = detect_style(text.split('\n'));

    let Some(extractor) = style.extractor() else {
        if !is_empty_response(text) {
            debug!("[listing] no line matched a known style");
        }
        return Listing {
            style,
            entries: Vec::new(),
        };
    };

    let entries: Vec<Entry> = text
        .split('\n')
        .filter(|line| !line.is_empty())
        .filter_map(|line| extractor.extract(line, reference))
        .filter(|entry| !is_synthetic_name(&entry.name))
        .collect();

    debug!("[listing] {} entries, style {}", entries.len(), style);

    Listing { style, entries }
}

/// True when `text` holds no listing lines at all: only blank lines and
/// `total N` block summaries, as servers send for an empty directory.
///
/// Such a response detects as [`ListingStyle::Unknown`] yet is a normal empty
/// directory rather than an unrecognised format.
pub fn is_empty_response(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .all(|line| line.is_empty() || is_total_line(line))
}

fn is_total_line(line: &str) -> bool {
    let mut parts = line.split_whitespace();
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(word), Some(count), None)
            if word.eq_ignore_ascii_case("total") && count.bytes().all(|b| b.is_ascii_digit())
    )
}

/// [`parse_listing`] with today's local date as the reference.
pub fn parse_listing_today(text: &str) -> Listing {
    parse_listing(text, Local::now().date_naive())
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
