use log::debug;
use serde::Serialize;

use crate::extract::{LineExtractor, UNIX, WINDOWS};
use crate::layout::{UNIX_MIN_LEN, UNIX_SIGNATURE, WIN_MIN_LEN, WIN_SIGNATURE};

/// Textual convention a server uses for `LIST` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStyle {
    /// `ls -l` style: `drwxr-xr-x 2 owner group 4096 Sep 07 19:33 name`
    Unix,
    /// DOS `dir` style: `08-16-16 10:29PM <DIR> name`
    Windows,
    /// No line carried either signature.
    Unknown,
}

impl ListingStyle {
    /// Extraction algorithm for this style, `None` for [`ListingStyle::Unknown`].
    pub fn extractor(self) -> Option<&'static dyn LineExtractor> {
        match self {
            ListingStyle::Unix => Some(&UNIX),
            ListingStyle::Windows => Some(&WINDOWS),
            ListingStyle::Unknown => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListingStyle::Unix => "unix",
            ListingStyle::Windows => "windows",
            ListingStyle::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ListingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a single line, `Unknown` when it carries no signature.
pub fn classify_line(line: &str) -> ListingStyle {
    if line.len() >= UNIX_MIN_LEN
        && UNIX_SIGNATURE.slice(line).is_some_and(is_unix_signature)
    {
        return ListingStyle::Unix;
    }
    if line.len() >= WIN_MIN_LEN && WIN_SIGNATURE.slice(line).is_some_and(is_windows_signature) {
        return ListingStyle::Windows;
    }
    ListingStyle::Unknown
}

/// Style of the first line that carries a signature.
///
/// Responses are homogeneous in practice, so the scan stops at the first hit
/// instead of voting across lines.
pub fn detect_style<'a, I>(lines: I) -> ListingStyle
where
    I: IntoIterator<Item = &'a str>,
{
    for (idx, line) in lines.into_iter().enumerate() {
        let style = classify_line(line);
        if style != ListingStyle::Unknown {
            debug!("[detect] line {idx} classified as {style}");
            return style;
        }
    }
    ListingStyle::Unknown
}

/// `(-|d)((-|r)(-|w)(-|x)){3}` over exactly ten bytes.
fn is_unix_signature(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 10 || !matches!(b[0], b'-' | b'd') {
        return false;
    }
    b[1..].chunks_exact(3).all(|triple| {
        matches!(triple[0], b'-' | b'r')
            && matches!(triple[1], b'-' | b'w')
            && matches!(triple[2], b'-' | b'x')
    })
}

/// `DD-DD-DD` over exactly eight bytes.
fn is_windows_signature(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 8
        && b.iter().enumerate().all(|(i, c)| match i {
            2 | 5 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

#[cfg(test)]
#[path = "style_tests.rs"]
mod tests;
