mod unix;
mod windows;

use chrono::NaiveDate;

use crate::entry::Entry;

pub use unix::UnixExtractor;
pub use windows::WindowsExtractor;

pub(crate) static UNIX: UnixExtractor = UnixExtractor;
pub(crate) static WINDOWS: WindowsExtractor = WindowsExtractor;

/// Turns one line of a listing, already known to be in a given style, into an
/// [`Entry`].
///
/// `None` means the line should be discarded (a `total N` summary, a line of
/// another type). Implementations must not panic on short or malformed input.
pub trait LineExtractor: Sync {
    /// `reference` supplies the year for dates that omit it.
    fn extract(&self, line: &str, reference: NaiveDate) -> Option<Entry>;
}
