//! Parser for the free-text body of an FTP `LIST` response.
//!
//! Servers answer `LIST` in either Unix `ls -l` style or Windows `dir` style.
//! [`parse_listing`] detects which one is in use and turns each line into an
//! [`Entry`]. Malformed input never fails: undetectable responses produce an
//! empty [`Listing`] with [`ListingStyle::Unknown`], unreadable lines are
//! dropped, and unreadable dates keep a `month` of `0`.

mod entry;
mod extract;
pub mod layout;
mod listing;
mod style;
mod timestamp;

pub use entry::{Entry, NOT_DETERMINABLE, PermissionFlags};
pub use extract::{LineExtractor, UnixExtractor, WindowsExtractor};
pub use listing::{Listing, is_empty_response, parse_listing, parse_listing_today};
pub use style::{ListingStyle, classify_line, detect_style};
pub use timestamp::{Timestamp, WINDOWS_CENTURY, month_from_abbrev};
