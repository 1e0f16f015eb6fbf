//! Fixed-width column layout of the two listing conventions.
//!
//! Offsets are byte offsets into a line (or into a sub-field, where noted).
//! Every lookup goes through [`Column::slice`], which returns `None` instead
//! of panicking when a line is too short or a boundary falls inside a
//! multi-byte character.

/// A fixed-width column: `width` bytes starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub offset: usize,
    pub width: usize,
}

impl Column {
    pub const fn new(offset: usize, width: usize) -> Self {
        Self { offset, width }
    }

    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    /// Slice this column out of `s`.
    #[inline]
    pub fn slice<'a>(&self, s: &'a str) -> Option<&'a str> {
        s.get(self.offset..self.end())
    }

    /// Everything in `s` after this column.
    #[inline]
    pub fn rest<'a>(&self, s: &'a str) -> Option<&'a str> {
        s.get(self.end()..)
    }
}

// Unix `ls -l`: "drwxr-xr-x    2 0        0            4096 Sep 07 19:33 software"

/// `-` for a file, `d` for a directory.
pub const UNIX_TYPE: Column = Column::new(0, 1);
/// The `rwxr-xr-x` triple-triple following the type character.
pub const UNIX_FLAGS: Column = Column::new(1, 9);
/// Region checked against the Unix signature during detection.
pub const UNIX_SIGNATURE: Column = Column::new(0, 10);
/// Lines shorter than this are never classified as Unix.
pub const UNIX_MIN_LEN: usize = 11;

// Windows `dir`: "08-16-16  10:29PM       <DIR>          RegexTester"

/// `MM-DD-YY` date stamp at the start of the (trimmed) line.
pub const WIN_DATE: Column = Column::new(0, 8);
/// Region checked against the Windows signature during detection.
pub const WIN_SIGNATURE: Column = Column::new(0, 8);
/// Lines shorter than this are never classified as Windows.
pub const WIN_MIN_LEN: usize = 9;
/// `HH:MMam` / `HH:MMpm`, measured after the date and its padding are trimmed.
pub const WIN_TIME: Column = Column::new(0, 7);

// Sub-fields of WIN_DATE.
pub const WIN_MONTH: Column = Column::new(0, 2);
pub const WIN_DAY: Column = Column::new(3, 2);
pub const WIN_YEAR: Column = Column::new(6, 2);

// Sub-fields of WIN_TIME.
pub const WIN_HOUR: Column = Column::new(0, 2);
pub const WIN_MINUTE: Column = Column::new(3, 2);
pub const WIN_MERIDIEM: Column = Column::new(5, 2);

/// Literal written in place of the size column for directories.
pub const WIN_DIR_MARKER: &str = "<DIR>";

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
