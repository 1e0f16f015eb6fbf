use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::layout::{Column, WIN_DAY, WIN_HOUR, WIN_MERIDIEM, WIN_MINUTE, WIN_MONTH, WIN_YEAR};

/// Windows listings print two-digit years; they are read as 20yy.
pub const WINDOWS_CENTURY: i32 = 2000;

/// Calendar components reconstructed from a listing line.
///
/// Components are kept raw rather than as a `chrono` value so that a line with
/// an unparseable piece still produces a record. A `month` of `0` means the
/// timestamp could not be read; callers should check [`Timestamp::is_valid`]
/// before trusting the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Timestamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl Timestamp {
    /// All-zero sentinel for lines without a recognizable timestamp.
    pub const UNKNOWN: Timestamp = Timestamp {
        year: 0,
        month: 0,
        day: 0,
        hour: 0,
        minute: 0,
    };

    pub const fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
        }
    }

    /// Unix `ls -l` date columns: month abbreviation, day, and either a year
    /// or an `H:MM` clock.
    ///
    /// With a year, time of day is unknown and reads as midnight. With a
    /// clock, the year is not printed and is taken from `reference`.
    pub fn from_unix(month: &str, day: &str, year_or_clock: &str, reference: NaiveDate) -> Self {
        let month = month_from_abbrev(month);
        let day = parse_or_zero(day);

        match year_or_clock.split_once(':') {
            Some((hour, minute)) => Self::new(
                reference.year(),
                month,
                day,
                parse_or_zero(hour),
                parse_or_zero(minute),
            ),
            None => Self::new(parse_or_zero(year_or_clock), month, day, 0, 0),
        }
    }

    /// Windows `MM-DD-YY` date and `HH:MMam`/`HH:MMpm` time.
    ///
    /// PM adds twelve hours with no special case for 12:xx, so `12:30PM`
    /// yields hour 24 and an invalid timestamp.
    pub fn from_windows(date: &str, time: &str) -> Self {
        let field = |col: Column, s: &str| -> u32 { col.slice(s).map(parse_or_zero).unwrap_or(0) };

        let year = WIN_YEAR
            .slice(date)
            .and_then(|y| y.parse::<i32>().ok())
            .map(|y| WINDOWS_CENTURY + y)
            .unwrap_or(0);

        let mut hour = field(WIN_HOUR, time);
        let pm = WIN_MERIDIEM
            .slice(time)
            .is_some_and(|m| m.eq_ignore_ascii_case("pm"));
        if pm {
            hour += 12;
        }

        Self::new(
            year,
            field(WIN_MONTH, date),
            field(WIN_DAY, date),
            hour,
            field(WIN_MINUTE, time),
        )
    }

    /// The timestamp as a calendar value, `None` for sentinel or out-of-range
    /// components.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_opt(self.hour, self.minute, 0)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.to_datetime().is_some()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

/// Month number for a three-letter English abbreviation, case-insensitive.
/// Anything else maps to `0`.
pub fn month_from_abbrev(s: &str) -> u32 {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];

    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(s))
        .map(|i| i as u32 + 1)
        .unwrap_or(0)
}

fn parse_or_zero<T: std::str::FromStr + Default>(s: &str) -> T {
    s.trim().parse().unwrap_or_default()
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
