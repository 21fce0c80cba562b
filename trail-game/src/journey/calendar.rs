//! Gregorian-ish calendar with the trail's four-year leap approximation.
use serde::{Deserialize, Serialize};
use std::fmt;

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Every fourth year is a leap year; century rules are ignored.
#[must_use]
pub const fn is_leap_year(year: u32) -> bool {
    year % 4 == 0
}

#[must_use]
pub const fn days_in_month(month: u32, year: u32) -> u32 {
    if month == 2 && is_leap_year(year) {
        return 29;
    }
    match month {
        1..=12 => DAYS_IN_MONTH[(month - 1) as usize],
        _ => 30,
    }
}

#[must_use]
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize))
        .copied()
        .unwrap_or("Unknown")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrailDate {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

impl TrailDate {
    #[must_use]
    pub const fn new(day: u32, month: u32, year: u32) -> Self {
        Self { year, month, day }
    }

    /// The following day and whether it opened a new month.
    #[must_use]
    pub const fn next_day(self) -> (Self, bool) {
        let mut next = self;
        next.day += 1;
        if next.day <= days_in_month(next.month, next.year) {
            return (next, false);
        }
        next.day = 1;
        next.month += 1;
        if next.month > 12 {
            next.month = 1;
            next.year += 1;
        }
        (next, true)
    }

    /// Skip `days` days with month and year rollover.
    #[must_use]
    pub const fn plus_days(self, days: u32) -> Self {
        let mut date = self;
        let mut remaining = days;
        while remaining > 0 {
            date = date.next_day().0;
            remaining -= 1;
        }
        date
    }
}

impl fmt::Display for TrailDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, {}", month_name(self.month), self.day, self.year)
    }
}

/// Long-form label, e.g. `March 1, 1848`.
#[must_use]
pub fn format_date(day: u32, month: u32, year: u32) -> String {
    TrailDate::new(day, month, year).to_string()
}
