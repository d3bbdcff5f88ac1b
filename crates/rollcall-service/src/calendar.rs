//! Calendar window arithmetic shared by notices and statistics.
//!
//! All windows are computed on naive UTC dates. Weeks start on Sunday.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc, Weekday};

/// Inclusive date window `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// The single-day window for `date`.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            from: date,
            to: date,
        }
    }

    /// The Sunday-started week containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        let week = date.week(Weekday::Sun);
        Self {
            from: week.first_day(),
            to: week.last_day(),
        }
    }

    /// The Sunday-started week after the one containing `date`.
    pub fn next_week_of(date: NaiveDate) -> Self {
        let this_week = Self::week_of(date);
        Self {
            from: this_week.from + Days::new(7),
            to: this_week.to + Days::new(7),
        }
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let from = first_of_month(date.year(), date.month());
        Self {
            from,
            to: last_of_month(date.year(), date.month()),
        }
    }

    /// The calendar month after the one containing `date`.
    pub fn next_month_of(date: NaiveDate) -> Self {
        let (year, month) = if date.month() == 12 {
            (date.year() + 1, 1)
        } else {
            (date.year(), date.month() + 1)
        };
        Self {
            from: first_of_month(year, month),
            to: last_of_month(year, month),
        }
    }

    /// UTC midnight at the start of `from`.
    pub fn start_utc(&self) -> DateTime<Utc> {
        day_start_utc(self.from)
    }

    /// UTC midnight at the start of the day after `to` (exclusive bound).
    pub fn end_utc_exclusive(&self) -> DateTime<Utc> {
        day_start_utc(self.to + Days::new(1))
    }
}

/// The current date on the server's UTC clock.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// UTC midnight at the start of `date`.
pub fn day_start_utc(date: NaiveDate) -> DateTime<Utc> {
    // Midnight always exists for a valid NaiveDate in UTC.
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default())
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_of_month(next_year, next_month) - Days::new(1)
}
