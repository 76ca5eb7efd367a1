use chrono::{Datelike, NaiveDate};

/// 1-based calendar quarter for a month (1-12).
pub fn quarter_of_month(month: u32) -> u32 {
    (month - 1) / 3 + 1
}

pub fn start_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

pub fn start_of_next_quarter(date: NaiveDate) -> NaiveDate {
    let quarter = quarter_of_month(date.month());

    let (year, month) = if quarter == 4 {
        (date.year() + 1, 1)
    } else {
        (date.year(), quarter * 3 + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

pub fn start_of_next_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year() + 1, 1, 1).unwrap()
}

/// Whole days from `start` (inclusive) to `end` (exclusive).
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}
