// File: ./src/model/date.rs
//! `DD/MM/YYYY` calendar dates as they appear in the deadline sheet.
use chrono::{Datelike, NaiveDate};

/// Parses a `DD/MM/YYYY` string into a local calendar date.
///
/// Only exactly two digits, two digits and four digits separated by `/` are
/// accepted. Combinations that do not exist on the calendar (31/04, 29/02 on a
/// non-leap year, ...) return `None`.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let bytes = input.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 2 && *i != 5)
        .all(|(_, b)| b.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    let day: u32 = input[0..2].parse().ok()?;
    let month: u32 = input[3..5].parse().ok()?;
    let year: i32 = input[6..10].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    // The constructed date must give back exactly what was written.
    if date.year() != year || date.month() != month || date.day() != day {
        return None;
    }
    Some(date)
}

/// Formats a date back into the sheet's `DD/MM/YYYY` form.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Moves `date` to `year`, keeping month and day.
///
/// Feb 29 lands on Feb 28 when the target year is not a leap year.
pub fn with_year_clamped(date: NaiveDate, year: i32) -> NaiveDate {
    date.with_year(year).unwrap_or_else(|| {
        NaiveDate::from_ymd_opt(year, date.month(), 28)
            .unwrap_or(date)
    })
}

/// Adds calendar months, clamping the day to the end of the target month.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(chrono::Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}
