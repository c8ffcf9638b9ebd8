//! Calendar-date helpers.
//!
//! A date is held as one [`NaiveDate`]; its label and wire value are derived.

use chrono::{Local, Months, NaiveDate, TimeDelta};

/// `dd/mm/yyyy`, as shown on cards and in the date field.
pub fn display_label(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `yyyy-mm-dd`, as sent to the backend.
pub fn storage_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Move by whole days; stays put at the edge of the representable range.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(TimeDelta::days(days)).unwrap_or(date)
}

/// Move by whole months, clamping the day to the target month's length.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let step = Months::new(months.unsigned_abs());
    let moved = if months >= 0 {
        date.checked_add_months(step)
    } else {
        date.checked_sub_months(step)
    };
    moved.unwrap_or(date)
}
