// Date utility functions

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Key format used for page and day identifiers
pub const DATE_STR_FORMAT: &str = "%Y-%m-%d";

/// First day of the week containing `date`, with weeks starting on
/// `first_day_of_week` (0 = Sunday).
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last representable millisecond of `date`
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_STR_FORMAT).to_string()
}
