// Calendar context
// Per-widget timezone and locale choices, passed explicitly instead of
// living in process-wide state.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::utils::date::get_week_start;

/// How hour labels and selection ranges are formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

/// Immutable for the lifetime of a widget instance; replaced only through
/// explicit reconfiguration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarContext {
    timezone: Tz,
    /// 0 = Sunday, 1 = Monday, ...
    first_day_of_week: u8,
    time_format: TimeFormat,
}

impl CalendarContext {
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            first_day_of_week: 1,
            time_format: TimeFormat::default(),
        }
    }

    pub fn with_first_day_of_week(mut self, first_day_of_week: u8) -> Self {
        self.first_day_of_week = first_day_of_week % 7;
        self
    }

    pub fn with_time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn first_day_of_week(&self) -> u8 {
        self.first_day_of_week
    }

    pub fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    /// Wall-clock time of `instant` in this context's timezone
    pub fn to_local(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.timezone).naive_local()
    }

    /// Absolute instant for a wall-clock time in this context's timezone.
    ///
    /// Ambiguous times (DST fall-back) resolve to the earlier instant; times
    /// inside a DST gap use the offset in effect at that UTC reading.
    pub fn from_local(&self, local: NaiveDateTime) -> DateTime<Utc> {
        match self.timezone.from_local_datetime(&local) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
            LocalResult::None => {
                let offset = self.timezone.offset_from_utc_datetime(&local).fix();
                let utc = local - Duration::seconds(offset.local_minus_utc() as i64);
                Utc.from_utc_datetime(&utc)
            }
        }
    }

    /// First day of the week containing `date`
    pub fn week_start(&self, date: NaiveDate) -> NaiveDate {
        get_week_start(date, self.first_day_of_week)
    }
}

impl Default for CalendarContext {
    fn default() -> Self {
        Self::new(chrono_tz::UTC)
    }
}
