//! Time grid math: conversions between wall-clock time and vertical layout units.
//!
//! Everything here is pure. Inputs and outputs are in the caller's local
//! wall-clock units; no timezone or current time is consulted.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::models::context::TimeFormat;
use crate::models::settings::WeekViewSettings;

pub const MINUTES_IN_HOUR: f64 = 60.0;
pub const HOURS_IN_DAY: u32 = 24;
const MINUTES_IN_DAY: u32 = 24 * 60;
const MILLIS_IN_MINUTE: f64 = 60_000.0;

/// Hour and minute of the day, `hour < 24`, `minutes < 60`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minutes: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minutes: u32) -> Self {
        Self::from_minutes(hour * 60 + minutes)
    }

    /// Wraps around midnight
    pub fn from_minutes(total_minutes: u32) -> Self {
        let total = total_minutes % MINUTES_IN_DAY;
        Self {
            hour: total / 60,
            minutes: total % 60,
        }
    }

    pub fn total_minutes(&self) -> u32 {
        self.hour * 60 + self.minutes
    }

    pub fn add_minutes(&self, minutes: u32) -> Self {
        Self::from_minutes(self.total_minutes() + minutes)
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minutes, 0)
    }

    pub fn format(&self, format: TimeFormat, with_period: bool) -> String {
        match format {
            TimeFormat::TwentyFourHour => format!("{:02}:{:02}", self.hour, self.minutes),
            TimeFormat::TwelveHour => {
                let hour = match self.hour % 12 {
                    0 => 12,
                    h => h,
                };
                if with_period {
                    format!("{}:{:02} {}", hour, self.minutes, period_label(self.hour))
                } else {
                    format!("{}:{:02}", hour, self.minutes)
                }
            }
        }
    }
}

/// "AM" or "PM" for an hour of the day
pub fn period_label(hour: u32) -> &'static str {
    if hour < 12 {
        "AM"
    } else {
        "PM"
    }
}

/// Label shown over a tapped grid selection, e.g. "9:00 - 9:15 AM"
pub fn selection_label(start: ClockTime, end: ClockTime, format: TimeFormat) -> String {
    format!("{} - {}", start.format(format, false), end.format(format, true))
}

/// One row of the hour column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeLabel {
    pub value: u32,
    pub label: String,
}

/// Labels for the 24 hour rows
pub fn hour_labels(format: TimeFormat) -> Vec<TimeLabel> {
    (0..HOURS_IN_DAY)
        .map(|hour| {
            let label = match format {
                TimeFormat::TwelveHour => {
                    let display = if hour == 12 { 12 } else { hour % 12 };
                    format!("{} {}", display, period_label(hour))
                }
                TimeFormat::TwentyFourHour => format!("{:02}:00", hour),
            };
            TimeLabel { value: hour, label }
        })
        .collect()
}

/// Snap a fractional hour down to a multiple of `minutes_to_round`.
///
/// The hour is converted to whole milliseconds first so float noise such as
/// `9.6 * 60 = 575.999...` does not lose a minute. Results are clamped into
/// the day.
pub fn round_time(hour: f64, minutes_to_round: f64) -> ClockTime {
    let millis = (hour * MINUTES_IN_HOUR * MILLIS_IN_MINUTE).round();
    let coeff = MILLIS_IN_MINUTE * minutes_to_round;

    let (rounded, latest) = if coeff > 0.0 {
        let day_millis = MINUTES_IN_DAY as f64 * MILLIS_IN_MINUTE;
        (
            (millis / coeff).floor() * coeff,
            ((day_millis - 1.0) / coeff).floor() * coeff,
        )
    } else {
        (millis, MINUTES_IN_DAY as f64 * MILLIS_IN_MINUTE - 1.0)
    };

    let clamped = rounded.clamp(0.0, latest);
    ClockTime::from_minutes((clamped / MILLIS_IN_MINUTE).floor() as u32)
}

/// Whole minutes since midnight, seconds dropped
pub fn minutes_since_midnight(time: NaiveTime) -> f64 {
    (time.hour() * 60 + time.minute()) as f64
}

/// Linear map between minutes and vertical units for one grid geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    container_height: f64,
    hours_in_display: f64,
}

impl TimeGrid {
    pub fn new(container_height: f64, hours_in_display: f64) -> Self {
        Self {
            container_height,
            hours_in_display,
        }
    }

    pub fn from_settings(settings: &WeekViewSettings) -> Self {
        Self::new(settings.container_height, settings.hours_in_display)
    }

    pub fn hours_in_display(&self) -> f64 {
        self.hours_in_display
    }

    /// Vertical units per hour
    pub fn hour_height(&self) -> f64 {
        self.container_height / self.hours_in_display
    }

    pub fn minutes_to_y(&self, minutes: f64) -> f64 {
        (minutes / MINUTES_IN_HOUR) * self.hour_height()
    }

    /// Exact inverse of [`minutes_to_y`](Self::minutes_to_y), in hours
    pub fn y_to_hour(&self, y: f64) -> f64 {
        (y * self.hours_in_display) / self.container_height
    }

    pub fn time_to_y(&self, time: NaiveTime) -> f64 {
        self.minutes_to_y(minutes_since_midnight(time))
    }

    /// Height of one hour-label row for a label step in minutes
    pub fn time_label_height(&self, time_step_minutes: f64) -> f64 {
        self.minutes_to_y(time_step_minutes)
    }

    /// Scroll offset that brings `start_hour` to the top of the viewport
    pub fn vertical_start_offset(&self, start_hour: f64) -> f64 {
        (start_hour * self.container_height) / self.hours_in_display
    }

    /// Vertical position of the current-time line
    pub fn now_line_y(&self, now: NaiveDateTime) -> f64 {
        self.time_to_y(now.time())
    }
}
