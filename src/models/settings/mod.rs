// Settings module
// Week view configuration, loadable from TOML

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::context::{CalendarContext, TimeFormat};

/// Page sizes the week view knows how to lay out
pub const AVAILABLE_NUMBER_OF_DAYS: [u32; 4] = [1, 3, 5, 7];

const SETTINGS_FILE_NAME: &str = "week_view.toml";

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("days per page must be one of 1, 3, 5 or 7 (got {0})")]
    InvalidDaysPerPage(u32),

    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("container width {width} leaves no room after {padding} of event padding")]
    NoRoomForColumns { width: f64, padding: f64 },

    #[error("grid lines per hour must be at least 2 (got {0})")]
    TooFewGridLines(u32),

    #[error("page buffer must be at least 1")]
    EmptyPageBuffer,

    #[error("unknown timezone '{name}': {reason}")]
    InvalidTimezone { name: String, reason: String },
}

/// Configuration for one week view instance.
///
/// Every field has a default, so a settings file only needs the values it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekViewSettings {
    pub days_per_page: u32,
    pub hours_in_display: f64,
    /// Step between hour labels, in minutes
    pub time_step_minutes: u32,
    /// Hour the vertical agenda is scrolled to on mount
    pub start_hour: f64,
    /// Most-recent-first page order
    pub reverse_order: bool,
    pub right_to_left: bool,
    pub overlap_tolerance_seconds: i64,
    pub min_item_width: f64,
    pub page_buffer: usize,
    /// Grid lines drawn per hour; taps snap to `60 / (lines - 1)` minutes
    pub grid_lines_per_hour: u32,
    pub container_width: f64,
    pub container_height: f64,
    pub content_offset: f64,
    pub event_horizontal_padding: f64,
    pub timezone: String,
    /// 0 = Sunday, 1 = Monday
    pub first_day_of_week: u8,
    pub time_format: TimeFormat,
}

impl Default for WeekViewSettings {
    fn default() -> Self {
        Self {
            days_per_page: 7,
            hours_in_display: 6.0,
            time_step_minutes: 60,
            start_hour: 0.0,
            reverse_order: false,
            right_to_left: false,
            overlap_tolerance_seconds: 2,
            min_item_width: 4.0,
            page_buffer: 2,
            grid_lines_per_hour: 5,
            container_width: 360.0,
            container_height: 600.0,
            content_offset: 0.0,
            event_horizontal_padding: 15.0,
            timezone: "UTC".to_string(),
            first_day_of_week: 1,
            time_format: TimeFormat::TwelveHour,
        }
    }
}

impl WeekViewSettings {
    /// Check the invariants the layout and pager rely on
    pub fn validate(&self) -> std::result::Result<(), SettingsError> {
        if !AVAILABLE_NUMBER_OF_DAYS.contains(&self.days_per_page) {
            return Err(SettingsError::InvalidDaysPerPage(self.days_per_page));
        }

        let positive = [
            ("hours_in_display", self.hours_in_display),
            ("time_step_minutes", self.time_step_minutes as f64),
            ("container_width", self.container_width),
            ("container_height", self.container_height),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(SettingsError::NotPositive { field, value });
            }
        }

        if self.container_width <= self.event_horizontal_padding {
            return Err(SettingsError::NoRoomForColumns {
                width: self.container_width,
                padding: self.event_horizontal_padding,
            });
        }

        let non_negative = [
            ("min_item_width", self.min_item_width),
            ("overlap_tolerance_seconds", self.overlap_tolerance_seconds as f64),
            ("event_horizontal_padding", self.event_horizontal_padding),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(SettingsError::Negative { field, value });
            }
        }

        if self.grid_lines_per_hour < 2 {
            return Err(SettingsError::TooFewGridLines(self.grid_lines_per_hour));
        }

        if self.page_buffer == 0 {
            return Err(SettingsError::EmptyPageBuffer);
        }

        self.parse_timezone()?;
        Ok(())
    }

    fn parse_timezone(&self) -> std::result::Result<Tz, SettingsError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| SettingsError::InvalidTimezone {
                name: self.timezone.clone(),
                reason: e.to_string(),
            })
    }

    /// Build the explicit calendar context for this configuration
    pub fn context(&self) -> std::result::Result<CalendarContext, SettingsError> {
        let tz = self.parse_timezone()?;
        Ok(CalendarContext::new(tz)
            .with_first_day_of_week(self.first_day_of_week)
            .with_time_format(self.time_format))
    }

    /// Width of one day column available to events
    pub fn column_width(&self) -> f64 {
        (self.container_width - self.event_horizontal_padding) / self.days_per_page as f64
    }

    /// Minutes a grid tap snaps to
    pub fn tap_granularity_minutes(&self) -> f64 {
        60.0 / (self.grid_lines_per_hour.saturating_sub(1).max(1)) as f64
    }

    /// Parse settings from TOML text and validate them
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).context("Failed to parse week view settings")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize week view settings")
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Invalid settings in {:?}", path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create settings directory: {:?}", parent))?;
            }
        }
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write settings file {:?}", path))
    }

    /// Per-user settings location, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "KenBoyle", "RustWeekView")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
    }

    /// Load from the default location, falling back to defaults when no
    /// settings file exists yet
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                log::debug!("No week view settings file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}
