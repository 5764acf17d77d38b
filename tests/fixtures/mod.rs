// Test fixtures - reusable test data
// Provides consistent events, settings and a recording handler across test files
#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use rust_week_view::models::event::{Event, EventId};
use rust_week_view::models::settings::WeekViewSettings;
use rust_week_view::services::pager::PageDirection;
use rust_week_view::{GridTapped, WeekViewHandler};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Wednesday, March 12 2025; its Monday-based week starts on the 10th
    pub fn wed_mar_12_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    pub fn mar_2025(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    pub fn utc(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, minute, 0).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// One-hour event on March `day` at `hour`:00 UTC
    pub fn one_hour(id: i64, day: u32, hour: u32) -> Event {
        let start = dates::utc(day, hour, 0);
        Event::new(id, start, start + Duration::hours(1)).unwrap()
    }

    pub fn spanning(id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
        Event::new(id, start, end).unwrap()
    }

    /// Same as `one_hour` but in editing mode
    pub fn editing(id: i64, day: u32, hour: u32) -> Event {
        let mut event = one_hour(id, day, hour);
        event.is_editing = true;
        event
    }
}

/// Settings with round numbers: 50 units per column, 100 units per hour
pub fn round_settings() -> WeekViewSettings {
    WeekViewSettings {
        container_width: 365.0,
        container_height: 600.0,
        hours_in_display: 6.0,
        ..Default::default()
    }
}

/// Everything the week view reported, in order
#[derive(Debug, Default)]
pub struct RecordingHandler {
    pub allow_moves: bool,
    pub moved: Vec<(EventId, DateTime<Utc>, DateTime<Utc>)>,
    pub resized: Vec<(EventId, DateTime<Utc>)>,
    pub tapped: Vec<GridTapped>,
    pub pages: Vec<(NaiveDate, PageDirection)>,
    pub pressed: Vec<EventId>,
    pub long_pressed: Vec<EventId>,
}

impl RecordingHandler {
    pub fn movable() -> Self {
        Self {
            allow_moves: true,
            ..Default::default()
        }
    }
}

impl WeekViewHandler for RecordingHandler {
    fn can_move_events(&self) -> bool {
        self.allow_moves
    }

    fn on_event_moved(&mut self, event: &Event, new_start: DateTime<Utc>, new_end: DateTime<Utc>) {
        self.moved.push((event.id.clone(), new_start, new_end));
    }

    fn on_event_resized(&mut self, event: &Event, new_end: DateTime<Utc>) {
        self.resized.push((event.id.clone(), new_end));
    }

    fn on_grid_tapped(&mut self, tap: &GridTapped) {
        self.tapped.push(tap.clone());
    }

    fn on_page_changed(&mut self, date: NaiveDate, direction: PageDirection) {
        self.pages.push((date, direction));
    }

    fn on_event_pressed(&mut self, event: &Event) {
        self.pressed.push(event.id.clone());
    }

    fn on_event_long_pressed(&mut self, event: &Event) {
        self.long_pressed.push(event.id.clone());
    }
}
