// Week view callbacks
// Semantic results delivered to the host

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::context::TimeFormat;
use crate::models::event::Event;
use crate::services::gesture::GridTap;
use crate::services::pager::PageDirection;
use crate::services::time_grid::{selection_label, ClockTime};

/// A tap on an empty grid slot, snapped to the tap granularity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridTapped {
    pub date: NaiveDate,
    pub time: ClockTime,
    /// Instant of the snapped slot in the view's timezone
    pub start: DateTime<Utc>,
    /// Text for the highlighted selection, e.g. "9:00 - 9:15 AM"
    pub label: String,
}

impl GridTapped {
    pub(crate) fn new(tap: GridTap, start: DateTime<Utc>, format: TimeFormat) -> Self {
        Self {
            date: tap.date,
            time: tap.time,
            start,
            label: selection_label(tap.selection.start, tap.selection.end, format),
        }
    }
}

/// Receiver of the week view's callbacks. Every method defaults to a no-op.
pub trait WeekViewHandler {
    /// Dragging events is only enabled when this returns true
    fn can_move_events(&self) -> bool {
        false
    }

    fn on_event_moved(&mut self, _event: &Event, _new_start: DateTime<Utc>, _new_end: DateTime<Utc>) {}

    fn on_event_resized(&mut self, _event: &Event, _new_end: DateTime<Utc>) {}

    fn on_grid_tapped(&mut self, _tap: &GridTapped) {}

    fn on_page_changed(&mut self, _date: NaiveDate, _direction: PageDirection) {}

    fn on_event_pressed(&mut self, _event: &Event) {}

    fn on_event_long_pressed(&mut self, _event: &Event) {}
}

/// Ignores every callback
impl WeekViewHandler for () {}
