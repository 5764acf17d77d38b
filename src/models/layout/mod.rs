// Layout models
// Rectangles produced by the layout engine for the rendering layer

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::event::ExpandedEvent;

/// Position of an event inside its day column, in layout units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// An expanded event with its computed rectangle.
///
/// `lane` and `lane_count` record the horizontal sub-column the event was
/// packed into; a lone event has lane 0 of 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEvent {
    pub data: ExpandedEvent,
    pub style: Rect,
    pub lane: usize,
    pub lane_count: usize,
}

/// Laid-out events of one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub events: Vec<PositionedEvent>,
}
