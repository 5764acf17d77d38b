// Gesture module
// Drag-to-move, drag-to-resize and grid taps, from raw pointer deltas back
// to wall-clock times.
//
// The host gesture recognizer owns pointer capture; these types only track
// the lifecycle (idle -> active -> released | terminated) and the visual
// offset while a gesture runs.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::event::Event;
use crate::models::layout::PositionedEvent;
use crate::services::time_grid::{round_time, ClockTime, TimeGrid, MINUTES_IN_HOUR};
use crate::utils::date::start_of_day;

/// Pointer travel (in layout units) before a drag claims the gesture
pub const MOVE_THRESHOLD: f64 = 2.0;
const MINUTES_IN_DAY: i64 = 24 * 60;

pub fn has_moved_enough(dx: f64, dy: f64) -> bool {
    dx.abs() > MOVE_THRESHOLD || dy.abs() > MOVE_THRESHOLD
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Active,
    Released,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Translation {
    pub dx: f64,
    pub dy: f64,
}

/// Lifecycle of dragging an event to a new slot
#[derive(Debug, Clone, Default)]
pub struct DragGesture {
    phase: GesturePhase,
    translation: Translation,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dragging needs a move handler and is disabled while the event is edited
    pub fn is_enabled(event: &Event, has_handler: bool) -> bool {
        has_handler && !event.is_editing
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == GesturePhase::Active
    }

    /// Visual offset to apply to the event while dragging
    pub fn translation(&self) -> Translation {
        self.translation
    }

    pub fn begin(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.phase = GesturePhase::Active;
        self.translation = Translation::default();
        true
    }

    pub fn update(&mut self, dx: f64, dy: f64) {
        if self.is_active() {
            self.translation = Translation { dx, dy };
        }
    }

    /// Finish the drag; yields the final delta exactly once
    pub fn release(&mut self, dx: f64, dy: f64) -> Option<Translation> {
        if !self.is_active() {
            return None;
        }
        self.phase = GesturePhase::Released;
        self.translation = Translation { dx, dy };
        Some(self.translation)
    }

    /// Another gesture took the pointer; drop the offset without committing
    pub fn terminate(&mut self) {
        if self.is_active() {
            self.phase = GesturePhase::Terminated;
        }
        self.translation = Translation::default();
    }

    /// Back to idle once the host has re-laid out the event
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Lifecycle of dragging an event's bottom edge
#[derive(Debug, Clone, Default)]
pub struct ResizeGesture {
    phase: GesturePhase,
    base_height: f64,
    dy: f64,
}

impl ResizeGesture {
    pub fn new(base_height: f64) -> Self {
        Self {
            base_height,
            ..Default::default()
        }
    }

    /// The resize handle is only shown for an event being edited
    pub fn is_enabled(event: &Event) -> bool {
        event.is_editing
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == GesturePhase::Active
    }

    /// Height to draw while resizing
    pub fn current_height(&self) -> f64 {
        (self.base_height + self.dy).max(0.0)
    }

    pub fn begin(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.phase = GesturePhase::Active;
        self.dy = 0.0;
        true
    }

    pub fn update(&mut self, dy: f64) {
        if self.is_active() {
            self.dy = dy;
        }
    }

    /// Finish the resize. Returns the new bottom edge, or `None` when the
    /// edge would not be below `top`, in which case the height snaps back.
    pub fn release(&mut self, top: f64, dy: f64) -> Option<f64> {
        if !self.is_active() {
            return None;
        }
        self.phase = GesturePhase::Released;

        let new_y = top + self.base_height + dy;
        if new_y <= top {
            self.dy = 0.0;
            return None;
        }
        self.dy = dy;
        Some(new_y)
    }

    pub fn terminate(&mut self) {
        if self.is_active() {
            self.phase = GesturePhase::Terminated;
        }
        self.dy = 0.0;
    }
}

/// Geometry needed to turn layout positions back into times
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub grid: TimeGrid,
    pub column_width: f64,
    pub content_offset: f64,
}

impl GridGeometry {
    /// Minutes since midnight at vertical position `y`, to the nearest minute
    fn minutes_at(&self, y: f64) -> i64 {
        let hour = self.grid.y_to_hour(y - self.content_offset);
        (hour * MINUTES_IN_HOUR).round() as i64
    }
}

/// Where a dragged event lands: new start and end in wall-clock time
pub fn resolve_drag(
    positioned: &PositionedEvent,
    delta: Translation,
    days: &[NaiveDate],
    geometry: &GridGeometry,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let origin_column = days.iter().position(|d| *d == positioned.data.date())?;
    let width = geometry.column_width;

    let new_x = origin_column as f64 * width + positioned.style.center_x() + delta.dx;
    let column = (new_x / width).floor().clamp(0.0, (days.len() - 1) as f64) as usize;

    let minutes = geometry
        .minutes_at(positioned.style.top + delta.dy)
        .clamp(0, MINUTES_IN_DAY - 1);
    let new_start = start_of_day(days[column]) + Duration::minutes(minutes);

    Some((new_start, new_start + positioned.data.original_duration))
}

/// New end of a resized event, on the day of the resized segment
pub fn resolve_resize_end(
    positioned: &PositionedEvent,
    dy: f64,
    geometry: &GridGeometry,
) -> Option<NaiveDateTime> {
    let style = positioned.style;
    let new_y = style.bottom() + dy;
    if new_y <= style.top {
        return None;
    }

    let minutes = geometry.minutes_at(new_y).clamp(0, MINUTES_IN_DAY);
    let new_end = start_of_day(positioned.data.date()) + Duration::minutes(minutes);
    (new_end > positioned.data.start).then_some(new_end)
}

/// Highlighted range created by a grid tap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSelection {
    pub start: ClockTime,
    pub end: ClockTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridTap {
    pub date: NaiveDate,
    pub time: ClockTime,
    pub selection: GridSelection,
}

/// Date and snapped time under a tap at `y` in column `day_index`
pub fn resolve_grid_tap(
    days: &[NaiveDate],
    day_index: usize,
    y: f64,
    geometry: &GridGeometry,
    granularity_minutes: f64,
) -> Option<GridTap> {
    let date = *days.get(day_index)?;
    let hour = geometry.grid.y_to_hour(y - geometry.content_offset);
    let time = round_time(hour, granularity_minutes);
    let end = time.add_minutes(granularity_minutes.round().max(1.0) as u32);

    Some(GridTap {
        date,
        time,
        selection: GridSelection { start: time, end },
    })
}
