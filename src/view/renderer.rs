// Event renderer
// Turns a positioned event into what the host draws inside its rectangle

use serde::Serialize;

use crate::models::event::EventId;
use crate::models::layout::{PositionedEvent, Rect};

pub const DEFAULT_EVENT_COLOR: &str = "#4A90E2";
const EDITING_Z_INDEX: i32 = 2;
const EDITING_OPACITY: f64 = 0.8;

/// Visual description of one event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedEvent {
    pub id: EventId,
    pub style: Rect,
    pub text: String,
    pub color: String,
    pub z_index: i32,
    pub opacity: f64,
    pub show_resize_handle: bool,
}

/// Produces the visual for an event and its computed rectangle
pub trait EventRenderer {
    fn render(&self, positioned: &PositionedEvent) -> RenderedEvent;
}

/// Default renderer: the event description on its color
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl EventRenderer for TextRenderer {
    fn render(&self, positioned: &PositionedEvent) -> RenderedEvent {
        let event = &positioned.data.event;
        let (z_index, opacity) = if event.is_editing {
            (EDITING_Z_INDEX, EDITING_OPACITY)
        } else {
            (0, 1.0)
        };

        RenderedEvent {
            id: event.id.clone(),
            style: positioned.style,
            text: event.description.clone().unwrap_or_default(),
            color: event
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_EVENT_COLOR.to_string()),
            z_index,
            opacity,
            show_resize_handle: event.is_editing,
        }
    }
}

/// Closures work as renderers
impl<F> EventRenderer for F
where
    F: Fn(&PositionedEvent) -> RenderedEvent,
{
    fn render(&self, positioned: &PositionedEvent) -> RenderedEvent {
        self(positioned)
    }
}
