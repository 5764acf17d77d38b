// Event module
// Caller-owned calendar events and their per-day expansions

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Event identifier as supplied by the host (numeric or textual)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Number(n) => write!(f, "{}", n),
            EventId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EventId {
    fn from(value: i64) -> Self {
        EventId::Number(value)
    }
}

impl From<i32> for EventId {
    fn from(value: i32) -> Self {
        EventId::Number(value.into())
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        EventId::Text(value.to_string())
    }
}

impl From<String> for EventId {
    fn from(value: String) -> Self {
        EventId::Text(value)
    }
}

/// Calendar event as handed to the week view.
///
/// Instants are absolute (UTC); conversion to wall-clock time happens through
/// a [`CalendarContext`](crate::models::context::CalendarContext). Fields the
/// core does not know about are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Editing mode enables the resize handle and disables dragging
    #[serde(default)]
    pub is_editing: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    /// Create a new event with required fields
    ///
    /// # Examples
    /// ```
    /// use rust_week_view::models::event::Event;
    /// use chrono::{Duration, TimeZone, Utc};
    ///
    /// let start = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
    /// let event = Event::new(1, start, start + Duration::hours(1)).unwrap();
    /// assert_eq!(event.duration(), Duration::hours(1));
    /// ```
    pub fn new(
        id: impl Into<EventId>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<Self, String> {
        if end_date < start_date {
            return Err("Event end date must not be before start date".to_string());
        }

        Ok(Self {
            id: id.into(),
            start_date,
            end_date,
            color: None,
            description: None,
            is_editing: false,
            extra: Map::new(),
        })
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), String> {
        if self.end_date < self.start_date {
            return Err("Event end date must not be before start date".to_string());
        }

        if let Some(ref color) = self.color {
            if !color.starts_with('#') || (color.len() != 7 && color.len() != 4) {
                return Err("Color must be in hex format (#RRGGBB or #RGB)".to_string());
            }
        }

        Ok(())
    }

    /// Get the duration of the event
    pub fn duration(&self) -> Duration {
        self.end_date - self.start_date
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    id: Option<EventId>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    color: Option<String>,
    description: Option<String>,
    is_editing: bool,
    extra: Map<String, Value>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<EventId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Set the event color (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn editing(mut self, is_editing: bool) -> Self {
        self.is_editing = is_editing;
        self
    }

    /// Attach an arbitrary host field that is carried through untouched
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Build the event
    pub fn build(self) -> Result<Event, String> {
        let id = self.id.ok_or("Event id is required")?;
        let start_date = self.start_date.ok_or("Event start date is required")?;
        let end_date = self.end_date.ok_or("Event end date is required")?;

        let event = Event {
            id,
            start_date,
            end_date,
            color: self.color,
            description: self.description,
            is_editing: self.is_editing,
            extra: self.extra,
        };

        event.validate()?;
        Ok(event)
    }
}

/// An event clipped to a single calendar day, in local wall-clock time.
///
/// `original_duration` is the length of the unclipped event; moving a
/// segment to another day preserves it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandedEvent {
    pub event: Event,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(rename = "originalDurationMs", serialize_with = "serialize_duration_ms")]
    pub original_duration: Duration,
}

impl ExpandedEvent {
    pub fn id(&self) -> &EventId {
        &self.event.id
    }

    /// Day column this segment belongs to
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

fn serialize_duration_ms<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(duration.num_milliseconds())
}
