// Tests for reading host events from JSON

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

use rust_week_view::models::event::{Event, EventId};

#[test_case(json!(7), EventId::Number(7) ; "numeric id")]
#[test_case(json!("evt-7"), EventId::Text("evt-7".to_string()) ; "string id")]
fn test_event_id_forms(id: serde_json::Value, expected: EventId) {
    let value = json!({
        "id": id,
        "startDate": "2025-03-11T09:00:00Z",
        "endDate": "2025-03-11T10:00:00Z",
    });
    let event: Event = serde_json::from_value(value).unwrap();
    assert_eq!(event.id, expected);
}

#[test]
fn test_unknown_fields_are_kept() {
    let value = json!({
        "id": 1,
        "startDate": "2025-03-11T09:00:00Z",
        "endDate": "2025-03-11T10:30:00Z",
        "color": "#FF8800",
        "description": "Design review",
        "room": "Blue",
        "attendees": 4,
    });
    let event: Event = serde_json::from_value(value).unwrap();

    assert_eq!(event.duration(), Duration::minutes(90));
    assert!(!event.is_editing);
    assert_eq!(event.extra.get("room"), Some(&json!("Blue")));
    assert_eq!(event.extra.get("attendees"), Some(&json!(4)));

    let back = serde_json::to_value(&event).unwrap();
    assert_eq!(back["room"], json!("Blue"));
    assert_eq!(back["isEditing"], json!(false));
}

#[test]
fn test_offset_timestamps_normalize_to_utc() {
    let value = json!({
        "id": 2,
        "startDate": "2025-03-11T09:00:00+10:00",
        "endDate": "2025-03-11T10:00:00+10:00",
    });
    let event: Event = serde_json::from_value(value).unwrap();
    assert_eq!(event.start_date, Utc.with_ymd_and_hms(2025, 3, 10, 23, 0, 0).unwrap());
}

#[test]
fn test_builder_rejects_bad_color() {
    let start = Utc.with_ymd_and_hms(2025, 3, 11, 9, 0, 0).unwrap();
    let result = Event::builder()
        .id("x")
        .start(start)
        .end(start + Duration::hours(1))
        .color("orange")
        .build();
    assert!(result.is_err());
}
