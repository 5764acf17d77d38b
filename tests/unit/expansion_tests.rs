// Tests for splitting events into per-day segments in a named timezone

use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use test_case::test_case;

use rust_week_view::models::context::CalendarContext;
use rust_week_view::models::event::Event;
use rust_week_view::services::layout::expand_events_by_day;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, d).unwrap()
}

#[test]
fn test_utc_event_lands_on_local_day() {
    let ctx = CalendarContext::new(chrono_tz::Australia::Sydney);
    let start = Utc.with_ymd_and_hms(2025, 3, 10, 22, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 3, 10, 23, 0, 0).unwrap();

    let by_day = expand_events_by_day(&[Event::new(1, start, end).unwrap()], &ctx);

    let days: Vec<NaiveDate> = by_day.keys().copied().collect();
    assert_eq!(days, vec![date(3, 11)]);
    let segment = &by_day[&date(3, 11)][0];
    assert_eq!(segment.start.to_string(), "2025-03-11 09:00:00");
}

#[test]
fn test_local_midnight_split() {
    let ctx = CalendarContext::new(chrono_tz::America::New_York);
    // 22:00 to 02:00 New York time (EDT, UTC-4)
    let start = Utc.with_ymd_and_hms(2025, 6, 3, 2, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 6, 3, 6, 0, 0).unwrap();

    let by_day = expand_events_by_day(&[Event::new(1, start, end).unwrap()], &ctx);

    let first = &by_day[&date(6, 2)][0];
    let second = &by_day[&date(6, 3)][0];
    assert_eq!(first.start.to_string(), "2025-06-02 22:00:00");
    assert_eq!(first.end.to_string(), "2025-06-02 23:59:59.999");
    assert_eq!(second.start.to_string(), "2025-06-03 00:00:00");
    assert_eq!(second.end.to_string(), "2025-06-03 02:00:00");
    assert_eq!(first.original_duration, second.original_duration);
}

#[test_case(chrono_tz::UTC, 1 ; "utc keeps one day")]
#[test_case(chrono_tz::Asia::Tokyo, 2 ; "tokyo crosses midnight")]
fn test_day_count_depends_on_zone(tz: chrono_tz::Tz, expected_days: usize) {
    let start = Utc.with_ymd_and_hms(2025, 3, 11, 13, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 3, 11, 16, 0, 0).unwrap();

    let by_day = expand_events_by_day(&[Event::new(1, start, end).unwrap()], &CalendarContext::new(tz));
    assert_eq!(by_day.len(), expected_days);
}
