// Property-based tests for layout, time math and paging
// Checks invariants with random event sets and navigation targets

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use rust_week_view::models::context::CalendarContext;
use rust_week_view::models::event::Event;
use rust_week_view::services::date_window::{DateWindow, PageOrder};
use rust_week_view::services::layout::{are_events_overlapped, expand_events_by_day, layout_day, LayoutOptions};
use rust_week_view::services::pager::Pager;
use rust_week_view::services::time_grid::TimeGrid;

const COLUMN_WIDTH: f64 = 50.0;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()
}

/// Events inside one day as (start minute, length in minutes)
fn day_events() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((0u32..1380, 1u32..240), 0..12)
}

fn build_events(spans: &[(u32, u32)]) -> Vec<Event> {
    let midnight = Utc.from_utc_datetime(&day().and_hms_opt(0, 0, 0).unwrap());
    spans
        .iter()
        .enumerate()
        .map(|(i, (start, length))| {
            let start = midnight + Duration::minutes(*start as i64);
            let end = (start + Duration::minutes(*length as i64)).min(midnight + Duration::minutes(1439));
            Event::new(i as i64, start, end).unwrap()
        })
        .collect()
}

proptest! {
    /// Property: laying out the same events twice gives identical rectangles
    #[test]
    fn prop_layout_is_idempotent(spans in day_events()) {
        let by_day = expand_events_by_day(&build_events(&spans), &CalendarContext::default());
        let grid = TimeGrid::new(600.0, 6.0);
        let options = LayoutOptions::default();

        for events in by_day.values() {
            let first = layout_day(events, COLUMN_WIDTH, &grid, &options);
            let second = layout_day(events, COLUMN_WIDTH, &grid, &options);
            prop_assert_eq!(first, second);
        }
    }

    /// Property: every event yields exactly one rectangle, no narrower than the floor
    #[test]
    fn prop_coverage_and_width_floor(
        spans in day_events(),
        min_width in 1.0f64..20.0,
        column_width in 0.5f64..80.0,
    ) {
        let events = build_events(&spans);
        let by_day = expand_events_by_day(&events, &CalendarContext::default());
        let grid = TimeGrid::new(600.0, 6.0);
        let options = LayoutOptions { min_item_width: min_width, ..Default::default() };

        let segments = by_day.get(&day()).cloned().unwrap_or_default();
        prop_assert_eq!(segments.len(), events.len());

        let positioned = layout_day(&segments, column_width, &grid, &options);
        prop_assert_eq!(positioned.len(), segments.len());
        for (event, segment) in positioned.iter().zip(&segments) {
            prop_assert_eq!(event.data.id(), segment.id());
            prop_assert!(event.style.width >= min_width);
        }
    }

    /// Property: a lone event in a column narrower than the floor is widened to it
    #[test]
    fn prop_lone_event_respects_floor_in_narrow_column(
        start in 0u32..1380,
        column_width in 0.1f64..4.0,
        min_width in 4.0f64..12.0,
    ) {
        let by_day = expand_events_by_day(&build_events(&[(start, 30)]), &CalendarContext::default());
        let options = LayoutOptions { min_item_width: min_width, ..Default::default() };
        let positioned = layout_day(&by_day[&day()], column_width, &TimeGrid::new(600.0, 6.0), &options);

        prop_assert_eq!(positioned.len(), 1);
        prop_assert_eq!(positioned[0].style.width, min_width);
    }

    /// Property: events sharing a lane inside a cluster never overlap
    #[test]
    fn prop_same_lane_never_overlaps(spans in day_events()) {
        let by_day = expand_events_by_day(&build_events(&spans), &CalendarContext::default());
        let grid = TimeGrid::new(600.0, 6.0);
        let options = LayoutOptions::default();
        let segments = by_day.get(&day()).cloned().unwrap_or_default();
        let positioned = layout_day(&segments, COLUMN_WIDTH, &grid, &options);

        for (i, a) in positioned.iter().enumerate() {
            for b in positioned.iter().skip(i + 1) {
                let same_lane = a.lane_count > 1 && a.lane_count == b.lane_count && a.lane == b.lane;
                if same_lane && a.style.left == b.style.left {
                    let (first, second) = if a.data.start <= b.data.start { (a, b) } else { (b, a) };
                    prop_assert!(!are_events_overlapped(
                        first.data.end,
                        second.data.start,
                        options.overlap_tolerance,
                    ));
                }
            }
        }
    }

    /// Property: y_to_hour inverts minutes_to_y within a minute
    #[test]
    fn prop_time_round_trip(
        minutes in 0u32..1440,
        hours_in_display in 1.0f64..24.0,
        height in 100.0f64..2000.0,
    ) {
        let grid = TimeGrid::new(height, hours_in_display);
        let hour = grid.y_to_hour(grid.minutes_to_y(minutes as f64));
        prop_assert!((hour * 60.0 - minutes as f64).abs() < 1.0);
    }

    /// Property: navigating to any date lands on the page containing it
    #[test]
    fn prop_go_to_date_lands_on_target(
        offset_days in -2000i64..2000,
        reverse in any::<bool>(),
        days_per_page in prop::sample::select(vec![1u32, 3, 5, 7]),
    ) {
        let context = CalendarContext::default();
        let window = DateWindow::new(days_per_page, PageOrder::from_reverse(reverse), &context);
        let start = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let mut pager = Pager::new(window, start, 2);

        let target = start + Duration::days(offset_days);
        pager.go_to_date(target, false);
        pager.tick();

        let page = pager.current_date();
        prop_assert!(page <= target);
        prop_assert!(target < page + Duration::days(days_per_page as i64));
        prop_assert!(pager.current_index() >= pager.page_offset());
        prop_assert!(pager.current_index() + pager.page_offset() < pager.len());
    }

    /// Property: page growth keeps pages exactly one page apart
    #[test]
    fn prop_growth_is_contiguous(steps in prop::collection::vec(-6i64..6, 1..8), reverse in any::<bool>()) {
        let context = CalendarContext::default();
        let window = DateWindow::new(7, PageOrder::from_reverse(reverse), &context);
        let mut pager = Pager::new(window, NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(), 2);

        for step in steps {
            let target = pager.current_index() as i64 + step;
            pager.go_to_index(target, true);
            pager.tick();
        }

        let sign = if reverse { -1 } else { 1 };
        let pages: Vec<NaiveDate> = pager.pages().collect();
        for pair in pages.windows(2) {
            prop_assert_eq!((pair[1] - pair[0]).num_days(), 7 * sign);
        }
    }
}
