//! Event layout engine.
//!
//! Raw events are first expanded into per-day segments, then each day's
//! segments are scanned in start order and grouped into clusters of chained
//! overlaps. A cluster is split into lanes (horizontal sub-columns) when it is
//! flushed:
//!
//! - one event keeps the full column width
//! - two events get one lane each
//! - three or more are packed greedily, first fitting lane wins
//!
//! The greedy packing is not a minimal interval colouring; the resulting
//! lane assignment is part of the visual contract and must stay as is.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::context::CalendarContext;
use crate::models::event::{Event, ExpandedEvent};
use crate::models::layout::{DayColumn, PositionedEvent, Rect};
use crate::models::settings::WeekViewSettings;
use crate::services::time_grid::{minutes_since_midnight, TimeGrid};
use crate::utils::date::{end_of_day, start_of_day};

pub const MIN_ITEM_WIDTH: f64 = 4.0;
pub const ALLOW_OVERLAP_SECONDS: i64 = 2;
const TWO_LANE_PADDING: f64 = 3.0;
const MULTI_LANE_PADDING: f64 = 2.0;

/// Expanded events keyed by calendar day, each day sorted by start
pub type EventsByDay = BTreeMap<NaiveDate, Vec<ExpandedEvent>>;

/// Tunables of the layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub overlap_tolerance: Duration,
    pub min_item_width: f64,
    pub content_offset: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            overlap_tolerance: Duration::seconds(ALLOW_OVERLAP_SECONDS),
            min_item_width: MIN_ITEM_WIDTH,
            content_offset: 0.0,
        }
    }
}

impl LayoutOptions {
    pub fn from_settings(settings: &WeekViewSettings) -> Self {
        Self {
            overlap_tolerance: Duration::seconds(settings.overlap_tolerance_seconds),
            min_item_width: settings.min_item_width,
            content_offset: settings.content_offset,
        }
    }
}

/// Whether an event starting at `event2_start` overlaps one ending at
/// `event1_end`. Events that merely touch (within the tolerance) do not.
pub fn are_events_overlapped(
    event1_end: NaiveDateTime,
    event2_start: NaiveDateTime,
    tolerance: Duration,
) -> bool {
    event1_end - tolerance >= event2_start
}

/// Split events into one segment per calendar day they cover.
///
/// Segments are clipped to the day in the context's wall-clock time. Events
/// ending before they start are skipped, as is the empty segment of an event
/// that ends exactly at midnight.
pub fn expand_events_by_day(events: &[Event], context: &CalendarContext) -> EventsByDay {
    let mut by_day = EventsByDay::new();

    for event in events {
        if event.end_date < event.start_date {
            log::warn!("Skipping event {}: ends before it starts", event.id);
            continue;
        }

        let original_duration = event.duration();
        let start = context.to_local(&event.start_date);
        let end = context.to_local(&event.end_date);

        let mut date = start.date();
        while date <= end.date() {
            let segment_start = start.max(start_of_day(date));
            let segment_end = end.min(end_of_day(date));

            if date > start.date() && segment_start == segment_end {
                break;
            }

            by_day.entry(date).or_default().push(ExpandedEvent {
                event: event.clone(),
                start: segment_start,
                end: segment_end,
                original_duration,
            });

            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }
    }

    for segments in by_day.values_mut() {
        segments.sort_by_key(|segment| segment.start);
    }

    by_day
}

/// Natural rectangle of a segment before lane division
pub fn event_style(
    event: &ExpandedEvent,
    column_width: f64,
    grid: &TimeGrid,
    options: &LayoutOptions,
) -> Rect {
    let top = grid.minutes_to_y(minutes_since_midnight(event.start.time()));
    let delta_minutes = (event.end - event.start).num_minutes().max(0);

    Rect {
        top: top + options.content_offset,
        left: 0.0,
        width: column_width,
        height: grid.minutes_to_y(delta_minutes as f64),
    }
}

#[derive(Default)]
struct ClusterScan {
    emitted: Vec<PositionedEvent>,
    pending: Vec<PositionedEvent>,
    last_end: Option<NaiveDateTime>,
}

/// Lay out one day's segments, given in start order.
///
/// Returns one rectangle per input segment, in input order.
pub fn layout_day(
    events: &[ExpandedEvent],
    column_width: f64,
    grid: &TimeGrid,
    options: &LayoutOptions,
) -> Vec<PositionedEvent> {
    let scan = events.iter().fold(ClusterScan::default(), |scan, event| {
        let positioned = PositionedEvent {
            data: event.clone(),
            style: event_style(event, column_width, grid, options),
            lane: 0,
            lane_count: 1,
        };

        match scan.last_end {
            Some(last_end) if !are_events_overlapped(last_end, event.start, options.overlap_tolerance) => {
                ClusterScan {
                    emitted: flush_cluster(scan.emitted, scan.pending, column_width, options),
                    pending: vec![positioned],
                    last_end: Some(event.end),
                }
            }
            last_end => {
                let mut pending = scan.pending;
                pending.push(positioned);
                ClusterScan {
                    emitted: scan.emitted,
                    pending,
                    last_end: Some(last_end.map_or(event.end, |end| end.max(event.end))),
                }
            }
        }
    });

    flush_cluster(scan.emitted, scan.pending, column_width, options)
}

/// Assign lanes to a finished cluster and append it to `emitted`
fn flush_cluster(
    mut emitted: Vec<PositionedEvent>,
    cluster: Vec<PositionedEvent>,
    column_width: f64,
    options: &LayoutOptions,
) -> Vec<PositionedEvent> {
    if cluster.len() <= 1 {
        emitted.extend(cluster.into_iter().map(|positioned| PositionedEvent {
            style: Rect {
                width: positioned.style.width.max(options.min_item_width),
                ..positioned.style
            },
            ..positioned
        }));
        return emitted;
    }

    let (lanes, lane_count, padding) = if cluster.len() == 2 {
        (vec![0, 1], 2, TWO_LANE_PADDING)
    } else {
        let (lanes, lane_count) = pack_lanes(&cluster, options.overlap_tolerance);
        (lanes, lane_count, MULTI_LANE_PADDING)
    };
    assert!(lane_count > 0, "a flushed cluster always has at least one lane");

    let divided_width = column_width / lane_count as f64;
    let width = (divided_width - padding).max(options.min_item_width);

    emitted.extend(cluster.into_iter().zip(lanes).map(|(positioned, lane)| {
        PositionedEvent {
            style: Rect {
                width,
                left: divided_width * lane as f64,
                ..positioned.style
            },
            data: positioned.data,
            lane,
            lane_count,
        }
    }));
    emitted
}

/// Greedy first-fit lane packing. Each event goes into the first lane whose
/// most recently placed event it does not overlap.
fn pack_lanes(cluster: &[PositionedEvent], tolerance: Duration) -> (Vec<usize>, usize) {
    let mut latest_by_lane: Vec<usize> = Vec::new();
    let mut lane_by_event = Vec::with_capacity(cluster.len());

    for (index, item) in cluster.iter().enumerate() {
        let lane = latest_by_lane
            .iter()
            .position(|&last| !are_events_overlapped(cluster[last].data.end, item.data.start, tolerance))
            .unwrap_or(latest_by_lane.len());

        if lane == latest_by_lane.len() {
            latest_by_lane.push(index);
        } else {
            latest_by_lane[lane] = index;
        }
        lane_by_event.push(lane);
    }

    (lane_by_event, latest_by_lane.len())
}

/// Lay out every day of a page
pub fn layout_columns(
    days: &[NaiveDate],
    events_by_day: &EventsByDay,
    column_width: f64,
    grid: &TimeGrid,
    options: &LayoutOptions,
) -> Vec<DayColumn> {
    days.iter()
        .map(|date| DayColumn {
            date: *date,
            events: events_by_day
                .get(date)
                .map(|events| layout_day(events, column_width, grid, options))
                .unwrap_or_default(),
        })
        .collect()
}
