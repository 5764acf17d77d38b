// Rust Week View
// Prints the laid-out current page for a settings file and an events file
//
// Usage: rust-week-view [settings.toml] [events.json] [YYYY-MM-DD]

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};

use rust_week_view::models::event::Event;
use rust_week_view::models::settings::WeekViewSettings;
use rust_week_view::services::pager::PageDirection;
use rust_week_view::utils::date::DATE_STR_FORMAT;
use rust_week_view::{GridTapped, WeekView, WeekViewHandler};

/// Reports callbacks to the log
struct LoggingHandler;

impl WeekViewHandler for LoggingHandler {
    fn can_move_events(&self) -> bool {
        true
    }

    fn on_event_moved(&mut self, event: &Event, new_start: DateTime<Utc>, new_end: DateTime<Utc>) {
        log::info!("Event {} moved to {} - {}", event.id, new_start, new_end);
    }

    fn on_event_resized(&mut self, event: &Event, new_end: DateTime<Utc>) {
        log::info!("Event {} now ends at {}", event.id, new_end);
    }

    fn on_grid_tapped(&mut self, tap: &GridTapped) {
        log::info!("Grid tapped on {} at {}", tap.date, tap.label);
    }

    fn on_page_changed(&mut self, date: NaiveDate, direction: PageDirection) {
        log::info!("Page changed to {} ({:?})", date, direction);
    }
}

fn load_settings(path: Option<&String>) -> Result<WeekViewSettings> {
    match path {
        Some(path) => WeekViewSettings::load(Path::new(path)),
        None => WeekViewSettings::load_or_default(),
    }
}

fn load_events(path: Option<&String>) -> Result<Vec<Event>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file: {}", path))?;
    let events: Vec<Event> =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse events file: {}", path))?;
    Ok(events)
}

fn main() -> Result<()> {
    env_logger::init();

    log::info!("Starting Rust Week View");

    let args: Vec<String> = env::args().skip(1).collect();
    let settings = load_settings(args.first())?;
    let events = load_events(args.get(1))?;
    let selected = match args.get(2) {
        Some(date) => NaiveDate::parse_from_str(date, DATE_STR_FORMAT)
            .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", date))?,
        None => Local::now().date_naive(),
    };

    let mut view = WeekView::new(settings, selected, LoggingHandler).context("Invalid week view settings")?;
    view.set_events(events);
    view.mount();

    let columns = view.current_columns();
    log::info!(
        "Showing page {} with {} events",
        view.pager().current_date(),
        columns.iter().map(|c| c.events.len()).sum::<usize>()
    );

    let output = serde_json::to_string_pretty(&columns).context("Failed to serialize layout")?;
    println!("{}", output);

    view.unmount();
    Ok(())
}
