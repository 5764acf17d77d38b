//! Week view facade: one widget instance.
//!
//! Owns the settings and calendar context, the events grouped by day, the
//! pager, a per-page layout cache and the gesture in progress, and turns
//! host input into [`WeekViewHandler`] callbacks.

pub mod handler;
pub mod renderer;
pub mod scroll_bridge;

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::context::CalendarContext;
use crate::models::event::{Event, EventId};
use crate::models::layout::{DayColumn, PositionedEvent};
use crate::models::settings::{SettingsError, WeekViewSettings};
use crate::services::date_window::{DateWindow, PageOrder};
use crate::services::gesture::{
    has_moved_enough, resolve_drag, resolve_grid_tap, resolve_resize_end, DragGesture,
    GridGeometry, ResizeGesture, Translation,
};
use crate::services::layout::{expand_events_by_day, layout_columns, EventsByDay, LayoutOptions};
use crate::services::pager::{Navigation, Pager, PagerEvent, PagerWindow, ScrollCommand};
use crate::services::time_grid::{hour_labels, TimeGrid, TimeLabel};

pub use handler::{GridTapped, WeekViewHandler};
pub use renderer::{EventRenderer, RenderedEvent, TextRenderer};
pub use scroll_bridge::ScrollBridge;

/// Position of the current-time indicator on the current page
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NowLine {
    pub column: usize,
    pub y: f64,
}

#[derive(Debug, Clone)]
enum ActiveGesture {
    /// `days` is the page the drag began on, so paging mid-drag does not
    /// lose the drop
    Drag {
        target: PositionedEvent,
        days: Vec<NaiveDate>,
        gesture: DragGesture,
    },
    Resize {
        target: PositionedEvent,
        gesture: ResizeGesture,
    },
}

pub struct WeekView<H: WeekViewHandler, R: EventRenderer = TextRenderer> {
    settings: WeekViewSettings,
    context: CalendarContext,
    grid: TimeGrid,
    options: LayoutOptions,
    events: Vec<Event>,
    events_by_day: EventsByDay,
    pager: Pager,
    layout_cache: HashMap<NaiveDate, Vec<DayColumn>>,
    bridge: ScrollBridge,
    active: Option<ActiveGesture>,
    handler: H,
    renderer: R,
}

impl<H: WeekViewHandler> WeekView<H, TextRenderer> {
    /// Create a view showing the page that contains `selected_date`
    pub fn new(
        settings: WeekViewSettings,
        selected_date: NaiveDate,
        handler: H,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        let context = settings.context()?;
        let pager = build_pager(&settings, &context, selected_date);

        log::info!(
            "Week view created: {} days per page, page {}",
            settings.days_per_page,
            pager.current_date()
        );

        Ok(Self {
            grid: TimeGrid::from_settings(&settings),
            options: LayoutOptions::from_settings(&settings),
            settings,
            context,
            events: Vec::new(),
            events_by_day: EventsByDay::new(),
            pager,
            layout_cache: HashMap::new(),
            bridge: ScrollBridge::new(),
            active: None,
            handler,
            renderer: TextRenderer,
        })
    }
}

impl<H: WeekViewHandler, R: EventRenderer> WeekView<H, R> {
    /// Swap the renderer used by [`rendered_events`](Self::rendered_events)
    pub fn with_renderer<R2: EventRenderer>(self, renderer: R2) -> WeekView<H, R2> {
        WeekView {
            settings: self.settings,
            context: self.context,
            grid: self.grid,
            options: self.options,
            events: self.events,
            events_by_day: self.events_by_day,
            pager: self.pager,
            layout_cache: self.layout_cache,
            bridge: self.bridge,
            active: self.active,
            handler: self.handler,
            renderer,
        }
    }

    pub fn settings(&self) -> &WeekViewSettings {
        &self.settings
    }

    pub fn context(&self) -> &CalendarContext {
        &self.context
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn window(&self) -> PagerWindow {
        self.pager.window()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    // Lifecycle

    pub fn mount(&mut self) {
        self.bridge.attach();
    }

    /// Detach the header bridge and drop any gesture in progress
    pub fn unmount(&mut self) {
        self.bridge.detach();
        self.terminate_gesture();
    }

    pub fn is_mounted(&self) -> bool {
        self.bridge.is_attached()
    }

    /// Forward the grid's horizontal scroll offset to the header
    pub fn on_grid_scroll(&mut self, offset: f64) -> Option<f64> {
        self.bridge.on_grid_scroll(offset)
    }

    pub fn header_offset(&self) -> f64 {
        self.bridge.header_offset()
    }

    // Data and configuration

    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events_by_day = expand_events_by_day(&events, &self.context);
        self.events = events;
        self.layout_cache.clear();
        log::debug!("Week view holds {} events", self.events.len());
    }

    /// Replace the settings. The pager is rebuilt around the current page
    /// when any paging parameter changed.
    pub fn reconfigure(&mut self, settings: WeekViewSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        let context = settings.context()?;

        let paging_changed = settings.days_per_page != self.settings.days_per_page
            || settings.reverse_order != self.settings.reverse_order
            || settings.page_buffer != self.settings.page_buffer
            || context.first_day_of_week() != self.context.first_day_of_week();

        if paging_changed {
            let current = self.pager.current_date();
            self.pager = build_pager(&settings, &context, current);
            log::debug!("Pager rebuilt around {}", current);
        }

        self.events_by_day = expand_events_by_day(&self.events, &context);
        self.grid = TimeGrid::from_settings(&settings);
        self.options = LayoutOptions::from_settings(&settings);
        self.context = context;
        self.settings = settings;
        self.layout_cache.clear();
        self.terminate_gesture();
        Ok(())
    }

    // Layout

    /// Dates of the page at `index`, left to right
    pub fn page_days(&self, index: usize) -> Vec<NaiveDate> {
        self.pager
            .page(index)
            .map(|page| {
                self.pager
                    .date_window()
                    .days_of_page(page, self.settings.right_to_left)
            })
            .unwrap_or_default()
    }

    /// Dates shown in the header for the current page
    pub fn header_dates(&self) -> Vec<NaiveDate> {
        self.page_days(self.pager.current_index())
    }

    pub fn hour_labels(&self) -> Vec<TimeLabel> {
        hour_labels(self.context.time_format())
    }

    /// Initial vertical scroll position of the grid
    pub fn vertical_start_offset(&self) -> f64 {
        self.grid.vertical_start_offset(self.settings.start_hour)
    }

    /// Laid-out day columns of the page at `index`
    pub fn page_columns(&mut self, index: usize) -> Vec<DayColumn> {
        let Some(page) = self.pager.page(index) else {
            return Vec::new();
        };
        if let Some(columns) = self.layout_cache.get(&page) {
            return columns.clone();
        }

        let columns = layout_columns(
            &self.page_days(index),
            &self.events_by_day,
            self.settings.column_width(),
            &self.grid,
            &self.options,
        );
        self.layout_cache.insert(page, columns.clone());
        columns
    }

    pub fn current_columns(&mut self) -> Vec<DayColumn> {
        self.page_columns(self.pager.current_index())
    }

    /// Renderer output for every event on the page at `index`, per column
    pub fn rendered_events(&mut self, index: usize) -> Vec<Vec<RenderedEvent>> {
        self.page_columns(index)
            .iter()
            .map(|column| column.events.iter().map(|e| self.renderer.render(e)).collect())
            .collect()
    }

    /// Current-time line, when `now` falls on the current page
    pub fn now_line(&self, now: DateTime<Utc>) -> Option<NowLine> {
        let local = self.context.to_local(&now);
        let column = self
            .header_dates()
            .iter()
            .position(|date| *date == local.date())?;
        Some(NowLine {
            column,
            y: self.grid.now_line_y(local) + self.settings.content_offset,
        })
    }

    fn geometry(&self) -> GridGeometry {
        GridGeometry {
            grid: self.grid,
            column_width: self.settings.column_width(),
            content_offset: self.settings.content_offset,
        }
    }

    fn find_positioned(&mut self, id: &EventId, date: NaiveDate) -> Option<PositionedEvent> {
        self.current_columns()
            .into_iter()
            .find(|column| column.date == date)?
            .events
            .into_iter()
            .find(|positioned| positioned.data.id() == id)
    }

    // Paging

    pub fn go_to_date(&mut self, date: NaiveDate, animated: bool) -> Navigation {
        self.pager.go_to_date(date, animated)
    }

    pub fn go_to_next_page(&mut self, animated: bool) -> Navigation {
        self.pager.go_to_next_page(animated)
    }

    pub fn go_to_prev_page(&mut self, animated: bool) -> Navigation {
        self.pager.go_to_prev_page(animated)
    }

    pub fn scroll_began(&mut self) {
        self.pager.scroll_began();
    }

    pub fn on_scroll_settled(&mut self, position: f64, total_width: f64) -> Option<usize> {
        self.pager.on_scroll_settled(position, total_width)
    }

    /// Release deferred pager work. Page changes go to the handler; the
    /// returned commands are for the host scroll surface.
    pub fn tick(&mut self) -> Vec<ScrollCommand> {
        let mut commands = Vec::new();
        for event in self.pager.tick() {
            match event {
                PagerEvent::ScrollTo(command) => commands.push(command),
                PagerEvent::PageChanged { date, direction } => {
                    self.handler.on_page_changed(date, direction)
                }
            }
        }
        commands
    }

    /// Whether the scroll surface must be mirrored
    pub fn horizontally_inverted(&self) -> bool {
        self.pager.horizontally_inverted(self.settings.right_to_left)
    }

    // Gestures

    pub fn has_active_gesture(&self) -> bool {
        self.active.is_some()
    }

    /// Start dragging the segment of event `id` shown on `date`
    pub fn begin_drag(&mut self, id: &EventId, date: NaiveDate) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(target) = self.find_positioned(id, date) else {
            return false;
        };
        if !DragGesture::is_enabled(&target.data.event, self.handler.can_move_events()) {
            return false;
        }

        let mut gesture = DragGesture::new();
        gesture.begin();
        self.active = Some(ActiveGesture::Drag {
            target,
            days: self.header_dates(),
            gesture,
        });
        true
    }

    /// Pointer moved during a drag. Returns whether the drag has moved far
    /// enough to claim the pointer.
    pub fn drag_moved(&mut self, dx: f64, dy: f64) -> bool {
        match &mut self.active {
            Some(ActiveGesture::Drag { gesture, .. }) => {
                gesture.update(dx, dy);
                has_moved_enough(dx, dy)
            }
            _ => false,
        }
    }

    /// Visual offset of the dragged event
    pub fn drag_translation(&self) -> Option<Translation> {
        match &self.active {
            Some(ActiveGesture::Drag { gesture, .. }) => Some(gesture.translation()),
            _ => None,
        }
    }

    /// Drop the dragged event and report its new slot to the handler
    pub fn release_drag(&mut self, dx: f64, dy: f64) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        if !matches!(self.active, Some(ActiveGesture::Drag { .. })) {
            return None;
        }
        let Some(ActiveGesture::Drag {
            target,
            days,
            mut gesture,
        }) = self.active.take()
        else {
            return None;
        };
        let delta = gesture.release(dx, dy)?;
        let (start, end) = resolve_drag(&target, delta, &days, &self.geometry())?;

        let new_start = self.context.from_local(start);
        let new_end = self.context.from_local(end);
        log::debug!("Event {} moved to {}", target.data.id(), new_start);
        self.handler
            .on_event_moved(&target.data.event, new_start, new_end);
        Some((new_start, new_end))
    }

    /// Start resizing the segment of event `id` shown on `date`
    pub fn begin_resize(&mut self, id: &EventId, date: NaiveDate) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(target) = self.find_positioned(id, date) else {
            return false;
        };
        if !ResizeGesture::is_enabled(&target.data.event) {
            return false;
        }

        let mut gesture = ResizeGesture::new(target.style.height);
        gesture.begin();
        self.active = Some(ActiveGesture::Resize { target, gesture });
        true
    }

    /// Pointer moved during a resize; returns the height to draw
    pub fn resize_moved(&mut self, dy: f64) -> Option<f64> {
        match &mut self.active {
            Some(ActiveGesture::Resize { gesture, .. }) => {
                gesture.update(dy);
                Some(gesture.current_height())
            }
            _ => None,
        }
    }

    /// Finish a resize and report the new end to the handler
    pub fn release_resize(&mut self, dy: f64) -> Option<DateTime<Utc>> {
        if !matches!(self.active, Some(ActiveGesture::Resize { .. })) {
            return None;
        }
        let Some(ActiveGesture::Resize { target, mut gesture }) = self.active.take() else {
            return None;
        };
        gesture.release(target.style.top, dy)?;
        let end = resolve_resize_end(&target, dy, &self.geometry())?;

        let new_end = self.context.from_local(end);
        log::debug!("Event {} resized to end at {}", target.data.id(), new_end);
        self.handler.on_event_resized(&target.data.event, new_end);
        Some(new_end)
    }

    /// Another recognizer claimed the pointer; nothing is committed
    pub fn terminate_gesture(&mut self) {
        if let Some(mut active) = self.active.take() {
            match &mut active {
                ActiveGesture::Drag { gesture, .. } => gesture.terminate(),
                ActiveGesture::Resize { gesture, .. } => gesture.terminate(),
            }
            log::debug!("Gesture terminated without commit");
        }
    }

    /// Tap on an empty slot of column `day_index` at vertical position `y`
    pub fn tap_grid(&mut self, day_index: usize, y: f64) -> Option<GridTapped> {
        let tap = resolve_grid_tap(
            &self.header_dates(),
            day_index,
            y,
            &self.geometry(),
            self.settings.tap_granularity_minutes(),
        )?;
        let start = self
            .context
            .from_local(tap.date.and_time(tap.time.to_naive_time()?));
        let tapped = GridTapped::new(tap, start, self.context.time_format());

        self.handler.on_grid_tapped(&tapped);
        Some(tapped)
    }

    pub fn press_event(&mut self, id: &EventId) -> bool {
        match self.events.iter().find(|event| &event.id == id) {
            Some(event) => {
                self.handler.on_event_pressed(event);
                true
            }
            None => false,
        }
    }

    pub fn long_press_event(&mut self, id: &EventId) -> bool {
        match self.events.iter().find(|event| &event.id == id) {
            Some(event) => {
                self.handler.on_event_long_pressed(event);
                true
            }
            None => false,
        }
    }
}

fn build_pager(settings: &WeekViewSettings, context: &CalendarContext, selected: NaiveDate) -> Pager {
    let window = DateWindow::new(
        settings.days_per_page,
        PageOrder::from_reverse(settings.reverse_order),
        context,
    );
    Pager::new(window, selected, settings.page_buffer)
}
