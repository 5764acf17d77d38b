//! Pager state machine for the horizontally paged day grid.
//!
//! The pager keeps a buffered window of pages and the index of the current
//! one. The scroll surface can only scroll to pages that already exist, so
//! navigation that leaves the buffer is two-phase: the window grows and the
//! new state is committed first, and the scroll command is only released on
//! the next [`Pager::tick`], after the host has rendered the new pages.
//!
//! Settle handling works the same way: the index update is immediate, while
//! edge growth and the page-change notification run on the next tick.

use std::collections::VecDeque;

use chrono::NaiveDate;
use serde::Serialize;

use crate::services::date_window::DateWindow;

/// Direction of a page change in calendar time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageDirection {
    Next,
    Previous,
}

/// Instruction for the host scroll surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollCommand {
    pub index: usize,
    pub animated: bool,
}

/// Outcome of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Already on the requested page
    Unchanged,
    /// The target was buffered; scroll right away
    Immediate(ScrollCommand),
    /// The window grew; the scroll is released by the next tick
    Deferred { prepended: usize, appended: usize },
}

/// Work released by [`Pager::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PagerEvent {
    ScrollTo(ScrollCommand),
    PageChanged { date: NaiveDate, direction: PageDirection },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PagerTask {
    Scroll(ScrollCommand),
    /// `new_page` is kept in step with later front growth; `date` is the
    /// page the surface came to rest on
    Settle {
        moved_pages: i64,
        new_page: usize,
        date: NaiveDate,
    },
}

/// Snapshot of the buffered pages and the current one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagerWindow {
    pub pages: Vec<NaiveDate>,
    pub current_index: usize,
}

impl PagerWindow {
    pub fn current_page(&self) -> Option<NaiveDate> {
        self.pages.get(self.current_index).copied()
    }
}

#[derive(Debug, Clone)]
pub struct Pager {
    window: DateWindow,
    pages: VecDeque<NaiveDate>,
    current_index: usize,
    page_offset: usize,
    is_scrolling: bool,
    queue: VecDeque<PagerTask>,
}

impl Pager {
    /// Build a pager centered on the page containing `selected_date`
    pub fn new(window: DateWindow, selected_date: NaiveDate, page_offset: usize) -> Self {
        let page_offset = page_offset.max(1);
        let pages = window.build_initial_window(selected_date, page_offset);
        Self {
            window,
            pages,
            current_index: page_offset,
            page_offset,
            is_scrolling: false,
            queue: VecDeque::new(),
        }
    }

    pub fn date_window(&self) -> &DateWindow {
        &self.window
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page_offset(&self) -> usize {
        self.page_offset
    }

    pub fn page(&self, index: usize) -> Option<NaiveDate> {
        self.pages.get(index).copied()
    }

    pub fn pages(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.pages.iter().copied()
    }

    /// First date of the current page
    pub fn current_date(&self) -> NaiveDate {
        self.pages[self.current_index]
    }

    pub fn window(&self) -> PagerWindow {
        PagerWindow {
            pages: self.pages.iter().copied().collect(),
            current_index: self.current_index,
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    /// Whether scroll commands are waiting for the next tick
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Highest index that still has `page_offset` pages after it
    fn last_viewable_page(&self) -> i64 {
        self.pages.len() as i64 - 1 - self.page_offset as i64
    }

    /// Move to `target_index`, growing the window when the target is outside
    /// the buffered range. Negative targets are valid and mean "before the
    /// first page".
    pub fn go_to_index(&mut self, target_index: i64, animated: bool) -> Navigation {
        if target_index == self.current_index as i64 {
            return Navigation::Unchanged;
        }

        let offset = self.page_offset as i64;
        let last_viewable = self.last_viewable_page();

        if target_index < offset {
            let n_pages = (offset - target_index) as usize;
            self.window.prepend_pages(&mut self.pages, n_pages);
            self.shift_pending_settles(n_pages);
            self.commit_deferred(self.page_offset, animated);
            log::debug!("Pager prepended {} pages, now {}", n_pages, self.pages.len());
            Navigation::Deferred {
                prepended: n_pages,
                appended: 0,
            }
        } else if target_index > last_viewable {
            let n_pages = (target_index - last_viewable) as usize;
            self.window.append_pages(&mut self.pages, n_pages);
            let index = self.pages.len() - 1 - self.page_offset;
            self.commit_deferred(index, animated);
            log::debug!("Pager appended {} pages, now {}", n_pages, self.pages.len());
            Navigation::Deferred {
                prepended: 0,
                appended: n_pages,
            }
        } else {
            self.current_index = target_index as usize;
            Navigation::Immediate(ScrollCommand {
                index: self.current_index,
                animated,
            })
        }
    }

    fn commit_deferred(&mut self, index: usize, animated: bool) {
        self.current_index = index;
        self.queue.push_back(PagerTask::Scroll(ScrollCommand { index, animated }));
    }

    /// Move to the page containing `target`
    pub fn go_to_date(&mut self, target: NaiveDate, animated: bool) -> Navigation {
        let delta_pages = self.window.pages_between(self.current_date(), target);
        let target_index = self.current_index as i64 + delta_pages * self.window.direction_sign();
        self.go_to_index(target_index, animated)
    }

    /// One page later in calendar time
    pub fn go_to_next_page(&mut self, animated: bool) -> Navigation {
        let target = self.current_index as i64 + self.window.direction_sign();
        self.go_to_index(target, animated)
    }

    /// One page earlier in calendar time
    pub fn go_to_prev_page(&mut self, animated: bool) -> Navigation {
        let target = self.current_index as i64 - self.window.direction_sign();
        self.go_to_index(target, animated)
    }

    /// A user-driven scroll gesture started
    pub fn scroll_began(&mut self) {
        self.is_scrolling = true;
    }

    /// The scroll surface came to rest at `position` of `total_width`.
    ///
    /// Returns the new current index, or `None` when the signal was ignored
    /// (no active user scroll or a degenerate width). Page growth and the
    /// page-change event are queued for the next tick.
    pub fn on_scroll_settled(&mut self, position: f64, total_width: f64) -> Option<usize> {
        if !self.is_scrolling {
            log::debug!("Ignoring scroll settle without an active scroll");
            return None;
        }
        self.is_scrolling = false;

        if total_width.is_nan() || total_width <= 0.0 || !position.is_finite() {
            log::warn!("Ignoring scroll settle with width {} and position {}", total_width, position);
            return None;
        }

        let len = self.pages.len();
        let raw = (position / total_width * len as f64).round();
        let new_page = raw.clamp(0.0, (len - 1) as f64) as usize;
        let moved_pages = new_page as i64 - self.current_index as i64;
        self.current_index = new_page;

        if moved_pages != 0 {
            let date = self.pages[new_page];
            self.queue.push_back(PagerTask::Settle {
                moved_pages,
                new_page,
                date,
            });
        }
        Some(new_page)
    }

    /// Run queued work in order and return what the host must act on
    pub fn tick(&mut self) -> Vec<PagerEvent> {
        let mut events = Vec::with_capacity(self.queue.len());
        let mut grew_front = false;

        for _ in 0..self.queue.len() {
            let Some(task) = self.queue.pop_front() else {
                break;
            };
            match task {
                PagerTask::Scroll(command) => events.push(PagerEvent::ScrollTo(command)),
                PagerTask::Settle {
                    moved_pages,
                    new_page,
                    date,
                } => {
                    grew_front |= self.settle(moved_pages, new_page);
                    events.push(PagerEvent::PageChanged {
                        date,
                        direction: self.direction_of(moved_pages),
                    });
                }
            }
        }

        if grew_front {
            self.queue.push_back(PagerTask::Scroll(ScrollCommand {
                index: self.current_index,
                animated: false,
            }));
        }
        events
    }

    /// Grow one page at the edge a settle approached. Returns whether the
    /// front grew, which shifts every index by one.
    fn settle(&mut self, moved_pages: i64, new_page: usize) -> bool {
        if moved_pages < 0 && new_page < self.page_offset {
            self.window.prepend_pages(&mut self.pages, 1);
            self.current_index += 1;
            self.shift_pending_settles(1);
            log::debug!("Pager grew one page at the front after settle");
            true
        } else {
            if moved_pages > 0 && new_page as i64 > self.last_viewable_page() {
                self.window.append_pages(&mut self.pages, 1);
                log::debug!("Pager grew one page at the back after settle");
            }
            false
        }
    }

    fn shift_pending_settles(&mut self, n_pages: usize) {
        for task in self.queue.iter_mut() {
            if let PagerTask::Settle { new_page, .. } = task {
                *new_page += n_pages;
            }
        }
    }

    fn direction_of(&self, moved_pages: i64) -> PageDirection {
        if moved_pages * self.window.direction_sign() > 0 {
            PageDirection::Next
        } else {
            PageDirection::Previous
        }
    }

    /// Whether the scroll surface must be laid out mirrored
    pub fn horizontally_inverted(&self, right_to_left: bool) -> bool {
        (self.window.direction_sign() < 0) != right_to_left
    }
}
