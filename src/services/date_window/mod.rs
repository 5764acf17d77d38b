//! Date window builder: the ordered page start dates behind the pager.
//!
//! A page is identified by the date of its first day. Pages are contiguous
//! and `days_per_page` apart, ascending in chronological order or descending
//! when the most recent page comes first.

use std::collections::VecDeque;

use chrono::{Duration, NaiveDate};

use crate::models::context::CalendarContext;

/// Storage order of the pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageOrder {
    #[default]
    Chronological,
    MostRecentFirst,
}

impl PageOrder {
    pub fn from_reverse(reverse_order: bool) -> Self {
        if reverse_order {
            PageOrder::MostRecentFirst
        } else {
            PageOrder::Chronological
        }
    }

    /// +1 when a higher page index is later in calendar time, -1 otherwise.
    /// Every index delta in the pager goes through this one value.
    pub fn direction_sign(self) -> i64 {
        match self {
            PageOrder::Chronological => 1,
            PageOrder::MostRecentFirst => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    days_per_page: u32,
    order: PageOrder,
    first_day_of_week: u8,
}

impl DateWindow {
    pub fn new(days_per_page: u32, order: PageOrder, context: &CalendarContext) -> Self {
        Self {
            days_per_page,
            order,
            first_day_of_week: context.first_day_of_week(),
        }
    }

    pub fn days_per_page(&self) -> u32 {
        self.days_per_page
    }

    pub fn order(&self) -> PageOrder {
        self.order
    }

    pub fn direction_sign(&self) -> i64 {
        self.order.direction_sign()
    }

    fn page_span(&self) -> i64 {
        self.days_per_page as i64
    }

    /// Date the window is centered on; full weeks start on the configured
    /// first day of the week.
    pub fn snap_center(&self, center: NaiveDate) -> NaiveDate {
        if self.days_per_page == 7 {
            crate::utils::date::get_week_start(center, self.first_day_of_week)
        } else {
            center
        }
    }

    /// `2 * page_buffer + 1` pages with `center` in the middle
    pub fn build_initial_window(&self, center: NaiveDate, page_buffer: usize) -> VecDeque<NaiveDate> {
        let center = self.snap_center(center);
        let buffer = page_buffer as i64;
        let mut pages: VecDeque<NaiveDate> = (-buffer..=buffer)
            .map(|i| center + Duration::days(self.page_span() * i))
            .collect();

        if self.order == PageOrder::MostRecentFirst {
            pages.make_contiguous().reverse();
        }
        pages
    }

    /// Add `n_pages` before the first page, continuing the sequence
    pub fn prepend_pages(&self, pages: &mut VecDeque<NaiveDate>, n_pages: usize) {
        let Some(&first) = pages.front() else {
            return;
        };
        let step = -self.page_span() * self.direction_sign();
        for i in 1..=n_pages as i64 {
            pages.push_front(first + Duration::days(step * i));
        }
    }

    /// Add `n_pages` after the last page, continuing the sequence
    pub fn append_pages(&self, pages: &mut VecDeque<NaiveDate>, n_pages: usize) {
        let Some(&last) = pages.back() else {
            return;
        };
        let step = self.page_span() * self.direction_sign();
        for i in 1..=n_pages as i64 {
            pages.push_back(last + Duration::days(step * i));
        }
    }

    /// Dates shown on a page, left to right
    pub fn days_of_page(&self, page: NaiveDate, right_to_left: bool) -> Vec<NaiveDate> {
        let mut days: Vec<NaiveDate> = (0..self.page_span())
            .map(|i| page + Duration::days(i))
            .collect();
        if right_to_left {
            days.reverse();
        }
        days
    }

    /// Number of whole pages between two dates, in calendar direction
    pub fn pages_between(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        (to - from).num_days().div_euclid(self.page_span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(days: u32, order: PageOrder) -> DateWindow {
        DateWindow::new(days, order, &CalendarContext::default())
    }

    #[test]
    fn test_initial_week_window_snaps_to_monday() {
        let pages = window(7, PageOrder::Chronological).build_initial_window(date(2025, 3, 13), 2);

        assert_eq!(pages.len(), 5);
        assert_eq!(pages[2], date(2025, 3, 10));
        assert_eq!(pages[2].weekday(), Weekday::Mon);
        assert_eq!(pages[0], date(2025, 2, 24));
        assert_eq!(pages[4], date(2025, 3, 24));
    }

    #[test]
    fn test_initial_window_does_not_snap_short_pages() {
        let pages = window(3, PageOrder::Chronological).build_initial_window(date(2025, 3, 13), 1);
        assert_eq!(
            pages.into_iter().collect::<Vec<_>>(),
            vec![date(2025, 3, 10), date(2025, 3, 13), date(2025, 3, 16)]
        );
    }

    #[test]
    fn test_most_recent_first_reverses_pages() {
        let pages = window(1, PageOrder::MostRecentFirst).build_initial_window(date(2025, 3, 13), 1);
        assert_eq!(
            pages.into_iter().collect::<Vec<_>>(),
            vec![date(2025, 3, 14), date(2025, 3, 13), date(2025, 3, 12)]
        );
    }

    #[test]
    fn test_prepend_and_append_continue_the_sequence() {
        let window = window(5, PageOrder::Chronological);
        let mut pages = window.build_initial_window(date(2025, 3, 10), 1);

        window.prepend_pages(&mut pages, 2);
        window.append_pages(&mut pages, 1);

        let expected: Vec<NaiveDate> = (-3..=2)
            .map(|i| date(2025, 3, 10) + Duration::days(5 * i))
            .collect();
        assert_eq!(pages.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_growth_respects_reverse_order() {
        let window = window(7, PageOrder::MostRecentFirst);
        let mut pages = window.build_initial_window(date(2025, 3, 10), 1);

        window.prepend_pages(&mut pages, 1);
        window.append_pages(&mut pages, 1);

        assert_eq!(pages.front(), Some(&date(2025, 3, 24)));
        assert_eq!(pages.back(), Some(&date(2025, 2, 24)));
    }

    #[test]
    fn test_days_of_page_right_to_left() {
        let window = window(3, PageOrder::Chronological);
        assert_eq!(
            window.days_of_page(date(2025, 3, 10), true),
            vec![date(2025, 3, 12), date(2025, 3, 11), date(2025, 3, 10)]
        );
    }

    #[test]
    fn test_pages_between_floors_partial_pages() {
        let window = window(7, PageOrder::Chronological);
        assert_eq!(window.pages_between(date(2025, 3, 10), date(2025, 3, 16)), 0);
        assert_eq!(window.pages_between(date(2025, 3, 10), date(2025, 3, 17)), 1);
        assert_eq!(window.pages_between(date(2025, 3, 10), date(2025, 3, 9)), -1);
    }
}
