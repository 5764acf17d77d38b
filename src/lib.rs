// Rust Week View Library
// Headless week-view core: time grid, event layout, paging and gestures

pub mod models;
pub mod services;
pub mod utils;
pub mod view;

pub use view::{EventRenderer, GridTapped, TextRenderer, WeekView, WeekViewHandler};
