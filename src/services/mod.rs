// Service module exports

pub mod date_window;
pub mod gesture;
pub mod layout;
pub mod pager;
pub mod time_grid;
