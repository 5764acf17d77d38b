// Module exports for models

pub mod context;
pub mod event;
pub mod layout;
pub mod settings;
