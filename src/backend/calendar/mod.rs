//! Personal calendar

pub mod db;
pub mod handlers;
pub mod types;

pub use types::CalendarEvent;
