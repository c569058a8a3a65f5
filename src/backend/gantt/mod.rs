//! Gantt charts
//!
//! Activities carry a date range, a progress percentage, assignees and
//! dependencies on other activities of the same chart. They are not ordered
//! by position.

pub mod activities;
pub mod db;
pub mod handlers;
pub mod types;

pub use types::{Activity, ChartTask, Gantt, GanttSummary};
