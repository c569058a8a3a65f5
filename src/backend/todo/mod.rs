//! To-do lists and their ordered tasks

pub mod db;
pub mod handlers;
pub mod tasks;
pub mod types;

pub use types::{Task, Todo, TodoSummary};
