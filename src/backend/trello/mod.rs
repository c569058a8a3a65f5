//! Trello-style boards
//!
//! A board owns ordered lists; a list owns ordered cards. Both orderings go
//! through `backend::ordering`.

pub mod cards;
pub mod db;
pub mod handlers;
pub mod lists;
pub mod types;

pub use types::{Board, BoardSummary, BoardView, Card, TrelloList};
