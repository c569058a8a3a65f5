//! Position Reindexer
//!
//! To-do tasks, board lists and cards are ordered by an integer `position`
//! inside their parent container. Within one container the positions always
//! form `1..=N` with no gaps and no duplicates.
//!
//! - `plan` holds the arithmetic (pure, unit and property tested)
//! - `store` runs a plan as one SQLite transaction
//! - `collection` maps each orderable table onto the generic code
//!
//! ```rust,no_run
//! use planhub::backend::ordering::{self, TrelloCards};
//!
//! # async fn example(pool: sqlx::SqlitePool) -> Result<(), ordering::OrderingError> {
//! // card 7 to the second slot of list 3
//! ordering::move_item::<TrelloCards>(&pool, 7, 3, 2).await?;
//! # Ok(())
//! # }
//! ```

pub mod collection;
pub mod error;
pub mod plan;
pub mod store;

pub use collection::{OrderedCollection, TodoTasks, TrelloCards, TrelloLists};
pub use error::OrderingError;
pub use plan::{MovePlan, Shift, Slot};
pub use store::{
    apply_full_ordering, move_item, next_position, next_position_expr, remove_item, reorder_within,
};
