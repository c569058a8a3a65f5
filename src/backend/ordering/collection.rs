//! Orderable collections
//!
//! Each collection names the table holding the items, the column pointing
//! at the parent container, and the container table. The SQL in `store` is
//! built from these constants, so they must be plain identifiers.

/// A table of items densely ordered by `position` within a parent
pub trait OrderedCollection: Send + Sync + 'static {
    /// Table holding the items
    const ITEMS: &'static str;
    /// Column of `ITEMS` referencing the container
    const PARENT: &'static str;
    /// Table holding the containers
    const CONTAINERS: &'static str;
    /// Item noun used in errors
    const ITEM_NAME: &'static str;
    /// Container noun used in errors
    const CONTAINER_NAME: &'static str;
}

/// Tasks of a to-do
pub struct TodoTasks;

impl OrderedCollection for TodoTasks {
    const ITEMS: &'static str = "todo_tasks";
    const PARENT: &'static str = "todo_id";
    const CONTAINERS: &'static str = "todos";
    const ITEM_NAME: &'static str = "task";
    const CONTAINER_NAME: &'static str = "todo";
}

/// Lists of a board
pub struct TrelloLists;

impl OrderedCollection for TrelloLists {
    const ITEMS: &'static str = "trello_lists";
    const PARENT: &'static str = "trello_id";
    const CONTAINERS: &'static str = "trellos";
    const ITEM_NAME: &'static str = "list";
    const CONTAINER_NAME: &'static str = "board";
}

/// Cards of a list
pub struct TrelloCards;

impl OrderedCollection for TrelloCards {
    const ITEMS: &'static str = "trello_cards";
    const PARENT: &'static str = "list_id";
    const CONTAINERS: &'static str = "trello_lists";
    const ITEM_NAME: &'static str = "card";
    const CONTAINER_NAME: &'static str = "list";
}
