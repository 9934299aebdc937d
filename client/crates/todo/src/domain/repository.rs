//! Repository Trait
//!
//! Interface for the record collection. Implementation is in the
//! infrastructure layer; tests substitute an in-memory fake.

use kernel::id::{TodoId, UserId};

use crate::domain::entities::TodoItem;
use crate::domain::value_objects::Title;
use crate::error::TodoResult;

/// Record collection access for todo items
#[trait_variant::make(TodoRepository: Send)]
pub trait LocalTodoRepository {
    /// Fetch the user's items, newest first, bounded by `limit`
    async fn list_for_user(&self, user: &UserId, limit: usize) -> TodoResult<Vec<TodoItem>>;

    /// Create an item owned by the user
    async fn create(&self, user: &UserId, title: &Title) -> TodoResult<TodoItem>;

    /// Change an item's title, returning the updated record
    async fn rename(&self, id: &TodoId, title: &Title) -> TodoResult<TodoItem>;

    /// Delete an item
    async fn delete(&self, id: &TodoId) -> TodoResult<()>;
}
