//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{TodoId, UserId};

use crate::domain::value_objects::Title;

/// One todo record
///
/// Every item held by the board belongs to the signed-in user; the
/// creation timestamp exists only to order the list newest-first.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoItem {
    /// Record identifier
    pub id: TodoId,
    /// Title text
    pub title: Title,
    /// Owning user
    pub user: UserId,
    /// Creation time, used for ordering
    pub created: DateTime<Utc>,
}

impl TodoItem {
    pub fn new(id: TodoId, title: Title, user: UserId, created: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            user,
            created,
        }
    }
}
