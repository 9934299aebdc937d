//! BaaS Repository Implementation
//!
//! Rows come back as generic records; the wire struct decodes them and
//! maps into the domain entity. Listing filters on the owning-user field
//! with an escaped operand and sorts creation-descending on the server.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use baas::{BaasClient, ListQuery, filter_eq};
use kernel::id::{TodoId, UserId};

use crate::application::config::TodoConfig;
use crate::domain::entities::TodoItem;
use crate::domain::repository::TodoRepository;
use crate::domain::value_objects::Title;
use crate::error::TodoResult;

/// Wire shape of a todo record
#[derive(Debug, Deserialize)]
struct TodoRow {
    id: TodoId,
    #[serde(default)]
    title: String,
    user: UserId,
    #[serde(with = "baas::datetime")]
    created: DateTime<Utc>,
}

impl TodoRow {
    fn into_item(self) -> TodoItem {
        TodoItem::new(self.id, Title::from_raw(self.title), self.user, self.created)
    }
}

/// BaaS-backed todo repository
pub struct BaasTodoRepository {
    client: Arc<BaasClient>,
    collection: String,
}

impl BaasTodoRepository {
    pub fn new(client: Arc<BaasClient>, config: &TodoConfig) -> Self {
        Self {
            client,
            collection: config.collection.clone(),
        }
    }
}

impl TodoRepository for BaasTodoRepository {
    async fn list_for_user(&self, user: &UserId, limit: usize) -> TodoResult<Vec<TodoItem>> {
        let query = ListQuery {
            filter: Some(filter_eq("user", user.as_str())),
            sort: Some("-created".to_string()),
        };

        let rows: Vec<TodoRow> = self
            .client
            .collection(&self.collection)
            .get_full_list(limit, &query)
            .await?;
        Ok(rows.into_iter().map(TodoRow::into_item).collect())
    }

    async fn create(&self, user: &UserId, title: &Title) -> TodoResult<TodoItem> {
        let fields = json!({
            "title": title.as_str(),
            "user": user.as_str(),
        });

        let row: TodoRow = self
            .client
            .collection(&self.collection)
            .create(&fields)
            .await?;
        Ok(row.into_item())
    }

    async fn rename(&self, id: &TodoId, title: &Title) -> TodoResult<TodoItem> {
        let fields = json!({ "title": title.as_str() });

        let row: TodoRow = self
            .client
            .collection(&self.collection)
            .update(id.as_str(), &fields)
            .await?;
        Ok(row.into_item())
    }

    async fn delete(&self, id: &TodoId) -> TodoResult<()> {
        self.client
            .collection(&self.collection)
            .delete(id.as_str())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_decodes_wire_record() {
        let json = r#"{
            "id": "t1a2b3c4d5e6f7g",
            "collectionId": "xyz",
            "title": "Buy milk",
            "user": "u1a2b3c4d5e6f7g",
            "created": "2024-01-02 03:04:05.678Z",
            "updated": "2024-01-02 03:04:05.678Z"
        }"#;

        let row: TodoRow = serde_json::from_str(json).unwrap();
        let item = row.into_item();
        assert_eq!(item.id.as_str(), "t1a2b3c4d5e6f7g");
        assert_eq!(item.title.as_str(), "Buy milk");
        assert_eq!(item.user.as_str(), "u1a2b3c4d5e6f7g");
        assert_eq!(baas::datetime::to_wire(&item.created), "2024-01-02 03:04:05.678Z");
    }
}
