//! Collection-Scoped Record Access
//!
//! The service exposes every collection through the same CRUD surface;
//! this module wraps it for one collection at a time. Callers decode rows
//! into their own wire structs and map those to domain entities.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::BaasClient;
use crate::error::{BaasResult, Error};

/// Listing options: an equality filter and a sort expression
///
/// Sort uses the service syntax (`-created` for creation-descending).
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filter: Option<String>,
    pub sort: Option<String>,
}

/// Build an equality filter expression with an escaped operand
///
/// The operand is interpolated into the filter language, so quotes and
/// backslashes in it must not terminate the literal.
pub fn filter_eq(field: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{field}=\"{escaped}\"")
}

/// Record access for one collection
pub struct RecordService<'a> {
    client: &'a BaasClient,
    collection: &'a str,
}

#[derive(serde::Deserialize)]
struct ListPage<T> {
    items: Vec<T>,
}

impl<'a> RecordService<'a> {
    pub(crate) fn new(client: &'a BaasClient, collection: &'a str) -> Self {
        Self { client, collection }
    }

    /// Fetch up to `limit` records in one page
    ///
    /// The application works against a bounded full-list fetch; there is
    /// no pagination beyond this single page.
    pub async fn get_full_list<T>(&self, limit: usize, query: &ListQuery) -> BaasResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut params: Vec<(&str, String)> = vec![
            ("page", "1".to_string()),
            ("perPage", limit.to_string()),
            ("skipTotal", "1".to_string()),
        ];
        if let Some(filter) = &query.filter {
            params.push(("filter", filter.clone()));
        }
        if let Some(sort) = &query.sort {
            params.push(("sort", sort.clone()));
        }

        let value = self
            .client
            .send(Method::GET, &self.records_path(), &params, None)
            .await?;
        let page: ListPage<T> = decode(value)?;
        Ok(page.items)
    }

    /// Create a record from the given fields
    pub async fn create<T>(&self, fields: &Value) -> BaasResult<T>
    where
        T: DeserializeOwned,
    {
        let value = self
            .client
            .send(Method::POST, &self.records_path(), &[], Some(fields))
            .await?;
        decode(value)
    }

    /// Update a record by id, returning the updated record
    pub async fn update<T>(&self, id: &str, fields: &Value) -> BaasResult<T>
    where
        T: DeserializeOwned,
    {
        let path = format!("{}/{}", self.records_path(), id);
        let value = self
            .client
            .send(Method::PATCH, &path, &[], Some(fields))
            .await?;
        decode(value)
    }

    /// Delete a record by id
    pub async fn delete(&self, id: &str) -> BaasResult<()> {
        let path = format!("{}/{}", self.records_path(), id);
        self.client.send(Method::DELETE, &path, &[], None).await?;
        Ok(())
    }

    fn records_path(&self) -> String {
        format!("api/collections/{}/records", self.collection)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> BaasResult<T> {
    serde_json::from_value(value).map_err(|e| Error::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_eq_plain() {
        assert_eq!(filter_eq("user", "u1a2b3c4d5e6f7g"), r#"user="u1a2b3c4d5e6f7g""#);
    }

    #[test]
    fn test_filter_eq_escapes_quotes_and_backslashes() {
        assert_eq!(filter_eq("title", r#"say "hi""#), r#"title="say \"hi\"""#);
        assert_eq!(filter_eq("title", r"a\b"), r#"title="a\\b""#);
    }

    #[test]
    fn test_list_page_decode() {
        let value: Value = serde_json::from_str(r#"{"page":1,"items":[{"x":1},{"x":2}]}"#).unwrap();

        #[derive(serde::Deserialize)]
        struct Row {
            x: i32,
        }

        let page: ListPage<Row> = decode(value).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].x, 2);
    }
}
