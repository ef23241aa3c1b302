pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored document: opaque store-assigned id plus arbitrary JSON fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Value,
}

impl Document {
    /// Flatten into the API shape `{id, ...fields}`.
    ///
    /// Non-object fields collapse to just `{id}`, matching how the original
    /// service spread arbitrary payloads into its responses.
    pub fn into_value(self) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::String(self.id));
        if let Value::Object(fields) = self.fields {
            for (k, v) in fields {
                map.insert(k, v);
            }
        }
        Value::Object(map)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document not found: {collection}/{id}")]
    MissingDocument { collection: String, id: String },

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Collection-scoped document store boundary.
///
/// The server treats persistence as an external collaborator: everything it
/// needs is get/add/update/delete, field-equality queries, and an atomic
/// multi-document batch delete. Backends either complete an operation or
/// surface a `StoreError`; timeouts are the backend's concern.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Insert a new document, returning the store-assigned id.
    async fn add(&self, collection: &str, fields: Value) -> Result<String, StoreError>;

    /// Replace the fields of an existing document. Fails if the id is absent.
    async fn update(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError>;

    /// Delete by id. Deleting an absent id is not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// All documents whose `field` equals `value` exactly.
    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError>;

    /// Delete every listed id as one atomic commit: on failure, none of the
    /// documents are removed. Absent ids are skipped.
    async fn delete_batch(&self, collection: &str, ids: &[String]) -> Result<(), StoreError>;
}
