//! The data-access capability the controller depends on.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ModelError;
use crate::types::{Filter, Todo, UpdateOptions};

/// Persistence for todo documents.
///
/// Lookups by id return `Ok(None)` when no document matches. Implementations
/// own id assignment: `create` must ignore any id in the payload.
#[async_trait]
pub trait TodoModel: Send + Sync {
    /// All documents matching `filter`, in storage order.
    async fn find(&self, filter: Filter) -> Result<Vec<Todo>, ModelError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, ModelError>;

    /// Stores a new document built from `payload` and returns it as stored.
    async fn create(&self, payload: Value) -> Result<Todo, ModelError>;

    /// Applies `update` to the document with `id`. Returns the updated
    /// document when `options.new` is set, the previous one otherwise.
    async fn find_by_id_and_update(
        &self,
        id: &str,
        update: Value,
        options: UpdateOptions,
    ) -> Result<Option<Todo>, ModelError>;

    /// Removes the document with `id` and returns it.
    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Todo>, ModelError>;
}
