//! In-memory `TodoModel`, used by the server binary and in tests.
//!
//! # Design
//! Documents live in a `Vec` behind a `tokio::sync::RwLock` so `find` returns
//! them in insertion order. Ids are UUID v4 strings; lookups accept any UUID
//! spelling and reject anything else with `ModelError::Cast`, the way a
//! document database rejects malformed object ids. Patches are applied to a
//! copy and only committed once every field validated.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ModelError;
use crate::model::TodoModel;
use crate::types::{Filter, Todo, UpdateOptions};

#[derive(Debug, Default)]
pub struct MemoryModel {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the model with existing documents. Ids are stored in the same
    /// spelling lookups use; a non-UUID id is a `Cast` error.
    pub fn with_todos(todos: Vec<Todo>) -> Result<Self, ModelError> {
        let todos = todos
            .into_iter()
            .map(|mut todo| {
                todo.id = parse_id(&todo.id)?;
                Ok(todo)
            })
            .collect::<Result<Vec<_>, ModelError>>()?;
        Ok(Self {
            todos: RwLock::new(todos),
        })
    }

    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }
}

/// Normalizes `id` to the stored spelling.
fn parse_id(id: &str) -> Result<String, ModelError> {
    Uuid::parse_str(id)
        .map(|uuid| uuid.to_string())
        .map_err(|_| ModelError::cast(id))
}

/// Rewrites an `id` constraint to the stored spelling so `find` agrees with
/// `find_by_id`.
fn normalize_filter(mut filter: Filter) -> Result<Filter, ModelError> {
    if let Some(value) = filter.0.get_mut("id") {
        let id = match value.as_str() {
            Some(id) => parse_id(id)?,
            None => return Err(ModelError::cast(value.to_string())),
        };
        *value = Value::String(id);
    }
    Ok(filter)
}

fn into_object(value: Value, what: &str) -> Result<Map<String, Value>, ModelError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ModelError::validation(format!(
            "{what} must be a JSON object, got {other}"
        ))),
    }
}

fn done_flag(value: &Value) -> Result<bool, ModelError> {
    value
        .as_bool()
        .ok_or_else(|| ModelError::validation(format!("done must be a boolean, got {value}")))
}

#[async_trait]
impl TodoModel for MemoryModel {
    async fn find(&self, filter: Filter) -> Result<Vec<Todo>, ModelError> {
        let filter = normalize_filter(filter)?;
        let todos = self.todos.read().await;
        Ok(todos.iter().filter(|todo| filter.matches(todo)).cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, ModelError> {
        let id = parse_id(id)?;
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|todo| todo.id == id).cloned())
    }

    async fn create(&self, payload: Value) -> Result<Todo, ModelError> {
        let fields = into_object(payload, "todo")?;
        let mut todo = Todo::new(Uuid::new_v4().to_string());
        for (key, value) in fields {
            match key.as_str() {
                "id" => {}
                "done" => todo.done = done_flag(&value)?,
                _ => {
                    todo.fields.insert(key, value);
                }
            }
        }

        self.todos.write().await.push(todo.clone());
        tracing::info!(id = %todo.id, "todo created");
        Ok(todo)
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        update: Value,
        options: UpdateOptions,
    ) -> Result<Option<Todo>, ModelError> {
        let id = parse_id(id)?;
        let patch = into_object(update, "update")?;

        let mut todos = self.todos.write().await;
        let Some(todo) = todos.iter_mut().find(|todo| todo.id == id) else {
            return Ok(None);
        };

        let mut updated = todo.clone();
        for (key, value) in patch {
            match key.as_str() {
                "id" => return Err(ModelError::validation("id cannot be modified")),
                "done" => updated.done = done_flag(&value)?,
                _ if value.is_null() => {
                    updated.fields.remove(&key);
                }
                _ => {
                    updated.fields.insert(key, value);
                }
            }
        }

        let previous = std::mem::replace(todo, updated);
        tracing::info!(id = %id, "todo updated");
        if options.new {
            Ok(Some(todo.clone()))
        } else {
            Ok(Some(previous))
        }
    }

    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Todo>, ModelError> {
        let id = parse_id(id)?;
        let mut todos = self.todos.write().await;
        let removed = todos
            .iter()
            .position(|todo| todo.id == id)
            .map(|index| todos.remove(index));
        if removed.is_some() {
            tracing::info!(id = %id, "todo deleted");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const MISSING: &str = "00000000-0000-0000-0000-000000000000";

    #[tokio::test]
    async fn create_assigns_id_and_defaults_done() {
        let model = MemoryModel::new();
        let todo = model.create(json!({"task": "x"})).await.unwrap();

        assert!(Uuid::parse_str(&todo.id).is_ok());
        assert!(!todo.done);
        assert_eq!(todo.fields["task"], "x");
        assert_eq!(model.len().await, 1);
    }

    #[tokio::test]
    async fn create_ignores_caller_id() {
        let model = MemoryModel::new();
        let todo = model
            .create(json!({"id": "61312cf0f456031ad7a8c2fa", "done": true}))
            .await
            .unwrap();

        assert_ne!(todo.id, "61312cf0f456031ad7a8c2fa");
        assert!(todo.done);
        assert!(!todo.fields.contains_key("id"));
    }

    #[tokio::test]
    async fn create_rejects_non_object_payload() {
        let model = MemoryModel::new();
        let err = model.create(json!(["x"])).await.unwrap_err();
        assert!(matches!(err, ModelError::Validation { .. }));
        assert!(model.is_empty().await);
    }

    #[tokio::test]
    async fn create_rejects_non_boolean_done() {
        let model = MemoryModel::new();
        let err = model.create(json!({"done": "yes"})).await.unwrap_err();
        assert!(matches!(err, ModelError::Validation { .. }));
        assert!(model.is_empty().await);
    }

    #[tokio::test]
    async fn find_keeps_insertion_order_and_applies_filter() {
        let model = MemoryModel::new();
        let first = model.create(json!({"task": "a"})).await.unwrap();
        let second = model.create(json!({"task": "b", "done": true})).await.unwrap();

        let all = model.find(Filter::new()).await.unwrap();
        assert_eq!(all, vec![first.clone(), second.clone()]);

        let done = model
            .find(Filter::new().field_eq("done", json!(true)))
            .await
            .unwrap();
        assert_eq!(done, vec![second]);
    }

    #[tokio::test]
    async fn find_by_id_accepts_any_uuid_spelling() {
        let model = MemoryModel::new();
        let todo = model.create(json!({})).await.unwrap();
        let simple = Uuid::parse_str(&todo.id).unwrap().simple().to_string();

        assert_eq!(model.find_by_id(&simple).await.unwrap(), Some(todo));
    }

    #[tokio::test]
    async fn find_by_id_missing_is_none() {
        let model = MemoryModel::new();
        assert_eq!(model.find_by_id(MISSING).await.unwrap(), None);
    }

    #[tokio::test]
    async fn malformed_id_is_a_cast_error() {
        let model = MemoryModel::new();
        assert_eq!(
            model.find_by_id("not-an-id").await.unwrap_err(),
            ModelError::cast("not-an-id")
        );
        assert_eq!(
            model.find_by_id_and_delete("not-an-id").await.unwrap_err(),
            ModelError::cast("not-an-id")
        );
    }

    #[tokio::test]
    async fn update_returns_new_or_old_document() {
        let model = MemoryModel::new();
        let todo = model.create(json!({"task": "x"})).await.unwrap();

        let updated = model
            .find_by_id_and_update(&todo.id, json!({"done": true}), UpdateOptions::RETURN_UPDATED)
            .await
            .unwrap()
            .unwrap();
        assert!(updated.done);
        assert_eq!(updated.fields["task"], "x");

        let previous = model
            .find_by_id_and_update(&todo.id, json!({"task": "y"}), UpdateOptions::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(previous, updated);

        let stored = model.find_by_id(&todo.id).await.unwrap().unwrap();
        assert_eq!(stored.fields["task"], "y");
    }

    #[tokio::test]
    async fn update_null_removes_extra_field() {
        let model = MemoryModel::new();
        let todo = model.create(json!({"task": "x", "note": "n"})).await.unwrap();

        let updated = model
            .find_by_id_and_update(&todo.id, json!({"note": null}), UpdateOptions::RETURN_UPDATED)
            .await
            .unwrap()
            .unwrap();
        assert!(!updated.fields.contains_key("note"));
        assert_eq!(updated.fields["task"], "x");
    }

    #[tokio::test]
    async fn update_rejects_id_change_without_partial_apply() {
        let model = MemoryModel::new();
        let todo = model.create(json!({"task": "x"})).await.unwrap();

        let err = model
            .find_by_id_and_update(
                &todo.id,
                json!({"done": true, "id": MISSING}),
                UpdateOptions::RETURN_UPDATED,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Validation { .. }));
        assert_eq!(model.find_by_id(&todo.id).await.unwrap(), Some(todo));
    }

    #[tokio::test]
    async fn update_missing_is_none() {
        let model = MemoryModel::new();
        let result = model
            .find_by_id_and_update(MISSING, json!({"done": true}), UpdateOptions::RETURN_UPDATED)
            .await
            .unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn delete_removes_and_returns_document() {
        let model = MemoryModel::new();
        let todo = model.create(json!({"task": "x"})).await.unwrap();

        assert_eq!(model.find_by_id_and_delete(&todo.id).await.unwrap(), Some(todo.clone()));
        assert_eq!(model.find_by_id_and_delete(&todo.id).await.unwrap(), None);
        assert!(model.is_empty().await);
    }

    #[tokio::test]
    async fn seeded_documents_keep_their_ids() {
        let seeded = Todo::new("6f9619ff-8b86-d011-b42d-00cf4fc964ff").with_field("task", json!("x"));
        let model = MemoryModel::with_todos(vec![seeded.clone()]).unwrap();
        assert_eq!(model.find_by_id(&seeded.id).await.unwrap(), Some(seeded));
    }

    #[tokio::test]
    async fn seeded_uppercase_id_is_reachable() {
        let upper = "6F9619FF-8B86-D011-B42D-00CF4FC964FF";
        let model = MemoryModel::with_todos(vec![Todo::new(upper)]).unwrap();

        let found = model.find_by_id(upper).await.unwrap().expect("seeded todo");
        assert_eq!(found.id, "6f9619ff-8b86-d011-b42d-00cf4fc964ff");
        assert!(model
            .find_by_id_and_update(upper, json!({"done": true}), UpdateOptions::RETURN_UPDATED)
            .await
            .unwrap()
            .is_some());
        assert!(model.find_by_id_and_delete(upper).await.unwrap().is_some());
    }

    #[test]
    fn seeding_a_non_uuid_id_is_rejected() {
        let err = MemoryModel::with_todos(vec![Todo::new("61312cf0f456031ad7a8c2fa")]).unwrap_err();
        assert_eq!(err, ModelError::cast("61312cf0f456031ad7a8c2fa"));
    }

    #[tokio::test]
    async fn id_filter_accepts_any_uuid_spelling() {
        let model = MemoryModel::new();
        let todo = model.create(json!({"task": "x"})).await.unwrap();
        let simple = Uuid::parse_str(&todo.id).unwrap().simple().to_string();

        let by_filter = model
            .find(Filter::new().field_eq("id", json!(simple)))
            .await
            .unwrap();
        assert_eq!(by_filter, vec![todo]);
    }

    #[tokio::test]
    async fn malformed_id_filter_is_a_cast_error() {
        let model = MemoryModel::new();
        let err = model
            .find(Filter::new().field_eq("id", json!("not-an-id")))
            .await
            .unwrap_err();
        assert_eq!(err, ModelError::cast("not-an-id"));
    }
}
