//! Domain types for the todo document model.
//!
//! # Design
//! A `Todo` is a loosely-typed document: the identifier and the `done` flag
//! are the only fields the service knows about, everything else the caller
//! sends is carried along in `fields` and serialized flat next to them.
//! Create payloads and update patches stay raw `serde_json::Value`s so the
//! HTTP layer can hand request bodies to the model untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single todo document as stored by a `TodoModel`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    pub id: String,
    #[serde(default)]
    pub done: bool,
    /// Caller-supplied fields other than `id` and `done`.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Todo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            done: false,
            fields: Map::new(),
        }
    }

    /// Builder-style setter for an extra field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// Value of `key` as it appears in the serialized document.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(Value::String(self.id.clone())),
            "done" => Some(Value::Bool(self.done)),
            _ => self.fields.get(key).cloned(),
        }
    }
}

/// Equality filter for `TodoModel::find`. The empty filter matches every
/// document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Filter(pub Map<String, Value>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field_eq(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        self.0
            .iter()
            .all(|(key, expected)| todo.get(key).as_ref() == Some(expected))
    }
}

/// Options for `TodoModel::find_by_id_and_update`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOptions {
    /// Return the document as it is after the update instead of before.
    pub new: bool,
    /// Legacy find-and-modify code path. Always `false` from the controller.
    pub use_find_and_modify: bool,
}

impl UpdateOptions {
    /// `{new: true, useFindAndModify: false}`.
    pub const RETURN_UPDATED: Self = Self {
        new: true,
        use_find_and_modify: false,
    };
}
