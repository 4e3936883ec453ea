//! Domain types and the data-access capability for the todo service.
//!
//! # Overview
//! The HTTP controller in `todo-server` never touches storage directly. It
//! talks to a [`TodoModel`], a small document-database style interface
//! (`find`, `find_by_id`, `create`, `find_by_id_and_update`,
//! `find_by_id_and_delete`), injected as a trait object so tests can swap
//! in stubs.
//!
//! # Design
//! - Absent documents are `Ok(None)`, never an error.
//! - Every other failure is a [`ModelError`] that callers forward unchanged.
//! - [`MemoryModel`] is the bundled implementation: insertion-ordered,
//!   UUID ids, light schema checks on `done` and `id`.

pub mod error;
pub mod memory;
pub mod model;
pub mod types;

pub use error::ModelError;
pub use memory::MemoryModel;
pub use model::TodoModel;
pub use types::{Filter, Todo, UpdateOptions};
