//! Document Store Module
//!
//! Async contract for the external document database holding the `Valores`
//! and `Estado` collections, plus the query vocabulary used to talk to it.

mod memory;
mod query;
mod value;

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryStore;
pub use query::{Constraint, Direction, FilterOp, Query};
pub use value::{iso_timestamp, FieldValue};

// == Collection Names ==
/// Sensor readings collection
pub const VALORES: &str = "Valores";
/// Connectivity state collection
pub const ESTADO: &str = "Estado";

/// Pseudo-field addressing the document id in `order_by` constraints.
pub const DOCUMENT_ID: &str = "__name__";

/// Field map of a stored document.
pub type Fields = BTreeMap<String, FieldValue>;

// == Document ==
/// A document returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Store-generated identifier
    pub id: String,
    /// Document fields
    pub data: Fields,
}

impl Document {
    /// Creates a document from its id and fields.
    pub fn new(id: impl Into<String>, data: Fields) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Returns the value of `field`, resolving [`DOCUMENT_ID`] to the id.
    pub fn field(&self, field: &str) -> Option<FieldValue> {
        if field == DOCUMENT_ID {
            Some(FieldValue::String(self.id.clone()))
        } else {
            self.data.get(field).cloned()
        }
    }
}

// == Store Error ==
/// Failure reported by the document store.
///
/// `message` and `code` are surfaced verbatim to API clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    /// Human-readable detail
    pub message: String,
    /// Machine-readable store error code, if the store provides one
    pub code: Option<String>,
}

impl StoreError {
    /// Creates an error without a code.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    /// Attaches a machine-readable code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

// == Document Store Trait ==
/// Asynchronous request/response contract of the backing document store.
///
/// Implementations must be shareable across request tasks.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Runs `query` and returns the matching documents in query order.
    async fn get_docs(&self, query: &Query) -> Result<Vec<Document>, StoreError>;

    /// Adds a document to `collection` and returns its generated id.
    async fn add_doc(&self, collection: &str, data: Fields) -> Result<String, StoreError>;
}
