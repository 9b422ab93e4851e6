//! In-memory document store.
//!
//! Evaluates queries the way a hosted document database does: filters first,
//! then a stable multi-key sort, then the row cap. Used by the binary in
//! development and by the test suites.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Direction, Document, DocumentStore, Fields, FilterOp, Query, StoreError};

/// Length of generated document ids.
const ID_LENGTH: usize = 20;

// == Memory Store ==
/// Document store kept entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Documents per collection, in insertion order
    collections: RwLock<HashMap<String, Vec<Document>>>,
    /// Number of `get_docs` calls served
    queries: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a document under a caller-chosen id.
    pub async fn insert_with_id(&self, collection: &str, id: impl Into<String>, data: Fields) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(id, data));
    }

    /// Number of documents currently held in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(collection).map_or(0, Vec::len)
    }

    /// Number of queries executed since construction.
    pub fn queries_executed(&self) -> usize {
        self.queries.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_docs(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        self.queries.fetch_add(1, AtomicOrdering::SeqCst);

        let collections = self.collections.read().await;
        let Some(docs) = collections.get(&query.collection) else {
            return Ok(Vec::new());
        };

        let orderings: Vec<(&str, Direction)> = query.orderings().collect();

        // Documents lacking an ordered field are not part of the result set
        let mut matched: Vec<Document> = docs
            .iter()
            .filter(|doc| matches_filters(doc, query))
            .filter(|doc| orderings.iter().all(|(field, _)| doc.field(field).is_some()))
            .cloned()
            .collect();

        matched.sort_by(|a, b| compare_documents(a, b, &orderings));

        if let Some(cap) = query.row_cap() {
            matched.truncate(cap);
        }

        Ok(matched)
    }

    async fn add_doc(&self, collection: &str, data: Fields) -> Result<String, StoreError> {
        let id: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(ID_LENGTH)
            .collect();
        self.insert_with_id(collection, id.clone(), data).await;
        Ok(id)
    }
}

fn matches_filters(doc: &Document, query: &Query) -> bool {
    query.filters().all(|(field, op, expected)| {
        doc.field(field)
            .and_then(|actual| actual.compare(expected))
            .map_or(false, |ord| match op {
                FilterOp::Equal => ord == Ordering::Equal,
                FilterOp::GreaterOrEqual => ord != Ordering::Less,
            })
    })
}

fn compare_documents(a: &Document, b: &Document, orderings: &[(&str, Direction)]) -> Ordering {
    for (field, direction) in orderings {
        let ord = match (a.field(field), b.field(field)) {
            (Some(x), Some(y)) => x.compare(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        };
        let ord = match direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
