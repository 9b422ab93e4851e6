//! Collection query construction.
//!
//! Combining an equality or range filter on one field with ordering on
//! another needs a composite index (`distancia` + `fecha`) on hosted document
//! stores. That is a deployment prerequisite and is not checked here.

use crate::store::{Direction, FilterOp, Query, DOCUMENT_ID, VALORES};

use super::FilterDescriptor;

/// Timestamp field of both collections.
pub const FECHA: &str = "fecha";
/// Distance field of `Valores`.
pub const DISTANCIA: &str = "distancia";

// == Tie Break ==
/// Secondary ordering among documents sharing a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// No secondary key: order of equal timestamps is up to the store
    #[default]
    StoreDefined,
    /// Equal timestamps ordered by document id, descending
    DocumentId,
}

impl TieBreak {
    /// Parses the `TIE_BREAK` setting (`store` or `id`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "store" => Some(TieBreak::StoreDefined),
            "id" => Some(TieBreak::DocumentId),
            _ => None,
        }
    }
}

/// Newest-first query over `collection`, capped at `limit` rows.
pub fn recent_query(collection: &str, limit: usize, tie_break: TieBreak) -> Query {
    let mut query = Query::collection(collection).order_by(FECHA, Direction::Descending);
    if tie_break == TieBreak::DocumentId {
        query = query.order_by(DOCUMENT_ID, Direction::Descending);
    }
    query.limit(limit)
}

/// Query behind `GET /ver`.
///
/// Ordering and row cap come first, then the equality filter on distance,
/// then the lower bound on the timestamp.
pub fn listing_query(filter: &FilterDescriptor, tie_break: TieBreak) -> Query {
    let mut query = recent_query(VALORES, filter.limit, tie_break);

    if let Some(distance) = &filter.distance_equals {
        query = query.where_field(DISTANCIA, FilterOp::Equal, distance.as_str());
    }
    if let Some(since) = filter.since {
        query = query.where_field(FECHA, FilterOp::GreaterOrEqual, since);
    }

    query
}
