//! Response DTOs for the monitoring API
//!
//! Defines the structure of outgoing HTTP response bodies, including the
//! records rendered from store documents.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::store::{iso_timestamp, Document};

/// Text of a field, empty when the document lacks it.
fn text_field(doc: &Document, field: &str) -> String {
    doc.field(field).map(|v| v.to_text()).unwrap_or_default()
}

/// Timestamp field normalized to ISO-8601, empty when absent.
fn fecha_field(doc: &Document) -> String {
    doc.field("fecha")
        .map(|v| v.to_iso_string())
        .unwrap_or_default()
}

// == Records ==

/// A sensor reading from `Valores`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: String,
    pub distancia: String,
    pub nombre: String,
    /// ISO-8601 UTC
    pub fecha: String,
}

impl From<&Document> for Record {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            distancia: text_field(doc, "distancia"),
            nombre: text_field(doc, "nombre"),
            fecha: fecha_field(doc),
        }
    }
}

/// A connectivity state from `Estado`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstadoRecord {
    pub id: String,
    pub conectado: bool,
    pub nombre: String,
    pub fecha: String,
}

impl From<&Document> for EstadoRecord {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            conectado: doc.field("conectado").is_some_and(|v| v.as_bool()),
            nombre: text_field(doc, "nombre"),
            fecha: fecha_field(doc),
        }
    }
}

/// Compact reading for bandwidth-constrained dashboards (`GET /valor/min`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinimalRecord {
    /// Distance
    pub d: String,
    /// Timestamp
    pub f: String,
}

impl From<&Document> for MinimalRecord {
    fn from(doc: &Document) -> Self {
        Self {
            d: text_field(doc, "distancia"),
            f: fecha_field(doc),
        }
    }
}

// == Write Responses ==

/// Response body for `POST /insertar`
#[derive(Debug, Clone, Serialize)]
pub struct InsertarResponse {
    #[serde(flatten)]
    pub record: Record,
    pub status: String,
}

impl InsertarResponse {
    pub fn new(record: Record) -> Self {
        Self {
            record,
            status: "Valores insertados".to_string(),
        }
    }
}

/// Response body for `POST /estado`
#[derive(Debug, Clone, Serialize)]
pub struct EstadoResponse {
    #[serde(flatten)]
    pub record: EstadoRecord,
    pub status: String,
}

impl EstadoResponse {
    pub fn new(record: EstadoRecord) -> Self {
        Self {
            record,
            status: "Estado actualizado".to_string(),
        }
    }
}

/// Response body for `POST /notificar`
#[derive(Debug, Clone, Serialize)]
pub struct NotificarResponse {
    pub titulo: String,
    pub mensaje: String,
    pub token: String,
    pub status: String,
}

impl NotificarResponse {
    pub fn simulated(titulo: String, mensaje: String, token: String) -> Self {
        Self {
            titulo,
            mensaje,
            token,
            status: "Notificación enviada (simulada)".to_string(),
        }
    }
}

// == Operational Responses ==

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of LRU evictions
    pub evictions: u64,
    /// Number of full invalidations triggered by writes
    pub invalidations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<&CacheStats> for StatsResponse {
    fn from(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: iso_timestamp(&chrono::Utc::now()),
        }
    }
}

/// Error envelope for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Short summary
    pub error: String,
    /// Detail, verbatim from the failing component
    pub message: String,
    /// Store error code, when one was reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: Option<String>) -> Self {
        self.code = code;
        self
    }
}
