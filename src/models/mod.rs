//! Request and Response models for the monitoring API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    parse_instant, EstadoRequest, Flag, InsertarRequest, LimitParams, ListingParams, NewEstado,
    NewReading, NotificarRequest, Notification,
};
pub use responses::{
    ErrorResponse, EstadoRecord, EstadoResponse, HealthResponse, InsertarResponse,
    MinimalRecord, NotificarResponse, Record, StatsResponse,
};
