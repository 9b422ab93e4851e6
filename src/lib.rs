//! Monitor API - HTTP API for ESP32 sensor readings
//!
//! Serves readings (`Valores`) and connectivity states (`Estado`) from a
//! document store, memoizing listings in a TTL cache that is cleared on
//! every write.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
