//! API Module
//!
//! HTTP handlers and routing for the monitoring REST API.
//!
//! # Endpoints
//! - `GET /` - Endpoint index
//! - `GET /ver` - Filtered readings (`distancia`, `desde`, `limit`)
//! - `GET /valor` - Newest readings
//! - `GET /valor/min` - Newest readings, compact form
//! - `GET /estado` - Newest connectivity states
//! - `POST /insertar` - Record a reading
//! - `POST /estado` - Record a connectivity state
//! - `POST /notificar` - Accept a push notification (simulated)
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint
//!
//! POST bodies may be JSON or URL-encoded forms.

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::Payload;
pub use handlers::*;
pub use routes::create_router;
