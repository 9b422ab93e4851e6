//! Request DTOs for the monitoring API
//!
//! Query-string parameters and request bodies (JSON or URL-encoded form)
//! accepted by the endpoints. Every field is optional at the serde level so
//! that absent input reaches validation; undecodable bodies are turned into
//! the same 400 envelope by [`crate::api::Payload`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{ApiError, Result};

/// Query parameters of `GET /ver`, exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    /// Distance to match, or the sentinel `Todos`
    pub distancia: Option<String>,
    /// Lower bound on `fecha`, RFC 3339
    pub desde: Option<String>,
    /// Row cap, parsed leniently
    pub limit: Option<String>,
}

/// Query parameters of the plain listings (`/valor`, `/valor/min`, `/estado`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<String>,
}

/// Request body for `POST /insertar`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsertarRequest {
    /// Measured distance; devices send it either as a string or a number
    #[serde(default, deserialize_with = "lenient_string")]
    pub distancia: Option<String>,
    /// Device name
    #[serde(default)]
    pub nombre: Option<String>,
    /// Reading time, defaults to the time of insertion
    #[serde(default)]
    pub fecha: Option<String>,
}

/// A validated reading ready to be written to `Valores`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReading {
    pub distancia: String,
    pub nombre: String,
    pub fecha: DateTime<Utc>,
}

impl InsertarRequest {
    /// Validates the body, defaulting `fecha` to `now`.
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewReading> {
        let (Some(distancia), Some(nombre)) = (non_empty(self.distancia), non_empty(self.nombre))
        else {
            return Err(ApiError::MissingParameters(
                "distancia y nombre son requeridos".to_string(),
            ));
        };

        let fecha = match non_empty(self.fecha) {
            Some(raw) => parse_instant(&raw).ok_or_else(|| {
                ApiError::InvalidParameter(format!(
                    "fecha debe ser una fecha ISO-8601 válida, se recibió '{}'",
                    raw
                ))
            })?,
            None => now,
        };

        Ok(NewReading {
            distancia,
            nombre,
            fecha,
        })
    }
}

/// Request body for `POST /estado`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstadoRequest {
    /// Connectivity flag: JSON `true` or the string `"true"` mean connected
    #[serde(default)]
    pub conectado: Option<Flag>,
    #[serde(default)]
    pub nombre: Option<String>,
}

/// A validated connectivity state ready to be written to `Estado`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEstado {
    pub conectado: bool,
    pub nombre: String,
}

impl EstadoRequest {
    /// Validates the body.
    pub fn validate(self) -> Result<NewEstado> {
        match (self.conectado, non_empty(self.nombre)) {
            (Some(flag), Some(nombre)) => Ok(NewEstado {
                conectado: flag.is_set(),
                nombre,
            }),
            _ => Err(ApiError::MissingParameters(
                "conectado y nombre son requeridos".to_string(),
            )),
        }
    }
}

/// Boolean sent either natively or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    pub fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Text(s) => s == "true",
        }
    }
}

/// Request body for `POST /notificar`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificarRequest {
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub mensaje: Option<String>,
    /// Device push token
    #[serde(default)]
    pub token: Option<String>,
}

/// A validated notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub titulo: String,
    pub mensaje: String,
    pub token: String,
}

impl NotificarRequest {
    /// Validates the body.
    pub fn validate(self) -> Result<Notification> {
        match (
            non_empty(self.titulo),
            non_empty(self.mensaje),
            non_empty(self.token),
        ) {
            (Some(titulo), Some(mensaje), Some(token)) => Ok(Notification {
                titulo,
                mensaje,
                token,
            }),
            _ => Err(ApiError::MissingParameters(
                "titulo, mensaje y token son requeridos".to_string(),
            )),
        }
    }
}

// == Helpers ==

/// Strict RFC 3339 parse into UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::Text(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    }))
}
