//! Request body extractor accepting JSON or URL-encoded forms.
//!
//! Devices post either `application/json` or
//! `application/x-www-form-urlencoded`. Rejections of both decoders are
//! turned into [`ApiError::InvalidParameter`] so they render as the usual
//! `{error, message}` envelope.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::header,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Body decoded as JSON or as a URL-encoded form, chosen by `Content-Type`.
///
/// Anything that is not a form is handed to the JSON decoder, which rejects
/// a missing or foreign content type.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::InvalidParameter(e.body_text()))?;
            Ok(Payload(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::InvalidParameter(e.body_text()))?;
            Ok(Payload(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EstadoRequest, InsertarRequest};
    use axum::body::Body;

    fn request(content_type: Option<&str>, body: &str) -> Request {
        let mut builder = Request::builder().method("POST").uri("/insertar");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_form_body() {
        let req = request(
            Some("application/x-www-form-urlencoded"),
            "distancia=12&nombre=esp32-a",
        );
        let Payload(body) = Payload::<InsertarRequest>::from_request(req, &())
            .await
            .unwrap();

        assert_eq!(body.distancia.as_deref(), Some("12"));
        assert_eq!(body.nombre.as_deref(), Some("esp32-a"));
        assert!(body.fecha.is_none());
    }

    #[tokio::test]
    async fn test_form_flag_is_text() {
        let req = request(
            Some("application/x-www-form-urlencoded; charset=utf-8"),
            "conectado=true&nombre=esp32-a",
        );
        let Payload(body) = Payload::<EstadoRequest>::from_request(req, &())
            .await
            .unwrap();

        assert!(body.validate().unwrap().conectado);
    }

    #[tokio::test]
    async fn test_json_body() {
        let req = request(Some("application/json"), r#"{"distancia": 7, "nombre": "a"}"#);
        let Payload(body) = Payload::<InsertarRequest>::from_request(req, &())
            .await
            .unwrap();

        assert_eq!(body.distancia.as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn test_rejections_are_invalid_parameter() {
        let cases = [
            request(Some("application/json"), r#"{"invalid json"#),
            request(None, r#"{"distancia": "1", "nombre": "a"}"#),
            request(Some("application/json"), r#"{"distancia": "1", "nombre": 5}"#),
        ];

        for req in cases {
            let err = Payload::<InsertarRequest>::from_request(req, &())
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::InvalidParameter(_)), "{:?}", err);
        }
    }
}
