//! API Handlers
//!
//! HTTP request handlers for each monitoring API endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    EstadoRecord, EstadoRequest, EstadoResponse, HealthResponse, InsertarRequest,
    InsertarResponse, LimitParams, ListingParams, MinimalRecord, NotificarRequest,
    NotificarResponse, Record, StatsResponse,
};
use crate::query::{
    estado_key, listing_key, listing_query, normalize, normalize_limit, recent_query,
    valor_key, TieBreak, DEFAULT_LIMIT, DISTANCIA, FECHA, MINIMAL_DEFAULT_LIMIT,
};
use crate::store::{
    self, iso_timestamp, Document, DocumentStore, FieldValue, Fields, ESTADO, VALORES,
};

use super::extract::Payload;

/// Rendered listing bodies, keyed by derived cache key.
pub type ResponseCache = CacheStore<Value>;

/// Application state shared across all handlers.
///
/// Both the store and the cache are injected so tests can substitute them.
#[derive(Clone)]
pub struct AppState {
    /// Backing document store
    pub store: Arc<dyn DocumentStore>,
    /// Process-wide response cache
    pub cache: Arc<RwLock<ResponseCache>>,
    /// Secondary ordering for listings
    pub tie_break: TieBreak,
    /// Advertised `Cache-Control` max-age
    pub cache_ttl: Duration,
}

impl AppState {
    /// Creates a new AppState from a store and a cache.
    pub fn new(store: Arc<dyn DocumentStore>, cache: ResponseCache) -> Self {
        Self {
            store,
            cache_ttl: cache.ttl(),
            cache: Arc::new(RwLock::new(cache)),
            tie_break: TieBreak::default(),
        }
    }

    /// Sets the secondary ordering for listings.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config, store: Arc<dyn DocumentStore>) -> Self {
        let cache = CacheStore::new(config.max_cache_entries, config.cache_ttl());
        Self::new(store, cache).with_tie_break(config.tie_break)
    }

    // Write lock: lookups update LRU order and stats
    async fn cached(&self, key: &str) -> (Option<Value>, u64) {
        let mut cache = self.cache.write().await;
        (cache.get(key), cache.generation())
    }

    // Dropped if a write invalidated the cache since `generation` was read
    async fn remember(&self, key: String, value: Value, generation: u64) {
        if !self.cache.write().await.set_if_generation(key, value, generation) {
            debug!("listing outdated by a concurrent write, not cached");
        }
    }

    async fn invalidate(&self, cause: &'static str) {
        let dropped = self.cache.write().await.invalidate_all();
        info!("{} invalidated {} cached responses", cause, dropped);
    }

    async fn fetch(&self, query: &store::Query, context: &'static str) -> Result<Vec<Document>> {
        self.store.get_docs(query).await.map_err(|e| {
            warn!(context, code = ?e.code, "store query failed: {}", e);
            ApiError::upstream(context, e)
        })
    }

    async fn insert(
        &self,
        collection: &str,
        data: Fields,
        context: &'static str,
    ) -> Result<String> {
        self.store.add_doc(collection, data).await.map_err(|e| {
            warn!(context, code = ?e.code, "store insert failed: {}", e);
            ApiError::upstream(context, e)
        })
    }
}

/// Serves `key` from the cache, or runs `query` and caches the rendered rows.
async fn cached_listing<T>(
    state: &AppState,
    key: String,
    query: store::Query,
    context: &'static str,
) -> Result<Value>
where
    T: for<'a> From<&'a Document> + Serialize,
{
    let (hit, generation) = state.cached(&key).await;
    if let Some(hit) = hit {
        debug!(key = %key, "cache hit");
        return Ok(hit);
    }
    debug!(key = %key, "cache miss");

    let docs = state.fetch(&query, context).await?;
    let body = render::<T>(&docs)?;
    state.remember(key, body.clone(), generation).await;

    Ok(body)
}

fn render<T>(docs: &[Document]) -> Result<Value>
where
    T: for<'a> From<&'a Document> + Serialize,
{
    let rows: Vec<T> = docs.iter().map(|doc| T::from(doc)).collect();
    serde_json::to_value(rows).map_err(|e| ApiError::Internal(e.to_string()))
}

const INDEX_HTML: &str = "<h1>API de monitoreo ESP32</h1><ul>\
<li><b>GET /ver</b> - Valores filtrados (distancia, desde, limit)</li>\
<li><b>GET /valor</b> - Valores más recientes (limit)</li>\
<li><b>GET /valor/min</b> - Valores con respuesta mínima (limit)</li>\
<li><b>GET /estado</b> - Estados de conexión (limit)</li>\
<li><b>POST /insertar</b> - {distancia, nombre, fecha}</li>\
<li><b>POST /estado</b> - {conectado, nombre}</li>\
<li><b>POST /notificar</b> - {titulo, mensaje, token}</li>\
<li><b>GET /stats</b> - Estadísticas de caché</li>\
<li><b>GET /health</b> - Estado del servidor</li>\
</ul>";

/// Handler for GET /
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Handler for GET /ver
///
/// Filtered, newest-first readings. Invalid `desde` is rejected before the
/// cache or the store is consulted.
pub async fn ver_handler(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<Value>> {
    let filter = normalize(&params)?;
    let key = listing_key(&filter);
    let query = listing_query(&filter, state.tie_break);

    cached_listing::<Record>(&state, key, query, "/ver")
        .await
        .map(Json)
}

/// Handler for GET /valor
pub async fn valor_handler(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Value>> {
    let limit = normalize_limit(params.limit.as_deref(), DEFAULT_LIMIT);
    let query = recent_query(VALORES, limit, state.tie_break);

    cached_listing::<Record>(&state, valor_key(limit), query, "/valor")
        .await
        .map(Json)
}

/// Handler for GET /valor/min
///
/// Not cached: the payload is small and meant to be always fresh.
pub async fn valor_min_handler(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Value>> {
    let limit = normalize_limit(params.limit.as_deref(), MINIMAL_DEFAULT_LIMIT);
    let docs = state
        .fetch(&recent_query(VALORES, limit, state.tie_break), "/valor/min")
        .await?;

    render::<MinimalRecord>(&docs).map(Json)
}

/// Handler for GET /estado
pub async fn estado_list_handler(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Value>> {
    let limit = normalize_limit(params.limit.as_deref(), DEFAULT_LIMIT);
    let query = recent_query(ESTADO, limit, state.tie_break);

    cached_listing::<EstadoRecord>(&state, estado_key(limit), query, "/estado")
        .await
        .map(Json)
}

/// Handler for POST /insertar
pub async fn insertar_handler(
    State(state): State<AppState>,
    Payload(req): Payload<InsertarRequest>,
) -> Result<(StatusCode, Json<InsertarResponse>)> {
    let reading = req.validate(Utc::now())?;

    let mut data = Fields::new();
    data.insert(DISTANCIA.to_string(), FieldValue::from(reading.distancia.as_str()));
    data.insert("nombre".to_string(), FieldValue::from(reading.nombre.as_str()));
    data.insert(FECHA.to_string(), FieldValue::Timestamp(reading.fecha));

    let id = state.insert(VALORES, data, "/insertar").await?;
    info!(id = %id, nombre = %reading.nombre, "reading inserted");
    state.invalidate("/insertar").await;

    let record = Record {
        id,
        distancia: reading.distancia,
        nombre: reading.nombre,
        fecha: iso_timestamp(&reading.fecha),
    };
    Ok((StatusCode::CREATED, Json(InsertarResponse::new(record))))
}

/// Handler for POST /estado
pub async fn estado_handler(
    State(state): State<AppState>,
    Payload(req): Payload<EstadoRequest>,
) -> Result<(StatusCode, Json<EstadoResponse>)> {
    let estado = req.validate()?;
    let fecha = Utc::now();

    let mut data = Fields::new();
    data.insert("conectado".to_string(), FieldValue::Bool(estado.conectado));
    data.insert("nombre".to_string(), FieldValue::from(estado.nombre.as_str()));
    data.insert(FECHA.to_string(), FieldValue::Timestamp(fecha));

    let id = state.insert(ESTADO, data, "/estado").await?;
    info!(id = %id, conectado = estado.conectado, "connectivity state recorded");
    state.invalidate("/estado").await;

    let record = EstadoRecord {
        id,
        conectado: estado.conectado,
        nombre: estado.nombre,
        fecha: iso_timestamp(&fecha),
    };
    Ok((StatusCode::CREATED, Json(EstadoResponse::new(record))))
}

/// Handler for POST /notificar
///
/// Validates and acknowledges; nothing is delivered.
pub async fn notificar_handler(
    Payload(req): Payload<NotificarRequest>,
) -> Result<(StatusCode, Json<NotificarResponse>)> {
    let notification = req.validate()?;
    info!(titulo = %notification.titulo, "notification accepted (simulated delivery)");

    Ok((
        StatusCode::CREATED,
        Json(NotificarResponse::simulated(
            notification.titulo,
            notification.mensaje,
            notification.token,
        )),
    ))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    Json(StatsResponse::from(&stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn test_state() -> (Arc<MemoryStore>, AppState) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), CacheStore::new(100, Duration::from_secs(300)));
        (store, state)
    }

    fn insertar(distancia: &str) -> InsertarRequest {
        InsertarRequest {
            distancia: Some(distancia.to_string()),
            nombre: Some("esp32-a".to_string()),
            fecha: None,
        }
    }

    #[tokio::test]
    async fn test_insert_then_list() {
        let (_, state) = test_state();

        let (status, _) = insertar_handler(State(state.clone()), Payload(insertar("12")))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(body) = ver_handler(State(state), Query(ListingParams::default()))
            .await
            .unwrap();
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["distancia"], "12");
    }

    #[tokio::test]
    async fn test_ver_second_call_is_cached() {
        let (store, state) = test_state();

        ver_handler(State(state.clone()), Query(ListingParams::default()))
            .await
            .unwrap();
        ver_handler(State(state.clone()), Query(ListingParams::default()))
            .await
            .unwrap();

        assert_eq!(store.queries_executed(), 1);
        assert_eq!(state.cache.read().await.stats().hits, 1);
    }

    #[tokio::test]
    async fn test_invalid_desde_skips_store() {
        let (store, state) = test_state();
        let params = ListingParams {
            desde: Some("not-a-date".to_string()),
            ..ListingParams::default()
        };

        let result = ver_handler(State(state), Query(params)).await;
        assert!(matches!(result, Err(ApiError::InvalidParameter(_))));
        assert_eq!(store.queries_executed(), 0);
    }

    #[tokio::test]
    async fn test_write_invalidates_every_listing() {
        let (_, state) = test_state();

        valor_handler(State(state.clone()), Query(LimitParams::default()))
            .await
            .unwrap();
        estado_list_handler(State(state.clone()), Query(LimitParams::default()))
            .await
            .unwrap();
        assert_eq!(state.cache.read().await.len(), 2);

        let req = EstadoRequest {
            conectado: Some(crate::models::Flag::Bool(true)),
            nombre: Some("esp32-a".to_string()),
        };
        estado_handler(State(state.clone()), Payload(req))
            .await
            .unwrap();

        assert!(state.cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_valor_min_is_not_cached() {
        let (store, state) = test_state();

        valor_min_handler(State(state.clone()), Query(LimitParams::default()))
            .await
            .unwrap();
        valor_min_handler(State(state.clone()), Query(LimitParams::default()))
            .await
            .unwrap();

        assert_eq!(store.queries_executed(), 2);
        assert!(state.cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let (_, state) = test_state();
        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
