use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use pogo_catalog::{search, CatalogStore, DEFAULT_SEARCH_LIMIT};
use pogo_engine::Valuator;
use pogo_models::{CreatureRecord, PogoConfig, ServerConfig};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::api::{decode_proposal, ApiError, ValuationResponse};

/// Shared state for request handlers.
pub struct AppState {
    pub store: CatalogStore,
    pub valuator: Valuator,
}

impl AppState {
    pub fn from_config(config: &PogoConfig) -> Self {
        Self {
            store: CatalogStore::from_config(&config.catalog),
            valuator: Valuator::new(config.valuation.locale),
        }
    }
}

/// Build the HTTP router: JSON API under `/api`, static front-end for everything else.
pub fn router(state: Arc<AppState>, server: &ServerConfig) -> Router {
    let public_dir = PathBuf::from(&server.public_dir);
    let static_files =
        ServeDir::new(&public_dir).fallback(ServeFile::new(public_dir.join("index.html")));

    Router::new()
        .route("/health", get(health))
        .route("/api/db", get(get_catalog))
        .route("/api/pokemon", get(search_pokemon))
        .route("/api/trade-evaluate", post(evaluate_trade))
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `app` on `listener` until `cancel` fires.
pub async fn run(
    listener: TcpListener,
    app: Router,
    cancel: CancellationToken,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("pogo-trade listening on http://{addr}");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await?;
    info!("pogo-trade stopped");
    Ok(())
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/db - the whole catalog document
async fn get_catalog(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let catalog = state.store.snapshot().await?;
    let body = serde_json::to_vec(catalog.as_ref())?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// GET /api/pokemon?q= - creatures whose name contains `q`
async fn search_pokemon(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CreatureRecord>>, ApiError> {
    let catalog = state.store.snapshot().await?;
    let query = params.q.unwrap_or_default();
    let matches = search(&catalog, &query, DEFAULT_SEARCH_LIMIT)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(matches))
}

/// POST /api/trade-evaluate
async fn evaluate_trade(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ValuationResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let proposal = decode_proposal(&body)?;

    // One snapshot for the whole evaluation.
    let catalog = state.store.snapshot().await?;
    let verdict = state.valuator.valuate(&proposal, &catalog)?;

    info!(
        %request_id,
        left_items = proposal.left.len(),
        right_items = proposal.right.len(),
        left_total = verdict.left.total,
        right_total = verdict.right.total,
        ratio = verdict.ratio,
        outcome = ?verdict.outcome,
        "Trade evaluated"
    );

    Ok(Json(ValuationResponse::from_verdict(
        verdict,
        state.valuator.locale(),
    )))
}
