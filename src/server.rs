//! HTTP surface for the memory engine.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::config::HappyDaysConfig;
use crate::error::StoreError;
use crate::memories::Memories;
use crate::store::{MemoryRecord, RecordId};

pub struct ServerState {
    pub memories: Arc<Memories>,
    pub scratch_dir: PathBuf,
}

struct ServerError(StoreError);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            StoreError::RecordNotFound(_) => StatusCode::NOT_FOUND,
            StoreError::EncodingFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            StoreError::IndexUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            StoreError::Superseded => StatusCode::CONFLICT,
            StoreError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct CaptureResponse {
    id: RecordId,
}

#[derive(Serialize)]
struct AnnotateResponse {
    id: RecordId,
    transcript: Option<String>,
}

#[derive(Serialize)]
struct ListResponse {
    ids: Vec<RecordId>,
}

#[derive(Serialize)]
struct RecordResponse {
    #[serde(flatten)]
    record: MemoryRecord,
    transcript: Option<String>,
}

#[derive(Deserialize)]
struct SearchRequest {
    query: String,
}

/// Path segments are percent-decoded; refuse anything that is not a plain
/// base name before it can reach a filesystem join.
fn parse_id(raw: &str) -> Result<RecordId, ServerError> {
    RecordId::parse(raw).ok_or_else(|| ServerError(StoreError::RecordNotFound(raw.to_string())))
}

pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/memories", get(list_handler).post(capture_handler))
        .route("/memories/{id}", get(record_handler))
        .route("/memories/{id}/audio", post(annotate_handler))
        .route("/search", post(search_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(memories: Arc<Memories>, config: &HappyDaysConfig) -> Result<()> {
    let state = Arc::new(ServerState {
        memories,
        scratch_dir: config.scratch_dir.clone(),
    });
    tokio::fs::create_dir_all(&state.scratch_dir).await?;

    let addr = format!("0.0.0.0:{}", config.port);
    info!("memory engine listening at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn list_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<ListResponse>, ServerError> {
    let ids = state.memories.search("").await?;
    Ok(Json(ListResponse { ids }))
}

async fn capture_handler(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> Result<Json<CaptureResponse>, ServerError> {
    let id = state.memories.capture(&body)?;
    Ok(Json(CaptureResponse { id }))
}

async fn record_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<RecordResponse>, ServerError> {
    let (record, transcript) = state.memories.open(&parse_id(&id)?)?;
    Ok(Json(RecordResponse { record, transcript }))
}

async fn annotate_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<AnnotateResponse>, ServerError> {
    let id = parse_id(&id)?;
    // Stage the upload like a finished recording, then attach it.
    let upload = state
        .scratch_dir
        .join(format!("upload-{}.m4a", Uuid::new_v4()));
    tokio::fs::write(&upload, &body)
        .await
        .map_err(|e| ServerError(StoreError::io(&upload, e)))?;

    let transcript = match state.memories.annotate(&id, &upload).await {
        Ok(transcript) => transcript,
        Err(e) => {
            // A failed attach leaves the staged upload behind; drop it so the
            // scratch dir does not grow under repeated failures.
            let _ = tokio::fs::remove_file(&upload).await;
            return Err(e.into());
        }
    };
    Ok(Json(AnnotateResponse { id, transcript }))
}

async fn search_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<ListResponse>, ServerError> {
    let ids = state.memories.search(&payload.query).await?;
    Ok(Json(ListResponse { ids }))
}
