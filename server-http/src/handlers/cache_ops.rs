use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::TtlSeconds;
use tracing::{debug, error};
use uuid::Uuid;

use crate::models::{GetResponse, PutRequest, PutResponse};
use crate::state::AppState;

/// POST /cache
///
/// Mints a fresh UUID key, stores the payload under it, and returns the key.
pub async fn put_value(
    State(state): State<AppState>,
    Json(req): Json<PutRequest>,
) -> Result<(StatusCode, Json<PutResponse>), StatusCode> {
    let uuid = Uuid::new_v4().to_string();
    debug!("PUT: key={}", uuid);

    match state
        .backend
        .put(&uuid, &req.value, TtlSeconds(req.ttl_seconds))
        .await
    {
        Ok(()) => Ok((StatusCode::CREATED, Json(PutResponse { uuid }))),
        Err(err) => {
            error!("PUT failed for key {uuid}: {err}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /cache/{uuid}
///
/// A legitimate miss is an empty 204; every other backend error is a server
/// failure, including the empty-record anomaly.
pub async fn get_value(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<GetResponse>, StatusCode> {
    debug!("GET: key={}", uuid);

    match state.backend.get(&uuid).await {
        Ok(value) => Ok(Json(GetResponse { value })),
        Err(shared::Error::NotFound) => Err(StatusCode::NO_CONTENT),
        Err(shared::Error::InvalidKey(_)) => Err(StatusCode::BAD_REQUEST),
        Err(err) => {
            error!("GET failed for key {uuid}: {err}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
