//! Snapshot API handlers.
//!
//! Upload, list and clear the gallery, and serve stored snapshot files.

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::payload::decode_png_data_uri;
use crate::server::audit::{AuditEvent, log_audit_event};
use crate::server::{AppError, AppState};
use crate::store::SnapshotName;

const INVALID_IMAGE: &str = "Invalid image data";

/// POST /api/upload request body.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub image: Option<String>,
}

/// POST /api/upload response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub ok: bool,
    /// Public path of the new snapshot.
    pub file: String,
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// POST /api/upload - Store a PNG data URI as a new snapshot.
pub(crate) async fn upload(
    State(state): State<AppState>,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(AppError::PayloadTooLarge("Image too large".to_string()));
        },
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "Rejected upload body");
            return Err(AppError::BadRequest(INVALID_IMAGE.to_string()));
        },
    };

    let png = decode_png_data_uri(request.image.as_deref()).map_err(|e| {
        debug!(reason = %e, "Rejected upload payload");
        AppError::BadRequest(INVALID_IMAGE.to_string())
    })?;

    let name = state
        .store
        .create(&png)
        .await
        .map_err(|e| AppError::internal("Failed to save image", e))?;

    log_audit_event(AuditEvent::SnapshotCreated {
        file: name.to_string(),
        bytes: png.len(),
    });

    Ok(Json(UploadResponse {
        ok: true,
        file: name.public_path(),
    }))
}

/// GET /api/gallery - Public paths of every snapshot, newest first.
pub(crate) async fn gallery_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let names = state
        .store
        .list()
        .await
        .map_err(|e| AppError::internal("Failed to load gallery", e))?;

    Ok(Json(names.iter().map(SnapshotName::public_path).collect()))
}

/// DELETE /api/gallery - Delete every snapshot.
pub(crate) async fn gallery_clear(
    State(state): State<AppState>,
) -> Result<Json<OkResponse>, AppError> {
    let removed = state
        .store
        .clear_all()
        .await
        .map_err(|e| AppError::internal("Failed to clear gallery", e))?;

    log_audit_event(AuditEvent::GalleryCleared { removed });
    Ok(Json(OkResponse { ok: true }))
}

/// GET /snapshots/{name} - Raw PNG bytes of one snapshot.
pub(crate) async fn snapshot_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let not_found = || AppError::NotFound("Snapshot not found".to_string());

    let Some(name) = SnapshotName::parse(&name) else {
        if name.contains(['/', '\\']) || name.contains("..") {
            log_audit_event(AuditEvent::PathTraversalBlocked {
                path: name,
                reason: "snapshot name contains path components".to_string(),
            });
        }
        return Err(not_found());
    };

    let bytes = state
        .store
        .read(&name)
        .await
        .map_err(|e| AppError::internal("Failed to read snapshot", e))?
        .ok_or_else(not_found)?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Bytes::from(bytes),
    )
        .into_response())
}
