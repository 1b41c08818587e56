//! Static file serving for the viewer's page shell.
//!
//! Everything outside the API is served from the public directory:
//! - Path decoding and sanitization
//! - `index.html` for `/` and directories
//! - MIME type detection (`.glb` models as `model/gltf-binary`)
//! - Cache-Control headers

use std::borrow::Cow;
use std::path::Path;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;
use tracing::error;

use crate::constants::GLB_CONTENT_TYPE;
use crate::security::{sanitize_file_path, validate_path_within_base};
use crate::server::AppState;
use crate::server::audit::{AuditEvent, log_audit_event};

/// Cache-Control header value for static files (1 hour).
pub(crate) const STATIC_CACHE_CONTROL: &str = "public, max-age=3600";

const INDEX_FILE: &str = "index.html";

/// Router fallback: serve the request path from the public directory.
pub(crate) async fn serve_static(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return text_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }

    match &state.public_dir {
        Some(dir) => serve_static_file(dir, uri.path()).await,
        None => text_response(StatusCode::NOT_FOUND, "File not found"),
    }
}

/// Serve a file from `static_dir` for a raw (still percent-encoded) URI path.
pub async fn serve_static_file(static_dir: &Path, path: &str) -> Response {
    let Ok(decoded) = percent_decode_str(path).decode_utf8() else {
        return text_response(StatusCode::BAD_REQUEST, "Invalid path");
    };

    let relative = decoded.trim_start_matches('/');
    let relative = if relative.is_empty() { INDEX_FILE } else { relative };

    let sanitized_path = match sanitize_file_path(relative) {
        Ok(p) => p,
        Err(e) => {
            log_audit_event(AuditEvent::PathTraversalBlocked {
                path: relative.to_string(),
                reason: e.to_string(),
            });
            return text_response(StatusCode::BAD_REQUEST, "Invalid path");
        },
    };

    let target_path = match tokio::fs::metadata(static_dir.join(&sanitized_path)).await {
        Ok(meta) if meta.is_dir() => sanitized_path.join(INDEX_FILE),
        _ => sanitized_path,
    };

    // Symlinks must not lead outside the public directory
    let full_path = match validate_path_within_base(static_dir, &target_path) {
        Ok(p) => p,
        Err(e) => {
            log_audit_event(AuditEvent::PathTraversalBlocked {
                path: target_path.display().to_string(),
                reason: e.to_string(),
            });
            return text_response(StatusCode::BAD_REQUEST, "Invalid path");
        },
    };

    read_file(&full_path).await
}

async fn read_file(full_path: &Path) -> Response {
    match tokio::fs::read(full_path).await {
        Ok(contents) => {
            let content_type = guess_content_type(full_path);
            (
                [
                    (header::CONTENT_TYPE, content_type.into_owned()),
                    (header::CACHE_CONTROL, STATIC_CACHE_CONTROL.to_string()),
                ],
                Bytes::from(contents),
            )
                .into_response()
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            text_response(StatusCode::NOT_FOUND, "File not found")
        },
        Err(e) => {
            error!("Failed to read static file {}: {}", full_path.display(), e);
            text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        },
    }
}

fn text_response(status: StatusCode, message: &'static str) -> Response {
    (status, message).into_response()
}

/// Guess content type from file extension using the `mime_guess` crate.
///
/// Text types get an explicit UTF-8 charset; `.glb` maps to
/// `model/gltf-binary` regardless of the MIME database.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use arsnap::server::guess_content_type;
///
/// assert_eq!(guess_content_type(Path::new("chair.glb")), "model/gltf-binary");
/// assert_eq!(guess_content_type(Path::new("style.css")), "text/css; charset=utf-8");
/// assert_eq!(guess_content_type(Path::new("data.bin")), "application/octet-stream");
/// ```
pub fn guess_content_type(path: &Path) -> Cow<'static, str> {
    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("glb"))
    {
        return Cow::Borrowed(GLB_CONTENT_TYPE);
    }

    mime_guess::from_path(path)
        .first()
        .map_or(Cow::Borrowed("application/octet-stream"), |mime| {
            let mime_str = mime.essence_str();
            match mime_str {
                "text/html" => Cow::Borrowed("text/html; charset=utf-8"),
                "text/css" => Cow::Borrowed("text/css; charset=utf-8"),
                "text/javascript" => Cow::Borrowed("text/javascript; charset=utf-8"),
                "application/javascript" => Cow::Borrowed("application/javascript; charset=utf-8"),
                "application/json" => Cow::Borrowed("application/json; charset=utf-8"),
                "application/manifest+json" => {
                    Cow::Borrowed("application/manifest+json; charset=utf-8")
                },
                "image/png" => Cow::Borrowed("image/png"),
                "image/jpeg" => Cow::Borrowed("image/jpeg"),
                "image/svg+xml" => Cow::Borrowed("image/svg+xml"),
                "image/x-icon" => Cow::Borrowed("image/x-icon"),
                _ => {
                    if mime_str.starts_with("text/") || mime_str.contains("json") {
                        Cow::Owned(format!("{mime_str}; charset=utf-8"))
                    } else {
                        Cow::Owned(mime_str.to_string())
                    }
                },
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("models/sofa.GLB")), "model/gltf-binary");
        assert_eq!(
            guess_content_type(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(guess_content_type(Path::new("snap_1.png")), "image/png");
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();

        let resp = serve_static_file(dir.path(), "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(resp.headers()[header::CACHE_CONTROL], STATIC_CACHE_CONTROL);
    }

    #[tokio::test]
    async fn test_directory_serves_index() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/index.html"), "<html></html>").unwrap();

        let resp = serve_static_file(dir.path(), "/docs").await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_percent_encoded_path() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("models")).unwrap();
        fs::write(dir.path().join("models/arm chair.glb"), b"glTF").unwrap();

        let resp = serve_static_file(dir.path(), "/models/arm%20chair.glb").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "model/gltf-binary");
    }

    #[tokio::test]
    async fn test_traversal_rejected() {
        let dir = tempdir().unwrap();
        let resp = serve_static_file(dir.path(), "/%2e%2e/secret.txt").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempdir().unwrap();
        let resp = serve_static_file(dir.path(), "/missing.glb").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
