//! HTTP transport to the snapshot service.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::constants::{GALLERY_PATH, UPLOAD_PATH};
use crate::server::ErrorBody;
use crate::server::handlers::{UploadRequest, UploadResponse};

/// Failures talking to the service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection, timeout, or body decoding failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with an error.
    #[error("service error ({status}): {message}")]
    Service { status: u16, message: String },
}

/// Client for the gallery API.
#[derive(Debug, Clone)]
pub struct GalleryClient {
    http: reqwest::Client,
    base: Url,
}

impl GalleryClient {
    /// Create a client for the service at `base` (e.g. `http://127.0.0.1:5000`).
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not a valid URL.
    pub fn new(base: &str) -> Result<Self, ClientError> {
        Ok(Self::with_client(reqwest::Client::new(), Url::parse(base)?))
    }

    pub fn with_client(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    /// Absolute URL for a path returned by the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined onto the base URL.
    pub fn resolve(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path)?)
    }

    /// Upload a PNG data URI. Returns the public path of the new snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// response without `ok: true`.
    pub async fn upload(&self, data_uri: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.resolve(UPLOAD_PATH)?)
            .json(&UploadRequest {
                image: Some(data_uri.to_string()),
            })
            .send()
            .await?;

        let body: UploadResponse = read_json(response).await?;
        if !body.ok {
            return Err(ClientError::Service {
                status: StatusCode::OK.as_u16(),
                message: "Upload failed".to_string(),
            });
        }
        Ok(body.file)
    }

    /// Fetch the gallery listing, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn gallery(&self) -> Result<Vec<String>, ClientError> {
        let response = self.http.get(self.resolve(GALLERY_PATH)?).send().await?;
        read_json(response).await
    }

    /// Ask the service to delete every snapshot.
    ///
    /// Returns the response status without judging it; callers that follow
    /// the optimistic clear flow ignore it.
    ///
    /// # Errors
    ///
    /// Returns an error only when the request cannot be sent.
    pub async fn clear_all(&self) -> Result<StatusCode, ClientError> {
        let response = self.http.delete(self.resolve(GALLERY_PATH)?).send().await?;
        Ok(response.status())
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    Err(ClientError::Service {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_paths() {
        let client = GalleryClient::new("http://127.0.0.1:5000/viewer/").unwrap();
        assert_eq!(
            client.resolve("/snapshots/snap_1.png").unwrap().as_str(),
            "http://127.0.0.1:5000/snapshots/snap_1.png"
        );
        assert_eq!(
            client.resolve(UPLOAD_PATH).unwrap().as_str(),
            "http://127.0.0.1:5000/api/upload"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            GalleryClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
