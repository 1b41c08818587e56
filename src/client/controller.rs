//! Snapshot and gallery flows as driven by the viewer's buttons.
//!
//! Every network failure becomes a user-visible notification through
//! [`Interaction`]; none of them is fatal. Nothing is retried.

use tracing::warn;

use super::capture::{CaptureError, RenderSurface, capture};
use super::gallery::GalleryView;
use super::http::{ClientError, GalleryClient};

pub const SNAPSHOT_SAVED: &str = "Snapshot saved!";
pub const SNAPSHOT_FAILED: &str = "Failed to save snapshot.";
pub const CLEAR_PROMPT: &str = "Clear all snapshots?";
pub const CLEAR_FAILED: &str = "Failed to clear gallery.";

/// User-facing side of the page: transient toasts, blocking alerts, and
/// confirmation prompts.
pub trait Interaction {
    fn toast(&self, message: &str);
    fn alert(&self, message: &str);
    fn confirm(&self, prompt: &str) -> bool;
}

/// Failure of the capture-then-upload flow.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Upload(#[from] ClientError),
}

/// Owns the gallery view and runs capture, upload, refresh and clear-all.
pub struct GalleryController<I> {
    client: GalleryClient,
    interaction: I,
    view: GalleryView,
}

impl<I: Interaction> GalleryController<I> {
    pub fn new(client: GalleryClient, interaction: I) -> Self {
        Self {
            client,
            interaction,
            view: GalleryView::Idle,
        }
    }

    pub fn view(&self) -> &GalleryView {
        &self.view
    }

    pub fn interaction(&self) -> &I {
        &self.interaction
    }

    /// Encode the current inline frame, alerting when there is none.
    ///
    /// # Errors
    ///
    /// Returns the capture error after showing it to the user.
    pub fn capture<S: RenderSurface + ?Sized>(&self, surface: &S) -> Result<String, CaptureError> {
        capture(surface).inspect_err(|e| match e {
            CaptureError::NoRenderSurface => self.interaction.alert(&e.to_string()),
            _ => {
                warn!(error = %e, "Frame capture failed");
                self.interaction.alert(SNAPSHOT_FAILED);
            },
        })
    }

    /// Send a data URI; on success toast and refresh the gallery.
    ///
    /// On failure the user is alerted and the current view is kept.
    ///
    /// # Errors
    ///
    /// Returns the transport or service error after showing it to the user.
    pub async fn upload(&mut self, data_uri: &str) -> Result<String, ClientError> {
        match self.client.upload(data_uri).await {
            Ok(file) => {
                self.interaction.toast(SNAPSHOT_SAVED);
                self.refresh().await;
                Ok(file)
            },
            Err(e) => {
                warn!(error = %e, "Snapshot upload failed");
                self.interaction.alert(SNAPSHOT_FAILED);
                Err(e)
            },
        }
    }

    /// Capture then upload; the snapshot button's flow.
    ///
    /// # Errors
    ///
    /// Returns the first failing step. A capture failure makes no request.
    pub async fn take_snapshot<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &S,
    ) -> Result<String, SnapshotError> {
        let data_uri = self.capture(surface)?;
        Ok(self.upload(&data_uri).await?)
    }

    /// Re-fetch the listing and replace the view.
    pub async fn refresh(&mut self) -> &GalleryView {
        self.view = match self.client.gallery().await {
            Ok(paths) => GalleryView::from_paths(&paths),
            Err(e) => {
                warn!(error = %e, "Gallery fetch failed");
                GalleryView::Error
            },
        };
        &self.view
    }

    /// Delete every snapshot after confirmation.
    ///
    /// The view switches to [`GalleryView::Cleared`] as soon as the request
    /// is sent, without checking the response. Returns `Ok(false)` when the
    /// user declines.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be sent; the view is kept.
    pub async fn clear_all(&mut self) -> Result<bool, ClientError> {
        if !self.interaction.confirm(CLEAR_PROMPT) {
            return Ok(false);
        }

        match self.client.clear_all().await {
            Ok(_) => {
                self.view = GalleryView::Cleared;
                Ok(true)
            },
            Err(e) => {
                warn!(error = %e, "Gallery clear request failed");
                self.interaction.alert(CLEAR_FAILED);
                Err(e)
            },
        }
    }
}
