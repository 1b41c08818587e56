//! Frame capture from the viewer's render surface.
//!
//! The viewer exposes a readable pixel buffer only while rendering inline.
//! In an immersive/AR session there is none, and capture fails before any
//! network activity.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::payload::encode_png_data_uri;

/// Message shown when no inline frame is available.
pub const NO_SURFACE_MESSAGE: &str = "Snapshot works only in 3D mode. Exit AR and try again.";

/// The viewer component's render surface.
pub trait RenderSurface {
    /// Current inline frame, or `None` when the viewer is in immersive/AR mode.
    fn current_frame(&self) -> Option<RgbaImage>;
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Snapshot works only in 3D mode. Exit AR and try again.")]
    NoRenderSurface,

    #[error("Frame has zero width or height")]
    EmptyFrame,

    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode the current frame as a PNG data URI.
///
/// # Errors
///
/// Returns [`CaptureError::NoRenderSurface`] in immersive mode, or an
/// encoding error if the frame cannot be written as PNG.
pub fn capture<S: RenderSurface + ?Sized>(surface: &S) -> Result<String, CaptureError> {
    let frame = surface
        .current_frame()
        .ok_or(CaptureError::NoRenderSurface)?;
    encode_frame(&frame).map(|png| encode_png_data_uri(&png))
}

/// Encode a frame as PNG bytes.
///
/// # Errors
///
/// Returns an error for empty frames or when the encoder fails.
pub fn encode_frame(frame: &RgbaImage) -> Result<Vec<u8>, CaptureError> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(CaptureError::EmptyFrame);
    }

    let mut png_bytes: Vec<u8> = Vec::new();
    frame
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| CaptureError::EncodingFailed(e.to_string()))?;
    Ok(png_bytes)
}

/// A render surface holding a fixed frame (or none).
///
/// Used by native front ends that already have pixels, and by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSurface {
    frame: Option<RgbaImage>,
}

impl StaticSurface {
    pub fn inline(frame: RgbaImage) -> Self {
        Self { frame: Some(frame) }
    }

    pub fn immersive() -> Self {
        Self { frame: None }
    }
}

impl RenderSurface for StaticSurface {
    fn current_frame(&self) -> Option<RgbaImage> {
        self.frame.clone()
    }
}
