//! PNG data URI handling for snapshot uploads.
//!
//! The client encodes a rendered frame as `data:image/png;base64,<data>` and
//! the service strips the declaration and decodes the rest. No image
//! validation happens here: the bytes are stored as received.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::constants::PNG_DATA_URI_PREFIX;

/// Reasons an upload payload is rejected.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The `image` field is absent.
    #[error("image field is missing")]
    Missing,

    /// The value does not declare itself as a base64 PNG data URI.
    #[error("image is not a base64 PNG data URI")]
    NotPngDataUri,

    /// The base64 section cannot be decoded.
    #[error("image data is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The data URI carries no bytes.
    #[error("image data is empty")]
    Empty,
}

/// Decodes an optional upload value into raw PNG bytes.
///
/// # Errors
///
/// Returns a [`PayloadError`] when the value is missing, lacks the
/// `data:image/png;base64,` declaration, is not valid base64, or is empty.
pub fn decode_png_data_uri(image: Option<&str>) -> Result<Vec<u8>, PayloadError> {
    let image = image.ok_or(PayloadError::Missing)?;
    let data = image
        .strip_prefix(PNG_DATA_URI_PREFIX)
        .ok_or(PayloadError::NotPngDataUri)?;

    let bytes = STANDARD.decode(data.trim())?;
    if bytes.is_empty() {
        return Err(PayloadError::Empty);
    }
    Ok(bytes)
}

/// Encodes PNG bytes as a data URI accepted by [`decode_png_data_uri`].
pub fn encode_png_data_uri(png: &[u8]) -> String {
    let mut uri = String::with_capacity(PNG_DATA_URI_PREFIX.len() + png.len().div_ceil(3) * 4);
    uri.push_str(PNG_DATA_URI_PREFIX);
    STANDARD.encode_string(png, &mut uri);
    uri
}
