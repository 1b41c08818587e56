//! Upload a PNG file through the same flow as the viewer's snapshot button.

use std::path::Path;

use anyhow::{Context, Result, bail};

use arsnap::client::{GalleryClient, GalleryController};
use arsnap::payload::encode_png_data_uri;

use super::Terminal;

pub async fn execute(server: &str, file: &Path) -> Result<()> {
    let png = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    if image::guess_format(&png).ok() != Some(image::ImageFormat::Png) {
        bail!("{} is not a PNG image", file.display());
    }

    let client = GalleryClient::new(server)?;
    let mut controller = GalleryController::new(client.clone(), Terminal { assume_yes: false });

    let path = controller
        .upload(&encode_png_data_uri(&png))
        .await
        .context("Upload failed")?;
    println!("{}", client.resolve(&path)?);

    Ok(())
}
