//! Gallery listing and clearing from the terminal.

use anyhow::{Context, Result, bail};

use arsnap::client::{GalleryClient, GalleryController, GalleryView};

use super::Terminal;

pub async fn list(server: &str) -> Result<()> {
    let client = GalleryClient::new(server)?;
    let mut controller = GalleryController::new(client.clone(), Terminal { assume_yes: false });

    match controller.refresh().await {
        GalleryView::Items(items) => {
            for item in items {
                println!("{}", client.resolve(&item.href)?);
            }
        },
        GalleryView::Error => bail!("Failed to load gallery"),
        view => {
            if let Some(text) = view.placeholder() {
                println!("{text}");
            }
        },
    }

    Ok(())
}

pub async fn clear(server: &str, yes: bool) -> Result<()> {
    let client = GalleryClient::new(server)?;
    let mut controller = GalleryController::new(client, Terminal { assume_yes: yes });

    if controller.clear_all().await.context("Clear failed")? {
        if let Some(text) = controller.view().placeholder() {
            println!("{text}");
        }
    } else {
        println!("Aborted.");
    }

    Ok(())
}
