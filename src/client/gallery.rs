//! Gallery view model.
//!
//! What the gallery grid shows. It is rebuilt wholesale on every refresh;
//! there is no incremental diffing.

use serde::Serialize;

/// One grid cell: a download link wrapping a lazily loaded thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryItem {
    pub href: String,
    /// File name offered for download (last path segment).
    pub download_name: String,
    pub thumbnail_src: String,
}

impl GalleryItem {
    pub fn from_path(path: &str) -> Self {
        let download_name = path.rsplit('/').next().unwrap_or(path).to_string();
        Self {
            href: path.to_string(),
            download_name,
            thumbnail_src: path.to_string(),
        }
    }
}

/// Current content of the gallery grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "items", rename_all = "snake_case")]
pub enum GalleryView {
    /// Nothing rendered yet.
    #[default]
    Idle,
    Empty,
    Error,
    /// Shown after clear-all without re-fetching.
    Cleared,
    /// Snapshots in service order.
    Items(Vec<GalleryItem>),
}

impl GalleryView {
    /// View for a listing returned by the service.
    pub fn from_paths(paths: &[String]) -> Self {
        if paths.is_empty() {
            Self::Empty
        } else {
            Self::Items(paths.iter().map(|p| GalleryItem::from_path(p)).collect())
        }
    }

    /// Placeholder text for states without items.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::Idle | Self::Items(_) => None,
            Self::Empty => Some("No snapshots yet."),
            Self::Error => Some("Error loading gallery."),
            Self::Cleared => Some("Cleared."),
        }
    }

    pub fn items(&self) -> &[GalleryItem] {
        match self {
            Self::Items(items) => items,
            _ => &[],
        }
    }
}
