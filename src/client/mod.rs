//! Capture/gallery client core.
//!
//! Front ends (a wasm page, the CLI) plug in through three traits:
//! - [`RenderSurface`] - pixels of the inline viewer, if any
//! - [`Interaction`] - toasts, alerts and confirmation prompts
//! - [`KeyValueStore`] - persistence for the selected model
//!
//! The client keeps no snapshot state of its own: the gallery is always
//! re-fetched from the service.

mod capture;
mod controller;
mod gallery;
mod http;
mod kv;
mod view_state;

pub use capture::{
    CaptureError, NO_SURFACE_MESSAGE, RenderSurface, StaticSurface, capture, encode_frame,
};
pub use controller::{
    CLEAR_FAILED, CLEAR_PROMPT, GalleryController, Interaction, SNAPSHOT_FAILED, SNAPSHOT_SAVED,
    SnapshotError,
};
pub use gallery::{GalleryItem, GalleryView};
pub use http::{ClientError, GalleryClient};
pub use kv::{FileKeyValueStore, KeyValueStore, KvError, MemoryKeyValueStore};
pub use view_state::{MAX_SCALE_TENTHS, MIN_SCALE_TENTHS, Theme, ViewState};
