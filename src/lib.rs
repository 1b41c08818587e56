//! arsnap: snapshot gallery backend and capture client for the AR furniture viewer.
//!
//! - [`store`] - Snapshot persistence behind the [`store::SnapshotStore`] trait
//! - [`server`] - HTTP API, snapshot file serving and the static page shell
//! - [`client`] - Capture, upload and gallery logic plus the viewer's view state
//! - [`payload`] - PNG data URI encoding and decoding
//! - [`config`] - TOML configuration with environment overrides

#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod constants;
pub mod payload;
pub mod security;
pub mod server;
pub mod store;
