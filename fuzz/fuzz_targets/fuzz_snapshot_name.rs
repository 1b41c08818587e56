//! Fuzz target for snapshot name parsing.
//!
//! A parsed name is joined onto the snapshot directory, so it must stay a
//! single path component.
//!
//! Run with: `cargo +nightly fuzz run fuzz_snapshot_name`

#![no_main]

use std::path::{Component, Path};

use arsnap::store::SnapshotName;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|name: &str| {
    let Some(parsed) = SnapshotName::parse(name) else {
        return;
    };

    assert_eq!(parsed.as_str(), name);
    assert!(name.ends_with(".png"));
    assert!(!name.starts_with('.'), "hidden file accepted: {name:?}");

    let mut components = Path::new(name).components();
    assert!(
        matches!(components.next(), Some(Component::Normal(_))),
        "not a plain file name: {name:?}"
    );
    assert!(components.next().is_none(), "multiple components: {name:?}");

    assert_eq!(parsed.public_path(), format!("/snapshots/{name}"));
});
