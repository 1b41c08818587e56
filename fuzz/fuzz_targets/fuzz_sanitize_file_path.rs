//! Fuzz target for `sanitize_file_path` - static file path traversal.
//!
//! Checks that:
//! 1. No input panics
//! 2. Accepted paths are relative, non-empty and free of `..`
//! 3. Rejected inputs report the right reason for null bytes
//!
//! Run with: `cargo +nightly fuzz run fuzz_sanitize_file_path`

#![no_main]

use std::path::Component;

use arbitrary::Arbitrary;
use arsnap::security::{PathTraversalError, sanitize_file_path};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct PathInput {
    path: String,
    inject_null: bool,
    traversal_depth: u8,
}

impl PathInput {
    fn build(&self) -> String {
        let mut result = "../".repeat(usize::from(self.traversal_depth % 8));
        result.push_str(&self.path);
        if self.inject_null {
            let pos = result.len() / 2;
            let pos = (0..=pos).rev().find(|&i| result.is_char_boundary(i)).unwrap_or(0);
            result.insert(pos, '\0');
        }
        result
    }
}

fuzz_target!(|input: PathInput| {
    let path = input.build();

    match sanitize_file_path(&path) {
        Ok(sanitized) => {
            assert!(!sanitized.as_os_str().is_empty());
            assert!(!sanitized.is_absolute(), "absolute output: {sanitized:?}");
            assert!(
                sanitized
                    .components()
                    .all(|c| matches!(c, Component::Normal(_))),
                "unsafe component in {sanitized:?} from {path:?}"
            );
        },
        Err(PathTraversalError::NullByte) => assert!(path.contains('\0')),
        Err(_) => assert!(!path.contains('\0')),
    }
});
