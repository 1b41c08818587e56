//! Fuzz target for `arsnap.toml` parsing and validation.
//!
//! Run with: `cargo +nightly fuzz run fuzz_config_parsing`

#![no_main]

use arsnap::config::Config;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|content: &str| {
    let Ok(config) = toml::from_str::<Config>(content) else {
        return;
    };

    // Validation may reject but must never panic
    if config.validate().is_ok() {
        assert_ne!(config.server.port, 0);
        assert_ne!(config.server.body_limit_mb, 0);
    }
});
