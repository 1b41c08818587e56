//! CLI command implementations for arsnap.
//!
//! - [`serve`] - Run the gallery service
//! - [`upload`] - Push a PNG file as a snapshot
//! - [`gallery`] - List or clear snapshots

pub mod gallery;
pub mod serve;
pub mod upload;

use std::io::{self, BufRead, Write};

use arsnap::client::Interaction;

/// Install the stdout subscriber. `RUST_LOG` overrides the default `info`.
pub fn init_logging(json: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().with_target(false)).init();
    }
}

/// Interaction over the terminal: toasts go to stdout, alerts to stderr.
pub struct Terminal {
    /// Answer every confirmation with yes.
    pub assume_yes: bool,
}

impl Interaction for Terminal {
    fn toast(&self, message: &str) {
        println!("{message}");
    }

    fn alert(&self, message: &str) {
        eprintln!("Error: {message}");
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
