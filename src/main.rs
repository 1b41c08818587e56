//! arsnap: snapshot gallery service and CLI for the AR furniture viewer.

#![deny(unsafe_code)]

mod commands;

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use arsnap::config::StorageBackend;

#[derive(Parser)]
#[command(name = "arsnap", version, about = "Snapshot gallery for the AR furniture viewer")]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    /// Config file (defaults to ./arsnap.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gallery service
    Serve {
        /// Port to listen on (overrides config and $PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        host: Option<IpAddr>,

        /// Directory with the viewer page and models
        #[arg(long)]
        public_dir: Option<PathBuf>,

        /// Directory where snapshots are written
        #[arg(long)]
        snapshot_dir: Option<PathBuf>,

        /// Snapshot storage backend
        #[arg(long, value_enum)]
        backend: Option<StorageBackend>,
    },

    /// Upload a PNG file as a new snapshot
    Upload {
        /// PNG file to upload
        file: PathBuf,

        /// Service base URL
        #[arg(long, env = "ARSNAP_SERVER", default_value = "http://127.0.0.1:5000")]
        server: String,
    },

    /// Inspect or clear the gallery
    Gallery {
        /// Service base URL
        #[arg(long, env = "ARSNAP_SERVER", default_value = "http://127.0.0.1:5000", global = true)]
        server: String,

        #[command(subcommand)]
        command: GalleryCommand,
    },
}

#[derive(Subcommand)]
enum GalleryCommand {
    /// List snapshot URLs, newest first
    List,

    /// Delete every snapshot
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::init_logging(cli.log_format == LogFormat::Json);

    match cli.command {
        Commands::Serve {
            port,
            host,
            public_dir,
            snapshot_dir,
            backend,
        } => {
            let overrides = commands::serve::Overrides {
                port,
                host,
                public_dir,
                snapshot_dir,
                backend,
            };
            commands::serve::execute(cli.config.as_deref(), overrides).await
        },
        Commands::Upload { file, server } => commands::upload::execute(&server, &file).await,
        Commands::Gallery { server, command } => match command {
            GalleryCommand::List => commands::gallery::list(&server).await,
            GalleryCommand::Clear { yes } => commands::gallery::clear(&server, yes).await,
        },
    }
}
