//! trk-db configuration
//!
//! Command line > environment > `[storage]` section of config.toml > defaults.

use clap::Parser;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use trk_common::api::DEFAULT_MAX_BODY_BYTES;
use trk_common::config::{default_data_dir, load_toml_config, resolve_setting};

pub const DEFAULT_PORT: u16 = 3001;

/// Command-line arguments for trk-db
#[derive(Parser, Debug, Default)]
#[command(name = "trk-db")]
#[command(about = "Track storage microservice")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "TRK_DB_PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "TRK_DB_HOST")]
    pub host: Option<IpAddr>,

    /// SQLite database file
    #[arg(long, env = "TRK_DB_PATH")]
    pub database_path: Option<PathBuf>,

    /// Mount the test-support POST /db/reset endpoint (off by default)
    #[arg(long, env = "TRK_DB_EXPOSE_RESET", action = clap::ArgAction::Set)]
    pub expose_reset: Option<bool>,

    /// Largest accepted request body in bytes
    #[arg(long, env = "TRK_DB_MAX_BODY_BYTES")]
    pub max_body_bytes: Option<usize>,

    /// TOML config file (defaults to ~/.config/trk/config.toml)
    #[arg(short, long, env = "TRK_CONFIG")]
    pub config: Option<PathBuf>,
}

/// `[storage]` section of the config file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub port: Option<u16>,
    pub host: Option<IpAddr>,
    pub database_path: Option<PathBuf>,
    pub expose_reset: Option<bool>,
    pub max_body_bytes: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    storage: StorageSection,
}

/// Resolved storage service configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bind_addr: SocketAddr,
    pub database_path: PathBuf,
    pub expose_reset: bool,
    pub max_body_bytes: usize,
}

impl StorageConfig {
    /// Merge arguments with the config file and compiled defaults
    pub fn resolve(args: Args) -> trk_common::Result<Self> {
        let file: FileConfig = load_toml_config(args.config.as_deref())?;
        Ok(Self::merge(args, file.storage))
    }

    fn merge(args: Args, file: StorageSection) -> Self {
        let host = resolve_setting(args.host, file.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        let port = resolve_setting(args.port, file.port, DEFAULT_PORT);

        Self {
            bind_addr: SocketAddr::new(host, port),
            database_path: resolve_setting(
                args.database_path,
                file.database_path,
                default_data_dir().join("tracks.db"),
            ),
            expose_reset: resolve_setting(args.expose_reset, file.expose_reset, false),
            max_body_bytes: resolve_setting(
                args.max_body_bytes,
                file.max_body_bytes,
                DEFAULT_MAX_BODY_BYTES,
            ),
        }
    }
}
