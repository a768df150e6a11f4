//! trk-cm configuration
//!
//! Command line > environment > `[catalogue]` section of config.toml > defaults.

use clap::Parser;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use trk_common::api::DEFAULT_MAX_BODY_BYTES;
use trk_common::config::{load_toml_config, resolve_setting};
use trk_common::ServiceUrl;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STORAGE_URL: &str = "http://localhost:3001";

/// Command-line arguments for trk-cm
#[derive(Parser, Debug, Default)]
#[command(name = "trk-cm")]
#[command(about = "Track catalogue microservice")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "TRK_CM_PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "TRK_CM_HOST")]
    pub host: Option<IpAddr>,

    /// Base URL of the storage service
    #[arg(long, env = "TRK_STORAGE_URL")]
    pub storage_url: Option<String>,

    /// Largest accepted request body in bytes
    #[arg(long, env = "TRK_CM_MAX_BODY_BYTES")]
    pub max_body_bytes: Option<usize>,

    /// TOML config file (defaults to ~/.config/trk/config.toml)
    #[arg(short, long, env = "TRK_CONFIG")]
    pub config: Option<PathBuf>,
}

/// `[catalogue]` section of the config file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogueSection {
    pub port: Option<u16>,
    pub host: Option<IpAddr>,
    pub storage_url: Option<String>,
    pub max_body_bytes: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    catalogue: CatalogueSection,
}

/// Resolved catalogue service configuration
#[derive(Debug, Clone)]
pub struct CatalogueConfig {
    pub bind_addr: SocketAddr,
    pub storage_url: ServiceUrl,
    pub max_body_bytes: usize,
}

impl CatalogueConfig {
    /// Merge arguments with the config file and compiled defaults
    pub fn resolve(args: Args) -> trk_common::Result<Self> {
        let file: FileConfig = load_toml_config(args.config.as_deref())?;
        Self::merge(args, file.catalogue)
    }

    fn merge(args: Args, file: CatalogueSection) -> trk_common::Result<Self> {
        let host = resolve_setting(args.host, file.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        let port = resolve_setting(args.port, file.port, DEFAULT_PORT);
        let storage_url = resolve_setting(
            args.storage_url,
            file.storage_url,
            DEFAULT_STORAGE_URL.to_string(),
        );

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            storage_url: ServiceUrl::parse(&storage_url)?,
            max_body_bytes: resolve_setting(
                args.max_body_bytes,
                file.max_body_bytes,
                DEFAULT_MAX_BODY_BYTES,
            ),
        })
    }
}
