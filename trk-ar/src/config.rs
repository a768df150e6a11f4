//! trk-ar configuration
//!
//! Command line > environment > `[recognition]` section of config.toml > defaults.
//! There is no default provider token: startup fails without one.

use clap::Parser;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use trk_common::config::{is_valid_secret, load_toml_config, resolve_setting};
use trk_common::{Error, ServiceUrl};

use crate::lookup::LookupTarget;
use crate::provider::audd::DEFAULT_PROVIDER_URL;

pub const DEFAULT_PORT: u16 = 3002;
pub const DEFAULT_LOOKUP_URL: &str = "http://localhost:3000";
pub const TOKEN_ENV: &str = "AUDDIO_TOKEN";

/// Command-line arguments for trk-ar
#[derive(Parser, Debug, Default)]
#[command(name = "trk-ar")]
#[command(about = "Audio recognition microservice")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "TRK_AR_PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "TRK_AR_HOST")]
    pub host: Option<IpAddr>,

    /// Recognition provider API token
    #[arg(long, env = "AUDDIO_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Recognition provider endpoint
    #[arg(long, env = "TRK_PROVIDER_URL")]
    pub provider_url: Option<String>,

    /// Base URL of the service answering title searches
    #[arg(long, env = "TRK_LOOKUP_URL")]
    pub lookup_url: Option<String>,

    /// Whether lookup_url is the catalogue or the storage service
    #[arg(long, env = "TRK_LOOKUP_TARGET", value_enum)]
    pub lookup_target: Option<LookupTarget>,

    /// TOML config file (defaults to ~/.config/trk/config.toml)
    #[arg(short, long, env = "TRK_CONFIG")]
    pub config: Option<PathBuf>,
}

/// `[recognition]` section of the config file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecognitionSection {
    pub port: Option<u16>,
    pub host: Option<IpAddr>,
    pub api_token: Option<String>,
    pub provider_url: Option<String>,
    pub lookup_url: Option<String>,
    pub lookup_target: Option<LookupTarget>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    recognition: RecognitionSection,
}

/// Resolved recognition service configuration
#[derive(Debug, Clone)]
pub struct RecognitionConfig {
    pub bind_addr: SocketAddr,
    pub api_token: String,
    pub provider_url: ServiceUrl,
    pub lookup_url: ServiceUrl,
    pub lookup_target: LookupTarget,
}

impl RecognitionConfig {
    /// Merge arguments with the config file and compiled defaults
    pub fn resolve(args: Args) -> trk_common::Result<Self> {
        let file: FileConfig = load_toml_config(args.config.as_deref())?;
        Self::merge(args, file.recognition)
    }

    fn merge(args: Args, file: RecognitionSection) -> trk_common::Result<Self> {
        let host = resolve_setting(args.host, file.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        let port = resolve_setting(args.port, file.port, DEFAULT_PORT);

        let api_token = args
            .api_token
            .or(file.api_token)
            .filter(|token| is_valid_secret(token))
            .ok_or_else(|| {
                Error::Config(format!(
                    "Recognition provider token missing: set {} or [recognition] api_token",
                    TOKEN_ENV
                ))
            })?;

        let provider_url = resolve_setting(
            args.provider_url,
            file.provider_url,
            DEFAULT_PROVIDER_URL.to_string(),
        );
        let lookup_url = resolve_setting(
            args.lookup_url,
            file.lookup_url,
            DEFAULT_LOOKUP_URL.to_string(),
        );

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            api_token,
            provider_url: ServiceUrl::parse(&provider_url)?,
            lookup_url: ServiceUrl::parse(&lookup_url)?,
            lookup_target: resolve_setting(
                args.lookup_target,
                file.lookup_target,
                LookupTarget::default(),
            ),
        })
    }
}
