//! # trk Common Library
//!
//! Shared code for the three track microservices (trk-db, trk-cm, trk-ar):
//! - Caller-visible error taxonomy and JSON error bodies
//! - Track wire types
//! - Downstream response relaying
//! - Configuration loading
//! - Tracing setup, health endpoint and server startup

pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod models;
pub mod relay;
pub mod server;

pub use api::{ApiError, ErrorBody, JsonBody, MessageBody, PathParam, QueryParams};
pub use error::{Error, Result};
pub use models::{NewTrack, Track};
pub use relay::{Relayed, ServiceUrl};
