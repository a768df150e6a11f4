//! HTTP API handlers for trk-cm

pub mod tracks;

pub use tracks::track_routes;
