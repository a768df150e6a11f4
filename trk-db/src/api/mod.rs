//! HTTP API handlers for trk-db

pub mod reset;
pub mod tracks;

pub use reset::reset_routes;
pub use tracks::track_routes;
