//! HTTP API handlers for trk-ar

pub mod recognise;

pub use recognise::recognise_routes;
