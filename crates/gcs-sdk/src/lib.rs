//! GCS SDK - mission transport for the ground-control station
//!
//! Provides the REST mission store client and the WebSocket route channel
//! used to push planned routes to the drone backend.

pub mod channel;
pub mod client;
pub mod config;

pub use channel::{http_to_ws_url, ReplyError, RouteAck, RouteChannel};
pub use client::MissionClient;
pub use config::GcsConfig;
pub use gcs_core::models::{Mission, MissionList, MissionPoint, MissionSaved};
