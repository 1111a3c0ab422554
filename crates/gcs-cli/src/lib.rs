//! GCS CLI - Command line tools for drone route planning.
//!
//! Binaries:
//! - route_distance: print legs and total length of a route
//! - send_route: push a route over the backend WebSocket and wait for the ack
//! - mission: save, list and show missions in the backend store
//! - fly_route: simulate a flight along a route with pause/resume

pub mod logging;
pub mod points;

pub use points::{build_route, parse_point, read_mission_file, RouteInput};
