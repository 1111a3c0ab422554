//! Core logic for ground-control mission planning.
//!
//! Holds the waypoint route model, the mission wire types exchanged with the
//! backend, spherical-earth distance math and a simple flight simulator that
//! flies a planned route.

pub mod error;
pub mod flight;
pub mod geo;
pub mod mission;
pub mod models;
pub mod route;

pub use error::{MissionError, RouteError};
pub use flight::{FlightSimulator, FlightState, SimulatedTelemetry};
pub use geo::{haversine_distance, initial_bearing_deg, round_coordinate, EARTH_RADIUS_M};
pub use mission::{manual_mission_name, validate_mission, MIN_MISSION_POINTS};
pub use models::{
    Mission, MissionList, MissionPoint, MissionSaved, SendRouteCommand, ServerReply,
    SetSpeedCommand, Waypoint, DEFAULT_ALTITUDE_M,
};
pub use route::RouteModel;
