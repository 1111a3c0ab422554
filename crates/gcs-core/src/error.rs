//! Error types for route editing and mission validation.

use thiserror::Error;

/// Reasons a route mutation was refused.
///
/// The lenient `RouteModel` methods swallow these and return `None`; the
/// `try_*` variants surface them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("waypoint editing is disabled")]
    EditingDisabled,
    #[error("waypoint index {index} out of range (route has {len} waypoints)")]
    InvalidIndex { index: usize, len: usize },
    #[error("route needs at least {min} waypoints, has {count}")]
    TooFewWaypoints { count: usize, min: usize },
}

/// Reasons a mission would be rejected by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissionError {
    #[error("mission name required")]
    EmptyName,
    #[error("mission requires at least {min} waypoints, got {count}")]
    TooFewPoints { count: usize, min: usize },
}
