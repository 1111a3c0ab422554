//! Mission naming and validation.

use crate::error::MissionError;
use crate::models::Mission;
use chrono::{DateTime, Utc};

/// Smallest route the backend accepts as a mission.
pub const MIN_MISSION_POINTS: usize = 2;

/// Name given to routes submitted straight from the map: `mission_manual_YYYYMMDDHHMMSS`.
pub fn manual_mission_name(now: DateTime<Utc>) -> String {
    format!("mission_manual_{}", now.format("%Y%m%d%H%M%S"))
}

/// Check a mission against the backend's acceptance rules before sending it.
pub fn validate_mission(mission: &Mission) -> Result<(), MissionError> {
    if mission.name.trim().is_empty() {
        return Err(MissionError::EmptyName);
    }
    if mission.points.len() < MIN_MISSION_POINTS {
        return Err(MissionError::TooFewPoints {
            count: mission.points.len(),
            min: MIN_MISSION_POINTS,
        });
    }
    Ok(())
}
