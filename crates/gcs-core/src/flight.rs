//! Simulated flight along a planned route.
//!
//! The simulator takes a snapshot of the route when started and walks it leg
//! by leg, advancing a fixed fraction of the current leg per tick. It has no
//! clock of its own; callers drive `tick()` from whatever timer they use.

use crate::error::RouteError;
use crate::geo::{haversine_distance, initial_bearing_deg};
use crate::mission::MIN_MISSION_POINTS;
use crate::models::{Waypoint, DEFAULT_ALTITUDE_M};
use serde::{Deserialize, Serialize};

const DEFAULT_STEP_SIZE: f64 = 0.02;
const DEFAULT_SPEED_MPS: f64 = 3.0;
const BATTERY_START_PCT: u32 = 95;
const BATTERY_FLOOR_PCT: u32 = 10;
const TICKS_PER_BATTERY_PCT: u64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightState {
    #[default]
    Idle,
    Flying,
    Paused,
    Completed,
}

/// Position report produced on every simulated tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulatedTelemetry {
    pub lat: f64,
    pub lon: f64,
    pub altitude_m: f64,
    pub heading_deg: f64,
    pub speed_mps: f64,
    pub battery_pct: u32,
    /// Distance flown since start, in meters
    pub distance_travelled_m: f64,
}

#[derive(Debug, Clone)]
pub struct FlightSimulator {
    path: Vec<Waypoint>,
    state: FlightState,
    leg: usize,
    progress: f64,
    step_size: f64,
    ticks: u64,
    altitude_m: f64,
    speed_mps: f64,
    distance_travelled_m: f64,
    last_position: Option<(f64, f64)>,
}

impl Default for FlightSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl FlightSimulator {
    pub fn new() -> Self {
        Self {
            path: Vec::new(),
            state: FlightState::Idle,
            leg: 0,
            progress: 0.0,
            step_size: DEFAULT_STEP_SIZE,
            ticks: 0,
            altitude_m: DEFAULT_ALTITUDE_M,
            speed_mps: DEFAULT_SPEED_MPS,
            distance_travelled_m: 0.0,
            last_position: None,
        }
    }

    /// Fraction of a leg covered per tick. Non-positive values are ignored.
    pub fn with_step_size(mut self, step_size: f64) -> Self {
        if step_size > 0.0 && step_size.is_finite() {
            self.step_size = step_size;
        }
        self
    }

    pub fn with_altitude(mut self, altitude_m: f64) -> Self {
        self.altitude_m = altitude_m;
        self
    }

    pub fn with_speed(mut self, speed_mps: f64) -> Self {
        self.speed_mps = speed_mps;
        self
    }

    pub fn state(&self) -> FlightState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Index of the leg being flown (0 = first waypoint to second).
    pub fn current_leg(&self) -> usize {
        self.leg
    }

    pub fn distance_travelled_m(&self) -> f64 {
        self.distance_travelled_m
    }

    /// Start a fresh flight over `waypoints`, discarding any previous progress.
    pub fn start(&mut self, waypoints: &[Waypoint]) -> Result<(), RouteError> {
        if waypoints.len() < MIN_MISSION_POINTS {
            return Err(RouteError::TooFewWaypoints {
                count: waypoints.len(),
                min: MIN_MISSION_POINTS,
            });
        }

        self.path = waypoints.to_vec();
        self.leg = 0;
        self.progress = 0.0;
        self.ticks = 0;
        self.distance_travelled_m = 0.0;
        self.last_position = Some((self.path[0].lat, self.path[0].lon));
        self.state = FlightState::Flying;

        tracing::info!(waypoints = self.path.len(), "Simulated flight started");
        Ok(())
    }

    /// Pause a flight in progress. Returns false if not flying.
    pub fn pause(&mut self) -> bool {
        if self.state != FlightState::Flying {
            return false;
        }
        self.state = FlightState::Paused;
        tracing::info!(leg = self.leg, progress = self.progress, "Simulated flight paused");
        true
    }

    /// Resume a paused flight where it stopped. Returns false if not paused.
    pub fn resume(&mut self) -> bool {
        if self.state != FlightState::Paused {
            return false;
        }
        self.state = FlightState::Flying;
        tracing::info!(leg = self.leg, progress = self.progress, "Simulated flight resumed");
        true
    }

    /// Abandon the flight and return to idle.
    pub fn stop(&mut self) {
        self.state = FlightState::Idle;
        self.path.clear();
    }

    /// Advance one step. Emits nothing unless flying.
    ///
    /// The tick that reaches the final waypoint reports its position and
    /// moves the simulator to `Completed`.
    pub fn tick(&mut self) -> Option<SimulatedTelemetry> {
        if self.state != FlightState::Flying {
            return None;
        }
        let final_index = self.path.len() - 1;

        self.ticks += 1;
        self.progress += self.step_size;
        // A large step may cross several waypoints; fly through each corner.
        while self.progress >= 1.0 && self.leg + 1 < final_index {
            let corner = self.path[self.leg + 1];
            self.advance_to(corner.lat, corner.lon);
            self.progress -= 1.0;
            self.leg += 1;
        }
        let arrived = self.leg + 1 == final_index && self.progress >= 1.0;
        if arrived {
            self.progress = 1.0;
        }

        let from = self.path[self.leg];
        let to = self.path[self.leg + 1];
        let lat = from.lat + (to.lat - from.lat) * self.progress;
        let lon = from.lon + (to.lon - from.lon) * self.progress;
        self.advance_to(lat, lon);

        if arrived {
            self.state = FlightState::Completed;
            tracing::info!(
                distance_m = self.distance_travelled_m,
                ticks = self.ticks,
                "Simulated flight complete"
            );
        }

        Some(SimulatedTelemetry {
            lat,
            lon,
            altitude_m: self.altitude_m,
            heading_deg: initial_bearing_deg(from.lat, from.lon, to.lat, to.lon),
            speed_mps: self.speed_mps,
            battery_pct: self.battery_pct(),
            distance_travelled_m: self.distance_travelled_m,
        })
    }

    fn advance_to(&mut self, lat: f64, lon: f64) {
        if let Some((prev_lat, prev_lon)) = self.last_position {
            self.distance_travelled_m += haversine_distance(prev_lat, prev_lon, lat, lon);
        }
        self.last_position = Some((lat, lon));
    }

    fn battery_pct(&self) -> u32 {
        let drained = (self.ticks / TICKS_PER_BATTERY_PCT).min(BATTERY_START_PCT as u64) as u32;
        BATTERY_START_PCT.saturating_sub(drained).max(BATTERY_FLOOR_PCT)
    }
}
