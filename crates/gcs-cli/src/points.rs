//! Route input parsing for the CLI tools.

use anyhow::{Context, Result};
use clap::Args;
use gcs_core::models::Mission;
use gcs_core::RouteModel;
use std::path::{Path, PathBuf};

/// Where a binary takes its waypoints from.
#[derive(Args, Debug, Clone)]
pub struct RouteInput {
    /// Waypoint as "lat,lon" (repeat in flight order)
    #[arg(long = "point", value_parser = parse_point)]
    pub points: Vec<(f64, f64)>,

    /// JSON mission file ({"name": .., "points": [{seq, lat, lon, alt}, ..]})
    #[arg(long, conflicts_with = "points")]
    pub file: Option<PathBuf>,
}

impl RouteInput {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.file.is_none()
    }

    /// Build the route described by the arguments.
    pub fn to_route(&self, altitude_m: f64) -> Result<RouteModel> {
        if let Some(path) = &self.file {
            let mission = read_mission_file(path)?;
            let mut route = RouteModel::editable().with_export_altitude(altitude_m);
            route.load_points(&mission.points);
            return Ok(route);
        }
        Ok(build_route(&self.points, altitude_m))
    }
}

/// Parse a "lat,lon" argument.
pub fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lon\", got \"{s}\""))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude \"{}\": {e}", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude \"{}\": {e}", lon.trim()))?;
    if !lat.is_finite() || !lon.is_finite() {
        return Err(format!("coordinates must be finite, got \"{s}\""));
    }
    Ok((lat, lon))
}

/// Build an editable route by clicking each point in order.
pub fn build_route(points: &[(f64, f64)], altitude_m: f64) -> RouteModel {
    let mut route = RouteModel::editable().with_export_altitude(altitude_m);
    for &(lat, lon) in points {
        route.add_waypoint(lat, lon);
    }
    route
}

pub fn read_mission_file(path: &Path) -> Result<Mission> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read mission file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid mission file {}", path.display()))
}
