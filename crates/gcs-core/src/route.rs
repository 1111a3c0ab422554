//! Waypoint route model.
//!
//! `RouteModel` owns the ordered waypoint list the operator edits on the map.
//! Flight order is insertion order. After every mutation the waypoint
//! sequences are exactly `1..=len` and the cached total distance matches the
//! current waypoints.
//!
//! Guard failures (editing disabled, index out of range) are silent no-ops
//! on the plain methods, which return `None`. Callers that want to know why
//! use the `try_*` variants.

use crate::error::{MissionError, RouteError};
use crate::geo::{haversine_distance, round_coordinate};
use crate::mission::{validate_mission, MIN_MISSION_POINTS};
use crate::models::{Mission, MissionPoint, Waypoint, DEFAULT_ALTITUDE_M};

#[derive(Debug, Clone)]
pub struct RouteModel {
    waypoints: Vec<Waypoint>,
    editing: bool,
    total_distance_m: f64,
    export_altitude_m: f64,
}

impl Default for RouteModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteModel {
    /// Create an empty route with editing disabled.
    pub fn new() -> Self {
        Self {
            waypoints: Vec::new(),
            editing: false,
            total_distance_m: 0.0,
            export_altitude_m: DEFAULT_ALTITUDE_M,
        }
    }

    /// Create an empty route that accepts edits straight away.
    pub fn editable() -> Self {
        Self {
            editing: true,
            ..Self::new()
        }
    }

    /// Override the altitude attached to exported points.
    pub fn with_export_altitude(mut self, altitude_m: f64) -> Self {
        self.export_altitude_m = altitude_m;
        self
    }

    pub fn export_altitude_m(&self) -> f64 {
        self.export_altitude_m
    }

    // ========== EDITING MODE ==========

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Toggle waypoint editing. Turning it off clears the route.
    pub fn set_editing(&mut self, enabled: bool) {
        self.editing = enabled;
        if !enabled {
            self.clear();
        }
        tracing::debug!(enabled, "Waypoint editing toggled");
    }

    pub fn enable_editing(&mut self) {
        self.set_editing(true);
    }

    pub fn disable_editing(&mut self) {
        self.set_editing(false);
    }

    // ========== MUTATIONS ==========

    /// Append a waypoint at the rounded coordinate.
    ///
    /// Returns `None` without touching the route when editing is disabled.
    pub fn add_waypoint(&mut self, lat: f64, lon: f64) -> Option<Waypoint> {
        self.try_add_waypoint(lat, lon).ok()
    }

    pub fn try_add_waypoint(&mut self, lat: f64, lon: f64) -> Result<Waypoint, RouteError> {
        self.ensure_editing()?;

        let waypoint = Waypoint {
            sequence: self.waypoints.len() as u32 + 1,
            lat: round_coordinate(lat),
            lon: round_coordinate(lon),
        };
        self.waypoints.push(waypoint);
        self.recompute_distance();

        tracing::debug!(
            seq = waypoint.sequence,
            lat = waypoint.lat,
            lon = waypoint.lon,
            "Waypoint added"
        );
        Ok(waypoint)
    }

    /// Remove the waypoint at `index` and renumber the rest.
    ///
    /// Returns the removed waypoint, or `None` if the index is out of range
    /// or editing is disabled.
    pub fn delete_waypoint(&mut self, index: usize) -> Option<Waypoint> {
        self.try_delete_waypoint(index).ok()
    }

    pub fn try_delete_waypoint(&mut self, index: usize) -> Result<Waypoint, RouteError> {
        self.ensure_editing()?;
        self.ensure_index(index)?;

        let removed = self.waypoints.remove(index);
        self.renumber();
        self.recompute_distance();

        tracing::debug!(index, remaining = self.waypoints.len(), "Waypoint deleted");
        Ok(removed)
    }

    /// Move the waypoint at `index` (drag-and-drop). Sequence is unchanged.
    pub fn update_waypoint(&mut self, index: usize, lat: f64, lon: f64) -> Option<Waypoint> {
        self.try_update_waypoint(index, lat, lon).ok()
    }

    pub fn try_update_waypoint(
        &mut self,
        index: usize,
        lat: f64,
        lon: f64,
    ) -> Result<Waypoint, RouteError> {
        self.ensure_editing()?;
        self.ensure_index(index)?;

        let waypoint = &mut self.waypoints[index];
        waypoint.lat = round_coordinate(lat);
        waypoint.lon = round_coordinate(lon);
        let updated = *waypoint;
        self.recompute_distance();

        tracing::debug!(index, lat = updated.lat, lon = updated.lon, "Waypoint moved");
        Ok(updated)
    }

    /// Remove every waypoint.
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.total_distance_m = 0.0;
    }

    /// Replace the route with the given mission points, in order.
    ///
    /// Points are replayed through [`RouteModel::add_waypoint`], so
    /// coordinates are re-rounded, sequences regenerated, and nothing is
    /// loaded while editing is disabled. Returns the number of waypoints now
    /// in the route.
    pub fn load_points(&mut self, points: &[MissionPoint]) -> usize {
        self.clear();
        for point in points {
            self.add_waypoint(point.lat, point.lon);
        }
        tracing::debug!(requested = points.len(), loaded = self.waypoints.len(), "Route loaded");
        self.waypoints.len()
    }

    // ========== QUERIES ==========

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Whether the route is long enough to be submitted as a mission.
    pub fn can_send(&self) -> bool {
        self.waypoints.len() >= MIN_MISSION_POINTS
    }

    /// Total great-circle length of the route in meters (0 below two waypoints).
    pub fn total_distance_m(&self) -> f64 {
        self.total_distance_m
    }

    /// Length of each leg, in flight order.
    pub fn segment_distances_m(&self) -> Vec<f64> {
        self.waypoints
            .windows(2)
            .map(|pair| haversine_distance(pair[0].lat, pair[0].lon, pair[1].lat, pair[1].lon))
            .collect()
    }

    /// Wire-format points for mission submission.
    pub fn export_points(&self) -> Vec<MissionPoint> {
        self.waypoints
            .iter()
            .map(|wp| MissionPoint {
                alt: self.export_altitude_m,
                ..MissionPoint::from(wp)
            })
            .collect()
    }

    /// Build a named mission from the current route.
    pub fn to_mission(&self, name: impl Into<String>) -> Result<Mission, MissionError> {
        let mission = Mission {
            name: name.into(),
            points: self.export_points(),
        };
        validate_mission(&mission)?;
        Ok(mission)
    }

    // ========== INTERNALS ==========

    fn ensure_editing(&self) -> Result<(), RouteError> {
        if self.editing {
            Ok(())
        } else {
            Err(RouteError::EditingDisabled)
        }
    }

    fn ensure_index(&self, index: usize) -> Result<(), RouteError> {
        if index < self.waypoints.len() {
            Ok(())
        } else {
            Err(RouteError::InvalidIndex {
                index,
                len: self.waypoints.len(),
            })
        }
    }

    fn renumber(&mut self) {
        for (i, wp) in self.waypoints.iter_mut().enumerate() {
            wp.sequence = i as u32 + 1;
        }
    }

    fn recompute_distance(&mut self) {
        self.total_distance_m = self.segment_distances_m().iter().sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_contiguous(route: &RouteModel) {
        for (i, wp) in route.waypoints().iter().enumerate() {
            assert_eq!(wp.sequence, i as u32 + 1, "sequence gap at index {i}");
        }
    }

    fn four_point_route() -> RouteModel {
        let mut route = RouteModel::editable();
        route.add_waypoint(36.8065, 10.1815);
        route.add_waypoint(36.8165, 10.1815);
        route.add_waypoint(36.8165, 10.1915);
        route.add_waypoint(36.8065, 10.1915);
        route
    }

    #[test]
    fn add_assigns_sequence_and_rounds() {
        let mut route = RouteModel::editable();
        let first = route.add_waypoint(36.806_512_345_6, 10.181_500_06).unwrap();
        let second = route.add_waypoint(36.8165, 10.1815).unwrap();

        assert_eq!(first.sequence, 1);
        assert_eq!(first.lat, 36.806_512_3);
        assert_eq!(first.lon, 10.181_500_1);
        assert_eq!(second.sequence, 2);
        assert_eq!(route.len(), 2);
    }

    #[test]
    fn add_is_noop_when_editing_disabled() {
        let mut route = RouteModel::new();
        assert!(route.add_waypoint(36.8, 10.1).is_none());
        assert!(route.is_empty());
        assert_eq!(
            route.try_add_waypoint(36.8, 10.1),
            Err(RouteError::EditingDisabled)
        );
    }

    #[test]
    fn delete_and_update_are_noops_when_editing_disabled() {
        let mut route = RouteModel::new();
        assert!(route.delete_waypoint(0).is_none());
        assert!(route.update_waypoint(0, 36.8, 10.1).is_none());
        assert_eq!(route.try_delete_waypoint(0), Err(RouteError::EditingDisabled));
        assert_eq!(
            route.try_update_waypoint(0, 36.8, 10.1),
            Err(RouteError::EditingDisabled)
        );

        // Loaded while editable, then locked: the waypoints stay put.
        let mut route = four_point_route();
        route.editing = false;
        let before = route.waypoints().to_vec();
        let distance = route.total_distance_m();

        assert!(route.delete_waypoint(1).is_none());
        assert!(route.update_waypoint(1, 0.0, 0.0).is_none());
        assert_eq!(route.try_delete_waypoint(1), Err(RouteError::EditingDisabled));
        assert_eq!(
            route.try_update_waypoint(1, 0.0, 0.0),
            Err(RouteError::EditingDisabled)
        );
        assert_eq!(route.waypoints(), before.as_slice());
        assert_eq!(route.total_distance_m(), distance);
    }

    #[test]
    fn update_out_of_range_reports_index() {
        let mut route = four_point_route();
        assert_eq!(
            route.try_update_waypoint(4, 1.0, 1.0),
            Err(RouteError::InvalidIndex { index: 4, len: 4 })
        );
    }

    #[test]
    fn disabling_editing_clears_route() {
        let mut route = four_point_route();
        route.disable_editing();
        assert!(route.is_empty());
        assert_eq!(route.total_distance_m(), 0.0);
        assert!(!route.is_editing());
    }

    #[test]
    fn delete_renumbers_remaining_waypoints() {
        let mut route = four_point_route();
        let original: Vec<Waypoint> = route.waypoints().to_vec();

        let removed = route.delete_waypoint(1).unwrap();
        assert_eq!(removed.sequence, 2);

        let seqs: Vec<u32> = route.waypoints().iter().map(|wp| wp.sequence).collect();
        assert_eq!(seqs, vec![1, 2, 3]);

        let coords: Vec<(f64, f64)> = route.waypoints().iter().map(|wp| (wp.lat, wp.lon)).collect();
        assert_eq!(
            coords,
            vec![
                (original[0].lat, original[0].lon),
                (original[2].lat, original[2].lon),
                (original[3].lat, original[3].lon),
            ]
        );
    }

    #[test]
    fn delete_out_of_range_is_noop() {
        let mut route = four_point_route();
        let before = route.total_distance_m();

        assert!(route.delete_waypoint(4).is_none());
        assert_eq!(route.len(), 4);
        assert_eq!(route.total_distance_m(), before);
        assert_eq!(
            route.try_delete_waypoint(9),
            Err(RouteError::InvalidIndex { index: 9, len: 4 })
        );
    }

    #[test]
    fn sequences_stay_contiguous_under_mixed_edits() {
        let mut route = RouteModel::editable();
        for i in 0..6 {
            route.add_waypoint(36.80 + i as f64 * 0.001, 10.18);
            assert_contiguous(&route);
        }
        for index in [0, 3, 1, 10, 2, 0] {
            route.delete_waypoint(index);
            assert_contiguous(&route);
        }
        route.add_waypoint(36.9, 10.2);
        assert_contiguous(&route);
    }

    #[test]
    fn update_keeps_sequence_and_recomputes_distance() {
        let mut route = RouteModel::editable();
        route.add_waypoint(36.8065, 10.1815);
        route.add_waypoint(36.8165, 10.1815);
        let before = route.total_distance_m();

        let moved = route.update_waypoint(1, 36.8265, 10.181_500_04).unwrap();
        assert_eq!(moved.sequence, 2);
        assert_eq!(moved.lon, 10.1815);
        assert!(route.total_distance_m() > before * 1.9);
        assert!(route.update_waypoint(2, 0.0, 0.0).is_none());
    }

    #[test]
    fn distance_is_zero_below_two_waypoints() {
        let mut route = RouteModel::editable();
        assert_eq!(route.total_distance_m(), 0.0);
        route.add_waypoint(36.8065, 10.1815);
        assert_eq!(route.total_distance_m(), 0.0);
        route.add_waypoint(36.8165, 10.1815);
        assert!(route.total_distance_m() > 0.0);
        route.delete_waypoint(0);
        assert_eq!(route.total_distance_m(), 0.0);
    }

    #[test]
    fn golden_two_point_distance() {
        let mut route = RouteModel::editable();
        route.add_waypoint(36.8065, 10.1815);
        route.add_waypoint(36.8165, 10.1815);
        assert!((route.total_distance_m() - 1112.0).abs() < 5.0);
    }

    #[test]
    fn distance_never_decreases_on_append() {
        let mut route = RouteModel::editable();
        let points = [
            (36.8065, 10.1815),
            (36.8165, 10.1815),
            (36.8165, 10.1815),
            (36.7965, 10.1715),
            (36.8065, 10.1815),
        ];
        let mut last = route.total_distance_m();
        for (lat, lon) in points {
            route.add_waypoint(lat, lon);
            assert!(route.total_distance_m() >= last);
            last = route.total_distance_m();
        }
    }

    #[test]
    fn total_matches_sum_of_segments() {
        let route = four_point_route();
        let segments = route.segment_distances_m();
        assert_eq!(segments.len(), 3);
        let sum: f64 = segments.iter().sum();
        assert!((route.total_distance_m() - sum).abs() < 1e-9);
    }

    #[test]
    fn export_attaches_default_altitude() {
        let route = four_point_route();
        let points = route.export_points();
        assert_eq!(points.len(), 4);
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.seq, i as u32 + 1);
            assert_eq!(point.alt, DEFAULT_ALTITUDE_M);
        }

        let high = four_point_route().with_export_altitude(45.0);
        assert!(high.export_points().iter().all(|p| p.alt == 45.0));
    }

    #[test]
    fn export_then_replay_reproduces_route() {
        let mut route = four_point_route();
        route.delete_waypoint(2);
        let exported = route.export_points();
        let original = route.waypoints().to_vec();

        route.clear();
        for point in &exported {
            route.add_waypoint(point.lat, point.lon);
        }
        assert_eq!(route.waypoints(), original.as_slice());
    }

    #[test]
    fn load_points_replaces_existing_route() {
        let mut route = four_point_route();
        let points = vec![
            MissionPoint { seq: 7, lat: 1.0, lon: 2.0, alt: 30.0 },
            MissionPoint { seq: 9, lat: 1.01, lon: 2.0, alt: 30.0 },
        ];
        assert_eq!(route.load_points(&points), 2);
        let seqs: Vec<u32> = route.waypoints().iter().map(|wp| wp.sequence).collect();
        assert_eq!(seqs, vec![1, 2]);
        assert_eq!(route.get(1).map(|wp| wp.lat), Some(1.01));
    }

    #[test]
    fn load_points_is_gated_by_editing() {
        let mut route = RouteModel::new();
        let points = vec![MissionPoint { seq: 1, lat: 1.0, lon: 2.0, alt: 20.0 }];
        assert_eq!(route.load_points(&points), 0);
    }

    #[test]
    fn to_mission_requires_two_points() {
        let mut route = RouteModel::editable();
        route.add_waypoint(36.8065, 10.1815);
        assert!(!route.can_send());
        assert!(route.to_mission("solo").is_err());

        route.add_waypoint(36.8165, 10.1815);
        let mission = route.to_mission("pair").unwrap();
        assert_eq!(mission.name, "pair");
        assert_eq!(mission.points.len(), 2);
    }
}
