//! Spherical-earth math for route distances.

/// Mean earth radius used by every distance calculation, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

const COORDINATE_SCALE: f64 = 1e7;

/// Calculate distance between two points in meters (Haversine formula).
///
/// Spherical model only; good enough for short drone legs, not for surveying.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Round a coordinate to 7 decimal places (~1 cm).
///
/// Halfway cases round away from zero (`f64::round`). Rounding an already
/// rounded value returns it unchanged.
pub fn round_coordinate(value: f64) -> f64 {
    (value * COORDINATE_SCALE).round() / COORDINATE_SCALE
}

/// Initial great-circle bearing from point 1 to point 2, in degrees [0, 360).
pub fn initial_bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let start_lat = lat1.to_radians();
    let end_lat = lat2.to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let y = d_lon.sin() * end_lat.cos();
    let x = start_lat.cos() * end_lat.sin() - start_lat.sin() * end_lat.cos() * d_lon.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}
