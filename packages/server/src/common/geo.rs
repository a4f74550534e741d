//! Great-circle distance calculation for geofence admission checks.
//!
//! Grounded on the haversine implementation used elsewhere in this codebase
//! for proximity matching, but expressed in meters (spec §4.2 works in
//! `geofence_radius_m`/`distance_m`, not kilometers).

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates, in meters.
///
/// Uses the haversine formula, which is accurate enough for geofence radii
/// on the order of tens to thousands of meters.
pub fn haversine_distance_m(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Validates that a coordinate pair is within the valid WGS84 range.
///
/// Spec §4.2: `|latitude| <= 90`, `|longitude| <= 180`.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), String> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(format!("latitude {latitude} out of range [-90, 90]"));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(format!("longitude {longitude} out of range [-180, 180]"));
    }
    Ok(())
}
