//! Great-circle distance and geofence classification.
//!
//! Distances use the haversine formula on a spherical Earth. The error of the
//! spherical model is around 0.5%, which is fine for deciding whether someone
//! is standing at the shop; it is not meant for surveying.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Returns the great-circle distance in metres between two coordinates.
///
/// Inputs are degrees and are not range-checked. Identical points give
/// exactly `0.0`, and swapping the two points gives the same result.
///
/// # Example
///
/// ```
/// use attendance_engine::reconciliation::distance_meters;
///
/// assert_eq!(distance_meters(13.7563, 100.5018, 13.7563, 100.5018), 0.0);
///
/// // one degree of latitude is about 111.2 km
/// let d = distance_meters(0.0, 0.0, 1.0, 0.0);
/// assert!((d - 111_195.0).abs() < 1.0);
/// ```
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    // canonical point order keeps the result bit-identical under argument swap
    let ((lat1, lon1), (lat2, lon2)) = if (lat1, lon1) <= (lat2, lon2) {
        ((lat1, lon1), (lat2, lon2))
    } else {
        ((lat2, lon2), (lat1, lon1))
    };

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Circular authorised zone around a work site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geofence {
    /// Site centre latitude in degrees.
    pub latitude: f64,
    /// Site centre longitude in degrees.
    pub longitude: f64,
    /// Authorised radius in metres.
    pub radius_m: f64,
}

/// Outcome of checking a position against a [`Geofence`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeofenceCheck {
    /// Distance from the site centre in metres.
    pub distance_m: f64,
    /// Whether the distance is within the radius (inclusive).
    pub within: bool,
}

impl Geofence {
    /// Classifies a position against this geofence.
    pub fn check(&self, lat: f64, lng: f64) -> GeofenceCheck {
        let distance_m = distance_meters(lat, lng, self.latitude, self.longitude);
        GeofenceCheck {
            distance_m,
            within: distance_m <= self.radius_m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_are_zero() {
        assert_eq!(distance_meters(51.5, -0.12, 51.5, -0.12), 0.0);
        assert_eq!(distance_meters(-89.9, 179.9, -89.9, 179.9), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = distance_meters(13.7563, 100.5018, 18.7883, 98.9853);
        let b = distance_meters(18.7883, 98.9853, 13.7563, 100.5018);
        assert_eq!(a, b);
    }

    #[test]
    fn test_bangkok_to_chiang_mai() {
        // roughly 583 km as the crow flies
        let d = distance_meters(13.7563, 100.5018, 18.7883, 98.9853);
        assert!((d - 583_000.0).abs() < 5_000.0, "got {d}");
    }

    #[test]
    fn test_antipodal_points() {
        let d = distance_meters(0.0, 0.0, 0.0, 180.0);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!((d - half_circumference).abs() < 1.0);
    }

    #[test]
    fn test_out_of_range_input_is_accepted() {
        let d = distance_meters(95.0, 200.0, 0.0, 0.0);
        assert!(d.is_finite());
    }

    #[test]
    fn test_geofence_boundary_is_inclusive() {
        let site = Geofence {
            latitude: 0.0,
            longitude: 0.0,
            radius_m: 0.0,
        };
        let check = site.check(0.0, 0.0);
        assert_eq!(check.distance_m, 0.0);
        assert!(check.within);
    }

    #[test]
    fn test_geofence_inside_and_outside() {
        let site = Geofence {
            latitude: 13.7563,
            longitude: 100.5018,
            radius_m: 200.0,
        };
        // ~111 m north
        assert!(site.check(13.7573, 100.5018).within);
        // ~556 m north
        assert!(!site.check(13.7613, 100.5018).within);
    }
}
