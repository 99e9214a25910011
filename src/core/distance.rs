use crate::core::constants::EARTH_RADIUS_METERS;
use crate::util::coord::LatLng;
use geo::{Distance, Geodesic};

/// Haversine great-circle distance between two coordinates, in meters.
///
/// ```
/// use digipin_rs::{LatLng, distance};
///
/// let delhi = LatLng::new(28.6139, 77.2090);
/// assert_eq!(distance(delhi, delhi), 0.0);
/// ```
pub fn distance(a: LatLng, b: LatLng) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Geodesic distance on the WGS84 ellipsoid, in meters.
pub fn geodesic_distance(a: LatLng, b: LatLng) -> f64 {
    Geodesic.distance(a.to_point(), b.to_point())
}
