use geo_types::Point;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns the coordinate as a `geo_types::Point` (x = longitude, y = latitude).
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl From<Point<f64>> for LatLng {
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<LatLng> for Point<f64> {
    fn from(coord: LatLng) -> Self {
        coord.to_point()
    }
}

/// Trait for types that can provide WGS84 latitude/longitude.
///
/// Implemented for [`LatLng`], `geo_types::Point<f64>` and `(f64, f64)` tuples.
/// Points and tuples follow the `geo_types` axis order: x is longitude, y is latitude.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;

    fn to_lat_lng(&self) -> LatLng {
        LatLng::new(self.y(), self.x())
    }
}

impl Coordinate for LatLng {
    fn x(&self) -> f64 {
        self.longitude
    }
    fn y(&self) -> f64 {
        self.latitude
    }
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (77.209, 28.6139);
        assert_eq!(tuple.x(), 77.209);
        assert_eq!(tuple.y(), 28.6139);
    }

    #[test]
    fn test_coordinate_trait_point() {
        let point = Point::new(77.209, 28.6139);
        let coord = point.to_lat_lng();
        assert_eq!(coord.latitude, 28.6139);
        assert_eq!(coord.longitude, 77.209);
    }

    #[test]
    fn test_lat_lng_point_conversion() {
        let coord = LatLng::new(19.076, 72.8777);
        let point: Point<f64> = coord.into();
        assert_eq!(point.x(), 72.8777);
        assert_eq!(LatLng::from(point), coord);
    }
}
