use crate::core::codec::{decode_bounds, encode, format_code};
use crate::core::distance::distance;
use crate::core::grid::BoundingBox;
use crate::util::coord::{Coordinate, LatLng};
use crate::util::error::DigipinError;
use geo_types::{Point, Polygon, Rect};

/// A single finest-level cell of the DIGIPIN grid.
///
/// Each `DigipinCell` carries its formatted code, the center point of the
/// cell (x = longitude, y = latitude) and the cell bounds.
///
/// # Example
///
/// ```
/// use digipin_rs::DigipinCell;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let cell = DigipinCell::from_lat_lng(28.6139, 77.2090)?;
/// println!("Code: {}", cell.code);
/// println!("Center: ({}, {})", cell.latitude(), cell.longitude());
///
/// // Cell outline for GIS tooling
/// let polygon = cell.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DigipinCell {
    /// Formatted code (`XXX-XXX-XXXX`)
    pub code: String,
    /// Center of the cell
    pub center: Point<f64>,
    /// Cell extent
    pub bounds: BoundingBox,
}

impl DigipinCell {
    /// Create the cell containing a coordinate.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::DigipinCell;
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), digipin_rs::DigipinError> {
    /// // From (lng, lat) tuple
    /// let cell = DigipinCell::from_coord(&(77.2090, 28.6139))?;
    /// // From Point
    /// let same = DigipinCell::from_coord(&Point::new(77.2090, 28.6139))?;
    /// assert_eq!(cell, same);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_coord(coord: &impl Coordinate) -> Result<Self, DigipinError> {
        Self::from_lat_lng(coord.y(), coord.x())
    }

    pub fn from_lat_lng(lat: f64, lng: f64) -> Result<Self, DigipinError> {
        let code = encode(lat, lng)?;
        Self::from_code(&code)
    }

    /// Create a cell from a code, with or without separators.
    pub fn from_code(code: &str) -> Result<Self, DigipinError> {
        let bounds = decode_bounds(code)?;
        let (lat, lng) = bounds.center();

        Ok(Self {
            code: format_code(code)?,
            center: Point::new(lng, lat),
            bounds,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.center.y()
    }

    pub fn longitude(&self) -> f64 {
        self.center.x()
    }

    pub fn center_lat_lng(&self) -> LatLng {
        LatLng::from(self.center)
    }

    pub fn to_rect(&self) -> Rect<f64> {
        self.bounds.to_rect()
    }

    /// Cell outline as a closed polygon.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds.to_polygon()
    }

    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        self.bounds.contains(coord.y(), coord.x())
    }

    /// Haversine distance in meters between the two cell centers.
    pub fn distance_to(&self, other: &DigipinCell) -> f64 {
        distance(self.center_lat_lng(), other.center_lat_lng())
    }
}
