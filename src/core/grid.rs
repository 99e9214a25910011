use crate::core::constants::{GRID, GRID_SIZE, MAX_LAT, MAX_LNG, MIN_LAT, MIN_LNG};
use geo_types::{Polygon, Rect, coord};

/// A latitude/longitude rectangle. `min_lat < max_lat` and `min_lng < max_lng`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

/// The region every encodable coordinate must fall in.
pub const OUTER_BOUNDS: BoundingBox = BoundingBox {
    min_lat: MIN_LAT,
    max_lat: MAX_LAT,
    min_lng: MIN_LNG,
    max_lng: MAX_LNG,
};

impl BoundingBox {
    pub fn lat_step(&self) -> f64 {
        (self.max_lat - self.min_lat) / GRID_SIZE as f64
    }

    pub fn lng_step(&self) -> f64 {
        (self.max_lng - self.min_lng) / GRID_SIZE as f64
    }

    /// Center of the box as `(lat, lng)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Inclusive containment test.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }

    /// Grid position of the sub-cell holding `(lat, lng)`.
    ///
    /// Row 0 is the northern band, so the latitude index is inverted. Both
    /// indices are clamped into the grid, which resolves points lying on the
    /// upper or right edge (and any rounding drift) to the adjacent cell.
    pub fn row_col(&self, lat: f64, lng: f64) -> (usize, usize) {
        let last = (GRID_SIZE - 1) as i64;
        let row = last.saturating_sub(((lat - self.min_lat) / self.lat_step()).floor() as i64);
        let col = ((lng - self.min_lng) / self.lng_step()).floor() as i64;
        (row.clamp(0, last) as usize, col.clamp(0, last) as usize)
    }

    /// The sub-cell at `(row, col)`.
    pub fn subdivide(&self, row: usize, col: usize) -> BoundingBox {
        let lat_step = self.lat_step();
        let lng_step = self.lng_step();
        let min_lng = self.min_lng + lng_step * col as f64;

        BoundingBox {
            min_lat: self.min_lat + lat_step * (GRID_SIZE - 1 - row) as f64,
            max_lat: self.min_lat + lat_step * (GRID_SIZE - row) as f64,
            min_lng,
            max_lng: min_lng + lng_step,
        }
    }

    /// The box as a `geo_types::Rect` (x = longitude, y = latitude).
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lng, y: self.min_lat },
            coord! { x: self.max_lng, y: self.max_lat },
        )
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}

/// Symbol at a grid position. Callers pass indices in `0..4`.
pub fn symbol_at(row: usize, col: usize) -> char {
    GRID[row][col]
}

/// Grid position of `symbol`, or `None` if it is not in the alphabet.
pub fn position_of(symbol: char) -> Option<(usize, usize)> {
    GRID.iter().enumerate().find_map(|(row, symbols)| {
        symbols
            .iter()
            .position(|&s| s == symbol)
            .map(|col| (row, col))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::ALPHABET;

    #[test]
    fn test_grid_is_bijection_over_alphabet() {
        for (i, &symbol) in ALPHABET.iter().enumerate() {
            let (row, col) = position_of(symbol).unwrap();
            assert_eq!((row, col), (i / 4, i % 4));
            assert_eq!(symbol_at(row, col), symbol);
        }
        assert_eq!(position_of('A'), None);
        assert_eq!(position_of('f'), None);
    }

    #[test]
    fn test_row_col_orientation() {
        // north-west corner region is row 0, col 0
        assert_eq!(OUTER_BOUNDS.row_col(38.0, 64.0), (0, 0));
        // south-east corner region is row 3, col 3
        assert_eq!(OUTER_BOUNDS.row_col(3.0, 99.0), (3, 3));
    }

    #[test]
    fn test_row_col_clamps_upper_edges() {
        assert_eq!(OUTER_BOUNDS.row_col(MAX_LAT, MAX_LNG), (0, 3));
        assert_eq!(OUTER_BOUNDS.row_col(MIN_LAT, MIN_LNG), (3, 0));
        // outside the box still lands on a valid index
        assert_eq!(OUTER_BOUNDS.row_col(100.0, -100.0), (0, 0));
    }

    #[test]
    fn test_subdivide_is_contained() {
        for row in 0..4 {
            for col in 0..4 {
                let sub = OUTER_BOUNDS.subdivide(row, col);
                assert!(sub.min_lat >= OUTER_BOUNDS.min_lat);
                assert!(sub.max_lat <= OUTER_BOUNDS.max_lat);
                assert!(sub.min_lng >= OUTER_BOUNDS.min_lng);
                assert!(sub.max_lng <= OUTER_BOUNDS.max_lng);
                assert!((sub.lat_step() * 4.0 - 9.0).abs() < 1e-12);
                let (lat, lng) = sub.center();
                assert_eq!(OUTER_BOUNDS.row_col(lat, lng), (row, col));
            }
        }
    }

    #[test]
    fn test_to_polygon_is_closed() {
        let polygon = OUTER_BOUNDS.to_polygon();
        let exterior = polygon.exterior();
        assert_eq!(exterior.coords().count(), 5);
        assert_eq!(exterior.0[0], exterior.0[4]);
    }
}
