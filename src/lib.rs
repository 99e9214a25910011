//! # digipin-rs
//!
//! DIGIPIN splits the region between latitude 2.5 to 38.5 and longitude
//! 63.5 to 99.5 into a 4x4 grid, ten levels deep. Each level adds one symbol,
//! giving a 10-symbol code written `XXX-XXX-XXXX`.
//!
//! There are currently four main entry points.
//!
//! ### 1. `encode` / `decode` - Codec
//!
//! ```
//! use digipin_rs::{decode, encode};
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let pin = encode(28.6139, 77.2090)?;
//! assert_eq!(pin, "39J-438-TJC7");
//!
//! let center = decode(&pin)?;
//! println!("{:.6}, {:.6}", center.latitude, center.longitude);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. Distance and ranking
//!
//! ```
//! use digipin_rs::{distance_between_codes, find_nearest};
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let meters = distance_between_codes("39J-438-TJC7", "4FK-595-8823")?;
//! let nearest = find_nearest("39J-438-TJC7", &["4PJ-766-C924", "4FK-595-8823"])?;
//! assert_eq!(nearest, "4FK-595-8823");
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `DigipinCell` - Cell geometry
//!
//! ```
//! use digipin_rs::DigipinCell;
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let cell = DigipinCell::from_code("39J438TJC7")?;
//! let polygon = cell.to_polygon();
//! # Ok(())
//! # }
//! ```
//!
//! ### 4. Batch and file conversion
//!
//! ```no_run
//! use digipin_rs::{BatchOptions, CsvDigipinConfig, CsvToDigipin};
//!
//! let config = CsvDigipinConfig::from_coords("Latitude", "Longitude")
//!     .concurrent(BatchOptions::default());
//!
//! "input.csv".to_digipin_csv("output.csv", &config).unwrap();
//! ```
//!

pub mod api;
pub mod core;
pub mod util;

pub use crate::api::{
    BatchOptions, CacheStats, CodecCache, CoordinateSource, CsvDigipinConfig, CsvToDigipin,
    DEFAULT_CACHE_CAPACITY, DigipinCell, GeometryFormat, GridEntry, GridSpec, MAX_GRID_POINTS,
    batch_decode, batch_decode_concurrent, batch_decode_in_pool, batch_encode,
    batch_encode_concurrent, batch_encode_in_pool, csv_to_coords_csv, csv_to_digipin_csv,
    distance_between_codes, find_nearest, generate_grid, order_by_distance,
    precise_distance_between_codes, write_grid_csv, write_grid_json,
};
pub use crate::core::{
    ALPHABET, BoundingBox, CODE_LENGTH, EARTH_RADIUS_METERS, FORMATTED_CODE_LENGTH, GRID,
    GRID_SIZE, MAX_LAT, MAX_LNG, MIN_LAT, MIN_LNG, OUTER_BOUNDS, SEPARATOR, decode,
    decode_bounds, distance, encode, format_code, geodesic_distance, position_of, symbol_at,
    validate_code, validate_coordinate,
};
pub use crate::util::{Coordinate, DigipinError, LatLng};

pub use geo_types;
