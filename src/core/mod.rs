pub mod codec;
pub mod constants;
pub mod distance;
pub mod grid;
pub mod validate;

pub use codec::{decode, decode_bounds, encode, format_code};
pub use constants::{
    ALPHABET, CODE_LENGTH, EARTH_RADIUS_METERS, FORMATTED_CODE_LENGTH, GRID, GRID_SIZE, MAX_LAT,
    MAX_LNG, MIN_LAT, MIN_LNG, SEPARATOR,
};
pub use distance::{distance, geodesic_distance};
pub use grid::{BoundingBox, OUTER_BOUNDS, position_of, symbol_at};
pub use validate::{validate_code, validate_coordinate};
