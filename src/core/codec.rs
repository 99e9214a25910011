use crate::core::constants::{CODE_LENGTH, FORMATTED_CODE_LENGTH, SEPARATOR, SEPARATOR_AFTER};
use crate::core::grid::{BoundingBox, OUTER_BOUNDS, position_of, symbol_at};
use crate::core::validate::{strip_separators, validate_code, validate_coordinate};
use crate::util::coord::LatLng;
use crate::util::error::DigipinError;

/// Encodes a latitude/longitude into a DIGIPIN formatted as `XXX-XXX-XXXX`.
///
/// The outer bounding box is split into a 4x4 grid ten times; each level
/// contributes the symbol of the sub-cell holding the coordinate.
///
/// # Example
/// ```
/// use digipin_rs::encode;
///
/// let pin = encode(28.6139, 77.2090).unwrap();
/// assert_eq!(pin, "39J-438-TJC7");
/// ```
///
/// # Errors
///
/// Same as [`validate_coordinate`](crate::validate_coordinate).
pub fn encode(lat: f64, lng: f64) -> Result<String, DigipinError> {
    validate_coordinate(lat, lng)?;

    let mut bounds = OUTER_BOUNDS;
    let mut code = String::with_capacity(FORMATTED_CODE_LENGTH);

    for level in 1..=CODE_LENGTH {
        let (row, col) = bounds.row_col(lat, lng);
        code.push(symbol_at(row, col));
        if SEPARATOR_AFTER.contains(&level) {
            code.push(SEPARATOR);
        }
        bounds = bounds.subdivide(row, col);
    }

    Ok(code)
}

/// Decodes a DIGIPIN (with or without separators) to the center of its cell.
///
/// # Example
/// ```
/// use digipin_rs::decode;
///
/// let coord = decode("39J-438-TJC7").unwrap();
/// assert_eq!(format!("{:.6}, {:.6}", coord.latitude, coord.longitude), "28.613901, 77.208998");
/// ```
///
/// # Errors
///
/// Same as [`validate_code`](crate::validate_code).
pub fn decode(code: &str) -> Result<LatLng, DigipinError> {
    let (lat, lng) = decode_bounds(code)?.center();
    Ok(LatLng::new(lat, lng))
}

/// Decodes a DIGIPIN to the bounds of the finest cell it denotes.
pub fn decode_bounds(code: &str) -> Result<BoundingBox, DigipinError> {
    validate_code(code)?;

    strip_separators(code)
        .into_iter()
        .try_fold(OUTER_BOUNDS, |bounds, symbol| {
            let (row, col) =
                position_of(symbol).ok_or(DigipinError::InvalidCodeCharacter(symbol))?;
            Ok(bounds.subdivide(row, col))
        })
}

/// Re-formats a valid code as `XXX-XXX-XXXX`, whatever separators it came with.
pub fn format_code(code: &str) -> Result<String, DigipinError> {
    validate_code(code)?;

    let mut formatted = String::with_capacity(FORMATTED_CODE_LENGTH);
    for (i, symbol) in strip_separators(code).into_iter().enumerate() {
        formatted.push(symbol);
        if SEPARATOR_AFTER.contains(&(i + 1)) {
            formatted.push(SEPARATOR);
        }
    }
    Ok(formatted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{ALPHABET, MAX_LAT, MAX_LNG, MIN_LAT, MIN_LNG};

    #[test]
    fn test_encode_known_location() -> Result<(), DigipinError> {
        assert_eq!(encode(28.6139, 77.2090)?, "39J-438-TJC7");
        assert_eq!(encode(19.0760, 72.8777)?, "4FK-595-8823");
        assert_eq!(encode(12.9716, 77.5946)?, "4P3-JK8-52C9");
        Ok(())
    }

    #[test]
    fn test_decode_known_location() -> Result<(), DigipinError> {
        let coord = decode("39J-438-TJC7")?;
        assert!((coord.latitude - 28.613901).abs() < 1e-6);
        assert!((coord.longitude - 77.208998).abs() < 1e-6);

        let unformatted = decode("39J438TJC7")?;
        assert_eq!(coord, unformatted);
        Ok(())
    }

    #[test]
    fn test_encode_out_of_bounds() {
        assert_eq!(encode(0.0, 0.0), Err(DigipinError::LatitudeOutOfRange));
        assert_eq!(encode(20.0, 0.0), Err(DigipinError::LongitudeOutOfRange));
        assert_eq!(encode(f64::NAN, 77.0), Err(DigipinError::InvalidCoordinate));
    }

    #[test]
    fn test_encode_corners_resolve_to_corner_cells() -> Result<(), DigipinError> {
        assert_eq!(encode(MAX_LAT, MIN_LNG)?, "FFF-FFF-FFFF");
        assert_eq!(encode(MAX_LAT, MAX_LNG)?, "888-888-8888");
        assert_eq!(encode(MIN_LAT, MIN_LNG)?, "LLL-LLL-LLLL");
        assert_eq!(encode(MIN_LAT, MAX_LNG)?, "TTT-TTT-TTTT");
        Ok(())
    }

    #[test]
    fn test_round_trip_within_finest_cell() -> Result<(), DigipinError> {
        let cell_size = 36.0 / 4f64.powi(10);
        let mut lat = MIN_LAT;
        while lat <= MAX_LAT {
            let mut lng = MIN_LNG;
            while lng <= MAX_LNG {
                let code = encode(lat, lng)?;
                let bounds = decode_bounds(&code)?;
                assert!(bounds.contains(lat, lng), "{} not in cell {}", lat, code);

                let center = decode(&code)?;
                assert!((center.latitude - lat).abs() <= cell_size);
                assert!((center.longitude - lng).abs() <= cell_size);
                assert_eq!(encode(center.latitude, center.longitude)?, code);
                lng += 1.37;
            }
            lat += 1.13;
        }
        Ok(())
    }

    #[test]
    fn test_encode_is_deterministic() -> Result<(), DigipinError> {
        assert_eq!(encode(21.1458, 79.0882)?, encode(21.1458, 79.0882)?);
        assert_eq!(decode("4FK-595-8823")?, decode("4FK-595-8823")?);
        Ok(())
    }

    #[test]
    fn test_encode_symbol_closure() -> Result<(), DigipinError> {
        let code = encode(23.0225, 72.5714)?;
        assert_eq!(code.len(), FORMATTED_CODE_LENGTH);
        for (i, c) in code.chars().enumerate() {
            if i == 3 || i == 7 {
                assert_eq!(c, SEPARATOR);
            } else {
                assert!(ALPHABET.contains(&c));
            }
        }
        Ok(())
    }

    #[test]
    fn test_decode_rejects_invalid() {
        assert_eq!(
            decode("39J-438-TJC"),
            Err(DigipinError::InvalidCodeLength(9))
        );
        assert_eq!(
            decode("39J-438-TJCO"),
            Err(DigipinError::InvalidCodeCharacter('O'))
        );
    }

    #[test]
    fn test_decode_stays_in_outer_bounds() -> Result<(), DigipinError> {
        for code in ["FFFFFFFFFF", "8888888888", "LLLLLLLLLL", "TTTTTTTTTT"] {
            let coord = decode(code)?;
            assert!(OUTER_BOUNDS.contains(coord.latitude, coord.longitude));
        }
        Ok(())
    }

    #[test]
    fn test_format_code() -> Result<(), DigipinError> {
        assert_eq!(format_code("39J438TJC7")?, "39J-438-TJC7");
        assert_eq!(format_code("39-J438-TJ-C7")?, "39J-438-TJC7");
        assert!(format_code("39J438TJC").is_err());
        Ok(())
    }
}
