use crate::core::constants::{CODE_LENGTH, SEPARATOR};
use crate::core::grid::{OUTER_BOUNDS, position_of};
use crate::util::error::DigipinError;

/// Checks that a coordinate is a number and lies inside the outer bounding box.
///
/// # Errors
///
/// - [`DigipinError::InvalidCoordinate`] - either value is NaN
/// - [`DigipinError::LatitudeOutOfRange`] - latitude outside `[2.5, 38.5]`
/// - [`DigipinError::LongitudeOutOfRange`] - longitude outside `[63.5, 99.5]`
pub fn validate_coordinate(lat: f64, lng: f64) -> Result<(), DigipinError> {
    if lat.is_nan() || lng.is_nan() {
        return Err(DigipinError::InvalidCoordinate);
    }
    if lat < OUTER_BOUNDS.min_lat || lat > OUTER_BOUNDS.max_lat {
        return Err(DigipinError::LatitudeOutOfRange);
    }
    if lng < OUTER_BOUNDS.min_lng || lng > OUTER_BOUNDS.max_lng {
        return Err(DigipinError::LongitudeOutOfRange);
    }
    Ok(())
}

/// Checks that a code has exactly 10 alphabet symbols once separators are removed.
///
/// ```
/// use digipin_rs::{DigipinError, validate_code};
///
/// assert!(validate_code("39J-438-TJC7").is_ok());
/// assert!(validate_code("39J438TJC7").is_ok());
/// assert_eq!(validate_code("39J-438-TJCA"), Err(DigipinError::InvalidCodeCharacter('A')));
/// ```
pub fn validate_code(code: &str) -> Result<(), DigipinError> {
    let symbols = strip_separators(code);
    if symbols.len() != CODE_LENGTH {
        return Err(DigipinError::InvalidCodeLength(symbols.len()));
    }
    match symbols.iter().find(|&&c| position_of(c).is_none()) {
        Some(&c) => Err(DigipinError::InvalidCodeCharacter(c)),
        None => Ok(()),
    }
}

pub(crate) fn strip_separators(code: &str) -> Vec<char> {
    code.chars().filter(|&c| c != SEPARATOR).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coordinate_bounds() {
        assert!(validate_coordinate(28.6139, 77.2090).is_ok());
        assert!(validate_coordinate(2.5, 63.5).is_ok());
        assert!(validate_coordinate(38.5, 99.5).is_ok());
        assert_eq!(
            validate_coordinate(2.4999, 77.0),
            Err(DigipinError::LatitudeOutOfRange)
        );
        assert_eq!(
            validate_coordinate(20.0, 99.5001),
            Err(DigipinError::LongitudeOutOfRange)
        );
    }

    #[test]
    fn test_validate_coordinate_order_of_checks() {
        assert_eq!(
            validate_coordinate(f64::NAN, 500.0),
            Err(DigipinError::InvalidCoordinate)
        );
        assert_eq!(
            validate_coordinate(20.0, f64::NAN),
            Err(DigipinError::InvalidCoordinate)
        );
        assert_eq!(
            validate_coordinate(0.0, 0.0),
            Err(DigipinError::LatitudeOutOfRange)
        );
        assert_eq!(
            validate_coordinate(f64::INFINITY, 77.0),
            Err(DigipinError::LatitudeOutOfRange)
        );
    }

    #[test]
    fn test_validate_code_length() {
        assert_eq!(
            validate_code("39J-438-TJC"),
            Err(DigipinError::InvalidCodeLength(9))
        );
        assert_eq!(
            validate_code("39J-438-TJC77"),
            Err(DigipinError::InvalidCodeLength(11))
        );
        assert_eq!(validate_code(""), Err(DigipinError::InvalidCodeLength(0)));
        assert_eq!(
            validate_code("----------"),
            Err(DigipinError::InvalidCodeLength(0))
        );
    }

    #[test]
    fn test_validate_code_characters() {
        assert_eq!(
            validate_code("39j-438-TJC7"),
            Err(DigipinError::InvalidCodeCharacter('j'))
        );
        assert_eq!(
            validate_code("0000000000"),
            Err(DigipinError::InvalidCodeCharacter('0'))
        );
        // multi-byte characters are counted once
        assert_eq!(
            validate_code("39J-438-TJCé"),
            Err(DigipinError::InvalidCodeCharacter('é'))
        );
    }

    #[test]
    fn test_separators_are_optional_and_free_standing() {
        assert!(validate_code("39J438TJC7").is_ok());
        assert!(validate_code("3-9-J-4-3-8-T-J-C-7").is_ok());
    }
}
