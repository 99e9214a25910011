/// Error type for digipin-rs operations.
#[derive(Debug, Clone, PartialEq)]
pub enum DigipinError {
    /// Latitude is outside the outer bounding box (2.5 to 38.5).
    LatitudeOutOfRange,
    /// Longitude is outside the outer bounding box (63.5 to 99.5).
    LongitudeOutOfRange,
    /// Latitude or longitude is NaN.
    InvalidCoordinate,
    /// The code does not have exactly 10 symbols once separators are removed.
    InvalidCodeLength(usize),
    /// The code contains a character outside the 16-symbol alphabet.
    InvalidCodeCharacter(char),
    /// An operation needing at least one candidate code was given none.
    EmptyInput,
    /// File I/O error.
    IoError(String),
    /// CSV parsing, writing or column lookup error.
    CsvError(String),
    /// JSON serialization error.
    JsonError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
    /// A batch, grid or CSV configuration value is unusable.
    InvalidConfig(String),
}

impl std::fmt::Display for DigipinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigipinError::LatitudeOutOfRange => write!(f, "Latitude out of range"),
            DigipinError::LongitudeOutOfRange => write!(f, "Longitude out of range"),
            DigipinError::InvalidCoordinate => {
                write!(f, "Invalid coordinates: must be numbers")
            }
            DigipinError::InvalidCodeLength(n) => write!(
                f,
                "Invalid DIGIPIN: must be 10 characters (excluding hyphens), got {}",
                n
            ),
            DigipinError::InvalidCodeCharacter(c) => {
                write!(f, "Invalid character in DIGIPIN: {}", c)
            }
            DigipinError::EmptyInput => write!(f, "No DIGIPINs provided"),
            DigipinError::IoError(msg) => write!(f, "IO error: {}", msg),
            DigipinError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            DigipinError::JsonError(msg) => write!(f, "JSON error: {}", msg),
            DigipinError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
            DigipinError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for DigipinError {}
