/// The 16 DIGIPIN symbols in grid order (row-major, north-west first).
pub const ALPHABET: [char; 16] = [
    'F', 'C', '9', '8', 'J', '3', '2', '7', 'K', '4', '5', '6', 'L', 'M', 'P', 'T',
];

/// The 4x4 symbol grid. Row 0 is the northernmost band, column 0 the westernmost.
pub const GRID: [[char; 4]; 4] = [
    ['F', 'C', '9', '8'],
    ['J', '3', '2', '7'],
    ['K', '4', '5', '6'],
    ['L', 'M', 'P', 'T'],
];

/// Outer bounding box extents (degrees).
pub const MIN_LAT: f64 = 2.5;
pub const MAX_LAT: f64 = 38.5;
pub const MIN_LNG: f64 = 63.5;
pub const MAX_LNG: f64 = 99.5;

/// Number of subdivision levels, one symbol per level.
pub const CODE_LENGTH: usize = 10;

/// Cells per side at each subdivision level.
pub const GRID_SIZE: usize = 4;

/// Separator inserted into formatted codes.
pub const SEPARATOR: char = '-';

/// Levels after which a separator is emitted (`XXX-XXX-XXXX`).
pub(crate) const SEPARATOR_AFTER: [usize; 2] = [3, 6];

/// Length of a formatted code including separators.
pub const FORMATTED_CODE_LENGTH: usize = CODE_LENGTH + SEPARATOR_AFTER.len();

/// Mean earth radius used by the Haversine distance (meters).
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
