pub mod batch;
pub mod cache;
pub mod cell;
pub mod geo_ops;
pub mod grid_export;
pub mod pin_csv;

pub use batch::{
    BatchOptions, batch_decode, batch_decode_concurrent, batch_decode_in_pool, batch_encode,
    batch_encode_concurrent, batch_encode_in_pool,
};
pub use cache::{CacheStats, CodecCache, DEFAULT_CACHE_CAPACITY};
pub use cell::DigipinCell;
pub use geo_ops::{
    distance_between_codes, find_nearest, order_by_distance, precise_distance_between_codes,
};
pub use grid_export::{
    GridEntry, GridSpec, MAX_GRID_POINTS, generate_grid, write_grid_csv, write_grid_json,
};
pub use pin_csv::{
    CoordinateSource, CsvDigipinConfig, CsvToDigipin, GeometryFormat, csv_to_coords_csv,
    csv_to_digipin_csv,
};
