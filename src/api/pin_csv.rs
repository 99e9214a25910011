use crate::api::batch::{
    BatchOptions, batch_decode, batch_decode_in_pool, batch_encode, batch_encode_in_pool,
};
use crate::api::cell::DigipinCell;
use crate::util::coord::LatLng;
use crate::util::error::DigipinError;
use csv::StringRecord;
use geo::Centroid;
use geo_types::Geometry;
use geojson::GeoJson;
use rayon::ThreadPool;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};
use wkt::Wkt;

/// Rows read and encoded per batch.
const CHUNK_ROWS: usize = 4096;

/// For the type of location source in the file
enum SourceIndices {
    Geometry(usize),
    Coordinates { lat_idx: usize, lng_idx: usize },
}

/// Output format for cell polygon geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

/// Specifies how to extract location data from CSV rows.
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry (lon/lat axis order)
    GeometryColumn(String),
    /// Separate latitude and longitude columns
    CoordinateColumns {
        lat_column: String,
        lng_column: String,
    },
}

/// Configuration for CSV to DIGIPIN conversion.
#[derive(Debug, Clone)]
pub struct CsvDigipinConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub include_cell_geometry: Option<GeometryFormat>,
    pub concurrency: Option<BatchOptions>,
}

impl CsvDigipinConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// Points are encoded directly; any other geometry is encoded by its centroid.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::CsvDigipinConfig;
    ///
    /// let config = CsvDigipinConfig::new("geometry");
    /// ```
    pub fn new(geometry_column: impl Into<String>) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            include_cell_geometry: None,
            concurrency: None,
        }
    }

    /// Create config for a CSV with separate latitude/longitude columns.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::CsvDigipinConfig;
    ///
    /// let config = CsvDigipinConfig::from_coords("Latitude", "Longitude");
    /// ```
    pub fn from_coords(lat_column: impl Into<String>, lng_column: impl Into<String>) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lat_column: lat_column.into(),
                lng_column: lng_column.into(),
            },
            exclude_columns: Vec::new(),
            include_cell_geometry: None,
            concurrency: None,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    /// Include the cell polygon in output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }

    /// Encode each chunk of rows on a worker pool.
    pub fn concurrent(mut self, options: BatchOptions) -> Self {
        self.concurrency = Some(options);
        self
    }
}

pub trait CsvToDigipin {
    fn to_digipin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvDigipinConfig,
    ) -> Result<(), DigipinError>;
}

impl<P: AsRef<Path>> CsvToDigipin for P {
    fn to_digipin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvDigipinConfig,
    ) -> Result<(), DigipinError> {
        csv_to_digipin_csv(self, output_path, config)
    }
}

fn parse_geometry(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

fn parse_geojson(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| DigipinError::GeometryParseError(e.to_string()))?;

    match geojson {
        GeoJson::Geometry(geom) => {
            Geometry::try_from(geom).map_err(|e| DigipinError::GeometryParseError(e.to_string()))
        }
        GeoJson::Feature(feat) => feat
            .geometry
            .ok_or_else(|| DigipinError::GeometryParseError("Feature has no geometry".to_string()))
            .and_then(|g| {
                Geometry::try_from(g).map_err(|e| DigipinError::GeometryParseError(e.to_string()))
            }),
        GeoJson::FeatureCollection(_) => Err(DigipinError::GeometryParseError(
            "FeatureCollection not supported, use individual geometries".to_string(),
        )),
    }
}

fn parse_wkt(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| DigipinError::GeometryParseError(e.to_string()))?;

    wkt.try_into().map_err(|_| {
        DigipinError::GeometryParseError("Failed to convert WKT to geometry".to_string())
    })
}

fn polygon_to_wkt(polygon: &geo_types::Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &geo_types::Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}

/// Location of a geometry: the point itself, or its centroid.
fn geometry_location(geom: &Geometry<f64>) -> Result<LatLng, DigipinError> {
    let point = match geom {
        Geometry::Point(pt) => Some(*pt),
        other => other.centroid(),
    };
    point
        .map(LatLng::from)
        .ok_or_else(|| DigipinError::GeometryParseError("Geometry is empty".to_string()))
}

fn parse_number(record: &StringRecord, idx: usize, name: &str) -> Result<f64, DigipinError> {
    let raw = record
        .get(idx)
        .ok_or_else(|| DigipinError::CsvError(format!("Missing {} column at index {}", name, idx)))?
        .trim();
    raw.parse()
        .map_err(|_| DigipinError::CsvError(format!("Invalid {}: '{}'", name, raw)))
}

fn row_location(record: &StringRecord, source: &SourceIndices) -> Result<LatLng, DigipinError> {
    match source {
        SourceIndices::Geometry(idx) => {
            let geom_str = record.get(*idx).ok_or_else(|| {
                DigipinError::CsvError(format!("Missing geometry column at index {}", idx))
            })?;
            geometry_location(&parse_geometry(geom_str)?)
        }
        SourceIndices::Coordinates { lat_idx, lng_idx } => Ok(LatLng::new(
            parse_number(record, *lat_idx, "latitude")?,
            parse_number(record, *lng_idx, "longitude")?,
        )),
    }
}

fn column_index(headers: &StringRecord, name: &str, role: &str) -> Result<usize, DigipinError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DigipinError::CsvError(format!("{} column '{}' not found", role, name)))
}

fn csv_err(e: csv::Error) -> DigipinError {
    DigipinError::CsvError(e.to_string())
}

/// Encodes the valid locations of a chunk, keeping one result per row.
fn encode_chunk(
    locations: &[Result<LatLng, DigipinError>],
    pool: Option<&ThreadPool>,
) -> Vec<Result<String, DigipinError>> {
    let (indices, coords): (Vec<usize>, Vec<LatLng>) = locations
        .iter()
        .enumerate()
        .filter_map(|(i, loc)| loc.as_ref().ok().map(|c| (i, *c)))
        .unzip();

    let encoded = match pool {
        Some(pool) => batch_encode_in_pool(pool, &coords),
        None => batch_encode(&coords),
    };

    let mut results: Vec<Result<String, DigipinError>> = locations
        .iter()
        .map(|loc| loc.clone().map(|_| String::new()))
        .collect();
    for (i, result) in indices.into_iter().zip(encoded) {
        results[i] = result;
    }
    results
}

// ============================================================================
// CSV Conversion
// ============================================================================

/// Converts a CSV file with geometry or coordinate columns to a CSV file with DIGIPINs.
///
/// Rows are processed in chunks so large files are never fully loaded. A row
/// whose location cannot be parsed or encoded is still written, with an empty
/// `digipin` and the reason in the `error` column.
///
/// # Example with coordinate columns
///
/// ```no_run
/// use digipin_rs::{csv_to_digipin_csv, CsvDigipinConfig, GeometryFormat};
///
/// let config = CsvDigipinConfig::from_coords("Latitude", "Longitude")
///     .exclude(vec!["Notes".into()])
///     .with_cell_geometry(GeometryFormat::Wkt);
///
/// csv_to_digipin_csv("post_offices.csv", "output.csv", &config).unwrap();
/// ```
///
/// # Errors
///
/// Fails on I/O errors, malformed CSV, or when a configured column is missing
/// from the header.
pub fn csv_to_digipin_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvDigipinConfig,
) -> Result<(), DigipinError> {
    let file = File::open(csv_path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers().map_err(csv_err)?.clone();

    // Determine which columns to exclude based on source type
    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = column_index(&headers, col, "Geometry")?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lat_column,
            lng_column,
        } => {
            let lat_idx = column_index(&headers, lat_column, "Latitude")?;
            let lng_idx = column_index(&headers, lng_column, "Longitude")?;
            (
                SourceIndices::Coordinates { lat_idx, lng_idx },
                HashSet::from([lat_idx, lng_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["digipin", "error"];
    if config.include_cell_geometry.is_some() {
        header_row.push("cell_geometry");
    }
    header_row.extend(
        headers
            .iter()
            .enumerate()
            .filter(|(i, _)| !exclude_indices.contains(i))
            .map(|(_, h)| h),
    );
    writer.write_record(&header_row).map_err(csv_err)?;

    let pool = config
        .concurrency
        .as_ref()
        .map(BatchOptions::thread_pool)
        .transpose()?;
    let mut records = reader.records();
    let mut total = 0usize;
    let mut failed = 0usize;
    loop {
        let chunk = records
            .by_ref()
            .take(CHUNK_ROWS)
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_err)?;
        if chunk.is_empty() {
            break;
        }

        let locations: Vec<_> = chunk
            .iter()
            .map(|record| row_location(record, &source_indices))
            .collect();
        let encoded = encode_chunk(&locations, pool.as_ref());

        for (record, result) in chunk.iter().zip(encoded) {
            let mut row: Vec<String> = Vec::with_capacity(record.len() + 3);
            match &result {
                Ok(code) => {
                    row.push(code.clone());
                    row.push(String::new());
                }
                Err(e) => {
                    warn!(row = total + 1, error = %e, "row not encoded");
                    failed += 1;
                    row.push(String::new());
                    row.push(e.to_string());
                }
            }

            if let Some(format) = config.include_cell_geometry {
                let geom_str = match &result {
                    Ok(code) => {
                        let polygon = DigipinCell::from_code(code)?.to_polygon();
                        match format {
                            GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                            GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
                        }
                    }
                    Err(_) => String::new(),
                };
                row.push(geom_str);
            }

            row.extend(
                record
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !exclude_indices.contains(i))
                    .map(|(_, field)| field.to_string()),
            );
            writer.write_record(&row).map_err(csv_err)?;
            total += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| DigipinError::IoError(e.to_string()))?;
    debug!(total, failed, "csv encode complete");

    Ok(())
}

/// Decodes a CSV column of DIGIPINs into latitude/longitude columns.
///
/// Output columns are `digipin,latitude,longitude,error` followed by every
/// other input column. Coordinates are written with six decimals; rows with
/// an invalid code keep empty coordinates and the reason in `error`.
pub fn csv_to_coords_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    code_column: &str,
    concurrency: Option<&BatchOptions>,
) -> Result<(), DigipinError> {
    let file = File::open(csv_path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers().map_err(csv_err)?.clone();
    let code_idx = column_index(&headers, code_column, "DIGIPIN")?;

    let out_file = File::create(output_path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["digipin", "latitude", "longitude", "error"];
    header_row.extend(
        headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != code_idx)
            .map(|(_, h)| h),
    );
    writer.write_record(&header_row).map_err(csv_err)?;

    let pool = concurrency.map(BatchOptions::thread_pool).transpose()?;
    let mut records = reader.records();
    let mut total = 0usize;
    loop {
        let chunk = records
            .by_ref()
            .take(CHUNK_ROWS)
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_err)?;
        if chunk.is_empty() {
            break;
        }

        let codes: Vec<&str> = chunk
            .iter()
            .map(|record| record.get(code_idx).unwrap_or("").trim())
            .collect();
        let decoded = match &pool {
            Some(pool) => batch_decode_in_pool(pool, &codes),
            None => batch_decode(&codes),
        };

        for ((record, code), result) in chunk.iter().zip(&codes).zip(decoded) {
            let mut row: Vec<String> = vec![code.to_string()];
            match result {
                Ok(coord) => {
                    row.push(format!("{:.6}", coord.latitude));
                    row.push(format!("{:.6}", coord.longitude));
                    row.push(String::new());
                }
                Err(e) => {
                    warn!(row = total + 1, error = %e, "row not decoded");
                    row.extend([String::new(), String::new(), e.to_string()]);
                }
            }
            row.extend(
                record
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != code_idx)
                    .map(|(_, field)| field.to_string()),
            );
            writer.write_record(&row).map_err(csv_err)?;
            total += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| DigipinError::IoError(e.to_string()))?;
    debug!(total, "csv decode complete");

    Ok(())
}
