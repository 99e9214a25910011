use crate::core::codec::encode;
use crate::util::error::DigipinError;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Largest number of points [`generate_grid`] will produce.
pub const MAX_GRID_POINTS: usize = 10_000_000;

const STEP_EPSILON: f64 = 1e-9;

/// A regular lat/lng sampling grid. Both ranges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
    pub step: f64,
}

impl GridSpec {
    pub fn new(min_lat: f64, min_lng: f64, max_lat: f64, max_lng: f64, step: f64) -> Self {
        Self {
            min_lat,
            min_lng,
            max_lat,
            max_lng,
            step,
        }
    }

    fn validate(&self) -> Result<(), DigipinError> {
        let values = [self.min_lat, self.min_lng, self.max_lat, self.max_lng, self.step];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(DigipinError::InvalidConfig(
                "Grid bounds and step must be finite".to_string(),
            ));
        }
        if self.step <= 0.0 {
            return Err(DigipinError::InvalidConfig(
                "Grid step must be positive".to_string(),
            ));
        }
        if self.min_lat > self.max_lat || self.min_lng > self.max_lng {
            return Err(DigipinError::InvalidConfig(
                "Grid minimum exceeds maximum".to_string(),
            ));
        }
        Ok(())
    }

    /// Sample counts along latitude and longitude.
    ///
    /// Fails when the grid would exceed [`MAX_GRID_POINTS`].
    fn sample_counts(&self) -> Result<(usize, usize), DigipinError> {
        self.validate()?;
        let lat_samples = self.samples(self.min_lat, self.max_lat)?;
        let lng_samples = self.samples(self.min_lng, self.max_lng)?;
        match lat_samples.checked_mul(lng_samples) {
            Some(total) if total <= MAX_GRID_POINTS => Ok((lat_samples, lng_samples)),
            _ => Err(too_many_points()),
        }
    }

    /// Number of points `min + i*step` that stay within `max`.
    fn samples(&self, min: f64, max: f64) -> Result<usize, DigipinError> {
        let quotient = (max - min) / self.step;
        if quotient >= MAX_GRID_POINTS as f64 {
            return Err(too_many_points());
        }
        let mut steps = quotient.floor() as usize;
        // (28.7 - 28.0) / 0.1 lands just under 7
        if quotient - quotient.floor() > 1.0 - STEP_EPSILON
            && min + (steps + 1) as f64 * self.step <= max
        {
            steps += 1;
        }
        if steps > 0 && min + steps as f64 * self.step > max {
            steps -= 1;
        }
        Ok(steps + 1)
    }
}

fn too_many_points() -> DigipinError {
    DigipinError::InvalidConfig(format!(
        "Grid exceeds {} points; use a larger step or smaller bounds",
        MAX_GRID_POINTS
    ))
}

/// A single sampled point and its code (or the reason it has none).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridEntry {
    pub latitude: f64,
    pub longitude: f64,
    pub digipin: String,
    pub error: String,
}

/// Encodes every point of `spec`, latitude-major.
///
/// Points outside the outer bounding box are kept with an empty code and the
/// validation message in `error`. Grids larger than [`MAX_GRID_POINTS`] are
/// rejected with `InvalidConfig`.
///
/// ```
/// use digipin_rs::{GridSpec, generate_grid};
///
/// let entries = generate_grid(&GridSpec::new(28.0, 77.0, 29.0, 78.0, 0.5)).unwrap();
/// assert_eq!(entries.len(), 9);
/// ```
pub fn generate_grid(spec: &GridSpec) -> Result<Vec<GridEntry>, DigipinError> {
    let (lat_samples, lng_samples) = spec.sample_counts()?;
    debug!(lat_samples, lng_samples, "generating grid");

    let mut entries = Vec::with_capacity(lat_samples * lng_samples);
    for i in 0..lat_samples {
        let latitude = spec.min_lat + i as f64 * spec.step;
        for j in 0..lng_samples {
            let longitude = spec.min_lng + j as f64 * spec.step;
            let (digipin, error) = match encode(latitude, longitude) {
                Ok(code) => (code, String::new()),
                Err(e) => (String::new(), e.to_string()),
            };
            entries.push(GridEntry {
                latitude,
                longitude,
                digipin,
                error,
            });
        }
    }
    Ok(entries)
}

/// Writes a grid as CSV (`latitude,longitude,digipin,error`, six-decimal coordinates).
pub fn write_grid_csv(spec: &GridSpec, output_path: impl AsRef<Path>) -> Result<(), DigipinError> {
    let entries = generate_grid(spec)?;

    let file = File::create(output_path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(file);
    writer
        .write_record(["latitude", "longitude", "digipin", "error"])
        .map_err(|e| DigipinError::CsvError(e.to_string()))?;

    for entry in &entries {
        writer
            .write_record([
                format!("{:.6}", entry.latitude),
                format!("{:.6}", entry.longitude),
                entry.digipin.clone(),
                entry.error.clone(),
            ])
            .map_err(|e| DigipinError::CsvError(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| DigipinError::IoError(e.to_string()))
}

/// Writes a grid as a pretty-printed JSON array of [`GridEntry`] objects.
pub fn write_grid_json(spec: &GridSpec, output_path: impl AsRef<Path>) -> Result<(), DigipinError> {
    let entries = generate_grid(spec)?;

    let file = File::create(output_path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &entries)
        .map_err(|e| DigipinError::JsonError(e.to_string()))?;
    writer
        .flush()
        .map_err(|e| DigipinError::IoError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_generate_grid_inclusive() -> Result<(), DigipinError> {
        let entries = generate_grid(&GridSpec::new(28.0, 77.0, 28.5, 77.5, 0.25))?;
        assert_eq!(entries.len(), 9);
        assert_eq!((entries[0].latitude, entries[0].longitude), (28.0, 77.0));
        assert_eq!((entries[1].latitude, entries[1].longitude), (28.0, 77.25));
        assert_eq!((entries[8].latitude, entries[8].longitude), (28.5, 77.5));
        assert!(entries.iter().all(|e| e.error.is_empty()));
        Ok(())
    }

    #[test]
    fn test_generate_grid_records_errors() -> Result<(), DigipinError> {
        let entries = generate_grid(&GridSpec::new(1.0, 77.0, 3.0, 77.0, 2.0))?;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].digipin, "");
        assert_eq!(entries[0].error, "Latitude out of range");
        assert_eq!(entries[1].digipin.len(), 13);
        Ok(())
    }

    #[test]
    fn test_invalid_grid_specs() {
        for spec in [
            GridSpec::new(28.0, 77.0, 29.0, 78.0, 0.0),
            GridSpec::new(28.0, 77.0, 29.0, 78.0, -1.0),
            GridSpec::new(29.0, 77.0, 28.0, 78.0, 0.5),
            GridSpec::new(f64::NAN, 77.0, 28.0, 78.0, 0.5),
        ] {
            assert!(matches!(
                generate_grid(&spec),
                Err(DigipinError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_generate_grid_keeps_last_sample_despite_rounding() -> Result<(), DigipinError> {
        let entries = generate_grid(&GridSpec::new(28.0, 77.0, 28.7, 77.0, 0.1))?;
        assert_eq!(entries.len(), 8);
        let last = entries[7].latitude;
        assert!((last - 28.7).abs() < 1e-9);
        assert!(entries.iter().all(|e| e.latitude <= 28.7));
        Ok(())
    }

    #[test]
    fn test_generate_grid_single_point_with_tiny_step() -> Result<(), DigipinError> {
        let entries = generate_grid(&GridSpec::new(28.5, 77.0, 28.5, 77.0, 1e-20))?;
        assert_eq!(entries.len(), 1);
        Ok(())
    }

    #[test]
    fn test_oversized_grid_rejected() {
        for spec in [
            GridSpec::new(2.5, 63.5, 38.5, 99.5, 1e-9),
            GridSpec::new(2.5, 63.5, 38.5, 99.5, 1e-300),
            GridSpec::new(2.5, 63.5, 38.5, 99.5, 0.001),
        ] {
            assert!(matches!(
                generate_grid(&spec),
                Err(DigipinError::InvalidConfig(_))
            ));
        }
        assert!(generate_grid(&GridSpec::new(2.5, 63.5, 38.5, 99.5, 1.0)).is_ok());
    }

    #[test]
    fn test_write_grid_csv() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(|e| DigipinError::IoError(e.to_string()))?;
        let path = dir.path().join("grid.csv");
        write_grid_csv(&GridSpec::new(28.5, 77.0, 28.5, 77.5, 0.5), &path)?;

        let output =
            std::fs::read_to_string(&path).map_err(|e| DigipinError::IoError(e.to_string()))?;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "latitude,longitude,digipin,error");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("28.500000,77.000000,"));
        Ok(())
    }

    #[test]
    fn test_write_grid_json() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(|e| DigipinError::IoError(e.to_string()))?;
        let path = dir.path().join("grid.json");
        write_grid_json(&GridSpec::new(28.5, 77.0, 28.5, 77.0, 1.0), &path)?;

        let output =
            std::fs::read_to_string(&path).map_err(|e| DigipinError::IoError(e.to_string()))?;
        let value: serde_json::Value =
            serde_json::from_str(&output).map_err(|e| DigipinError::JsonError(e.to_string()))?;
        let entries = value.as_array().map(Vec::len);
        assert_eq!(entries, Some(1));
        assert_eq!(value[0]["latitude"], 28.5);
        assert_eq!(value[0]["error"], "");
        assert_eq!(value[0]["digipin"].as_str().map(str::len), Some(13));
        Ok(())
    }
}
