use crate::core::codec::{decode, encode};
use crate::util::coord::LatLng;
use crate::util::error::DigipinError;
use rayon::ThreadPool;
use rayon::prelude::*;
use std::num::NonZeroUsize;
use tracing::debug;

/// Options for the concurrent batch functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Maximum number of worker threads.
    pub workers: usize,
}

impl Default for BatchOptions {
    /// One worker per available processor.
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self { workers }
    }
}

impl BatchOptions {
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Builds a worker pool sized to `workers`.
    ///
    /// Callers running many batches (e.g. chunked file conversion) build the
    /// pool once and hand it to [`batch_encode_in_pool`] / [`batch_decode_in_pool`].
    pub fn thread_pool(&self) -> Result<ThreadPool, DigipinError> {
        if self.workers == 0 {
            return Err(DigipinError::InvalidConfig(
                "Worker count must be at least 1".to_string(),
            ));
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| DigipinError::InvalidConfig(e.to_string()))
    }
}

/// Encodes each coordinate, keeping one result per input.
///
/// ```
/// use digipin_rs::{LatLng, batch_encode};
///
/// let results = batch_encode(&[LatLng::new(28.6139, 77.2090), LatLng::new(0.0, 0.0)]);
/// assert_eq!(results[0].as_deref(), Ok("39J-438-TJC7"));
/// assert!(results[1].is_err());
/// ```
pub fn batch_encode(coords: &[LatLng]) -> Vec<Result<String, DigipinError>> {
    let results: Vec<_> = coords
        .iter()
        .map(|c| encode(c.latitude, c.longitude))
        .collect();
    log_summary("encode", &results);
    results
}

/// Decodes each code, keeping one result per input.
pub fn batch_decode<S: AsRef<str>>(codes: &[S]) -> Vec<Result<LatLng, DigipinError>> {
    let results: Vec<_> = codes.iter().map(|code| decode(code.as_ref())).collect();
    log_summary("decode", &results);
    results
}

/// [`batch_encode`] spread over a bounded worker pool.
///
/// Output order matches input order regardless of which worker finishes first.
pub fn batch_encode_concurrent(
    coords: &[LatLng],
    options: &BatchOptions,
) -> Result<Vec<Result<String, DigipinError>>, DigipinError> {
    let pool = options.thread_pool()?;
    Ok(batch_encode_in_pool(&pool, coords))
}

/// [`batch_decode`] spread over a bounded worker pool.
pub fn batch_decode_concurrent<S: AsRef<str> + Sync>(
    codes: &[S],
    options: &BatchOptions,
) -> Result<Vec<Result<LatLng, DigipinError>>, DigipinError> {
    let pool = options.thread_pool()?;
    Ok(batch_decode_in_pool(&pool, codes))
}

/// [`batch_encode`] on an existing pool.
pub fn batch_encode_in_pool(
    pool: &ThreadPool,
    coords: &[LatLng],
) -> Vec<Result<String, DigipinError>> {
    debug!(
        workers = pool.current_num_threads(),
        inputs = coords.len(),
        "concurrent batch encode"
    );
    let results: Vec<_> = pool.install(|| {
        coords
            .par_iter()
            .map(|c| encode(c.latitude, c.longitude))
            .collect()
    });
    log_summary("encode", &results);
    results
}

/// [`batch_decode`] on an existing pool.
pub fn batch_decode_in_pool<S: AsRef<str> + Sync>(
    pool: &ThreadPool,
    codes: &[S],
) -> Vec<Result<LatLng, DigipinError>> {
    debug!(
        workers = pool.current_num_threads(),
        inputs = codes.len(),
        "concurrent batch decode"
    );
    let results: Vec<_> =
        pool.install(|| codes.par_iter().map(|code| decode(code.as_ref())).collect());
    log_summary("decode", &results);
    results
}

fn log_summary<T>(op: &str, results: &[Result<T, DigipinError>]) {
    let failed = results.iter().filter(|r| r.is_err()).count();
    debug!(op, total = results.len(), failed, "batch complete");
}
