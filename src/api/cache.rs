//! Bounded memoization for encode/decode.
//!
//! The cache is a plain value: construct it once, wrap it in an `Arc` and hand
//! it to every caller that should share it. Cached values are pure functions
//! of their key, so concurrent callers racing on the same key store the same
//! result.

use crate::core::codec::{decode, encode};
use crate::util::coord::LatLng;
use crate::util::error::DigipinError;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default number of entries kept per direction.
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Hit/miss counters for a [`CodecCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe LRU cache in front of [`encode`] and [`decode`].
///
/// Encode entries are keyed by the coordinate formatted to six decimals, so
/// inputs that agree to roughly 0.1 m share an entry. Decode entries are keyed
/// by the code string exactly as given.
///
/// # Example
///
/// ```
/// use digipin_rs::CodecCache;
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let cache = Arc::new(CodecCache::with_default_capacity());
/// let pin = cache.encode(28.6139, 77.2090)?;
/// assert_eq!(cache.encode(28.6139, 77.2090)?, pin);
/// assert_eq!(cache.stats().hits, 1);
/// # Ok(())
/// # }
/// ```
pub struct CodecCache {
    encoded: Mutex<LruCache<String, String>>,
    decoded: Mutex<LruCache<String, LatLng>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CodecCache {
    /// Create a cache holding up to `capacity` entries per direction (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            encoded: Mutex::new(LruCache::new(cap)),
            decoded: Mutex::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }

    /// Cache key for a coordinate.
    pub fn coordinate_key(lat: f64, lng: f64) -> String {
        format!("{:.6},{:.6}", lat, lng)
    }

    pub fn get_encode(&self, lat: f64, lng: f64) -> Option<String> {
        let found = self
            .encoded
            .lock()
            .get(&Self::coordinate_key(lat, lng))
            .cloned();
        self.record(found.is_some());
        found
    }

    pub fn insert_encode(&self, lat: f64, lng: f64, code: String) {
        self.encoded
            .lock()
            .put(Self::coordinate_key(lat, lng), code);
    }

    pub fn get_decode(&self, code: &str) -> Option<LatLng> {
        let found = self.decoded.lock().get(code).copied();
        self.record(found.is_some());
        found
    }

    pub fn insert_decode(&self, code: &str, coord: LatLng) {
        self.decoded.lock().put(code.to_string(), coord);
    }

    /// Read-through [`encode`]. Errors are returned but never cached.
    pub fn encode(&self, lat: f64, lng: f64) -> Result<String, DigipinError> {
        if let Some(code) = self.get_encode(lat, lng) {
            return Ok(code);
        }
        let code = encode(lat, lng)?;
        self.insert_encode(lat, lng, code.clone());
        Ok(code)
    }

    /// Read-through [`decode`]. Errors are returned but never cached.
    pub fn decode(&self, code: &str) -> Result<LatLng, DigipinError> {
        if let Some(coord) = self.get_decode(code) {
            return Ok(coord);
        }
        let coord = decode(code)?;
        self.insert_decode(code, coord);
        Ok(coord)
    }

    /// Number of cached entries across both directions.
    pub fn len(&self) -> usize {
        self.encoded.lock().len() + self.decoded.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.encoded.lock().cap().get()
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        self.encoded.lock().clear();
        self.decoded.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn record(&self, hit: bool) {
        let counter = if hit { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for CodecCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
