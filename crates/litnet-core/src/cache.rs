//! Memoised normalization keyed by input content.

use std::collections::HashMap;
use std::sync::Arc;

use litnet_model::PreprocessOptions;
use sha2::Digest;

use crate::preprocess::PreparedTable;

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

/// Content digest of the input plus the options it was prepared with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub digest: String,
    pub options: PreprocessOptions,
}

impl CacheKey {
    pub fn new(bytes: &[u8], options: &PreprocessOptions) -> Self {
        Self {
            digest: sha256_hex(bytes),
            options: options.clone(),
        }
    }
}

/// Prepared tables computed so far in this process.
///
/// Failed preparations are not stored.
#[derive(Debug, Default)]
pub struct PreparedCache {
    entries: HashMap<CacheKey, Arc<PreparedTable>>,
}

impl PreparedCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<PreparedTable>> {
        self.entries.get(key).cloned()
    }

    /// Returns the cached table for `bytes` and `options`, running `prepare`
    /// only on a miss.
    pub fn get_or_try_insert_with<F, E>(
        &mut self,
        bytes: &[u8],
        options: &PreprocessOptions,
        prepare: F,
    ) -> Result<Arc<PreparedTable>, E>
    where
        F: FnOnce() -> Result<PreparedTable, E>,
    {
        let key = CacheKey::new(bytes, options);
        if let Some(prepared) = self.entries.get(&key) {
            tracing::debug!(digest = %key.digest, "prepared table cache hit");
            return Ok(Arc::clone(prepared));
        }
        let prepared = Arc::new(prepare()?);
        tracing::debug!(digest = %key.digest, "prepared table cached");
        self.entries.insert(key, Arc::clone(&prepared));
        Ok(prepared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::normalize;
    use litnet_model::{AnalysisError, Result};
    use polars::prelude::{DataFrame, NamedFrom, Series};

    fn prepared() -> Result<PreparedTable> {
        let raw = DataFrame::new(vec![
            Series::new("Refid".into(), vec!["1", "2"]).into(),
            Series::new("Title".into(), vec!["T1", "T2"]).into(),
            Series::new("Abstract".into(), vec!["A1", "A2"]).into(),
            Series::new("Human".into(), vec![Some("Human"), None]).into(),
        ])?;
        normalize(&raw, &PreprocessOptions::default())
    }

    #[test]
    fn computes_once_per_input() {
        let mut cache = PreparedCache::new();
        let options = PreprocessOptions::default();
        let mut calls = 0;
        for _ in 0..3 {
            cache
                .get_or_try_insert_with(b"same bytes", &options, || {
                    calls += 1;
                    prepared()
                })
                .unwrap();
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_input_gets_a_new_entry() {
        let mut cache = PreparedCache::new();
        let options = PreprocessOptions::default();
        cache
            .get_or_try_insert_with(b"v1", &options, prepared)
            .unwrap();
        cache
            .get_or_try_insert_with(b"v2", &options, prepared)
            .unwrap();
        let other = options.clone().with_categorical_columns(vec!["Human".into()]);
        assert!(cache.get(&CacheKey::new(b"v1", &other)).is_none());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let mut cache = PreparedCache::new();
        let options = PreprocessOptions::default();
        cache
            .get_or_try_insert_with(b"data", &options, prepared)
            .unwrap();
        let result = cache.get_or_try_insert_with(b"broken", &options, || {
            Err(AnalysisError::configuration("bad input"))
        });
        assert!(result.is_err());
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&CacheKey::new(b"data", &options)).is_some());
    }

    #[test]
    fn digest_is_hex_sha256() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
