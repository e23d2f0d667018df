// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Disk-based cache service using cacache.

use crate::error::ApiError;
use psycad_core::Shape;
use serde::{de::DeserializeOwned, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Content-addressable disk cache.
#[derive(Debug, Clone)]
pub struct DiskCache {
    cache_dir: PathBuf,
    enabled: bool,
}

impl DiskCache {
    /// Create a new cache in the specified directory.
    pub async fn new(cache_dir: &str, enabled: bool) -> Self {
        let path = PathBuf::from(cache_dir);

        if enabled {
            if let Err(e) = tokio::fs::create_dir_all(&path).await {
                tracing::warn!(
                    error = %e,
                    path = %path.display(),
                    "Failed to create cache directory"
                );
            }
        }

        Self {
            cache_dir: path,
            enabled,
        }
    }

    /// Generate a cache key from raw bytes (SHA256 hash).
    pub fn generate_key(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hex::encode(hasher.finalize())
    }

    /// Cache key of a shape: its canonical JSON plus the server version.
    ///
    /// Keys change across releases so a tessellation change never serves
    /// stale meshes.
    pub fn shape_key(shape: &Shape) -> Result<String, ApiError> {
        let mut data = format!("{}\n", env!("CARGO_PKG_VERSION")).into_bytes();
        data.extend(serde_json::to_vec(shape)?);
        Ok(Self::generate_key(&data))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get a cached value by key.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ApiError> {
        if !self.enabled {
            return Ok(None);
        }
        match cacache::read(&self.cache_dir, key).await {
            Ok(data) => {
                let value: T = serde_json::from_slice(&data)?;
                Ok(Some(value))
            }
            Err(cacache::Error::EntryNotFound(_, _)) => Ok(None),
            Err(e) => Err(ApiError::Cache(e.to_string())),
        }
    }

    /// Set a cached value.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ApiError> {
        if !self.enabled {
            return Ok(());
        }
        let data = serde_json::to_vec(value)?;
        cacache::write(&self.cache_dir, key, &data).await?;
        tracing::debug!(key = %key, size = data.len(), "Cached result");
        Ok(())
    }
}
