// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

use std::str::FromStr;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Directory for cache storage.
    pub cache_dir: String,
    /// Whether generated meshes are written to and served from the cache.
    pub cache_enabled: bool,
    /// Maximum request body size in KB.
    pub max_body_size_kb: usize,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Number of worker threads for parallel batch generation.
    pub worker_threads: usize,
    /// Maximum number of shapes accepted by the batch endpoint.
    pub max_batch_size: usize,
    /// Allowed CORS origins (comma-separated, or "*" for all in development).
    pub cors_origins: Vec<String>,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            port: env_or("PORT", 8080),
            cache_dir: std::env::var("CACHE_DIR").unwrap_or_else(|_| {
                // Docker images create /app/cache; local runs use ./.cache
                if std::path::Path::new("/.dockerenv").exists() {
                    "/app/cache".into()
                } else {
                    std::env::current_dir()
                        .ok()
                        .and_then(|dir| dir.join(".cache").to_str().map(|s| s.to_string()))
                        .unwrap_or_else(|| "./.cache".into())
                }
            }),
            cache_enabled: env_or("CACHE_ENABLED", true),
            max_body_size_kb: env_or("MAX_BODY_SIZE_KB", 1024),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            worker_threads: env_or("WORKER_THREADS", num_cpus::get()).max(1),
            max_batch_size: env_or("MAX_BATCH_SIZE", 64),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| {
                    // Default: allow common development origins
                    "http://localhost:3000,http://localhost:5173,http://127.0.0.1:3000,http://127.0.0.1:5173".into()
                })
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Body limit in bytes.
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_size_kb * 1024
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
