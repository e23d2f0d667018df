// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! psycad Server - mesh generation over HTTP.
//!
//! Accepts parametric shape descriptors as JSON and returns renderer-ready
//! mesh buffers. Results are cached on disk by shape content.
//!
//! # Endpoints
//!
//! - `GET /api/v1/health` - Health check
//! - `POST /api/v1/mesh` - Generate one shape
//! - `POST /api/v1/mesh/batch` - Generate several shapes in parallel
//! - `GET /api/v1/cache/:key` - Retrieve cached result

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;
mod services;
mod types;

use config::Config;
use services::cache::DiskCache;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<DiskCache>,
    pub config: Arc<Config>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,psycad_server=debug"));

    // LOG_FORMAT=json for log shippers, pretty output otherwise
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).pretty().init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env();

    tracing::info!(
        port = config.port,
        cache_dir = %config.cache_dir,
        cache_enabled = config.cache_enabled,
        max_body_size_kb = config.max_body_size_kb,
        worker_threads = config.worker_threads,
        max_batch_size = config.max_batch_size,
        "Starting psycad Server"
    );

    // Initialize rayon thread pool
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()?;

    // Initialize cache
    let cache = Arc::new(DiskCache::new(&config.cache_dir, config.cache_enabled).await);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState {
        cache,
        config: Arc::new(config),
    };
    let app = routes::app(state);

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
