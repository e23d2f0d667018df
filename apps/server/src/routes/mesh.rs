// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh generation and cache retrieval endpoints.

use crate::error::ApiError;
use crate::services::{generate_all_blocking, generate_blocking, DiskCache};
use crate::types::{BatchItem, BatchRequest, BatchResponse, BatchStats, MeshOptions, MeshResponse};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use psycad_core::Shape;
use std::time::Instant;

/// POST /api/v1/mesh - Generate one shape, serving from cache when possible.
pub async fn generate(
    State(state): State<AppState>,
    query: Result<Query<MeshOptions>, QueryRejection>,
    body: Result<Json<Shape>, JsonRejection>,
) -> Result<Json<MeshResponse>, ApiError> {
    let Query(options) = query?;
    let Json(shape) = body?;
    let cache_key = DiskCache::shape_key(&shape)?;

    if !options.skip_cache {
        if let Some(mut cached) = state.cache.get::<MeshResponse>(&cache_key).await? {
            tracing::info!(cache_key = %cache_key, "Cache HIT");
            cached.stats.from_cache = true;
            return Ok(Json(cached));
        }
    }

    tracing::info!(
        cache_key = %cache_key,
        shape = %shape.shape,
        operations = shape.operations.len(),
        "Cache MISS - generating"
    );

    let response = generate_blocking(shape, cache_key.clone()).await?;

    // Cache result (background)
    let cache = state.cache.clone();
    let response_clone = response.clone();
    tokio::spawn(async move {
        if let Err(e) = cache.set(&cache_key, &response_clone).await {
            tracing::error!(error = %e, "Failed to cache result");
        }
    });

    Ok(Json(response))
}

/// POST /api/v1/mesh/batch - Generate independent shapes in parallel.
///
/// A failing shape does not fail the batch; its slot carries the error.
pub async fn generate_batch(
    State(state): State<AppState>,
    body: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, ApiError> {
    let Json(request) = body?;
    let max = state.config.max_batch_size;
    if request.shapes.len() > max {
        return Err(ApiError::BatchTooLarge { max });
    }

    let start = Instant::now();
    let total = request.shapes.len();
    let results: Vec<BatchItem> = generate_all_blocking(request.shapes)
        .await?
        .into_iter()
        .map(|result| match result {
            Ok(response) => BatchItem::Ok(response),
            Err(e) => BatchItem::Error(e.to_body()),
        })
        .collect();

    let succeeded = results.iter().filter(|item| matches!(item, BatchItem::Ok(_))).count();
    let stats = BatchStats {
        total,
        succeeded,
        failed: total - succeeded,
        total_time_ms: start.elapsed().as_millis() as u64,
    };

    tracing::info!(total, succeeded, failed = stats.failed, "Generated batch");

    Ok(Json(BatchResponse { results, stats }))
}

/// GET /api/v1/cache/:key - Retrieve cached result.
pub async fn get_cached(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<MeshResponse>, ApiError> {
    tracing::debug!(key = %key, "Cache lookup");

    match state.cache.get::<MeshResponse>(&key).await? {
        Some(mut response) => {
            response.stats.from_cache = true;
            tracing::info!(key = %key, "Cache HIT");
            Ok(Json(response))
        }
        None => {
            tracing::debug!(key = %key, "Cache MISS");
            Err(ApiError::NotFound(format!("Cache key not found: {}", key)))
        }
    }
}
