// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh generation off the async runtime.

use crate::error::ApiError;
use crate::types::{GenerationStats, MaterialInfo, MeshResponse};
use psycad_core::Shape;
use psycad_geometry::generate_mesh_with_notices;
use rayon::prelude::*;
use std::time::Instant;

/// Run the pipeline for one shape. CPU-bound; call from a blocking thread.
pub fn generate(shape: &Shape, cache_key: String) -> Result<MeshResponse, ApiError> {
    let start = Instant::now();
    let generated = generate_mesh_with_notices(shape)?;
    let generation_time_ms = start.elapsed().as_millis() as u64;

    Ok(MeshResponse {
        cache_key,
        stats: GenerationStats {
            vertex_count: generated.buffers.vertex_count(),
            triangle_count: generated.buffers.triangle_count(),
            generation_time_ms,
            from_cache: false,
        },
        mesh: generated.buffers,
        material: MaterialInfo::from(&shape.material),
        notices: generated.notices,
    })
}

/// Generate a batch on the rayon pool. Results keep input order.
pub fn generate_all(shapes: &[Shape]) -> Vec<Result<MeshResponse, ApiError>> {
    shapes
        .par_iter()
        .map(|shape| {
            let key = crate::services::DiskCache::shape_key(shape)?;
            generate(shape, key)
        })
        .collect()
}

/// [`generate`] on tokio's blocking pool.
pub async fn generate_blocking(shape: Shape, cache_key: String) -> Result<MeshResponse, ApiError> {
    tokio::task::spawn_blocking(move || generate(&shape, cache_key)).await?
}

/// [`generate_all`] on tokio's blocking pool.
pub async fn generate_all_blocking(shapes: Vec<Shape>) -> Result<Vec<Result<MeshResponse, ApiError>>, ApiError> {
    Ok(tokio::task::spawn_blocking(move || generate_all(&shapes)).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use psycad_core::Material;

    #[test]
    fn test_generate_fills_stats_and_material() {
        let shape = Shape::new("cube").with_material(Material {
            color: "#00ff00".into(),
            metalness: 0.2,
            roughness: 0.8,
        });
        let response = generate(&shape, "key".into()).unwrap();
        assert_eq!(response.stats.vertex_count, 24);
        assert_eq!(response.stats.triangle_count, 12);
        assert!(!response.stats.from_cache);
        assert_eq!(response.material.rgba, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(response.material.metalness, 0.2);
    }

    #[test]
    fn test_batch_errors_stay_in_place() {
        let results = generate_all(&[Shape::new("torus"), Shape::new("sphere")]);
        assert!(matches!(results[0], Err(ApiError::UnsupportedShape(_))));
        assert!(results[1].is_ok());
    }
}
