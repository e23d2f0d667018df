// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use crate::error::ErrorResponse;
use psycad_core::Material;
use psycad_geometry::{MeshBuffers, Notice};
use serde::{Deserialize, Serialize};

/// Fallback when the material colour cannot be parsed.
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// One generated shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshResponse {
    /// Cache key for this result (SHA256 of the shape and server version).
    pub cache_key: String,
    pub mesh: MeshBuffers,
    pub material: MaterialInfo,
    /// Operations that were requested but left the geometry unchanged.
    pub notices: Vec<Notice>,
    pub stats: GenerationStats,
}

/// Material resolved for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialInfo {
    /// Colour as [r, g, b, a] in 0-1 range.
    pub rgba: [f32; 4],
    pub metalness: f64,
    pub roughness: f64,
}

impl From<&Material> for MaterialInfo {
    fn from(material: &Material) -> Self {
        Self {
            rgba: material.rgba().unwrap_or(WHITE),
            metalness: material.metalness,
            roughness: material.roughness,
        }
    }
}

/// Generation statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationStats {
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Time spent in the mesh pipeline (ms).
    pub generation_time_ms: u64,
    /// Whether result was from cache.
    pub from_cache: bool,
}

/// Outcome of one shape inside a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchItem {
    Ok(MeshResponse),
    Error(ErrorResponse),
}

/// Body returned by `POST /api/v1/mesh/batch`; results keep request order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub results: Vec<BatchItem>,
    pub stats: BatchStats,
}

/// Batch statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Wall-clock time for the whole batch (ms).
    pub total_time_ms: u64,
}
