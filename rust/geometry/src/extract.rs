// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh buffer extraction
//!
//! Flat attribute arrays ready for a renderer (WebGL buffers, a native
//! engine, or JSON transport).

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};

/// Renderer-facing buffers of one generated solid
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshBuffers {
    /// Flat x, y, z triples
    pub vertices: Vec<f32>,
    /// Triangle list; empty when the source mesh is not indexed
    pub indices: Vec<u32>,
    /// Flat x, y, z triples, one per vertex
    pub normals: Vec<f32>,
    /// Flat u, v pairs, one per vertex
    pub uvs: Vec<f32>,
}

impl MeshBuffers {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Axis-aligned bounds as (min, max); zeros for an empty mesh
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        if self.is_empty() {
            return ([0.0; 3], [0.0; 3]);
        }
        self.vertices.chunks_exact(3).fold(
            ([f32::MAX; 3], [f32::MIN; 3]),
            |(mut min, mut max), v| {
                for axis in 0..3 {
                    min[axis] = min[axis].min(v[axis]);
                    max[axis] = max[axis].max(v[axis]);
                }
                (min, max)
            },
        )
    }
}

/// Copy a mesh's attributes into [`MeshBuffers`]. The mesh is not modified.
pub fn extract_buffers(mesh: &Mesh) -> Result<MeshBuffers> {
    if mesh.normals.len() != mesh.positions.len() {
        return Err(Error::MissingAttribute("normal"));
    }
    if mesh.uvs.len() * 3 != mesh.positions.len() * 2 {
        return Err(Error::MissingAttribute("uv"));
    }

    Ok(MeshBuffers {
        vertices: mesh.positions.clone(),
        indices: mesh.indices.clone(),
        normals: mesh.normals.clone(),
        uvs: mesh.uvs.clone(),
    })
}
