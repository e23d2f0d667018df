// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh buffers handed to JavaScript
//!
//! Getters copy into fresh typed arrays, so the JS side owns what it reads.

use psycad_core::Material;
use psycad_geometry::{GeneratedMesh, MeshBuffers, Notice};
use wasm_bindgen::prelude::*;

/// Fallback when the material colour cannot be parsed
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Generated solid plus its material
#[wasm_bindgen]
pub struct MeshBuffersJs {
    buffers: MeshBuffers,
    color: [f32; 4], // RGBA
    metalness: f64,
    roughness: f64,
    notices: Vec<Notice>,
}

impl MeshBuffersJs {
    pub(crate) fn new(generated: GeneratedMesh, material: &Material) -> Self {
        Self {
            buffers: generated.buffers,
            color: material.rgba().unwrap_or(WHITE),
            metalness: material.metalness,
            roughness: material.roughness,
            notices: generated.notices,
        }
    }
}

#[wasm_bindgen]
impl MeshBuffersJs {
    /// Get vertex positions as Float32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn vertices(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.buffers.vertices[..])
    }

    /// Get normals as Float32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn normals(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.buffers.normals[..])
    }

    /// Get texture coordinates as Float32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn uvs(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.buffers.uvs[..])
    }

    /// Get indices as Uint32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn indices(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(&self.buffers.indices[..])
    }

    /// Get color as [r, g, b, a] array
    #[wasm_bindgen(getter)]
    pub fn color(&self) -> Vec<f32> {
        self.color.to_vec()
    }

    #[wasm_bindgen(getter)]
    pub fn metalness(&self) -> f64 {
        self.metalness
    }

    #[wasm_bindgen(getter)]
    pub fn roughness(&self) -> f64 {
        self.roughness
    }

    #[wasm_bindgen(getter, js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.buffers.vertex_count()
    }

    #[wasm_bindgen(getter, js_name = triangleCount)]
    pub fn triangle_count(&self) -> usize {
        self.buffers.triangle_count()
    }

    /// Notices about operations that left the geometry unchanged
    #[wasm_bindgen(getter)]
    pub fn notices(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.notices).map_err(JsValue::from)
    }

    /// Check if mesh is empty
    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_is_attached() {
        let generated = GeneratedMesh {
            buffers: MeshBuffers::default(),
            notices: Vec::new(),
        };
        let material = Material {
            color: "#ff0000".to_string(),
            metalness: 0.5,
            roughness: 0.25,
        };
        let mesh = MeshBuffersJs::new(generated, &material);
        assert_eq!(mesh.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(mesh.metalness(), 0.5);
        assert_eq!(mesh.roughness(), 0.25);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_unparseable_color_falls_back_to_white() {
        let generated = GeneratedMesh {
            buffers: MeshBuffers::default(),
            notices: Vec::new(),
        };
        let material = Material {
            color: "not-a-colour".to_string(),
            ..Material::default()
        };
        assert_eq!(MeshBuffersJs::new(generated, &material).color, WHITE);
    }
}
