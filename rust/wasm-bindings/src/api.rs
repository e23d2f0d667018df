// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JavaScript API for psycad
//!
//! Synchronous mesh generation for the CAD viewer. Errors surface as thrown
//! strings so the viewer can keep showing the last good mesh.

use crate::mesh_data::MeshBuffersJs;
use crate::utils::log_notices;
use psycad_core::Shape;
use psycad_geometry::generate_mesh_with_notices;
use wasm_bindgen::prelude::*;

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Main psycad API
#[wasm_bindgen]
pub struct CadAPI {}

#[wasm_bindgen]
impl CadAPI {
    /// Create and initialize the CAD API
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        crate::utils::set_panic_hook();
        Self {}
    }

    /// Get version string
    #[wasm_bindgen(getter)]
    pub fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Generate mesh buffers from a shape object
    ///
    /// Example:
    /// ```javascript
    /// const api = new CadAPI();
    /// const mesh = api.generateMesh({
    ///   shape: "cube",
    ///   parameters: { width: 2, height: 2, depth: 2 },
    ///   position: [0, 0, 0],
    ///   rotation: [0, 0, 0],
    ///   operations: [],
    ///   material: { color: "#ffffff", metalness: 0, roughness: 1 },
    /// });
    /// geometry.setAttribute("position", new THREE.BufferAttribute(mesh.vertices, 3));
    /// ```
    #[wasm_bindgen(js_name = generateMesh)]
    pub fn generate_mesh(&self, shape: JsValue) -> Result<MeshBuffersJs, JsValue> {
        let shape: Shape = serde_wasm_bindgen::from_value(shape).map_err(to_js_error)?;
        generate(&shape)
    }

    /// Generate mesh buffers from a shape JSON string
    #[wasm_bindgen(js_name = generateMeshFromJson)]
    pub fn generate_mesh_from_json(&self, json: &str) -> Result<MeshBuffersJs, JsValue> {
        let shape = Shape::from_json(json).map_err(to_js_error)?;
        generate(&shape)
    }

    /// Parameter panel descriptors for a shape JSON string
    ///
    /// Returns an array of `{ name, value, default, min, max, step, unit }`.
    #[wasm_bindgen(js_name = parameterSpecs)]
    pub fn parameter_specs(&self, shape: &str) -> Result<JsValue, JsValue> {
        let shape = Shape::from_json(shape).map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&shape.parameter_panel()).map_err(JsValue::from)
    }

    /// Set one named dimension and return the updated shape JSON
    ///
    /// Rejects unknown names and values that fail validation.
    #[wasm_bindgen(js_name = setParameter)]
    pub fn set_parameter(&self, shape: &str, name: &str, value: f64) -> Result<String, JsValue> {
        let mut shape = Shape::from_json(shape).map_err(to_js_error)?;
        shape.parameters.set(name, value).map_err(to_js_error)?;
        shape.to_json().map_err(to_js_error)
    }
}

impl Default for CadAPI {
    fn default() -> Self {
        Self::new()
    }
}

fn generate(shape: &Shape) -> Result<MeshBuffersJs, JsValue> {
    let generated = generate_mesh_with_notices(shape).map_err(to_js_error)?;
    log_notices(&generated.notices);
    Ok(MeshBuffersJs::new(generated, &shape.material))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_from_json() {
        let api = CadAPI::new();
        let mesh = api
            .generate_mesh_from_json(r#"{"shape":"cone","parameters":{"segments":8}}"#)
            .unwrap_or_else(|_| panic!("cone should generate"));
        assert_eq!(mesh.vertex_count(), 35);
        assert_eq!(mesh.triangle_count(), 16);
        assert_eq!(mesh.metalness(), 0.0);
        assert_eq!(mesh.roughness(), 1.0);
    }

    #[test]
    fn test_default_reports_crate_version() {
        let api = CadAPI::default();
        assert_eq!(api.version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_set_parameter_round_trips() {
        let api = CadAPI::new();
        let updated = api
            .set_parameter(r#"{"shape":"cube"}"#, "width", 3.0)
            .unwrap_or_else(|_| panic!("width should be accepted"));
        let shape = Shape::from_json(&updated).unwrap();
        assert_eq!(shape.parameters.width, Some(3.0));
    }
}
