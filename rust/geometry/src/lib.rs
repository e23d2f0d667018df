// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! psycad Geometry Processing
//!
//! Turns parametric shape descriptors into renderer-ready mesh buffers:
//! closed-form primitive tessellation, pose transforms with nalgebra, and
//! boolean composition through csgrs.

pub mod csg;
pub mod error;
pub mod extract;
pub mod mesh;
pub mod operations;
pub mod pipeline;
pub mod primitives;
pub mod transform;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use error::{Error, Result};
pub use extract::{extract_buffers, MeshBuffers};
pub use mesh::Mesh;
pub use operations::{apply_operations, placeholder_operand, Notice};
pub use pipeline::{build_solid, generate_batch, generate_mesh, generate_mesh_with_notices, GeneratedMesh};
pub use primitives::build_primitive;
pub use transform::{apply_pose, pose_matrix};
