// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape-to-mesh pipeline
//!
//! validate -> primitive -> pose -> operations -> buffers. Every stage is a
//! pure function of the shape, so the same shape always yields bit-identical
//! buffers and independent shapes can be generated in parallel.

use crate::error::Result;
use crate::extract::{extract_buffers, MeshBuffers};
use crate::operations::{apply_operations, Applied, Notice};
use crate::primitives::build_primitive;
use crate::transform::apply_pose;
use psycad_core::{Shape, ShapeKind};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Buffers plus the notices raised while producing them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMesh {
    pub buffers: MeshBuffers,
    pub notices: Vec<Notice>,
}

/// Generate renderer buffers for a shape
pub fn generate_mesh(shape: &Shape) -> Result<MeshBuffers> {
    generate_mesh_with_notices(shape).map(|generated| generated.buffers)
}

/// Generate renderer buffers, keeping notices about no-op operations
pub fn generate_mesh_with_notices(shape: &Shape) -> Result<GeneratedMesh> {
    shape.validate()?;

    let Applied { mesh, notices } = build_solid(shape)?;
    let buffers = extract_buffers(&mesh)?;

    tracing::debug!(
        shape = %shape.shape,
        operations = shape.operations.len(),
        vertices = buffers.vertex_count(),
        triangles = buffers.triangle_count(),
        notices = notices.len(),
        "Generated mesh"
    );

    Ok(GeneratedMesh { buffers, notices })
}

/// Generate several independent shapes in parallel. Results keep input order.
pub fn generate_batch(shapes: &[Shape]) -> Vec<Result<MeshBuffers>> {
    shapes.par_iter().map(generate_mesh).collect()
}

/// Build the posed solid of an already-validated shape, before extraction.
///
/// Also used for the second operand of boolean operations.
pub fn build_solid(shape: &Shape) -> Result<Applied> {
    if shape.kind != ShapeKind::Primitive {
        tracing::warn!(
            kind = ?shape.kind,
            shape = %shape.shape,
            "Only primitive shapes have dedicated geometry; building from the primitive kind"
        );
    }

    let base = build_primitive(&shape.shape, &shape.parameters)?;
    let posed = apply_pose(base, shape.position, shape.rotation);
    apply_operations(posed, &shape.operations)
}
