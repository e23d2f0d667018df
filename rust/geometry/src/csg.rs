// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CSG (Constructive Solid Geometry) bridge
//!
//! Converts between our indexed [`Mesh`] and csgrs polygon soups and runs
//! the three boolean combinators. csgrs carries positions and normals only,
//! so texture coordinates on CSG output are regenerated by box projection.

use crate::mesh::Mesh;
use crate::triangulation::{polygon_normal, triangulate_face};
use nalgebra::{Point2, Point3, Vector3};
use psycad_core::BooleanOp;
use thiserror::Error;

type CsgMesh = csgrs::mesh::Mesh<()>;

/// Why a boolean combination could not be computed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CsgFailure {
    #[error("{0} operand has no non-degenerate faces")]
    DegenerateOperand(&'static str),

    #[error("result contains non-finite coordinates")]
    NonFinite,

    #[error("all {dropped} planar result polygons failed triangulation")]
    Triangulation { dropped: usize },
}

/// Combine `lhs` with `rhs`. Order matters for difference.
pub fn boolean(lhs: &Mesh, rhs: &Mesh, op: BooleanOp) -> Result<Mesh, CsgFailure> {
    use csgrs::traits::CSG;

    let lhs_csg = mesh_to_csgrs(lhs);
    if !lhs.is_empty() && lhs_csg.polygons.is_empty() {
        return Err(CsgFailure::DegenerateOperand("first"));
    }
    let rhs_csg = mesh_to_csgrs(rhs);
    if rhs_csg.polygons.is_empty() {
        return Err(CsgFailure::DegenerateOperand("second"));
    }

    let result = match op {
        BooleanOp::Union => lhs_csg.union(&rhs_csg),
        BooleanOp::Difference => lhs_csg.difference(&rhs_csg),
        BooleanOp::Intersection => lhs_csg.intersection(&rhs_csg),
    };

    let (mesh, dropped) = csgrs_to_mesh(&result);
    if dropped > 0 {
        tracing::warn!(
            operation = op.as_str(),
            dropped,
            polygons = result.polygons.len(),
            "Dropped result polygons that could not be triangulated"
        );
        if mesh.is_empty() {
            return Err(CsgFailure::Triangulation { dropped });
        }
    }
    if !mesh.is_finite() {
        return Err(CsgFailure::NonFinite);
    }
    Ok(mesh)
}

/// Convert our Mesh format to csgrs Mesh format
fn mesh_to_csgrs(mesh: &Mesh) -> CsgMesh {
    use csgrs::mesh::{polygon::Polygon, vertex::Vertex};
    use std::sync::OnceLock;

    if mesh.is_empty() {
        return CsgMesh {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
            metadata: None,
        };
    }

    let mut polygons = Vec::with_capacity(mesh.triangle_count());
    for [i0, i1, i2] in mesh.triangles() {
        let (v0, v1, v2) = (mesh.position(i0), mesh.position(i1), mesh.position(i2));

        // Skip zero-area triangles to avoid NaN planes in the BSP tree
        let face_normal = match (v1 - v0).cross(&(v2 - v0)).try_normalize(1e-12) {
            Some(n) => n,
            None => continue,
        };

        // Keep smooth vertex normals where they exist so curved faces stay shaded
        let vertex_normal = |i: usize| {
            mesh.normal(i)
                .try_normalize(1e-12)
                .unwrap_or(face_normal)
        };

        let vertices = vec![
            Vertex::new(v0, vertex_normal(i0)),
            Vertex::new(v1, vertex_normal(i1)),
            Vertex::new(v2, vertex_normal(i2)),
        ];
        polygons.push(Polygon::new(vertices, None));
    }

    CsgMesh::from_polygons(&polygons, None)
}

/// Convert csgrs Mesh format back to our Mesh format.
///
/// Also returns how many polygons had a plane but yielded no triangles.
fn csgrs_to_mesh(csg_mesh: &CsgMesh) -> (Mesh, usize) {
    let mut mesh = Mesh::new();
    let mut dropped = 0;

    for polygon in &csg_mesh.polygons {
        let points: Vec<Point3<f64>> = polygon
            .vertices
            .iter()
            .map(|v| Point3::new(v.pos[0], v.pos[1], v.pos[2]))
            .collect();
        let normals: Vec<Vector3<f64>> = polygon
            .vertices
            .iter()
            .map(|v| Vector3::new(v.normal[0], v.normal[1], v.normal[2]))
            .collect();

        if append_polygon(&mut mesh, &points, &normals) == Appended::Dropped {
            dropped += 1;
        }
    }

    (mesh, dropped)
}

/// Outcome of appending one output polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Appended {
    Added,
    /// Fewer than three points or no plane: slivers the BSP split leaves behind
    Degenerate,
    /// Had a plane but triangulation produced nothing usable
    Dropped,
}

fn append_polygon(mesh: &mut Mesh, points: &[Point3<f64>], normals: &[Vector3<f64>]) -> Appended {
    if points.len() < 3 {
        return Appended::Degenerate;
    }
    let Some(face_normal) = polygon_normal(points) else {
        return Appended::Degenerate;
    };

    let triangles = match triangulate_face(points, &face_normal) {
        Ok(triangles) if !triangles.is_empty() => triangles,
        _ => return Appended::Dropped,
    };

    let base = mesh.vertex_count() as u32;
    for (point, raw) in points.iter().zip(normals.iter()) {
        let normal = match raw.try_normalize(1e-12) {
            Some(n) if n.iter().all(|c| c.is_finite()) => n,
            _ => face_normal,
        };
        mesh.add_vertex(*point, normal, box_projection_uv(point, &face_normal));
    }
    for [a, b, c] in triangles {
        mesh.add_triangle(base + a as u32, base + b as u32, base + c as u32);
    }
    Appended::Added
}

/// Planar UV from the two axes orthogonal to the dominant normal axis
fn box_projection_uv(point: &Point3<f64>, normal: &Vector3<f64>) -> Point2<f64> {
    let (ax, ay, az) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
    if ax >= ay && ax >= az {
        Point2::new(point.z, point.y)
    } else if ay >= az {
        Point2::new(point.x, point.z)
    } else {
        Point2::new(point.x, point.y)
    }
}
