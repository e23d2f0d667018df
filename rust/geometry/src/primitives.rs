// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Primitive builder
//!
//! Closed-form tessellation of the supported primitives. All solids are
//! Y-up and centred on the origin, with vertex layout, normals and UVs
//! matching the three.js geometries the viewer was built against:
//!
//! - cube: 6 faces, 4 vertices each (normals split per face)
//! - cylinder / cone: side wall of `(segments + 1) * 2` vertices plus caps
//! - sphere: `(segments + 1)^2` vertices, pole triangles omitted

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use nalgebra::{Point2, Point3, Vector3};
use psycad_core::{Primitive, ShapeParameters};
use std::f64::consts::{PI, TAU};

/// Build the base mesh for a primitive kind
pub fn build_primitive(primitive: &Primitive, params: &ShapeParameters) -> Result<Mesh> {
    match primitive {
        Primitive::Cube => Ok(box_mesh(params.width(), params.height(), params.depth())),
        Primitive::Cylinder => Ok(cylinder_mesh(
            params.radius(),
            params.radius(),
            params.height(),
            params.segments(),
        )),
        Primitive::Sphere => Ok(sphere_mesh(params.radius(), params.segments(), params.segments())),
        Primitive::Cone => Ok(cylinder_mesh(0.0, params.radius(), params.height(), params.segments())),
        Primitive::Other(name) => Err(Error::UnsupportedShape(name.clone())),
    }
}

/// Axis-aligned box centred on the origin
pub fn box_mesh(width: f64, height: f64, depth: f64) -> Mesh {
    let mut mesh = Mesh::with_capacity(24, 36);

    // (u, v, w) axes, u/v direction signs, plane extents and offset along w
    box_face(&mut mesh, [2, 1, 0], -1.0, -1.0, depth, height, width); // +x
    box_face(&mut mesh, [2, 1, 0], 1.0, -1.0, depth, height, -width); // -x
    box_face(&mut mesh, [0, 2, 1], 1.0, 1.0, width, depth, height); // +y
    box_face(&mut mesh, [0, 2, 1], 1.0, -1.0, width, depth, -height); // -y
    box_face(&mut mesh, [0, 1, 2], 1.0, -1.0, width, height, depth); // +z
    box_face(&mut mesh, [0, 1, 2], -1.0, -1.0, width, height, -depth); // -z

    mesh
}

fn box_face(
    mesh: &mut Mesh,
    [u, v, w]: [usize; 3],
    u_dir: f64,
    v_dir: f64,
    width: f64,
    height: f64,
    depth: f64,
) {
    let start = mesh.vertex_count() as u32;
    let facing = if depth > 0.0 { 1.0 } else { -1.0 };

    for iy in 0..2 {
        let y = iy as f64 * height - height / 2.0;
        for ix in 0..2 {
            let x = ix as f64 * width - width / 2.0;

            let mut position = Point3::origin();
            position[u] = x * u_dir;
            position[v] = y * v_dir;
            position[w] = depth / 2.0;

            let mut normal = Vector3::zeros();
            normal[w] = facing;

            mesh.add_vertex(position, normal, Point2::new(ix as f64, 1.0 - iy as f64));
        }
    }

    let (a, b, c, d) = (start, start + 2, start + 3, start + 1);
    mesh.add_triangle(a, b, d);
    mesh.add_triangle(b, c, d);
}

/// Capped cylinder along Y. A zero `radius_top` gives a cone.
pub fn cylinder_mesh(radius_top: f64, radius_bottom: f64, height: f64, segments: u32) -> Mesh {
    let segments = segments as usize;
    let mut mesh = Mesh::with_capacity((segments + 1) * 4 + segments * 2, segments * 12);
    let half_height = height / 2.0;
    let slope = (radius_bottom - radius_top) / height;

    // Side wall: one row at the top, one at the bottom
    let mut rows = [Vec::with_capacity(segments + 1), Vec::with_capacity(segments + 1)];
    for (y, row) in rows.iter_mut().enumerate() {
        let v = y as f64;
        let radius = v * (radius_bottom - radius_top) + radius_top;
        for x in 0..=segments {
            let u = x as f64 / segments as f64;
            let (sin, cos) = (u * TAU).sin_cos();
            let position = Point3::new(radius * sin, -v * height + half_height, radius * cos);
            let normal = Vector3::new(sin, slope, cos).normalize();
            row.push(mesh.add_vertex(position, normal, Point2::new(u, 1.0 - v)));
        }
    }

    for x in 0..segments {
        let a = rows[0][x];
        let b = rows[1][x];
        let c = rows[1][x + 1];
        let d = rows[0][x + 1];
        if radius_top > 0.0 {
            mesh.add_triangle(a, b, d);
        }
        if radius_bottom > 0.0 {
            mesh.add_triangle(b, c, d);
        }
    }

    if radius_top > 0.0 {
        cylinder_cap(&mut mesh, radius_top, half_height, segments, true);
    }
    if radius_bottom > 0.0 {
        cylinder_cap(&mut mesh, radius_bottom, half_height, segments, false);
    }

    mesh
}

fn cylinder_cap(mesh: &mut Mesh, radius: f64, half_height: f64, segments: usize, top: bool) {
    let sign = if top { 1.0 } else { -1.0 };
    let normal = Vector3::new(0.0, sign, 0.0);

    // One centre vertex per segment so each wedge gets its own UV
    let centre_start = mesh.vertex_count() as u32;
    for _ in 0..segments {
        mesh.add_vertex(
            Point3::new(0.0, half_height * sign, 0.0),
            normal,
            Point2::new(0.5, 0.5),
        );
    }

    let rim_start = mesh.vertex_count() as u32;
    for x in 0..=segments {
        let u = x as f64 / segments as f64;
        let (sin, cos) = (u * TAU).sin_cos();
        mesh.add_vertex(
            Point3::new(radius * sin, half_height * sign, radius * cos),
            normal,
            Point2::new(cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5),
        );
    }

    for x in 0..segments as u32 {
        let c = centre_start + x;
        let i = rim_start + x;
        if top {
            mesh.add_triangle(i, i + 1, c);
        } else {
            mesh.add_triangle(i + 1, i, c);
        }
    }
}

/// UV sphere centred on the origin
pub fn sphere_mesh(radius: f64, width_segments: u32, height_segments: u32) -> Mesh {
    let (ws, hs) = (width_segments as usize, height_segments as usize);
    let mut mesh = Mesh::with_capacity((ws + 1) * (hs + 1), ws * hs * 6);
    let mut grid = Vec::with_capacity(hs + 1);

    for iy in 0..=hs {
        let v = iy as f64 / hs as f64;

        // Pole vertices sit halfway across their wedge in texture space
        let u_offset = if iy == 0 {
            0.5 / ws as f64
        } else if iy == hs {
            -0.5 / ws as f64
        } else {
            0.0
        };

        let (sin_theta, cos_theta) = (v * PI).sin_cos();
        let mut row = Vec::with_capacity(ws + 1);
        for ix in 0..=ws {
            let u = ix as f64 / ws as f64;
            let (sin_phi, cos_phi) = (u * TAU).sin_cos();
            let direction = Vector3::new(-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
            let normal = direction.try_normalize(0.0).unwrap_or_else(Vector3::y);
            row.push(mesh.add_vertex(
                Point3::from(direction * radius),
                normal,
                Point2::new(u + u_offset, 1.0 - v),
            ));
        }
        grid.push(row);
    }

    for iy in 0..hs {
        for ix in 0..ws {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            if iy != 0 {
                mesh.add_triangle(a, b, d);
            }
            if iy != hs - 1 {
                mesh.add_triangle(b, c, d);
            }
        }
    }

    mesh
}
