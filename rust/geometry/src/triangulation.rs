// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation for CSG output
//!
//! CSG results come back as planar n-gons. They are projected onto their
//! own plane and cut into triangles with earcutr, keeping the winding of the
//! source polygon.

use crate::{Error, Point2, Point3, Result, Vector3};

/// Check if a polygon is convex (all cross products have same sign)
#[inline]
fn is_convex(points: &[Point2<f64>]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }

    let mut sign = 0i8;
    for i in 0..n {
        let p0 = &points[i];
        let p1 = &points[(i + 1) % n];
        let p2 = &points[(i + 2) % n];
        let cross = (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x);

        if cross.abs() > 1e-10 {
            let current = if cross > 0.0 { 1i8 } else { -1i8 };
            if sign == 0 {
                sign = current;
            } else if sign != current {
                return false;
            }
        }
    }
    true
}

/// Triangulate a simple polygon (no holes).
/// Returns triangle indices into the input points.
pub fn triangulate_polygon(points: &[Point2<f64>]) -> Result<Vec<usize>> {
    let n = points.len();
    if n < 3 {
        return Err(Error::TriangulationError(
            "Need at least 3 points to triangulate".to_string(),
        ));
    }

    // Convex polygons (every BSP split of a convex face) fan from vertex 0
    if n == 3 || is_convex(points) {
        let mut indices = Vec::with_capacity((n - 2) * 3);
        for i in 1..n - 1 {
            indices.extend_from_slice(&[0, i, i + 1]);
        }
        return Ok(indices);
    }

    let flat: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    earcutr::earcut(&flat, &[], 2).map_err(|e| Error::TriangulationError(format!("{:?}", e)))
}

/// Project 3D points onto the plane through the first point with the given normal.
///
/// The 2D basis `(u, v)` satisfies `u × v = normal`, so counter-clockwise
/// order in 2D is counter-clockwise around the normal in 3D.
pub fn project_to_2d(points_3d: &[Point3<f64>], normal: &Vector3<f64>) -> Vec<Point2<f64>> {
    let Some(origin) = points_3d.first() else {
        return Vec::new();
    };

    // Reference axis least parallel to the normal
    let reference = if normal.x.abs() <= normal.y.abs() && normal.x.abs() <= normal.z.abs() {
        Vector3::x()
    } else if normal.y.abs() <= normal.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };

    let u_axis = normal.cross(&reference).normalize();
    let v_axis = normal.cross(&u_axis).normalize();

    points_3d
        .iter()
        .map(|p| {
            let d = p - origin;
            Point2::new(d.dot(&u_axis), d.dot(&v_axis))
        })
        .collect()
}

/// Newell's method normal of a planar polygon; `None` when degenerate
pub fn polygon_normal(points: &[Point3<f64>]) -> Option<Vector3<f64>> {
    if points.len() < 3 {
        return None;
    }

    let mut normal = Vector3::<f64>::zeros();
    for (i, current) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal.try_normalize(1e-12)
}

/// Triangulate a planar 3D polygon.
///
/// Triangles whose winding disagrees with `normal` are flipped; zero-area
/// triangles are dropped.
pub fn triangulate_face(points: &[Point3<f64>], normal: &Vector3<f64>) -> Result<Vec<[usize; 3]>> {
    let projected = project_to_2d(points, normal);
    let indices = triangulate_polygon(&projected)?;

    let triangles = indices
        .chunks_exact(3)
        .filter_map(|tri| {
            let (a, b, c) = (tri[0], tri[1], tri[2]);
            let winding = (points[b] - points[a]).cross(&(points[c] - points[a]));
            let facing = winding.dot(normal);
            if facing.abs() < 1e-14 {
                None
            } else if facing > 0.0 {
                Some([a, b, c])
            } else {
                Some([a, c, b])
            }
        })
        .collect();
    Ok(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangulate_square() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert_eq!(triangulate_polygon(&points).unwrap().len(), 6);
    }

    #[test]
    fn test_triangulate_concave() {
        // L-shape, 6 vertices, 4 triangles
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        let indices = triangulate_polygon(&points).unwrap();
        assert_eq!(indices.len(), 12);
    }

    #[test]
    fn test_triangulate_insufficient_points() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        assert!(triangulate_polygon(&points).is_err());
    }

    #[test]
    fn test_polygon_normal() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let normal = polygon_normal(&points).unwrap();
        assert!((normal.z - 1.0).abs() < 1e-9);

        let collinear = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert!(polygon_normal(&collinear).is_none());
    }

    #[test]
    fn test_triangulate_face_keeps_winding() {
        // Square facing -Z, listed clockwise when seen from +Z
        let points = vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
        ];
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let triangles = triangulate_face(&points, &normal).unwrap();
        assert_eq!(triangles.len(), 2);
        for [a, b, c] in triangles {
            let n = (points[b] - points[a]).cross(&(points[c] - points[a]));
            assert!(n.z < 0.0);
        }
    }
}
