// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pose transforms
//!
//! A shape's pose is its position plus XYZ Euler rotation. The object
//! transform is `T * Rx * Ry * Rz`: vertices are rotated about the local
//! origin and then moved to `position`.

use crate::mesh::Mesh;
use nalgebra::{Matrix3, Matrix4, Point3, Rotation3, Vector3};

/// Rotation matrix for intrinsic XYZ Euler angles (radians)
pub fn euler_xyz(rotation: [f64; 3]) -> Rotation3<f64> {
    let [x, y, z] = rotation;
    Rotation3::from_axis_angle(&Vector3::x_axis(), x)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), y)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), z)
}

/// 4x4 object transform for a pose
pub fn pose_matrix(position: [f64; 3], rotation: [f64; 3]) -> Matrix4<f64> {
    let translation = Matrix4::new_translation(&Vector3::from(position));
    translation * euler_xyz(rotation).to_homogeneous()
}

/// Whether a pose leaves geometry untouched
#[inline]
pub fn is_identity_pose(position: [f64; 3], rotation: [f64; 3]) -> bool {
    position == [0.0; 3] && rotation == [0.0; 3]
}

/// Transform positions by `transform` and normals by its normal matrix.
///
/// UVs and indices are unchanged. Consumes and returns the mesh.
pub fn transform_mesh(mut mesh: Mesh, transform: &Matrix4<f64>) -> Mesh {
    let linear: Matrix3<f64> = transform.fixed_view::<3, 3>(0, 0).into_owned();
    let normal_matrix = linear
        .try_inverse()
        .map(|inv| inv.transpose())
        .unwrap_or(linear);

    mesh.positions.chunks_exact_mut(3).for_each(|chunk| {
        let p = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let t = transform.transform_point(&p);
        chunk[0] = t.x as f32;
        chunk[1] = t.y as f32;
        chunk[2] = t.z as f32;
    });

    mesh.normals.chunks_exact_mut(3).for_each(|chunk| {
        let n = Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let t = (normal_matrix * n).try_normalize(1e-12).unwrap_or(n);
        chunk[0] = t.x as f32;
        chunk[1] = t.y as f32;
        chunk[2] = t.z as f32;
    });

    mesh
}

/// Apply a shape pose, skipping the work for the identity pose
pub fn apply_pose(mesh: Mesh, position: [f64; 3], rotation: [f64; 3]) -> Mesh {
    if is_identity_pose(position, rotation) {
        return mesh;
    }
    transform_mesh(mesh, &pose_matrix(position, rotation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_translation_only() {
        let m = pose_matrix([1.0, -2.0, 3.0], [0.0; 3]);
        let p = m.transform_point(&Point3::new(0.5, 0.5, 0.5));
        assert_relative_eq!(p, Point3::new(1.5, -1.5, 3.5));
    }

    #[test]
    fn test_rotation_then_translation() {
        // Quarter turn about Z sends +X to +Y, then translate
        let m = pose_matrix([10.0, 0.0, 0.0], [0.0, 0.0, FRAC_PI_2]);
        let p = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(10.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_xyz_order() {
        // X then Y (intrinsic): Rx * Ry applied to +Z
        let r = euler_xyz([FRAC_PI_2, FRAC_PI_2, 0.0]);
        let v = r * Vector3::z();
        // Ry sends +Z to +X, Rx leaves +X alone
        assert_relative_eq!(v, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn test_normals_rotate_with_mesh() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(
            Point3::new(1.0, 0.0, 0.0),
            Vector3::x(),
            nalgebra::Point2::origin(),
        );
        let mesh = apply_pose(mesh, [0.0, 5.0, 0.0], [0.0, 0.0, FRAC_PI_2]);
        assert_relative_eq!(mesh.normal(0), Vector3::y(), epsilon = 1e-6);
        assert_relative_eq!(mesh.position(0), Point3::new(0.0, 6.0, 0.0), epsilon = 1e-6);
    }
}
