//! Centerline extraction from subdivided cylindrical meshes
//!
//! A cylinder with `H` height subdivisions carries `H + 1` vertex loops. Averaging each loop's
//! vertices yields an ordered run of centroids -- the mesh's structural centerline -- which the
//! generator uses as attachment anchors for child geometry. Extraction reads the deformed
//! vertex buffer, so a bent trunk yields a bent centerline.

use crate::kernel::MeshKernel;
use crate::{Error, Float, MeshId, Point3};

/// One loop centroid along a cylindrical mesh's height axis
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CenterlinePoint {
    /// Index of the loop this centroid belongs to, `0` at the base
    pub loop_index: usize,
    pub pos: Point3,
}

/// Computes the loop centroids of a cylindrical mesh, in ascending loop order
///
/// The vertex buffer is assumed loop-major, then axial-minor: the vertex for `(loop, axial)`
/// sits at `loop * axial_subdivs + axial`. Anything past the loop span (cap centers) is
/// ignored.
///
/// Fails with [`Error::EmptyMesh`] if the mesh has no faces or its vertex buffer is smaller
/// than the declared subdivision counts require. The kernel is only queried, never mutated.
pub fn extract_centerline<K: MeshKernel + ?Sized>(
    kernel: &K,
    mesh: MeshId,
    height_subdivs: usize,
    axial_subdivs: usize,
) -> Result<Vec<CenterlinePoint>, Error> {
    let loop_count = height_subdivs + 1;

    if kernel.face_count(mesh)? == 0 {
        return Err(Error::EmptyMesh(format!("{:?} has no faces", mesh)));
    }

    let vertices = kernel.world_vertices(mesh)?;
    if vertices.len() < loop_count * axial_subdivs || axial_subdivs == 0 {
        return Err(Error::EmptyMesh(format!(
            "{:?} has {} vertices, but {} loops of {} were declared",
            mesh,
            vertices.len(),
            loop_count,
            axial_subdivs,
        )));
    }

    let mut points = Vec::with_capacity(loop_count);
    for loop_index in 0..loop_count {
        let start = loop_index * axial_subdivs;
        let sum = vertices[start..start + axial_subdivs]
            .iter()
            .fold(Point3::ZERO, |acc, &v| acc + v);

        points.push(CenterlinePoint {
            loop_index,
            pos: sum / axial_subdivs as Float,
        });
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::SceneKernel;

    #[test]
    fn straight_cylinder_centroids_sit_on_the_axis() {
        let mut kernel = SceneKernel::new();
        let id = kernel.create_cylinder(10.0, 1.0, 5, 8).unwrap();

        let points = extract_centerline(&kernel, id, 5, 8).unwrap();
        assert_eq!(points.len(), 6);

        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.loop_index, i);
            assert!(point.pos.x.abs() < 1e-5);
            assert!(point.pos.z.abs() < 1e-5);
            let expected_y = -5.0 + 2.0 * i as Float;
            assert!((point.pos.y - expected_y).abs() < 1e-5);
        }
    }

    #[test]
    fn deformed_loop_shifts_its_centroid() {
        let mut kernel = SceneKernel::new();
        let id = kernel.create_cylinder(10.0, 1.0, 5, 8).unwrap();
        kernel
            .move_loop(id, 5, Point3::new(4.0, 0.0, 2.0))
            .unwrap();

        let points = extract_centerline(&kernel, id, 5, 8).unwrap();
        let tip = points.last().unwrap();
        assert!((tip.pos.x - 4.0).abs() < 1e-5);
        assert!((tip.pos.z - 2.0).abs() < 1e-5);

        // the loop below stayed put
        assert!(points[4].pos.x.abs() < 1e-5);
    }

    #[test]
    fn inconsistent_buffer_is_reported() {
        let mut kernel = SceneKernel::new();
        // a plane only has 4 vertices, nowhere near 3 loops of 8
        let id = kernel.create_plane(1.0, 1.0).unwrap();

        let err = extract_centerline(&kernel, id, 2, 8).unwrap_err();
        assert!(matches!(err, Error::EmptyMesh(_)));
    }

    #[test]
    fn stale_handle_surfaces_as_kernel_error() {
        let mut kernel = SceneKernel::new();
        let id = kernel.create_cylinder(10.0, 1.0, 5, 8).unwrap();
        kernel.delete(id).unwrap();

        let err = extract_centerline(&kernel, id, 5, 8).unwrap_err();
        assert!(matches!(err, Error::Kernel(_)));
    }
}
