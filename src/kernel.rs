//! The mesh-kernel seam between the generator and whatever engine owns the geometry
//!
//! The generator stages only ever talk to [`MeshKernel`]; the trait is shaped so that any mesh
//! engine with parametric primitives, transforms and a scene hierarchy can sit behind it.
//! [`SceneKernel`] is the in-memory implementation this crate ships: meshes live in a pair of
//! tombstoned arenas (one per primitive kind, matching the [`MeshId`] encoding) and transforms
//! keep the conventions of a typical DCC package -- euler triples accumulated componentwise,
//! rotation and scale applied about a movable pivot, and parenting that preserves world
//! placement.

use crate::{Float, MeshId, MeshKind, Point3};
use thiserror::Error;

/// Number of trailing cap-center vertices in a cylinder's vertex buffer
///
/// Cylinder buffers are loop-major followed by one center vertex per cap; centerline extraction
/// only reads the loop span and skips these.
pub const CAP_VERTICES: usize = 2;

/// An opaque failure from the kernel. The generator reports these without interpreting them.
#[derive(Debug, Error, PartialEq)]
pub enum KernelError {
    /// The handle doesn't name a live mesh (never created, or already deleted)
    #[error("stale or unknown mesh handle {0:?}")]
    StaleHandle(MeshId),

    /// A cylinder-only operation was applied to a plane
    #[error("operation `{op}` requires a cylinder, but {id:?} is a plane")]
    NotACylinder { id: MeshId, op: &'static str },

    /// A loop index was past the end of the mesh's loop span
    #[error("loop index {index} out of range for {id:?} ({count} loops)")]
    LoopOutOfRange {
        id: MeshId,
        index: usize,
        count: usize,
    },

    /// A mesh cannot be parented to itself
    #[error("cannot parent {0:?} to itself")]
    SelfParent(MeshId),
}

/// The order in which the three euler angles of a rotation are applied
///
/// `Zxy` is the order the generator uses throughout, matching the rigging convention of keeping
/// yaw (Y) as the outermost rotation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RotateOrder {
    Xyz,
    Zxy,
}

impl RotateOrder {
    /// Applies `euler` (degrees) to a point in this order
    fn apply(self, point: Point3, euler: Point3) -> Point3 {
        let (x, y, z) = (
            euler.x.to_radians(),
            euler.y.to_radians(),
            euler.z.to_radians(),
        );
        match self {
            RotateOrder::Xyz => point.rotated_x(x).rotated_y(y).rotated_z(z),
            RotateOrder::Zxy => point.rotated_z(z).rotated_x(x).rotated_y(y),
        }
    }
}

/// The abstract mesh engine consumed by the generator stages
///
/// All angles are euler triples in degrees. Operations are relative unless documented otherwise.
pub trait MeshKernel {
    /// Creates a cylinder centered on its local origin, growing along Y, with `height_subdivs`
    /// bands of faces (and therefore `height_subdivs + 1` vertex loops) and `axial_subdivs`
    /// vertices per loop
    fn create_cylinder(
        &mut self,
        height: Float,
        radius: Float,
        height_subdivs: usize,
        axial_subdivs: usize,
    ) -> Result<MeshId, KernelError>;

    /// Creates a single-quad plane lying in the local XZ plane
    fn create_plane(&mut self, width: Float, height: Float) -> Result<MeshId, KernelError>;

    /// Returns the mesh's vertices in world space, loop-major then axial-minor for cylinders
    fn world_vertices(&self, id: MeshId) -> Result<Vec<Point3>, KernelError>;

    /// Returns the axis-aligned world bounding box as `(min, max)`
    fn bounding_box(&self, id: MeshId) -> Result<(Point3, Point3), KernelError>;

    /// Returns the number of faces on the mesh
    fn face_count(&self, id: MeshId) -> Result<usize, KernelError>;

    /// Returns `(height_subdivs, axial_subdivs)` of a cylinder
    fn cylinder_subdivisions(&self, id: MeshId) -> Result<(usize, usize), KernelError>;

    /// Moves the mesh's pivot by `offset` in local space, without moving the geometry
    fn set_pivot(&mut self, id: MeshId, offset: Point3) -> Result<(), KernelError>;

    /// Moves the mesh's pivot to its geometric center, without moving the geometry
    fn center_pivot(&mut self, id: MeshId) -> Result<(), KernelError>;

    /// Positions the mesh so its pivot lands at `target` (absolute)
    fn move_to(&mut self, id: MeshId, target: Point3) -> Result<(), KernelError>;

    /// Adds `euler` (degrees) to the mesh's rotation and records `order` as its rotate order
    fn rotate(&mut self, id: MeshId, euler: Point3, order: RotateOrder) -> Result<(), KernelError>;

    /// Returns the mesh's accumulated world rotation as an euler triple in degrees
    fn rotation(&self, id: MeshId) -> Result<Point3, KernelError>;

    /// Multiplies the mesh's scale factors componentwise, pivoting from the current pivot
    fn scale(&mut self, id: MeshId, factors: Point3) -> Result<(), KernelError>;

    /// Offsets the vertices of one loop of a cylinder, in the mesh's local frame
    fn move_loop(&mut self, id: MeshId, loop_index: usize, offset: Point3)
        -> Result<(), KernelError>;

    /// Rotates the vertices of one loop about the loop's own centroid (euler degrees, Z-X-Y)
    fn rotate_loop(
        &mut self,
        id: MeshId,
        loop_index: usize,
        euler: Point3,
    ) -> Result<(), KernelError>;

    /// Scales the vertices of one loop about the loop's own centroid
    fn scale_loop(
        &mut self,
        id: MeshId,
        loop_index: usize,
        factors: Point3,
    ) -> Result<(), KernelError>;

    /// Records `parent` as the parent of `child`, preserving the child's world placement
    fn parent(&mut self, child: MeshId, parent: MeshId) -> Result<(), KernelError>;

    /// Deletes the mesh and, recursively, everything parented beneath it
    fn delete(&mut self, id: MeshId) -> Result<(), KernelError>;

    /// Returns whether the handle names a live mesh
    fn contains(&self, id: MeshId) -> bool;

    /// Returns the nominal radius of a cylinder
    fn radius(&self, id: MeshId) -> Result<Float, KernelError>;

    /// Sets the nominal radius of a cylinder, rescaling its cross-sections proportionally
    fn set_radius(&mut self, id: MeshId, value: Float) -> Result<(), KernelError>;
}

/// Per-mesh record inside [`SceneKernel`]
#[derive(Debug, Clone)]
struct MeshData {
    /// Local-space vertex buffer, including any deformation applied after creation
    vertices: Vec<Point3>,
    /// Creation parameters still needed for queries: `(height_subdivs, axial_subdivs)` for
    /// cylinders, `None` for planes
    subdivisions: Option<(usize, usize)>,
    /// Nominal cylinder radius (unused for planes)
    radius: Float,
    face_count: usize,
    /// Pivot position in local space
    pivot: Point3,
    /// World position of the pivot
    translation: Point3,
    /// Accumulated euler rotation, degrees
    euler: Point3,
    rotate_order: RotateOrder,
    /// Accumulated scale factors
    scale: Point3,
    parent: Option<MeshId>,
}

impl MeshData {
    /// Maps a local vertex to world space: translate + rotate/scale about the pivot
    fn to_world(&self, v: Point3) -> Point3 {
        let about_pivot = (v - self.pivot).mul_componentwise(self.scale);
        self.translation + self.pivot + self.rotate_order.apply(about_pivot, self.euler)
    }

    /// Centroid of the local vertex buffer
    fn local_center(&self) -> Point3 {
        let sum = self
            .vertices
            .iter()
            .fold(Point3::ZERO, |acc, &v| acc + v);
        sum / self.vertices.len() as Float
    }

    /// Moves the pivot to `target` (local space) while compensating the translation so that no
    /// vertex moves in world space
    fn rebase_pivot(&mut self, target: Point3) {
        let old = self.pivot;
        let about = (target - old).mul_componentwise(self.scale);
        self.translation =
            self.translation + (old - target) + self.rotate_order.apply(about, self.euler);
        self.pivot = target;
    }
}

/// In-memory [`MeshKernel`] implementation backing the CLI and the tests
///
/// Storage mirrors the [`MeshId`] encoding: cylinders and planes each get their own arena, and a
/// deleted slot becomes a tombstone so stale handles are detected instead of aliasing a later
/// mesh.
#[derive(Debug, Default)]
pub struct SceneKernel {
    cylinders: Vec<Option<MeshData>>,
    planes: Vec<Option<MeshData>>,
}

impl SceneKernel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live meshes across both arenas
    pub fn live_count(&self) -> usize {
        self.cylinders
            .iter()
            .chain(self.planes.iter())
            .filter(|slot| slot.is_some())
            .count()
    }

    fn arena(&self, kind: MeshKind) -> &Vec<Option<MeshData>> {
        match kind {
            MeshKind::Cylinder => &self.cylinders,
            MeshKind::Plane => &self.planes,
        }
    }

    fn arena_mut(&mut self, kind: MeshKind) -> &mut Vec<Option<MeshData>> {
        match kind {
            MeshKind::Cylinder => &mut self.cylinders,
            MeshKind::Plane => &mut self.planes,
        }
    }

    fn get(&self, id: MeshId) -> Result<&MeshData, KernelError> {
        let (kind, idx) = id.deconstruct();
        self.arena(kind)
            .get(idx)
            .and_then(Option::as_ref)
            .ok_or(KernelError::StaleHandle(id))
    }

    fn get_mut(&mut self, id: MeshId) -> Result<&mut MeshData, KernelError> {
        let (kind, idx) = id.deconstruct();
        self.arena_mut(kind)
            .get_mut(idx)
            .and_then(Option::as_mut)
            .ok_or(KernelError::StaleHandle(id))
    }

    fn push(&mut self, kind: MeshKind, data: MeshData) -> MeshId {
        let arena = self.arena_mut(kind);
        let idx = arena.len();
        arena.push(Some(data));
        MeshId::new(kind, idx)
    }

    /// Borrows the vertex range of one cylinder loop, validating the index
    fn loop_range(
        &mut self,
        id: MeshId,
        loop_index: usize,
        op: &'static str,
    ) -> Result<(&mut MeshData, usize, usize), KernelError> {
        let data = self.get_mut(id)?;
        let (height_subdivs, axial_subdivs) = data
            .subdivisions
            .ok_or(KernelError::NotACylinder { id, op })?;
        let loop_count = height_subdivs + 1;
        if loop_index >= loop_count {
            return Err(KernelError::LoopOutOfRange {
                id,
                index: loop_index,
                count: loop_count,
            });
        }
        Ok((data, loop_index * axial_subdivs, axial_subdivs))
    }

    /// Live ids parented (directly) to `id`
    fn children_of(&self, id: MeshId) -> Vec<MeshId> {
        let collect = |arena: &Vec<Option<MeshData>>, kind: MeshKind| {
            arena
                .iter()
                .enumerate()
                .filter_map(|(idx, slot)| slot.as_ref().map(|data| (idx, data)))
                .filter(|(_, data)| data.parent == Some(id))
                .map(|(idx, _)| MeshId::new(kind, idx))
                .collect::<Vec<_>>()
        };

        let mut children = collect(&self.cylinders, MeshKind::Cylinder);
        children.extend(collect(&self.planes, MeshKind::Plane));
        children
    }
}

impl MeshKernel for SceneKernel {
    fn create_cylinder(
        &mut self,
        height: Float,
        radius: Float,
        height_subdivs: usize,
        axial_subdivs: usize,
    ) -> Result<MeshId, KernelError> {
        let loop_count = height_subdivs + 1;
        let mut vertices = Vec::with_capacity(loop_count * axial_subdivs + CAP_VERTICES);

        // Loops run bottom to top; within each loop, vertices run around the circumference.
        for loop_index in 0..loop_count {
            let y = -height * 0.5 + height * loop_index as Float / height_subdivs as Float;
            for axial in 0..axial_subdivs {
                let angle = crate::float::TAU * axial as Float / axial_subdivs as Float;
                vertices.push(Point3::new(radius * angle.cos(), y, radius * angle.sin()));
            }
        }
        vertices.push(Point3::new(0.0, -height * 0.5, 0.0));
        vertices.push(Point3::new(0.0, height * 0.5, 0.0));

        // side bands plus one triangle fan per cap
        let face_count = axial_subdivs * height_subdivs + 2 * axial_subdivs;

        Ok(self.push(
            MeshKind::Cylinder,
            MeshData {
                vertices,
                subdivisions: Some((height_subdivs, axial_subdivs)),
                radius,
                face_count,
                pivot: Point3::ZERO,
                translation: Point3::ZERO,
                euler: Point3::ZERO,
                rotate_order: RotateOrder::Zxy,
                scale: Point3::new(1.0, 1.0, 1.0),
                parent: None,
            },
        ))
    }

    fn create_plane(&mut self, width: Float, height: Float) -> Result<MeshId, KernelError> {
        let (hw, hh) = (width * 0.5, height * 0.5);
        let vertices = vec![
            Point3::new(-hw, 0.0, -hh),
            Point3::new(hw, 0.0, -hh),
            Point3::new(-hw, 0.0, hh),
            Point3::new(hw, 0.0, hh),
        ];

        Ok(self.push(
            MeshKind::Plane,
            MeshData {
                vertices,
                subdivisions: None,
                radius: 0.0,
                face_count: 1,
                pivot: Point3::ZERO,
                translation: Point3::ZERO,
                euler: Point3::ZERO,
                rotate_order: RotateOrder::Zxy,
                scale: Point3::new(1.0, 1.0, 1.0),
                parent: None,
            },
        ))
    }

    fn world_vertices(&self, id: MeshId) -> Result<Vec<Point3>, KernelError> {
        let data = self.get(id)?;
        Ok(data.vertices.iter().map(|&v| data.to_world(v)).collect())
    }

    fn bounding_box(&self, id: MeshId) -> Result<(Point3, Point3), KernelError> {
        let vertices = self.world_vertices(id)?;

        let mut min = vertices[0];
        let mut max = vertices[0];
        for v in &vertices[1..] {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }
        Ok((min, max))
    }

    fn face_count(&self, id: MeshId) -> Result<usize, KernelError> {
        Ok(self.get(id)?.face_count)
    }

    fn cylinder_subdivisions(&self, id: MeshId) -> Result<(usize, usize), KernelError> {
        self.get(id)?.subdivisions.ok_or(KernelError::NotACylinder {
            id,
            op: "cylinder_subdivisions",
        })
    }

    fn set_pivot(&mut self, id: MeshId, offset: Point3) -> Result<(), KernelError> {
        let data = self.get_mut(id)?;
        let target = data.pivot + offset;
        data.rebase_pivot(target);
        Ok(())
    }

    fn center_pivot(&mut self, id: MeshId) -> Result<(), KernelError> {
        let data = self.get_mut(id)?;
        let center = data.local_center();
        data.rebase_pivot(center);
        Ok(())
    }

    fn move_to(&mut self, id: MeshId, target: Point3) -> Result<(), KernelError> {
        let data = self.get_mut(id)?;
        // the pivot's world position is translation + pivot
        data.translation = target - data.pivot;
        Ok(())
    }

    fn rotate(&mut self, id: MeshId, euler: Point3, order: RotateOrder) -> Result<(), KernelError> {
        let data = self.get_mut(id)?;
        data.euler += euler;
        data.rotate_order = order;
        Ok(())
    }

    fn rotation(&self, id: MeshId) -> Result<Point3, KernelError> {
        Ok(self.get(id)?.euler)
    }

    fn scale(&mut self, id: MeshId, factors: Point3) -> Result<(), KernelError> {
        let data = self.get_mut(id)?;
        data.scale = data.scale.mul_componentwise(factors);
        Ok(())
    }

    fn move_loop(
        &mut self,
        id: MeshId,
        loop_index: usize,
        offset: Point3,
    ) -> Result<(), KernelError> {
        let (data, start, len) = self.loop_range(id, loop_index, "move_loop")?;
        for v in &mut data.vertices[start..start + len] {
            *v += offset;
        }
        Ok(())
    }

    fn rotate_loop(
        &mut self,
        id: MeshId,
        loop_index: usize,
        euler: Point3,
    ) -> Result<(), KernelError> {
        let (data, start, len) = self.loop_range(id, loop_index, "rotate_loop")?;
        let ring = &mut data.vertices[start..start + len];
        let centroid = ring.iter().fold(Point3::ZERO, |acc, &v| acc + v) / len as Float;
        for v in ring {
            *v = centroid + RotateOrder::Zxy.apply(*v - centroid, euler);
        }
        Ok(())
    }

    fn scale_loop(
        &mut self,
        id: MeshId,
        loop_index: usize,
        factors: Point3,
    ) -> Result<(), KernelError> {
        let (data, start, len) = self.loop_range(id, loop_index, "scale_loop")?;
        let ring = &mut data.vertices[start..start + len];
        let centroid = ring.iter().fold(Point3::ZERO, |acc, &v| acc + v) / len as Float;
        for v in ring {
            *v = centroid + (*v - centroid).mul_componentwise(factors);
        }
        Ok(())
    }

    fn parent(&mut self, child: MeshId, parent: MeshId) -> Result<(), KernelError> {
        if child == parent {
            return Err(KernelError::SelfParent(child));
        }
        // validate the parent handle before touching the child
        self.get(parent)?;
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn delete(&mut self, id: MeshId) -> Result<(), KernelError> {
        // validate first so a stale handle is an error rather than a no-op
        self.get(id)?;
        for child in self.children_of(id) {
            // children were live a moment ago; the recursion can't fail on them
            let _ = self.delete(child);
        }

        let (kind, idx) = id.deconstruct();
        self.arena_mut(kind)[idx] = None;
        Ok(())
    }

    fn contains(&self, id: MeshId) -> bool {
        self.get(id).is_ok()
    }

    fn radius(&self, id: MeshId) -> Result<Float, KernelError> {
        let data = self.get(id)?;
        data.subdivisions
            .map(|_| data.radius)
            .ok_or(KernelError::NotACylinder { id, op: "radius" })
    }

    fn set_radius(&mut self, id: MeshId, value: Float) -> Result<(), KernelError> {
        let data = self.get_mut(id)?;
        if data.subdivisions.is_none() {
            return Err(KernelError::NotACylinder {
                id,
                op: "set_radius",
            });
        }

        let factor = value / data.radius;
        for v in &mut data.vertices {
            v.x *= factor;
            v.z *= factor;
        }
        data.radius = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Point3, expected: Point3) {
        let d = actual - expected;
        let dist = (d.x * d.x + d.y * d.y + d.z * d.z).sqrt();
        assert!(dist < 1e-4, "{:?} != {:?}", actual, expected);
    }

    #[test]
    fn cylinder_vertex_layout() {
        let mut kernel = SceneKernel::new();
        let id = kernel.create_cylinder(10.0, 1.0, 5, 8).unwrap();

        let vertices = kernel.world_vertices(id).unwrap();
        // 6 loops of 8, plus the two cap centers
        assert_eq!(vertices.len(), 6 * 8 + CAP_VERTICES);

        // loop 0 sits at the bottom, the last loop at the top
        assert_eq!(vertices[0].y, -5.0);
        assert_eq!(vertices[5 * 8].y, 5.0);

        // every loop vertex is on the radius
        for v in &vertices[..6 * 8] {
            let r = (v.x * v.x + v.z * v.z).sqrt();
            assert!((r - 1.0).abs() < 1e-5);
        }

        assert_eq!(kernel.face_count(id).unwrap(), 8 * 5 + 2 * 8);
        assert_eq!(kernel.cylinder_subdivisions(id).unwrap(), (5, 8));
    }

    #[test]
    fn pivot_rebase_keeps_geometry_fixed() {
        let mut kernel = SceneKernel::new();
        let id = kernel.create_cylinder(4.0, 0.5, 2, 6).unwrap();

        let before = kernel.world_vertices(id).unwrap();
        kernel.set_pivot(id, Point3::new(0.0, -2.0, 0.0)).unwrap();
        let after = kernel.world_vertices(id).unwrap();

        for (b, a) in before.iter().zip(after.iter()) {
            assert_close(*a, *b);
        }
    }

    #[test]
    fn move_to_targets_the_pivot() {
        let mut kernel = SceneKernel::new();
        let id = kernel.create_cylinder(4.0, 0.5, 2, 6).unwrap();

        // pivot at the base, then place the base at (1, 2, 3)
        kernel.set_pivot(id, Point3::new(0.0, -2.0, 0.0)).unwrap();
        kernel.move_to(id, Point3::new(1.0, 2.0, 3.0)).unwrap();

        let vertices = kernel.world_vertices(id).unwrap();
        // the bottom loop should now be at y = 2, the top at y = 6
        assert!((vertices[0].y - 2.0).abs() < 1e-5);
        let top_start = 2 * 6;
        assert!((vertices[top_start].y - 6.0).abs() < 1e-5);
    }

    #[test]
    fn rotation_pivots_at_base() {
        let mut kernel = SceneKernel::new();
        let id = kernel.create_cylinder(2.0, 0.1, 1, 4).unwrap();
        kernel.set_pivot(id, Point3::new(0.0, -1.0, 0.0)).unwrap();
        kernel.move_to(id, Point3::ZERO).unwrap();

        // roll the cylinder 90 degrees about Z: the top cap center should move from (0, 2, 0)
        // to (-2, 0, 0)
        kernel
            .rotate(id, Point3::new(0.0, 0.0, 90.0), RotateOrder::Zxy)
            .unwrap();
        let vertices = kernel.world_vertices(id).unwrap();
        let top_center = vertices[vertices.len() - 1];
        assert_close(top_center, Point3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn set_radius_rescales_cross_sections() {
        let mut kernel = SceneKernel::new();
        let id = kernel.create_cylinder(6.0, 0.5, 3, 8).unwrap();

        kernel.set_radius(id, 0.25).unwrap();
        assert_eq!(kernel.radius(id).unwrap(), 0.25);

        let vertices = kernel.world_vertices(id).unwrap();
        for v in &vertices[..4 * 8] {
            let r = (v.x * v.x + v.z * v.z).sqrt();
            assert!((r - 0.25).abs() < 1e-5);
        }
    }

    #[test]
    fn loop_deformation_moves_only_that_loop() {
        let mut kernel = SceneKernel::new();
        let id = kernel.create_cylinder(4.0, 1.0, 2, 4).unwrap();

        kernel
            .move_loop(id, 2, Point3::new(3.0, 0.0, 0.0))
            .unwrap();

        let vertices = kernel.world_vertices(id).unwrap();
        let top_centroid = vertices[8..12]
            .iter()
            .fold(Point3::ZERO, |acc, &v| acc + v)
            / 4.0;
        assert_close(top_centroid, Point3::new(3.0, 2.0, 0.0));

        let bottom_centroid = vertices[0..4]
            .iter()
            .fold(Point3::ZERO, |acc, &v| acc + v)
            / 4.0;
        assert_close(bottom_centroid, Point3::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn loop_index_out_of_range() {
        let mut kernel = SceneKernel::new();
        let id = kernel.create_cylinder(4.0, 1.0, 2, 4).unwrap();

        let err = kernel.move_loop(id, 3, Point3::ZERO).unwrap_err();
        assert_eq!(
            err,
            KernelError::LoopOutOfRange {
                id,
                index: 3,
                count: 3
            }
        );
    }

    #[test]
    fn delete_cascades_to_children() {
        let mut kernel = SceneKernel::new();
        let trunk = kernel.create_cylinder(10.0, 1.0, 5, 8).unwrap();
        let twig = kernel.create_cylinder(4.0, 0.5, 3, 8).unwrap();
        let leaf = kernel.create_plane(0.75, 1.0).unwrap();

        kernel.parent(leaf, twig).unwrap();
        kernel.parent(twig, trunk).unwrap();
        assert_eq!(kernel.live_count(), 3);

        kernel.delete(trunk).unwrap();
        assert_eq!(kernel.live_count(), 0);
        assert!(!kernel.contains(twig));
        assert!(!kernel.contains(leaf));

        // deleting again reports the stale handle
        assert_eq!(
            kernel.delete(trunk).unwrap_err(),
            KernelError::StaleHandle(trunk)
        );
    }

    #[test]
    fn parenting_preserves_world_placement() {
        let mut kernel = SceneKernel::new();
        let trunk = kernel.create_cylinder(10.0, 1.0, 5, 8).unwrap();
        let twig = kernel.create_cylinder(4.0, 0.5, 3, 8).unwrap();
        kernel.move_to(twig, Point3::new(0.0, 3.0, 0.0)).unwrap();

        let before = kernel.world_vertices(twig).unwrap();
        kernel.parent(twig, trunk).unwrap();
        let after = kernel.world_vertices(twig).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn plane_rejects_cylinder_ops() {
        let mut kernel = SceneKernel::new();
        let leaf = kernel.create_plane(0.75, 1.0).unwrap();

        assert!(matches!(
            kernel.radius(leaf),
            Err(KernelError::NotACylinder { .. })
        ));
        assert!(matches!(
            kernel.move_loop(leaf, 0, Point3::ZERO),
            Err(KernelError::NotACylinder { .. })
        ));
    }
}
