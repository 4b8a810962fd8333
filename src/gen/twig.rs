//! Twig placement along the trunk centerline
//!
//! Placement combines three deliberately tuned pieces: a weight table biasing twigs toward the
//! upper-middle of the trunk, a clamp keeping them off the very top loop, and a height-based
//! radius taper. None of them are incidental -- changing any of the three visibly changes the
//! silhouette of the result.

use super::{uniform_in, Settings};
use crate::centerline::extract_centerline;
use crate::kernel::{MeshKernel, RotateOrder};
use crate::scene::{SceneState, Twig};
use crate::{Error, Float, Point3, AXIAL_SUBDIVS, TWIG_BASE_RADIUS, TWIG_FIXED_ROLL};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Relative probability of a twig attaching at centerline loop `index`
///
/// The two lowest loops never receive a twig; above them the weight grows linearly, so higher
/// loops are favored. Weights are relative, not normalized.
pub fn placement_weight(index: usize, total_subdivs: usize) -> Float {
    if index < 2 || index >= total_subdivs {
        return 0.0;
    }
    (index + 3) as Float
}

/// Taper multiplier for a twig, derived from its height on the trunk
///
/// Maps the trunk bounding box's top to 0 and its bottom to 1, then floors the result: twigs
/// attached lower are thicker, and nothing ever drops below [`FLOOR`](Self::FLOOR) of the base
/// radius. A degenerate (zero-height) box yields the full profile.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RadiusProfile(Float);

impl RadiusProfile {
    /// The smallest multiplier a twig can be tapered to
    pub const FLOOR: Float = 0.2;

    pub fn from_height(y: Float, min_y: Float, max_y: Float) -> Self {
        let span = min_y - max_y;
        let raw = match span.abs() > Float::EPSILON {
            true => (y - max_y) / span,
            false => 1.0,
        };

        RadiusProfile(raw.max(Self::FLOOR).min(1.0))
    }

    pub fn value(self) -> Float {
        self.0
    }
}

/// Scatters `count` twigs onto the scene's branch, replacing the previous generation
///
/// Fails with [`Error::NoBranch`] (scene untouched) if no branch exists. A `count` of zero is
/// not an error; it simply leaves the branch bare.
pub fn place<K: MeshKernel, R: Rng>(
    kernel: &mut K,
    rng: &mut R,
    settings: &Settings,
    state: &mut SceneState,
    count: usize,
) -> Result<(), Error> {
    let trunk = match state.branch() {
        Some(branch) => branch.mesh,
        None => return Err(Error::NoBranch),
    };

    state.delete_twigs(kernel);
    if count == 0 {
        state.install_twigs(Vec::new());
        return Ok(());
    }

    let (height_subdivs, axial_subdivs) = kernel.cylinder_subdivisions(trunk)?;
    let centerline = extract_centerline(kernel, trunk, height_subdivs, axial_subdivs)?;

    let weights: Vec<Float> = (0..height_subdivs)
        .map(|i| placement_weight(i, height_subdivs))
        .collect();
    let anchor_dist = WeightedIndex::new(&weights).map_err(|_| {
        Error::InvalidParameter(format!(
            "branch needs at least 3 height subdivisions to place twigs, got {}",
            height_subdivs
        ))
    })?;

    let (box_min, box_max) = kernel.bounding_box(trunk)?;

    let mut twigs = Vec::with_capacity(count);
    for _ in 0..count {
        // the weight table already excludes the base; the clamp keeps the tip loop free too
        let anchor = anchor_dist.sample(rng).min(height_subdivs - 2);
        let target = centerline[anchor].pos;

        let length = uniform_in(rng, settings.twig_length);
        let loops = (uniform_in(rng, (length.floor() - 1.0, length.floor())) as usize).max(1);
        let mesh = kernel.create_cylinder(length, TWIG_BASE_RADIUS, loops, AXIAL_SUBDIVS)?;

        // pivot at the base, so the yaw/roll below swing the twig around its attachment point
        kernel.set_pivot(mesh, Point3::new(0.0, -length * 0.5, 0.0))?;
        kernel.move_to(mesh, target)?;

        let profile = RadiusProfile::from_height(target.y, box_min.y, box_max.y);
        let radius = TWIG_BASE_RADIUS * profile.value();
        kernel.set_radius(mesh, radius)?;

        let yaw = rng.gen_range(0.0, 359.0);
        kernel.rotate(mesh, Point3::new(0.0, yaw, 0.0), RotateOrder::Zxy)?;
        kernel.rotate(mesh, Point3::new(0.0, 0.0, TWIG_FIXED_ROLL), RotateOrder::Zxy)?;

        // small tip bend, then squeeze the whole twig from its center
        let deform = uniform_in(rng, settings.twig_deform);
        kernel.move_loop(mesh, loops, Point3::new(0.0, deform, deform))?;
        let tip_yaw = uniform_in(rng, settings.twig_tip_yaw);
        kernel.rotate_loop(mesh, loops, Point3::new(0.0, tip_yaw, 0.0))?;

        kernel.center_pivot(mesh)?;
        let squeeze = uniform_in(rng, settings.twig_squeeze);
        kernel.scale(mesh, Point3::new(squeeze, 1.0, squeeze))?;

        twigs.push(Twig {
            mesh,
            anchor,
            radius,
            leaves: Vec::new(),
        });
    }

    state.install_twigs(twigs);
    Ok(())
}
