//! Trunk construction and the randomized bend

use super::{uniform_in, Settings};
use crate::centerline::extract_centerline;
use crate::kernel::MeshKernel;
use crate::scene::{Branch, SceneState};
use crate::{Error, Float, Point3, AXIAL_SUBDIVS, TIP_TAPER};
use rand::Rng;

/// Builds a new trunk cylinder and installs it as the scene's branch
///
/// The previous branch (with its entire twig/leaf subtree) is deleted first, so the scene never
/// holds more than one. The trunk gets an organic look by deforming its topmost loop: a sideways
/// offset, a roll about the loop's local axis, and a pinch of the cross-section.
///
/// Fails with [`Error::InvalidParameter`] before touching the scene if `height` is not positive
/// or `height_subdivs` is zero.
pub fn build<K: MeshKernel, R: Rng>(
    kernel: &mut K,
    rng: &mut R,
    settings: &Settings,
    state: &mut SceneState,
    height: Float,
    height_subdivs: usize,
) -> Result<(), Error> {
    if !(height > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "branch height must be positive, got {}",
            height
        )));
    }
    if height_subdivs < 1 {
        return Err(Error::InvalidParameter(
            "branch needs at least 1 height subdivision".into(),
        ));
    }

    state.delete_branch(kernel);

    let radius = uniform_in(rng, settings.trunk_radius);
    let mesh = kernel.create_cylinder(height, radius, height_subdivs, AXIAL_SUBDIVS)?;

    // bend the tip: slide the top loop sideways, roll it, and pinch it
    let top = height_subdivs;
    let offset = Point3::new(
        uniform_in(rng, settings.bend_offset),
        0.0,
        uniform_in(rng, settings.bend_offset),
    );
    kernel.move_loop(mesh, top, offset)?;

    let roll = uniform_in(rng, settings.bend_roll);
    kernel.rotate_loop(mesh, top, Point3::new(0.0, 0.0, roll))?;
    kernel.scale_loop(mesh, top, Point3::new(TIP_TAPER, 1.0, TIP_TAPER))?;

    let centerline = extract_centerline(kernel, mesh, height_subdivs, AXIAL_SUBDIVS)?;

    state.replace_branch(
        kernel,
        Branch {
            mesh,
            centerline,
            height_subdivs,
            twigs: Vec::new(),
        },
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::SceneKernel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn trunk_radius_is_drawn_from_the_configured_range() {
        let mut kernel = SceneKernel::new();
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = SceneState::new();

        build(&mut kernel, &mut rng, &Settings::default(), &mut state, 10.0, 5).unwrap();

        let branch = state.branch().unwrap();
        let radius = kernel.radius(branch.mesh).unwrap();
        assert!((0.6..0.9).contains(&radius));
    }

    #[test]
    fn tip_loop_is_bent_away_from_the_axis() {
        let mut kernel = SceneKernel::new();
        let mut rng = StdRng::seed_from_u64(12);
        let mut state = SceneState::new();

        build(&mut kernel, &mut rng, &Settings::default(), &mut state, 10.0, 5).unwrap();

        let branch = state.branch().unwrap();
        let tip = branch.centerline.last().unwrap();
        // the bend offset is at most 6 per axis, and the lower loops stay on the axis
        assert!(tip.pos.x >= 0.0 && tip.pos.x <= 6.0);
        assert!(tip.pos.z >= 0.0 && tip.pos.z <= 6.0);
        assert!(branch.centerline[0].pos.x.abs() < 1e-5);
    }

    #[test]
    fn rebuilding_replaces_the_old_trunk() {
        let mut kernel = SceneKernel::new();
        let mut rng = StdRng::seed_from_u64(13);
        let mut state = SceneState::new();

        build(&mut kernel, &mut rng, &Settings::default(), &mut state, 10.0, 5).unwrap();
        let first = state.branch().unwrap().mesh;

        build(&mut kernel, &mut rng, &Settings::default(), &mut state, 12.0, 6).unwrap();
        assert!(!kernel.contains(first));
        assert_eq!(kernel.live_count(), 1);
        assert_eq!(state.branch().unwrap().centerline.len(), 7);
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        let mut kernel = SceneKernel::new();
        let mut rng = StdRng::seed_from_u64(14);
        let mut state = SceneState::new();

        let err = build(
            &mut kernel,
            &mut rng,
            &Settings::default(),
            &mut state,
            -1.0,
            5,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert_eq!(kernel.live_count(), 0);
    }
}
