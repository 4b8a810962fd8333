//! Leaf scattering over the twigs
//!
//! Each twig gets its own centerline extracted and a handful of quads placed around its upper
//! loops. Once a twig's leaves are in place the twig is parented under the trunk, which is what
//! finalizes the scene hierarchy for the whole generation pass.

use super::{uniform_in, Settings};
use crate::centerline::{extract_centerline, CenterlinePoint};
use crate::kernel::{MeshKernel, RotateOrder};
use crate::scene::{Leaf, SceneState};
use crate::{Error, Point3, LEAF_WIDTH};
use rand::seq::SliceRandom;
use rand::Rng;

/// The centerline points a leaf may anchor to: everything but the base loop
///
/// Leaves never attach at the twig's root, where they would clip into the trunk.
fn anchor_candidates(centerline: &[CenterlinePoint]) -> &[CenterlinePoint] {
    &centerline[1..]
}

/// Scatters `count_per_twig` leaves onto every twig, replacing the previous generation
///
/// Fails with [`Error::NoTwigs`] if the scene has no twigs. Each leaf is oriented to its twig's
/// world rotation before a secondary randomized rotation breaks up the uniformity; the roll
/// component of that secondary rotation mirrors the twig's own roll, so leaves fan away from
/// the twig rather than along it.
pub fn scatter<K: MeshKernel, R: Rng>(
    kernel: &mut K,
    rng: &mut R,
    settings: &Settings,
    state: &mut SceneState,
    count_per_twig: usize,
) -> Result<usize, Error> {
    if state.branch().map_or(true, |b| b.twigs.is_empty()) {
        return Err(Error::NoTwigs);
    }

    state.delete_leaves(kernel);

    let branch = match state.branch_mut() {
        Some(branch) => branch,
        None => return Err(Error::NoTwigs),
    };
    let trunk = branch.mesh;

    // one quad size per scatter pass; variation comes from placement and rotation
    let leaf_height = uniform_in(rng, settings.leaf_height);
    let mut total = 0;

    for twig in &mut branch.twigs {
        let (height_subdivs, axial_subdivs) = kernel.cylinder_subdivisions(twig.mesh)?;
        let centerline = extract_centerline(kernel, twig.mesh, height_subdivs, axial_subdivs)?;
        let candidates = anchor_candidates(&centerline);
        if candidates.is_empty() {
            return Err(Error::EmptyMesh(format!(
                "twig {:?} has a single loop; nowhere to anchor leaves",
                twig.mesh
            )));
        }

        let twig_rotation = kernel.rotation(twig.mesh)?;
        let twig_radius = kernel.radius(twig.mesh)?;

        for _ in 0..count_per_twig {
            let anchor = match candidates.choose(rng) {
                Some(point) => point,
                None => break,
            };

            // radial offset scales with the twig's tapered radius; the same draw serves X and Z
            let spread = uniform_in(rng, settings.leaf_radial) * twig_radius;
            let offset_xz = rng.gen_range(-spread, spread);
            let lift = uniform_in(rng, settings.leaf_lift) * twig_radius;

            let mesh = kernel.create_plane(LEAF_WIDTH, leaf_height)?;
            kernel.move_to(mesh, anchor.pos + Point3::new(offset_xz, lift, offset_xz))?;

            // line the quad up with the twig before attaching it
            kernel.rotate(mesh, twig_rotation, RotateOrder::Zxy)?;
            kernel.parent(mesh, twig.mesh)?;

            let pitch = uniform_in(rng, settings.leaf_pitch);
            let yaw = uniform_in(rng, settings.leaf_yaw);
            let variation = Point3::new(pitch, yaw, -twig_rotation.z);
            kernel.rotate(mesh, variation - twig_rotation, RotateOrder::Zxy)?;

            twig.leaves.push(Leaf { mesh });
            total += 1;
        }

        kernel.parent(twig.mesh, trunk)?;
    }

    state.refresh_leaf_mirror();
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gen::{branch, twig};
    use crate::kernel::SceneKernel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene_with_twigs(seed: u64, twig_count: usize) -> (SceneKernel, StdRng, SceneState) {
        let mut kernel = SceneKernel::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = SceneState::new();
        let settings = Settings::default();

        branch::build(&mut kernel, &mut rng, &settings, &mut state, 10.0, 5).unwrap();
        twig::place(&mut kernel, &mut rng, &settings, &mut state, twig_count).unwrap();
        (kernel, rng, state)
    }

    #[test]
    fn base_loop_is_never_a_candidate() {
        let points: Vec<CenterlinePoint> = (0..5)
            .map(|loop_index| CenterlinePoint {
                loop_index,
                pos: Point3::new(0.0, loop_index as f32, 0.0),
            })
            .collect();

        let candidates = anchor_candidates(&points);
        assert_eq!(candidates.len(), 4);
        assert!(candidates.iter().all(|p| p.loop_index != 0));
    }

    #[test]
    fn every_twig_receives_its_count() {
        let (mut kernel, mut rng, mut state) = scene_with_twigs(31, 3);
        let total = scatter(&mut kernel, &mut rng, &Settings::default(), &mut state, 4).unwrap();

        assert_eq!(total, 12);
        assert_eq!(state.leaf_handles().len(), 12);
        for twig in &state.branch().unwrap().twigs {
            assert_eq!(twig.leaves.len(), 4);
        }
    }

    #[test]
    fn twigs_end_up_parented_under_the_trunk() {
        let (mut kernel, mut rng, mut state) = scene_with_twigs(32, 2);
        scatter(&mut kernel, &mut rng, &Settings::default(), &mut state, 1).unwrap();

        let trunk = state.branch().unwrap().mesh;
        // deleting the trunk must now take the twigs and leaves with it
        kernel.delete(trunk).unwrap();
        assert_eq!(kernel.live_count(), 0);
    }

    #[test]
    fn rescattering_replaces_the_previous_leaves() {
        let (mut kernel, mut rng, mut state) = scene_with_twigs(33, 2);
        let settings = Settings::default();

        scatter(&mut kernel, &mut rng, &settings, &mut state, 5).unwrap();
        scatter(&mut kernel, &mut rng, &settings, &mut state, 3).unwrap();

        assert_eq!(state.leaf_handles().len(), 6);
        // trunk + 2 twigs + 6 leaves
        assert_eq!(kernel.live_count(), 9);
    }

    #[test]
    fn no_twigs_is_an_error() {
        let mut kernel = SceneKernel::new();
        let mut rng = StdRng::seed_from_u64(34);
        let mut state = SceneState::new();
        let settings = Settings::default();

        let err = scatter(&mut kernel, &mut rng, &settings, &mut state, 4).unwrap_err();
        assert!(matches!(err, Error::NoTwigs));

        // a branch without twigs is no better
        branch::build(&mut kernel, &mut rng, &settings, &mut state, 10.0, 5).unwrap();
        let err = scatter(&mut kernel, &mut rng, &settings, &mut state, 4).unwrap_err();
        assert!(matches!(err, Error::NoTwigs));
    }
}
