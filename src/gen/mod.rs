//! Tools for generating the branch/twig/leaf hierarchy
//!
//! [`TreeGenerator`] is the command surface: it owns the mesh kernel, the random source and the
//! [`SceneState`] registry, and drives the stage modules ([`branch`], [`twig`], [`leaf`]) in
//! order. Every stage first discards its previous generation, so repeating a command never
//! accumulates geometry.
//!
//! The random source is injected rather than ambient: tests hand in a seeded `StdRng` and
//! reproduce exact placements.

use crate::kernel::MeshKernel;
use crate::scene::SceneState;
use crate::{Error, Float};
use log::info;
use rand::Rng;

pub mod branch;
pub mod config;
pub mod leaf;
pub mod twig;

pub use config::Settings;

/// Draws uniformly from a settings range
///
/// A collapsed range (`low == high`) produces its single value instead of tripping the sampler's
/// empty-range panic.
pub(crate) fn uniform_in<R: Rng>(rng: &mut R, range: (Float, Float)) -> Float {
    match range.0 < range.1 {
        true => rng.gen_range(range.0, range.1),
        false => range.0,
    }
}

/// The generator service: kernel + random source + scene registry
///
/// Single-threaded by construction -- each command runs to completion before the next one can be
/// issued, so the registry only ever has one writer.
pub struct TreeGenerator<K, R> {
    kernel: K,
    rng: R,
    settings: Settings,
    state: SceneState,
}

impl<K: MeshKernel, R: Rng> TreeGenerator<K, R> {
    pub fn new(kernel: K, rng: R, settings: Settings) -> Self {
        TreeGenerator {
            kernel,
            rng,
            settings,
            state: SceneState::new(),
        }
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn scene(&self) -> &SceneState {
        &self.state
    }

    /// Builds a new trunk, replacing any previous branch (and its subtree)
    pub fn generate_branch(&mut self, height: Float, height_subdivs: usize) -> Result<(), Error> {
        branch::build(
            &mut self.kernel,
            &mut self.rng,
            &self.settings,
            &mut self.state,
            height,
            height_subdivs,
        )?;
        info!("created branch (height {}, {} subdivisions)", height, height_subdivs);
        Ok(())
    }

    /// Scatters `count` twigs onto the current branch, replacing any previous twigs
    pub fn generate_twigs(&mut self, count: usize) -> Result<(), Error> {
        twig::place(
            &mut self.kernel,
            &mut self.rng,
            &self.settings,
            &mut self.state,
            count,
        )?;
        info!("created {} twigs", count);
        Ok(())
    }

    /// Scatters `count_per_twig` leaves onto every twig, replacing any previous leaves
    pub fn generate_leaves(&mut self, count_per_twig: usize) -> Result<(), Error> {
        let total = leaf::scatter(
            &mut self.kernel,
            &mut self.rng,
            &self.settings,
            &mut self.state,
            count_per_twig,
        )?;
        info!("created {} leaves", total);
        Ok(())
    }

    /// Runs the three stages in sequence on a cleared scene
    pub fn generate_all(
        &mut self,
        height: Float,
        height_subdivs: usize,
        twig_count: usize,
        leaf_count: usize,
    ) -> Result<(), Error> {
        self.clear_scene();
        self.generate_branch(height, height_subdivs)?;
        self.generate_twigs(twig_count)?;
        self.generate_leaves(leaf_count)?;
        info!("generated all parts of the tree");
        Ok(())
    }

    /// Deletes everything the registry tracks and empties it
    pub fn clear_scene(&mut self) {
        self.state.clear(&mut self.kernel);
        info!("cleared generated geometry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::SceneKernel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator(seed: u64) -> TreeGenerator<SceneKernel, StdRng> {
        TreeGenerator::new(
            SceneKernel::new(),
            StdRng::seed_from_u64(seed),
            Settings::default(),
        )
    }

    #[test]
    fn full_pipeline_scenario() {
        let mut gen = generator(0xb4a2);

        gen.generate_branch(10.0, 5).unwrap();
        let branch = gen.scene().branch().unwrap();
        assert_eq!(branch.centerline.len(), 6);

        gen.generate_twigs(3).unwrap();
        let branch = gen.scene().branch().unwrap();
        assert_eq!(branch.twigs.len(), 3);
        for twig in &branch.twigs {
            // top two and bottom two loops are excluded for 5 subdivisions
            assert!(twig.anchor == 2 || twig.anchor == 3, "anchor {}", twig.anchor);
        }

        gen.generate_leaves(4).unwrap();
        assert_eq!(gen.scene().leaf_handles().len(), 12);
        let branch = gen.scene().branch().unwrap();
        for twig in &branch.twigs {
            assert_eq!(twig.leaves.len(), 4);
        }
    }

    #[test]
    fn twigs_before_branch_leave_the_scene_untouched() {
        let mut gen = generator(1);

        let err = gen.generate_twigs(3).unwrap_err();
        assert!(matches!(err, Error::NoBranch));
        assert!(gen.scene().is_empty());
        assert_eq!(gen.kernel().live_count(), 0);
    }

    #[test]
    fn leaves_before_twigs_are_rejected() {
        let mut gen = generator(2);
        gen.generate_branch(10.0, 5).unwrap();

        let err = gen.generate_leaves(4).unwrap_err();
        assert!(matches!(err, Error::NoTwigs));
    }

    #[test]
    fn invalid_branch_parameters_are_rejected() {
        let mut gen = generator(3);
        assert!(matches!(
            gen.generate_branch(0.0, 5),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            gen.generate_branch(10.0, 0),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn generate_all_builds_the_whole_hierarchy() {
        let mut gen = generator(4);
        gen.generate_all(12.0, 6, 5, 3).unwrap();

        assert_eq!(gen.scene().twig_handles().len(), 5);
        assert_eq!(gen.scene().leaf_handles().len(), 15);
        // trunk + twigs + leaves
        assert_eq!(gen.kernel().live_count(), 1 + 5 + 15);
    }

    #[test]
    fn clear_scene_resets_everything() {
        let mut gen = generator(5);
        gen.generate_all(12.0, 6, 5, 3).unwrap();

        gen.clear_scene();
        assert!(gen.scene().is_empty());
        assert_eq!(gen.kernel().live_count(), 0);

        // the generator is immediately reusable
        gen.generate_branch(8.0, 4).unwrap();
        assert!(gen.scene().branch().is_some());
    }

    #[test]
    fn regeneration_is_idempotent_in_entity_count() {
        let mut gen = generator(6);
        gen.generate_branch(10.0, 5).unwrap();

        gen.generate_twigs(4).unwrap();
        gen.generate_twigs(4).unwrap();
        assert_eq!(gen.scene().twig_handles().len(), 4);

        gen.generate_leaves(2).unwrap();
        gen.generate_leaves(2).unwrap();
        assert_eq!(gen.scene().leaf_handles().len(), 8);
        assert_eq!(gen.kernel().live_count(), 1 + 4 + 8);
    }
}
