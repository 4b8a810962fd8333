//! Wrapper module for [`SceneState`]
//!
//! The registry of everything the generator currently has standing in the kernel. Ownership
//! follows the scene hierarchy -- a [`Branch`] owns its [`Twig`]s, a `Twig` owns its [`Leaf`]s --
//! while flat handle mirrors allow bulk deletion without walking the tree.

use crate::centerline::CenterlinePoint;
use crate::kernel::MeshKernel;
use crate::{Float, MeshId};
use log::warn;

/// The trunk and everything growing from it
#[derive(Debug)]
pub struct Branch {
    pub mesh: MeshId,
    /// Loop centroids extracted right after the bend deformation
    pub centerline: Vec<CenterlinePoint>,
    pub height_subdivs: usize,
    pub twigs: Vec<Twig>,
}

/// A child cylinder attached to one of the trunk's centerline points
#[derive(Debug)]
pub struct Twig {
    pub mesh: MeshId,
    /// Index of the trunk centerline loop this twig is anchored to
    pub anchor: usize,
    /// Radius after the height-based taper was applied
    pub radius: Float,
    pub leaves: Vec<Leaf>,
}

/// A single quad scattered onto a twig
#[derive(Debug)]
pub struct Leaf {
    pub mesh: MeshId,
}

/// Registry of the live generated geometry
///
/// Holds at most one branch. The twig and leaf handle lists mirror the ownership tree so that
/// regeneration can delete a whole generation in one pass. The registry must never reference a
/// handle that was deleted from the kernel: deletion and list-clearing happen together, in the
/// same synchronous step.
#[derive(Debug, Default)]
pub struct SceneState {
    branch: Option<Branch>,
    twig_handles: Vec<MeshId>,
    leaf_handles: Vec<MeshId>,
}

/// Deletes a mesh, downgrading failure to a warning
///
/// Cleanup before regeneration is best-effort: stale geometry in the kernel is preferable to a
/// generator that refuses to run again.
fn best_effort_delete<K: MeshKernel>(kernel: &mut K, id: MeshId) {
    if let Err(e) = kernel.delete(id) {
        warn!("cleanup: failed to delete {:?}: {}", id, e);
    }
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn branch(&self) -> Option<&Branch> {
        self.branch.as_ref()
    }

    pub fn branch_mut(&mut self) -> Option<&mut Branch> {
        self.branch.as_mut()
    }

    pub fn twig_handles(&self) -> &[MeshId] {
        &self.twig_handles
    }

    pub fn leaf_handles(&self) -> &[MeshId] {
        &self.leaf_handles
    }

    pub fn is_empty(&self) -> bool {
        self.branch.is_none() && self.twig_handles.is_empty() && self.leaf_handles.is_empty()
    }

    /// Installs a freshly built branch, deleting any previous generation first
    pub fn replace_branch<K: MeshKernel>(&mut self, kernel: &mut K, branch: Branch) {
        self.delete_branch(kernel);
        self.branch = Some(branch);
    }

    /// Installs a fresh set of twigs on the current branch, refreshing the handle mirrors
    ///
    /// The caller is responsible for having deleted the previous twig generation (see
    /// [`delete_twigs`](Self::delete_twigs)); this only records the new one.
    pub fn install_twigs(&mut self, twigs: Vec<Twig>) {
        self.twig_handles = twigs.iter().map(|t| t.mesh).collect();
        self.leaf_handles.clear();
        if let Some(branch) = self.branch.as_mut() {
            branch.twigs = twigs;
        }
    }

    /// Rebuilds the leaf handle mirror from the ownership tree
    pub fn refresh_leaf_mirror(&mut self) {
        self.leaf_handles = self
            .branch
            .iter()
            .flat_map(|b| b.twigs.iter())
            .flat_map(|t| t.leaves.iter())
            .map(|l| l.mesh)
            .collect();
    }

    /// Deletes every leaf and empties the leaf mirrors (best-effort)
    pub fn delete_leaves<K: MeshKernel>(&mut self, kernel: &mut K) {
        for id in self.leaf_handles.drain(..) {
            best_effort_delete(kernel, id);
        }
        if let Some(branch) = self.branch.as_mut() {
            for twig in &mut branch.twigs {
                twig.leaves.clear();
            }
        }
    }

    /// Deletes every twig (and their leaves) and empties the mirrors (best-effort)
    ///
    /// Deletion runs bottom-up so no handle is cascaded away before its own delete call.
    pub fn delete_twigs<K: MeshKernel>(&mut self, kernel: &mut K) {
        self.delete_leaves(kernel);
        for id in self.twig_handles.drain(..) {
            best_effort_delete(kernel, id);
        }
        if let Some(branch) = self.branch.as_mut() {
            branch.twigs.clear();
        }
    }

    /// Deletes the branch and its entire subtree, leaving the registry empty (best-effort)
    pub fn delete_branch<K: MeshKernel>(&mut self, kernel: &mut K) {
        self.delete_twigs(kernel);
        if let Some(branch) = self.branch.take() {
            best_effort_delete(kernel, branch.mesh);
        }
    }

    /// Clears the whole scene: every tracked mesh is deleted and the registry emptied
    pub fn clear<K: MeshKernel>(&mut self, kernel: &mut K) {
        self.delete_branch(kernel);
    }
}
