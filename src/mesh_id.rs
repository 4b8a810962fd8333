//! Wrapper module for [`MeshId`]

use std::fmt::{self, Debug, Formatter};

/// Marker for the primitive type behind a [`MeshId`]. Primarily used with `MeshId` methods.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshKind {
    Cylinder = 0,
    Plane = 1,
}

/// Opaque handle to a mesh owned by the kernel
///
/// The kind of the primitive (either [`MeshKind::Cylinder`] or [`MeshKind::Plane`]) is encoded in
/// the least significant bit of the value, which means that the `i`th cylinder is actually given
/// the id `2*i` and the `i`th plane is `2*i + 1`.
///
/// For this reason, the API of `MeshId`s is restricted to keep this invariant held correctly.
/// Generator code never owns mesh memory; it only passes these identifiers back to the kernel.
///
/// One side effect is that we only allow up to `isize::MAX` of either primitive type, instead of
/// `usize::MAX` of the two combined. This really shouldn't matter in practice.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeshId(usize);

impl MeshId {
    /// Creates a new `MeshId` for the kind of primitive with given arena index
    ///
    /// These values can be recovered via calls to the [`deconstruct`] method.
    ///
    /// [`deconstruct`]: Self::deconstruct
    pub(crate) fn new(kind: MeshKind, idx: usize) -> Self {
        if idx > isize::MAX as usize {
            panic!("MeshId cannot be constructed with index greater than isize::MAX")
        }

        MeshId(idx << 1 | kind as usize)
    }

    /// Returns the `MeshId` as the pair of "primitive kind, arena index" that it represents
    pub(crate) fn deconstruct(&self) -> (MeshKind, usize) {
        let kind = match self.0 % 2 == 0 {
            true => MeshKind::Cylinder,
            false => MeshKind::Plane,
        };

        (kind, self.0 >> 1)
    }
}

impl Debug for MeshId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.deconstruct() {
            (MeshKind::Cylinder, idx) => write!(f, "Cylinder#{}", idx),
            (MeshKind::Plane, idx) => write!(f, "Plane#{}", idx),
        }
    }
}
