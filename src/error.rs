//! Typed failures reported by the generator stages
//!
//! Every command-surface entry point returns one of these; nothing in the core panics on bad
//! input or a misbehaving kernel. The CLI layer wraps the variants in `eyre` reports to attach
//! context before printing.

use crate::kernel::KernelError;
use thiserror::Error;

/// Failure of a generation command
#[derive(Debug, Error)]
pub enum Error {
    /// A dimension or count was outside its valid range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The kernel returned a degenerate mesh, or one whose vertex buffer doesn't match its
    /// declared subdivision counts
    #[error("mesh is empty or inconsistent: {0}")]
    EmptyMesh(String),

    /// Twig generation was requested while no branch exists in the scene
    #[error("no branch has been generated yet")]
    NoBranch,

    /// Leaf generation was requested while no twigs exist in the scene
    #[error("no twigs have been generated yet")]
    NoTwigs,

    /// An opaque failure surfaced from the mesh kernel, not interpreted further
    #[error("mesh kernel operation failed")]
    Kernel(#[from] KernelError),
}
