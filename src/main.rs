//! Procedural tree-branch generator
//!
//! Builds a bent trunk cylinder, extracts the centroids of its vertex loops, scatters twig
//! cylinders onto those points with weighted randomness and a height-based taper, and finishes
//! by scattering leaf quads over every twig.
//!
//! The main entrypoint is actually in [`cli::run`] ('src/cli.rs'), which parses the command line
//! and drives a [`TreeGenerator`] over the in-memory mesh kernel.
//!
//! [`TreeGenerator`]: gen::TreeGenerator

mod centerline;
mod cli;
mod error;
mod float;
mod gen;
mod img;
mod kernel;
mod mesh_id;
mod point;
mod scene;

pub use error::Error;
pub use mesh_id::{MeshId, MeshKind};

use float::Float;
use point::Point3;

/// Vertices around the circumference of every generated cylinder
///
/// Matches the default circumference resolution of common DCC primitives; the generator never
/// varies it, so it isn't part of [`gen::Settings`].
const AXIAL_SUBDIVS: usize = 20;

/// Radius every twig starts from, before the height-based taper is applied
const TWIG_BASE_RADIUS: Float = 0.5;

/// The roll every twig receives after its random yaw, in degrees
///
/// A fixed tilt away from vertical reads as "growing outward"; the yaw already provides the
/// variation around the trunk.
const TWIG_FIXED_ROLL: Float = 30.0;

/// Width of a leaf quad. The height is drawn per scatter pass instead.
const LEAF_WIDTH: Float = 0.75;

/// Scale applied to the trunk's top loop on X and Z, pinching the tip
const TIP_TAPER: Float = 0.4;

fn main() {
    env_logger::init();

    // Internally calls `AppSettings::run`
    cli::run()
}
