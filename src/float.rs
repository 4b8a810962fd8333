//! Wrapper module around the crate-wide float type
//!
//! Geometry code only ever refers to [`Float`], so trading precision for speed (or the other way
//! around) is a one-line change here. The associated constants are re-exported so callers can
//! write `float::FRAC_PI_2` and the like without caring about the underlying width.

/// Type alias for the selected global float type
pub type Float = f32;

// re-export all of the float's constants and module-level items
pub use std::f32::consts::*;
pub use std::f32::*;
