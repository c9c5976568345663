//! Geometry kernel for winged-sphere.
//!
//! Points and directions are plain `[f64; 3]` arrays measured from the
//! sphere center at the origin. [`vector`] holds the arithmetic, [`chord`]
//! the interpolation used to place subdivision points, and [`metrics`] the
//! edge-length statistics used to judge mesh uniformity.

pub mod chord;
pub mod metrics;
pub mod vector;
