//! Algorithms that operate on existing meshes.

pub mod relax;

pub use relax::{RelaxOptions, relax};
