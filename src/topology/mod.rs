//! Winged-edge mesh topology.
//!
//! This module provides:
//! - [`mesh`]: the vertex/edge/face arrays and their traversal primitives
//! - [`icosahedron`]: the seed solid every sphere starts from
//! - [`refine`]: k-fold triangular subdivision and direct vertex evaluation
//! - [`dual`]: face/vertex swapping
//! - [`validation`]: integrity checks over any of the above
//!
//! Every mesh-producing operation returns a new [`WingedMesh`]; topology is
//! never edited in place.

pub mod dual;
pub mod icosahedron;
pub mod mesh;
pub mod refine;
pub mod validation;

pub use mesh::{Edge, Face, Side, Vertex, WingedMesh};
