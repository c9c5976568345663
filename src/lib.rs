#![cfg_attr(docsrs, feature(doc_cfg))]
//! # winged-sphere
//!
//! winged-sphere builds geodesic sphere meshes as **winged-edge** structures:
//! flat, index-addressed arrays of vertices, edges and faces with O(1)
//! adjacency queries and no geometric search.
//!
//! ## Features
//! - A seed icosahedron with a hand-verified adjacency table
//! - k-fold triangular subdivision with a closed-form index layout
//! - A direct evaluator that computes any single vertex of a subdivision,
//!   with its neighbors, without building the mesh
//! - Dual meshes (icosahedron to dodecahedron, geodesic to Goldberg polyhedra)
//! - Iterative spherical relaxation toward uniform edge lengths
//! - Integrity checks with explicit tolerances
//!
//! ## Usage
//! ```
//! use winged_sphere::prelude::*;
//!
//! let ico = icosahedron();
//! let mut sphere = subdivide(&ico, 3)?;
//! relax(&mut sphere, &RelaxOptions::with_iterations(10))?;
//! validate_mesh(&sphere, &MeshValidationOptions::all())?;
//!
//! // same layout, one vertex at a time
//! let eval = SubdivisionEvaluator::new(&ico, 3)?;
//! let v = eval.vertex(100)?;
//! assert_eq!(v.neighbors.len(), 6);
//! # Ok::<(), MeshError>(())
//! ```
//!
//! Optional features:
//! - `rayon`: parallel compute phase in [`algs::relax`]
//! - `strict-invariants` / `check-invariants`: run [`DebugInvariants`]
//!   checks on every constructed mesh in release builds

pub mod algs;
pub mod debug_invariants;
pub mod geometry;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::DebugInvariants;
    pub use crate::algs::relax::{RelaxOptions, relax};
    pub use crate::geometry::metrics::EdgeLengthStats;
    pub use crate::geometry::vector::Vec3;
    pub use crate::mesh_error::{ErrorCategory, MeshError};
    pub use crate::topology::dual::dual;
    pub use crate::topology::icosahedron::icosahedron;
    pub use crate::topology::mesh::{Edge, Face, Side, Vertex, WingedMesh};
    pub use crate::topology::refine::direct::{SubdividedVertex, SubdivisionEvaluator, VertexSite};
    pub use crate::topology::refine::subdivide;
    pub use crate::topology::validation::{MeshValidationOptions, OrientationCheck, validate_mesh};
}
