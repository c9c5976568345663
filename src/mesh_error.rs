//! MeshError: unified error type for winged-sphere public APIs
//!
//! Every fallible operation in the crate returns this type. Variants carry the
//! offending indices so a failure can be traced back to a specific vertex,
//! edge or face. [`MeshError::category`] groups the variants into the four
//! broad failure classes callers usually branch on.

use thiserror::Error;

/// Broad failure classes for [`MeshError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A queried edge/face/vertex relation does not hold.
    Topology,
    /// A caller-provided argument is outside its valid domain.
    InvalidArgument,
    /// A zero-length vector had to be normalized.
    DegenerateGeometry,
    /// A constructed mesh violates its structural invariants.
    Consistency,
}

/// Unified error type for winged-sphere operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// The edge is not incident to the given face.
    #[error("Topology error: edge {edge} is not associated with face {face}")]
    EdgeNotOnFace { edge: usize, face: usize },
    /// The edge does not have the given vertex as an endpoint.
    #[error("Topology error: edge {edge} is not associated with vertex {vertex}")]
    EdgeNotOnVertex { edge: usize, vertex: usize },
    /// Vertex index is outside the mesh.
    #[error("Topology error: vertex {vertex} out of range (mesh has {len} vertices)")]
    VertexOutOfRange { vertex: usize, len: usize },
    /// Edge index is outside the mesh.
    #[error("Topology error: edge {edge} out of range (mesh has {len} edges)")]
    EdgeOutOfRange { edge: usize, len: usize },
    /// Face index is outside the mesh.
    #[error("Topology error: face {face} out of range (mesh has {len} faces)")]
    FaceOutOfRange { face: usize, len: usize },

    /// Subdivision factor must be at least 1.
    #[error("Invalid subdivision factor {0}; expected k >= 1")]
    InvalidSubdivisionFactor(usize),
    /// Subdivision and direct evaluation require triangular faces.
    #[error("Face {face} has {edges} edges; only triangles can be subdivided")]
    NonTriangularFace { face: usize, edges: usize },
    /// Direct-evaluator index outside `[0, total)`.
    #[error("Vertex index {index} out of range for subdivision with {total} vertices")]
    IndexOutOfRange { index: usize, total: usize },
    /// Target radius must be finite and positive.
    #[error("Invalid radius {0}; expected a finite positive value")]
    InvalidRadius(f64),

    /// A zero-length vector could not be normalized.
    #[error("Degenerate geometry at vertex {vertex}: {context}")]
    DegenerateGeometry {
        vertex: usize,
        context: &'static str,
    },

    /// Both sides of an edge were already claimed when another face tried to claim it.
    #[error("Consistency error: edge {edge} already claimed twice (third claim by face {face})")]
    EdgeClaimedTwice { edge: usize, face: usize },
    /// An edge in a face list shares no endpoints with its neighbors in that list.
    #[error("Consistency error: edge {edge} does not connect its neighbors in face {face}")]
    UnmatchedFaceEdge { edge: usize, face: usize },
    /// After reconstruction an edge still lacks a face on one side.
    #[error("Consistency error: edge {edge} has an unclaimed side")]
    EdgeSideUnclaimed { edge: usize },
    /// Walking the edges around a vertex produced the wrong cycle length.
    #[error("Consistency error: vertex {vertex} has degree {found}, expected {expected}")]
    VertexDegreeMismatch {
        vertex: usize,
        expected: usize,
        found: usize,
    },
    /// A structural invariant check failed.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl MeshError {
    /// Failure class this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            MeshError::EdgeNotOnFace { .. }
            | MeshError::EdgeNotOnVertex { .. }
            | MeshError::VertexOutOfRange { .. }
            | MeshError::EdgeOutOfRange { .. }
            | MeshError::FaceOutOfRange { .. } => ErrorCategory::Topology,
            MeshError::InvalidSubdivisionFactor(_)
            | MeshError::NonTriangularFace { .. }
            | MeshError::IndexOutOfRange { .. }
            | MeshError::InvalidRadius(_) => ErrorCategory::InvalidArgument,
            MeshError::DegenerateGeometry { .. } => ErrorCategory::DegenerateGeometry,
            MeshError::EdgeClaimedTwice { .. }
            | MeshError::UnmatchedFaceEdge { .. }
            | MeshError::EdgeSideUnclaimed { .. }
            | MeshError::VertexDegreeMismatch { .. }
            | MeshError::InvariantViolation(_) => ErrorCategory::Consistency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_variant_groups() {
        assert_eq!(
            MeshError::EdgeNotOnFace { edge: 1, face: 2 }.category(),
            ErrorCategory::Topology
        );
        assert_eq!(
            MeshError::InvalidSubdivisionFactor(0).category(),
            ErrorCategory::InvalidArgument
        );
        assert_eq!(
            MeshError::DegenerateGeometry {
                vertex: 3,
                context: "centroid"
            }
            .category(),
            ErrorCategory::DegenerateGeometry
        );
        assert_eq!(
            MeshError::EdgeClaimedTwice { edge: 4, face: 5 }.category(),
            ErrorCategory::Consistency
        );
    }

    #[test]
    fn messages_carry_indices() {
        let msg = MeshError::EdgeNotOnVertex { edge: 17, vertex: 9 }.to_string();
        assert!(msg.contains("17") && msg.contains("9"), "{msg}");
    }
}
