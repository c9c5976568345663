//! Dual mesh construction.
//!
//! The dual swaps the roles of faces and vertices while reusing every edge:
//!
//! - dual face `v` has vertex `v`'s edge cycle verbatim;
//! - dual vertex `f` sits at face `f`'s centroid and has face `f`'s edge list;
//! - each dual edge joins the two faces the primal edge separated, and
//!   separates the two vertices it joined.
//!
//! The dual of a triangle mesh has polygonal faces (pentagons and hexagons for
//! subdivided icosahedra), so only the cycle and Euler invariants apply.

use crate::DebugInvariants;
use crate::mesh_error::MeshError;
use crate::topology::mesh::{Edge, Face, Side, Vertex, WingedMesh};

/// Build the dual of `mesh` in `O(E)`.
///
/// # Errors
/// Topology errors if a face's edges do not reference it, or
/// [`MeshError::InvariantViolation`] if a vertex's edge cycle lists an edge
/// that does not touch it.
pub fn dual(mesh: &WingedMesh) -> Result<WingedMesh, MeshError> {
    let mut edges: Vec<Edge> = mesh
        .edges
        .iter()
        .map(|e| Edge {
            first_vertex_a: e.face_b,
            first_vertex_b: e.face_a,
            face_a: e.first_vertex_a,
            face_b: e.first_vertex_b,
            prev_a: usize::MAX,
            next_a: usize::MAX,
            prev_b: usize::MAX,
            next_b: usize::MAX,
        })
        .collect();

    for (v, vertex) in mesh.vertices.iter().enumerate() {
        let cycle = &vertex.edges;
        let n = cycle.len();
        for (p, &e) in cycle.iter().enumerate() {
            let prev = cycle[(p + n - 1) % n];
            let next = cycle[(p + 1) % n];
            let edge = edges
                .get_mut(e)
                .ok_or(MeshError::EdgeOutOfRange { edge: e, len: mesh.edges.len() })?;
            match edge.side_for_face(v) {
                Some(Side::A) => {
                    edge.prev_a = prev;
                    edge.next_a = next;
                }
                Some(Side::B) => {
                    edge.prev_b = prev;
                    edge.next_b = next;
                }
                None => {
                    return Err(MeshError::InvariantViolation(format!(
                        "vertex {v} lists edge {e}, which does not touch it"
                    )));
                }
            }
        }
    }

    if let Some(edge) = edges
        .iter()
        .position(|e| e.prev_a == usize::MAX || e.prev_b == usize::MAX)
    {
        return Err(MeshError::EdgeSideUnclaimed { edge });
    }

    let vertices = (0..mesh.face_count())
        .map(|f| {
            Ok(Vertex::new(
                mesh.face_center(f)?,
                mesh.faces[f].edges.clone(),
            ))
        })
        .collect::<Result<Vec<_>, MeshError>>()?;
    let faces = mesh
        .vertices
        .iter()
        .map(|v| Face::new(v.edges.clone()))
        .collect();

    let out = WingedMesh::new(faces, edges, vertices);
    log::debug!(
        "dual built: V={}, E={}, F={}",
        out.vertex_count(),
        out.edge_count(),
        out.face_count()
    );
    out.debug_assert_invariants();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::icosahedron::icosahedron;

    #[test]
    fn icosahedron_dual_is_dodecahedron() {
        let d = dual(&icosahedron()).unwrap();
        assert_eq!(d.face_count(), 12);
        assert_eq!(d.vertex_count(), 20);
        assert_eq!(d.edge_count(), 30);
        assert!(d.faces.iter().all(|f| f.edges.len() == 5));
        assert!(d.vertices.iter().all(|v| v.degree() == 3));
    }

    #[test]
    fn dual_edges_swap_roles() {
        let ico = icosahedron();
        let d = dual(&ico).unwrap();
        for (p, q) in ico.edges.iter().zip(&d.edges) {
            assert_eq!((q.face_a, q.face_b), (p.first_vertex_a, p.first_vertex_b));
            assert_eq!((q.first_vertex_a, q.first_vertex_b), (p.face_b, p.face_a));
        }
    }

    #[test]
    fn dual_vertices_sit_at_face_centers() {
        let ico = icosahedron();
        let d = dual(&ico).unwrap();
        for f in 0..ico.face_count() {
            assert_eq!(d.vertices[f].coords, ico.face_center(f).unwrap());
        }
    }
}
