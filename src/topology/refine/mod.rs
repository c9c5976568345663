//! Triangular subdivision of closed winged-edge meshes.
//!
//! [`subdivide`] cuts every base edge into `k + 1` sub-edges and every base
//! triangle into `(k+1)²` sub-triangles, producing a brand-new mesh whose
//! index layout is fixed by [`layout::SubdivisionLayout`]. The
//! [`direct::SubdivisionEvaluator`] answers single-vertex queries on the same
//! layout without materializing the mesh.
//!
//! # Expected invariants
//! - The base mesh is closed, consistently oriented and all faces are
//!   triangles (see [`crate::topology::validation::validate_mesh`]).
//! - Base vertices keep their indices and coordinates. Every new vertex has
//!   degree 6; base vertices keep their base degree.
//!
//! # Phases
//! 1. Endpoints of every new edge, from the layout.
//! 2. Edge lists of every new face, from the layout.
//! 3. Adjacency reconstruction: each face claims one wing of each of its
//!    edges, choosing the wing by which endpoint is shared with the
//!    preceding edge.
//! 4. Coordinates by chord interpolation, then vertex edge cycles by walking
//!    around each vertex.

pub mod direct;
pub mod layout;

use crate::DebugInvariants;
use crate::geometry::chord::chord_point;
use crate::mesh_error::MeshError;
use crate::topology::mesh::{Edge, Face, Vertex, WingedMesh};
use layout::SubdivisionLayout;

/// One face's claim on an edge wing.
#[derive(Debug, Clone, Copy)]
struct Wing {
    face: usize,
    prev: usize,
    next: usize,
}

/// Edge under construction: endpoints known, wings filled by face claims.
#[derive(Debug, Clone, Copy)]
struct PendingEdge {
    first_vertex_a: usize,
    first_vertex_b: usize,
    a: Option<Wing>,
    b: Option<Wing>,
}

impl PendingEdge {
    fn new(first_vertex_a: usize, first_vertex_b: usize) -> Self {
        Self {
            first_vertex_a,
            first_vertex_b,
            a: None,
            b: None,
        }
    }

    fn has_vertex(&self, v: usize) -> bool {
        self.first_vertex_a == v || self.first_vertex_b == v
    }

    fn finish(self, edge: usize) -> Result<Edge, MeshError> {
        match (self.a, self.b) {
            (Some(a), Some(b)) => Ok(Edge {
                first_vertex_a: self.first_vertex_a,
                first_vertex_b: self.first_vertex_b,
                face_a: a.face,
                face_b: b.face,
                prev_a: a.prev,
                next_a: a.next,
                prev_b: b.prev,
                next_b: b.next,
            }),
            _ => Err(MeshError::EdgeSideUnclaimed { edge }),
        }
    }
}

/// Subdivide every edge of `mesh` into `k + 1` pieces.
///
/// Returns a new mesh with `F·(k+1)²` faces, `3F'/2` edges and `F'/2 + 2`
/// vertices (`F'` the new face count). The input is never modified.
///
/// # Errors
/// - [`MeshError::InvalidSubdivisionFactor`] if `k < 1`.
/// - [`MeshError::NonTriangularFace`] if the base has a non-triangular face.
/// - Topology errors if the base adjacency does not hold.
/// - [`MeshError::EdgeClaimedTwice`], [`MeshError::UnmatchedFaceEdge`],
///   [`MeshError::EdgeSideUnclaimed`] or [`MeshError::VertexDegreeMismatch`]
///   if reconstruction finds the result inconsistent.
///
/// # Example
/// ```
/// use winged_sphere::topology::icosahedron::icosahedron;
/// use winged_sphere::topology::refine::subdivide;
///
/// let mesh = subdivide(&icosahedron(), 1)?;
/// assert_eq!((mesh.vertex_count(), mesh.edge_count(), mesh.face_count()), (42, 120, 80));
/// # Ok::<(), winged_sphere::mesh_error::MeshError>(())
/// ```
pub fn subdivide(mesh: &WingedMesh, k: usize) -> Result<WingedMesh, MeshError> {
    let layout = SubdivisionLayout::new(mesh, k)?;
    log::debug!(
        "subdividing mesh (V={}, E={}, F={}) with k={k} into V={}, E={}, F={}",
        mesh.vertex_count(),
        mesh.edge_count(),
        mesh.face_count(),
        layout.vertex_count(),
        layout.edge_count(),
        layout.face_count()
    );

    let mut pending = edge_endpoints(&layout)?;
    let faces = face_edges(&layout)?;
    log::trace!("laid out {} edges and {} faces", pending.len(), faces.len());

    claim_wings(&faces, &mut pending)?;
    let edges = pending
        .into_iter()
        .enumerate()
        .map(|(i, p)| p.finish(i))
        .collect::<Result<Vec<_>, _>>()?;

    let coords = vertex_coords(&layout)?;
    let vertices = coords
        .into_iter()
        .map(|c| Vertex::new(c, Vec::new()))
        .collect();

    let mut out = WingedMesh::new(faces, edges, vertices);
    fill_vertex_cycles(&mut out, mesh)?;

    out.debug_assert_invariants();
    Ok(out)
}

fn edge_endpoints(layout: &SubdivisionLayout<'_>) -> Result<Vec<PendingEdge>, MeshError> {
    let base = layout.base();
    let k = layout.k();
    let mut out = Vec::with_capacity(layout.edge_count());

    // sub-edges of base edges
    for (e, edge) in base.edges.iter().enumerate() {
        let mut prev = edge.first_vertex_a;
        for j in 0..k {
            let v = layout.edge_vertex(e, j);
            out.push(PendingEdge::new(prev, v));
            prev = v;
        }
        out.push(PendingEdge::new(prev, edge.first_vertex_b));
    }

    // row, right diagonal, left diagonal per cell
    for f in 0..layout.base_face_count() {
        for m in 0..k {
            for t in 0..=m {
                let here = layout.line_point(f, m + 1, t)?;
                let right = layout.line_point(f, m + 1, t + 1)?;
                let below = layout.line_point(f, m + 2, t + 1)?;
                out.push(PendingEdge::new(here, right));
                out.push(PendingEdge::new(here, below));
                out.push(PendingEdge::new(right, below));
            }
        }
    }
    Ok(out)
}

fn face_edges(layout: &SubdivisionLayout<'_>) -> Result<Vec<Face>, MeshError> {
    let k = layout.k();
    let mut out = Vec::with_capacity(layout.face_count());
    for f in 0..layout.base_face_count() {
        for i in 0..=k {
            for j in 0..=2 * i {
                let edges = if j % 2 == 0 {
                    let t = j / 2;
                    let left = if t == 0 {
                        layout.edge_on_face(f, 0, k - i)?
                    } else {
                        layout.left_diagonal(f, i - 1, t - 1)
                    };
                    let right = if t == i {
                        layout.edge_on_face(f, 1, i)?
                    } else {
                        layout.right_diagonal(f, i - 1, t)
                    };
                    let row = layout.row_edge(f, i, t)?;
                    // only the first upward face of a row starts on the slot-0 side
                    if t == 0 {
                        vec![left, right, row]
                    } else {
                        vec![row, left, right]
                    }
                } else {
                    let t = (j - 1) / 2;
                    vec![
                        layout.row_edge(f, i - 1, t)?,
                        layout.left_diagonal(f, i - 1, t),
                        layout.right_diagonal(f, i - 1, t),
                    ]
                };
                out.push(Face::new(edges));
            }
        }
    }
    Ok(out)
}

fn claim_wings(faces: &[Face], pending: &mut [PendingEdge]) -> Result<(), MeshError> {
    for (f, face) in faces.iter().enumerate() {
        let n = face.edges.len();
        for p in 0..n {
            let prev = face.edges[(p + n - 1) % n];
            let this = face.edges[p];
            let next = face.edges[(p + 1) % n];
            let (pe, ne) = (pending[prev], pending[next]);
            let cur = &mut pending[this];
            let wing = Some(Wing { face: f, prev, next });

            if pe.has_vertex(cur.first_vertex_a) && ne.has_vertex(cur.first_vertex_b) {
                if cur.a.is_some() {
                    return Err(MeshError::EdgeClaimedTwice { edge: this, face: f });
                }
                cur.a = wing;
            } else if pe.has_vertex(cur.first_vertex_b) && ne.has_vertex(cur.first_vertex_a) {
                if cur.b.is_some() {
                    return Err(MeshError::EdgeClaimedTwice { edge: this, face: f });
                }
                cur.b = wing;
            } else {
                return Err(MeshError::UnmatchedFaceEdge { edge: this, face: f });
            }
        }
    }
    Ok(())
}

fn vertex_coords(layout: &SubdivisionLayout<'_>) -> Result<Vec<[f64; 3]>, MeshError> {
    let base = layout.base();
    let k = layout.k();
    let mut coords = vec![[0.0; 3]; layout.vertex_count()];

    for (v, vertex) in base.vertices.iter().enumerate() {
        coords[v] = vertex.coords;
    }
    for (e, edge) in base.edges.iter().enumerate() {
        let p = base.vertices[edge.first_vertex_a].coords;
        let q = base.vertices[edge.first_vertex_b].coords;
        for j in 0..k {
            let v = layout.edge_vertex(e, j);
            coords[v] = chord_point(p, q, edge_fraction(j, k), v)?;
        }
    }
    // face rows, between the edge points bordering each row
    for f in 0..layout.base_face_count() {
        for d in 2..=k {
            let p = coords[layout.line_point(f, d, 0)?];
            let q = coords[layout.line_point(f, d, d)?];
            for t in 1..d {
                let v = layout.line_point(f, d, t)?;
                coords[v] = chord_point(p, q, t as f64 / d as f64, v)?;
            }
        }
    }
    Ok(coords)
}

/// Fraction along a base edge of its `j`-th interior point.
pub(crate) fn edge_fraction(j: usize, k: usize) -> f64 {
    (j + 1) as f64 / (k + 1) as f64
}

fn fill_vertex_cycles(mesh: &mut WingedMesh, base: &WingedMesh) -> Result<(), MeshError> {
    let base_vertices = base.vertex_count();
    let mut cycles: Vec<Vec<usize>> = vec![Vec::new(); mesh.vertex_count()];

    for (start, edge) in mesh.edges.iter().enumerate() {
        for v in [edge.first_vertex_a, edge.first_vertex_b] {
            if !cycles[v].is_empty() {
                continue;
            }
            let expected = if v < base_vertices {
                base.vertices[v].degree()
            } else {
                6
            };
            let mut cycle = vec![start];
            let mut cur = mesh.next_edge_for_vertex(start, v)?;
            while cur != start {
                if cycle.len() >= expected {
                    return Err(MeshError::VertexDegreeMismatch {
                        vertex: v,
                        expected,
                        found: cycle.len() + 1,
                    });
                }
                cycle.push(cur);
                cur = mesh.next_edge_for_vertex(cur, v)?;
            }
            if cycle.len() != expected {
                return Err(MeshError::VertexDegreeMismatch {
                    vertex: v,
                    expected,
                    found: cycle.len(),
                });
            }
            cycles[v] = cycle;
        }
    }

    for (vertex, cycle) in mesh.vertices.iter_mut().zip(cycles) {
        vertex.edges = cycle;
    }
    Ok(())
}
