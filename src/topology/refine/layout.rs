//! Index layout of a k-fold triangular subdivision.
//!
//! Both the materializing engine ([`super::subdivide`]) and the direct
//! evaluator ([`super::direct::SubdivisionEvaluator`]) address new entities
//! through this one type, so the two can never disagree about where an index
//! lives.
//!
//! # Layout
//! With `V0`, `E0`, `F0` the base counts and `k` the number of points inserted
//! per base edge:
//!
//! - **Vertices**: `[0, V0)` are the base vertices; then `k` points per base
//!   edge, walking from `first_vertex_a` to `first_vertex_b`; then
//!   `k(k-1)/2` points per base face, row-major in a triangular grid where
//!   row `r` holds `r + 1` points.
//! - **Edges**: `k + 1` sub-edges per base edge in the same walking order;
//!   then `3k(k+1)/2` interior edges per base face, three per grid cell.
//! - **Faces**: `(k+1)²` sub-faces per base face; row `i` holds `2i + 1`
//!   faces alternating upward and downward triangles.
//!
//! # Face-local lines
//! Inside base face `f` with edge slots `0, 1, 2`, points are addressed by a
//! line `d` in `0..=k+1` and a position `t` in `0..=d`:
//!
//! - line 0 is the corner where slot 0 hands over to slot 1;
//! - lines `1..=k` run from the slot-0 edge (`t = 0`) to the slot-1 edge
//!   (`t = d`), with face-interior points in between;
//! - line `k + 1` is the slot-2 edge including both of its corners.

use crate::mesh_error::MeshError;
use crate::topology::mesh::WingedMesh;

/// The `r`-th triangular number `r(r+1)/2`: how many grid points precede
/// zero-based row `r`, each row holding one more point than the last.
pub fn triangular(r: usize) -> usize {
    r * (r + 1) / 2
}

/// Row of the triangular grid holding local index `i`.
pub fn row_of(i: usize) -> usize {
    let mut r = ((8 * i + 1).isqrt() - 1) / 2;
    while triangular(r) > i {
        r -= 1;
    }
    while triangular(r + 1) <= i {
        r += 1;
    }
    r
}

/// Index arithmetic for subdividing `base` with factor `k`.
#[derive(Debug, Clone, Copy)]
pub struct SubdivisionLayout<'a> {
    base: &'a WingedMesh,
    k: usize,
}

impl<'a> SubdivisionLayout<'a> {
    /// # Errors
    /// [`MeshError::InvalidSubdivisionFactor`] when `k < 1`, and
    /// [`MeshError::NonTriangularFace`] when a base face is not a triangle.
    pub fn new(base: &'a WingedMesh, k: usize) -> Result<Self, MeshError> {
        if k < 1 {
            return Err(MeshError::InvalidSubdivisionFactor(k));
        }
        if let Some((face, f)) = base
            .faces
            .iter()
            .enumerate()
            .find(|(_, f)| f.edges.len() != 3)
        {
            return Err(MeshError::NonTriangularFace {
                face,
                edges: f.edges.len(),
            });
        }
        Ok(Self { base, k })
    }

    pub fn base(&self) -> &'a WingedMesh {
        self.base
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn base_vertex_count(&self) -> usize {
        self.base.vertices.len()
    }

    pub fn base_edge_count(&self) -> usize {
        self.base.edges.len()
    }

    pub fn base_face_count(&self) -> usize {
        self.base.faces.len()
    }

    pub fn face_count(&self) -> usize {
        self.base_face_count() * self.faces_per_face()
    }

    pub fn edge_count(&self) -> usize {
        3 * self.face_count() / 2
    }

    pub fn vertex_count(&self) -> usize {
        self.face_count() / 2 + 2
    }

    /// Interior points per base face.
    pub fn points_per_face(&self) -> usize {
        self.k * (self.k - 1) / 2
    }

    /// Interior edges per base face.
    pub fn edges_per_face(&self) -> usize {
        3 * self.k * (self.k + 1) / 2
    }

    /// Sub-faces per base face.
    pub fn faces_per_face(&self) -> usize {
        (self.k + 1) * (self.k + 1)
    }

    /// First vertex index past the edge-interior runs.
    pub fn face_vertex_start(&self) -> usize {
        self.base_vertex_count() + self.base_edge_count() * self.k
    }

    // ---------------------------------------------------------------------
    // Absolute indices
    // ---------------------------------------------------------------------

    /// `j`-th interior point of base edge `edge`, counted from `first_vertex_a`.
    pub fn edge_vertex(&self, edge: usize, j: usize) -> usize {
        self.base_vertex_count() + edge * self.k + j
    }

    /// Interior point of base face `face` at grid row `row`, position `along`.
    pub fn face_vertex(&self, face: usize, row: usize, along: usize) -> usize {
        self.face_vertex_start() + face * self.points_per_face() + triangular(row) + along
    }

    /// `j`-th sub-edge of base edge `edge`, counted from `first_vertex_a`.
    pub fn sub_edge(&self, edge: usize, j: usize) -> usize {
        edge * (self.k + 1) + j
    }

    pub fn interior_edge_start(&self, face: usize) -> usize {
        self.base_edge_count() * (self.k + 1) + face * self.edges_per_face()
    }

    pub fn face_start(&self, face: usize) -> usize {
        face * self.faces_per_face()
    }

    // ---------------------------------------------------------------------
    // Face-relative addressing
    // ---------------------------------------------------------------------

    fn slot_edge(&self, face: usize, slot: usize) -> usize {
        self.base.faces[face].edges[slot]
    }

    /// Whether base face `face` walks the edge in its own slot `slot` from
    /// `first_vertex_a`.
    fn walks_forward(&self, face: usize, slot: usize) -> Result<bool, MeshError> {
        let edge = self.slot_edge(face, slot);
        let e = &self.base.edges[edge];
        if e.face_a == face {
            Ok(true)
        } else if e.face_b == face {
            Ok(false)
        } else {
            Err(MeshError::EdgeNotOnFace { edge, face })
        }
    }

    /// `j`-th interior point of the edge in `slot`, counted in `face`'s
    /// walking direction.
    pub fn vertex_on_face(&self, face: usize, slot: usize, j: usize) -> Result<usize, MeshError> {
        let edge = self.slot_edge(face, slot);
        let j = if self.walks_forward(face, slot)? {
            j
        } else {
            self.k - 1 - j
        };
        Ok(self.edge_vertex(edge, j))
    }

    /// `j`-th sub-edge of the edge in `slot`, counted in `face`'s walking
    /// direction.
    pub fn edge_on_face(&self, face: usize, slot: usize, j: usize) -> Result<usize, MeshError> {
        let edge = self.slot_edge(face, slot);
        let j = if self.walks_forward(face, slot)? {
            j
        } else {
            self.k - j
        };
        Ok(self.sub_edge(edge, j))
    }

    /// Base vertex at which `face` enters the edge in `slot`.
    pub fn corner(&self, face: usize, slot: usize) -> Result<usize, MeshError> {
        self.base
            .first_vertex_for_face(self.slot_edge(face, slot), face)
    }

    /// Position of interior point `j` of `edge` as seen from bordering `face`:
    /// its `(line, t)` coordinates.
    pub fn edge_point_on_face(
        &self,
        face: usize,
        edge: usize,
        j: usize,
    ) -> Result<(usize, usize), MeshError> {
        let slot = self.base.faces[face]
            .slot_of(edge)
            .ok_or(MeshError::EdgeNotOnFace { edge, face })?;
        let k = self.k;
        let c = if self.walks_forward(face, slot)? {
            j
        } else {
            k - 1 - j
        };
        Ok(match slot {
            0 => (k - c, 0),
            1 => (c + 1, c + 1),
            _ => (k + 1, k - c),
        })
    }

    /// Vertex at face-local line `d`, position `t` (`t <= d <= k + 1`).
    pub fn line_point(&self, face: usize, d: usize, t: usize) -> Result<usize, MeshError> {
        let k = self.k;
        if d == 0 {
            return self.corner(face, 1);
        }
        if d <= k {
            return if t == 0 {
                self.vertex_on_face(face, 0, k - d)
            } else if t == d {
                self.vertex_on_face(face, 1, d - 1)
            } else {
                Ok(self.face_vertex(face, d - 2, t - 1))
            };
        }
        if t == 0 {
            self.corner(face, 0)
        } else if t == k + 1 {
            self.corner(face, 2)
        } else {
            self.vertex_on_face(face, 2, k - t)
        }
    }

    /// Grid neighbors of `(d, t)` that exist, in cyclic order.
    pub fn grid_neighbors(&self, d: usize, t: usize) -> impl Iterator<Item = (usize, usize)> {
        let max = self.k + 1;
        let (d, t) = (d as isize, t as isize);
        [
            (d, t - 1),
            (d - 1, t - 1),
            (d - 1, t),
            (d, t + 1),
            (d + 1, t + 1),
            (d + 1, t),
        ]
        .into_iter()
        .filter(move |&(dd, tt)| dd >= 0 && dd <= max as isize && tt >= 0 && tt <= dd)
        .map(|(dd, tt)| (dd as usize, tt as usize))
    }

    // ---------------------------------------------------------------------
    // Interior edges: three per grid cell between lines m+1 and m+2
    // ---------------------------------------------------------------------

    fn cell_edge(&self, face: usize, m: usize, t: usize) -> usize {
        self.interior_edge_start(face) + 3 * triangular(m) + 3 * t
    }

    /// Edge from `(m+1, t)` to `(m+1, t+1)`; on line `k + 1` this is a
    /// sub-edge of the slot-2 base edge.
    pub fn row_edge(&self, face: usize, m: usize, t: usize) -> Result<usize, MeshError> {
        if m == self.k {
            self.edge_on_face(face, 2, self.k - t)
        } else {
            Ok(self.cell_edge(face, m, t))
        }
    }

    /// Edge from `(m+1, t)` to `(m+2, t+1)`.
    pub fn right_diagonal(&self, face: usize, m: usize, t: usize) -> usize {
        self.cell_edge(face, m, t) + 1
    }

    /// Edge from `(m+1, t+1)` to `(m+2, t+1)`.
    pub fn left_diagonal(&self, face: usize, m: usize, t: usize) -> usize {
        self.cell_edge(face, m, t) + 2
    }
}
