//! Winged-edge mesh storage and traversal primitives.
//!
//! A [`WingedMesh`] is three flat, index-addressed arrays: faces, edges and
//! vertices. All adjacency is expressed through indices into those arrays,
//! so a mesh can be cloned, moved or serialized verbatim.
//!
//! # Orientation
//! Every [`Edge`] has two sides. Walking face `face_a` along its edge cycle,
//! the edge is entered at `first_vertex_a` and left at `first_vertex_b`;
//! walking `face_b`, the roles are swapped. `prev_*`/`next_*` are the
//! neighboring edges in the respective face cycle. Consequently the second
//! vertex of an edge on a face is the first vertex of its successor on that
//! face, which lets face corners be read off without comparing endpoint sets.
//!
//! # Expected invariants
//! - `V - E + F = 2` (closed genus-0 surface).
//! - Walking `next` around a face visits exactly the face's listed edges, in
//!   listed order, and returns to the start.
//! - Walking [`WingedMesh::next_edge_for_vertex`] around a vertex visits
//!   exactly the vertex's listed edges, in listed order.
//!
//! Use [`crate::topology::validation::validate_mesh`] to check them.

use crate::geometry::vector::{Vec3, centroid, length, scale};
use crate::mesh_error::MeshError;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// One of the two wings of an [`Edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// A mesh vertex: position plus its incident edges in cyclic order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vertex {
    /// Position relative to the sphere center.
    pub coords: Vec3,
    /// Incident edges in the order produced by walking
    /// [`WingedMesh::next_edge_for_vertex`].
    pub edges: Vec<usize>,
    /// Write-once neighbor cache, derived from `edges`.
    #[serde(skip)]
    neighbors: OnceCell<Vec<usize>>,
}

impl Vertex {
    pub fn new(coords: Vec3, edges: Vec<usize>) -> Self {
        Self {
            coords,
            edges,
            neighbors: OnceCell::new(),
        }
    }

    /// Number of incident edges.
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Neighbor list if [`WingedMesh::cache_vertex_neighbors`] has filled it.
    pub fn cached_neighbors(&self) -> Option<&[usize]> {
        self.neighbors.get().map(Vec::as_slice)
    }
}

/// A winged edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub first_vertex_a: usize,
    pub first_vertex_b: usize,
    pub face_a: usize,
    pub face_b: usize,
    pub prev_a: usize,
    pub next_a: usize,
    pub prev_b: usize,
    pub next_b: usize,
}

impl Edge {
    /// Side whose face is `face`.
    pub fn side_for_face(&self, face: usize) -> Option<Side> {
        if self.face_a == face {
            Some(Side::A)
        } else if self.face_b == face {
            Some(Side::B)
        } else {
            None
        }
    }

    /// Side on which the edge is entered at `vertex`.
    pub fn side_for_vertex(&self, vertex: usize) -> Option<Side> {
        if self.first_vertex_a == vertex {
            Some(Side::A)
        } else if self.first_vertex_b == vertex {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn face(&self, side: Side) -> usize {
        match side {
            Side::A => self.face_a,
            Side::B => self.face_b,
        }
    }

    pub fn first_vertex(&self, side: Side) -> usize {
        match side {
            Side::A => self.first_vertex_a,
            Side::B => self.first_vertex_b,
        }
    }

    pub fn prev(&self, side: Side) -> usize {
        match side {
            Side::A => self.prev_a,
            Side::B => self.prev_b,
        }
    }

    pub fn next(&self, side: Side) -> usize {
        match side {
            Side::A => self.next_a,
            Side::B => self.next_b,
        }
    }

    /// Endpoints as `(first_vertex_a, first_vertex_b)`.
    pub fn endpoints(&self) -> (usize, usize) {
        (self.first_vertex_a, self.first_vertex_b)
    }

    pub fn has_vertex(&self, vertex: usize) -> bool {
        self.first_vertex_a == vertex || self.first_vertex_b == vertex
    }
}

/// A face: its edges in cyclic order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Face {
    pub edges: Vec<usize>,
}

impl Face {
    pub fn new(edges: Vec<usize>) -> Self {
        Self { edges }
    }

    /// Position of `edge` in this face's cycle.
    pub fn slot_of(&self, edge: usize) -> Option<usize> {
        self.edges.iter().position(|&e| e == edge)
    }
}

/// Winged-edge mesh: three index-addressed entity arrays.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WingedMesh {
    pub faces: Vec<Face>,
    pub edges: Vec<Edge>,
    pub vertices: Vec<Vertex>,
}

impl WingedMesh {
    pub fn new(faces: Vec<Face>, edges: Vec<Edge>, vertices: Vec<Vertex>) -> Self {
        Self {
            faces,
            edges,
            vertices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// `V - E + F`; equal to 2 for every mesh this crate produces.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices.len() as i64 - self.edges.len() as i64 + self.faces.len() as i64
    }

    /// True when every face has exactly three edges.
    pub fn is_triangulated(&self) -> bool {
        self.faces.iter().all(|f| f.edges.len() == 3)
    }

    pub fn vertex(&self, vertex: usize) -> Result<&Vertex, MeshError> {
        self.vertices.get(vertex).ok_or(MeshError::VertexOutOfRange {
            vertex,
            len: self.vertices.len(),
        })
    }

    pub fn edge(&self, edge: usize) -> Result<&Edge, MeshError> {
        self.edges.get(edge).ok_or(MeshError::EdgeOutOfRange {
            edge,
            len: self.edges.len(),
        })
    }

    pub fn face(&self, face: usize) -> Result<&Face, MeshError> {
        self.faces.get(face).ok_or(MeshError::FaceOutOfRange {
            face,
            len: self.faces.len(),
        })
    }

    // ---------------------------------------------------------------------
    // Face-relative traversal
    // ---------------------------------------------------------------------

    fn face_side(&self, edge: usize, face: usize) -> Result<(&Edge, Side), MeshError> {
        let e = self.edge(edge)?;
        let side = e
            .side_for_face(face)
            .ok_or(MeshError::EdgeNotOnFace { edge, face })?;
        Ok((e, side))
    }

    /// Successor of `edge` when walking `face`.
    pub fn next_edge_for_face(&self, edge: usize, face: usize) -> Result<usize, MeshError> {
        let (e, side) = self.face_side(edge, face)?;
        Ok(e.next(side))
    }

    /// Predecessor of `edge` when walking `face`.
    pub fn prev_edge_for_face(&self, edge: usize, face: usize) -> Result<usize, MeshError> {
        let (e, side) = self.face_side(edge, face)?;
        Ok(e.prev(side))
    }

    /// Vertex at which `face`'s walk enters `edge`.
    pub fn first_vertex_for_face(&self, edge: usize, face: usize) -> Result<usize, MeshError> {
        let (e, side) = self.face_side(edge, face)?;
        Ok(e.first_vertex(side))
    }

    /// Vertex at which `face`'s walk leaves `edge`.
    pub fn second_vertex_for_face(&self, edge: usize, face: usize) -> Result<usize, MeshError> {
        let (e, side) = self.face_side(edge, face)?;
        Ok(e.first_vertex(side.other()))
    }

    /// The face on the other side of `edge` from `face`.
    pub fn adjacent_for_face(&self, edge: usize, face: usize) -> Result<usize, MeshError> {
        let (e, side) = self.face_side(edge, face)?;
        Ok(e.face(side.other()))
    }

    // ---------------------------------------------------------------------
    // Vertex-relative traversal
    // ---------------------------------------------------------------------

    fn vertex_side(&self, edge: usize, vertex: usize) -> Result<(&Edge, Side), MeshError> {
        let e = self.edge(edge)?;
        let side = e
            .side_for_vertex(vertex)
            .ok_or(MeshError::EdgeNotOnVertex { edge, vertex })?;
        Ok((e, side))
    }

    /// Next edge around `vertex`: the predecessor of `edge` on the face whose
    /// walk enters `edge` at `vertex`.
    pub fn next_edge_for_vertex(&self, edge: usize, vertex: usize) -> Result<usize, MeshError> {
        let (e, side) = self.vertex_side(edge, vertex)?;
        Ok(e.prev(side))
    }

    /// Inverse of [`Self::next_edge_for_vertex`].
    pub fn prev_edge_for_vertex(&self, edge: usize, vertex: usize) -> Result<usize, MeshError> {
        let (e, side) = self.vertex_side(edge, vertex)?;
        Ok(e.next(side.other()))
    }

    /// The other endpoint of `edge`.
    pub fn adjacent_for_vertex(&self, edge: usize, vertex: usize) -> Result<usize, MeshError> {
        let (e, side) = self.vertex_side(edge, vertex)?;
        Ok(e.first_vertex(side.other()))
    }

    // ---------------------------------------------------------------------
    // Derived queries
    // ---------------------------------------------------------------------

    /// One neighboring face per edge, in the face's edge order.
    pub fn neighbors_for_face(&self, face: usize) -> Result<Vec<usize>, MeshError> {
        self.face(face)?
            .edges
            .iter()
            .map(|&e| self.adjacent_for_face(e, face))
            .collect()
    }

    /// Corner vertices of `face`, one per edge, in the face's edge order.
    pub fn face_corners(&self, face: usize) -> Result<Vec<usize>, MeshError> {
        self.face(face)?
            .edges
            .iter()
            .map(|&e| self.first_vertex_for_face(e, face))
            .collect()
    }

    /// Arithmetic mean of the face's corner coordinates.
    pub fn face_center(&self, face: usize) -> Result<Vec3, MeshError> {
        let corners = self.face_corners(face)?;
        Ok(centroid(corners.iter().map(|&v| self.vertices[v].coords)))
    }

    /// Neighbor vertices in the order of the vertex's `edges`.
    ///
    /// Served from the cache when [`Self::cache_vertex_neighbors`] has run
    /// for this vertex, recomputed otherwise. Both paths return the same list.
    pub fn neighbors_for_vertex(&self, vertex: usize) -> Result<Cow<'_, [usize]>, MeshError> {
        let v = self.vertex(vertex)?;
        match v.cached_neighbors() {
            Some(cached) => Ok(Cow::Borrowed(cached)),
            None => self.compute_vertex_neighbors(vertex).map(Cow::Owned),
        }
    }

    fn compute_vertex_neighbors(&self, vertex: usize) -> Result<Vec<usize>, MeshError> {
        self.vertex(vertex)?
            .edges
            .iter()
            .map(|&e| self.adjacent_for_vertex(e, vertex))
            .collect()
    }

    /// Fill the neighbor cache of one vertex. A filled cache is never
    /// recomputed.
    pub fn cache_vertex_neighbors(&mut self, vertex: usize) -> Result<&[usize], MeshError> {
        let mesh: &Self = self;
        let cell = &mesh.vertex(vertex)?.neighbors;
        cell.get_or_try_init(|| mesh.compute_vertex_neighbors(vertex))
            .map(Vec::as_slice)
    }

    /// Fill the neighbor cache of every vertex.
    pub fn cache_all_neighbors(&mut self) -> Result<(), MeshError> {
        for v in 0..self.vertices.len() {
            self.cache_vertex_neighbors(v)?;
        }
        Ok(())
    }

    /// Project every vertex onto the sphere of the given radius.
    ///
    /// # Errors
    /// [`MeshError::InvalidRadius`] for a non-positive or non-finite radius,
    /// [`MeshError::DegenerateGeometry`] for a vertex at the origin. The mesh
    /// is left untouched on error.
    pub fn normalize_to_radius(&mut self, radius: f64) -> Result<(), MeshError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(MeshError::InvalidRadius(radius));
        }
        if let Some(vertex) = self
            .vertices
            .iter()
            .position(|v| length(v.coords) == 0.0)
        {
            return Err(MeshError::DegenerateGeometry {
                vertex,
                context: "vertex at the origin has no direction",
            });
        }
        for v in &mut self.vertices {
            v.coords = scale(v.coords, radius / length(v.coords));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::icosahedron::icosahedron;
    use static_assertions::assert_impl_all;

    // meshes are shared read-only across threads by the evaluator and relaxation
    assert_impl_all!(WingedMesh: Send, Sync, Clone);
    assert_impl_all!(Edge: Copy, Eq);

    #[test]
    fn face_walk_matches_listed_order() {
        let mesh = icosahedron();
        for (f, face) in mesh.faces.iter().enumerate() {
            for (i, &e) in face.edges.iter().enumerate() {
                let next = mesh.next_edge_for_face(e, f).unwrap();
                assert_eq!(next, face.edges[(i + 1) % face.edges.len()]);
                assert_eq!(mesh.prev_edge_for_face(next, f).unwrap(), e);
            }
        }
    }

    #[test]
    fn second_vertex_is_next_first_vertex() {
        let mesh = icosahedron();
        for (f, face) in mesh.faces.iter().enumerate() {
            for &e in &face.edges {
                let next = mesh.next_edge_for_face(e, f).unwrap();
                assert_eq!(
                    mesh.second_vertex_for_face(e, f).unwrap(),
                    mesh.first_vertex_for_face(next, f).unwrap()
                );
            }
        }
    }

    #[test]
    fn vertex_walk_round_trips() {
        let mesh = icosahedron();
        for (v, vertex) in mesh.vertices.iter().enumerate() {
            for &e in &vertex.edges {
                let next = mesh.next_edge_for_vertex(e, v).unwrap();
                assert_eq!(mesh.prev_edge_for_vertex(next, v).unwrap(), e);
            }
        }
    }

    #[test]
    fn unrelated_indices_are_topology_errors() {
        let mesh = icosahedron();
        // edge 0 joins vertices 0 and 2 and borders faces 0 and 1
        assert_eq!(
            mesh.next_edge_for_face(0, 7),
            Err(MeshError::EdgeNotOnFace { edge: 0, face: 7 })
        );
        assert_eq!(
            mesh.adjacent_for_vertex(0, 11),
            Err(MeshError::EdgeNotOnVertex { edge: 0, vertex: 11 })
        );
        assert_eq!(
            mesh.first_vertex_for_face(30, 0),
            Err(MeshError::EdgeOutOfRange { edge: 30, len: 30 })
        );
    }

    #[test]
    fn adjacent_for_face_is_symmetric() {
        let mesh = icosahedron();
        for (f, face) in mesh.faces.iter().enumerate() {
            let neighbors = mesh.neighbors_for_face(f).unwrap();
            assert_eq!(neighbors.len(), face.edges.len());
            for (&e, &g) in face.edges.iter().zip(&neighbors) {
                assert_ne!(g, f);
                assert_eq!(mesh.adjacent_for_face(e, g).unwrap(), f);
            }
        }
    }

    #[test]
    fn neighbor_cache_is_transparent_and_write_once() {
        let mut mesh = icosahedron();
        let fresh = mesh.neighbors_for_vertex(3).unwrap().into_owned();
        assert!(mesh.vertices[3].cached_neighbors().is_none());

        let cached = mesh.cache_vertex_neighbors(3).unwrap().to_vec();
        assert_eq!(fresh, cached);
        assert!(matches!(
            mesh.neighbors_for_vertex(3).unwrap(),
            Cow::Borrowed(_)
        ));

        let again = mesh.cache_vertex_neighbors(3).unwrap().as_ptr();
        assert_eq!(again, mesh.vertices[3].cached_neighbors().unwrap().as_ptr());
    }

    #[test]
    fn neighbors_follow_edge_order() {
        let mesh = icosahedron();
        let v = 5;
        let neighbors = mesh.neighbors_for_vertex(v).unwrap();
        for (&e, &n) in mesh.vertices[v].edges.iter().zip(neighbors.iter()) {
            assert!(mesh.edges[e].has_vertex(n));
            assert_ne!(n, v);
        }
    }

    #[test]
    fn normalize_to_radius_projects_every_vertex() {
        let mut mesh = icosahedron();
        mesh.normalize_to_radius(3.0).unwrap();
        for v in &mesh.vertices {
            assert!((length(v.coords) - 3.0).abs() < 1e-12);
        }
        assert_eq!(
            mesh.normalize_to_radius(-1.0),
            Err(MeshError::InvalidRadius(-1.0))
        );
    }

    #[test]
    fn face_center_of_icosahedron_points_outward() {
        let mesh = icosahedron();
        let c = mesh.face_center(0).unwrap();
        assert!(length(c) > 1.0);
    }
}
