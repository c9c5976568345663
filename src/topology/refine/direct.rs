//! Direct evaluation of single vertices of a virtual subdivision.
//!
//! [`SubdivisionEvaluator`] answers "where is vertex `i`, and who are its
//! neighbors" for the mesh [`super::subdivide`] would build, in time
//! independent of `k` and without allocating that mesh. The base may be any
//! closed triangle mesh, including one that is itself a subdivision.
//!
//! Coordinates match the materialized mesh bit for bit; neighbor sets match
//! as sets.

use super::edge_fraction;
use super::layout::{SubdivisionLayout, row_of, triangular};
use crate::geometry::chord::chord_point;
use crate::geometry::vector::Vec3;
use crate::mesh_error::MeshError;
use crate::topology::mesh::WingedMesh;

/// Provenance of a vertex in the subdivided layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexSite {
    /// A copied base vertex.
    Original { vertex: usize },
    /// The `position`-th interior point of base edge `edge`, counted from
    /// its `first_vertex_a`.
    EdgeInterior { edge: usize, position: usize },
    /// Interior point of base face `face` at grid `row`, `along` that row.
    FaceInterior {
        face: usize,
        row: usize,
        along: usize,
    },
}

/// Coordinate and neighbors of one evaluated vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct SubdividedVertex {
    pub index: usize,
    pub coords: Vec3,
    pub neighbors: Vec<usize>,
}

/// O(1) evaluator over the subdivision layout of a base mesh.
///
/// # Example
/// ```
/// use winged_sphere::topology::icosahedron::icosahedron;
/// use winged_sphere::topology::refine::direct::SubdivisionEvaluator;
///
/// let ico = icosahedron();
/// let eval = SubdivisionEvaluator::new(&ico, 1000)?;
/// let v = eval.vertex(5_000_000)?;
/// assert_eq!(v.neighbors.len(), 6);
/// # Ok::<(), winged_sphere::mesh_error::MeshError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SubdivisionEvaluator<'a> {
    layout: SubdivisionLayout<'a>,
}

impl<'a> SubdivisionEvaluator<'a> {
    /// # Errors
    /// Same as [`SubdivisionLayout::new`].
    pub fn new(base: &'a WingedMesh, k: usize) -> Result<Self, MeshError> {
        Ok(Self {
            layout: SubdivisionLayout::new(base, k)?,
        })
    }

    pub fn layout(&self) -> &SubdivisionLayout<'a> {
        &self.layout
    }

    /// Vertex count of the virtual subdivision.
    pub fn vertex_count(&self) -> usize {
        self.layout.vertex_count()
    }

    /// Classify `index`.
    ///
    /// # Errors
    /// [`MeshError::IndexOutOfRange`] for `index >= vertex_count()`.
    pub fn locate(&self, index: usize) -> Result<VertexSite, MeshError> {
        let l = &self.layout;
        let k = l.k();
        if index < l.base_vertex_count() {
            return Ok(VertexSite::Original { vertex: index });
        }
        if index < l.face_vertex_start() {
            let i = index - l.base_vertex_count();
            return Ok(VertexSite::EdgeInterior {
                edge: i / k,
                position: i % k,
            });
        }
        if index >= l.vertex_count() {
            return Err(MeshError::IndexOutOfRange {
                index,
                total: l.vertex_count(),
            });
        }
        let i = index - l.face_vertex_start();
        let per_face = l.points_per_face();
        let local = i % per_face;
        let row = row_of(local);
        Ok(VertexSite::FaceInterior {
            face: i / per_face,
            row,
            along: local - triangular(row),
        })
    }

    /// Inverse of [`Self::locate`].
    pub fn index_of(&self, site: VertexSite) -> usize {
        match site {
            VertexSite::Original { vertex } => vertex,
            VertexSite::EdgeInterior { edge, position } => self.layout.edge_vertex(edge, position),
            VertexSite::FaceInterior { face, row, along } => {
                self.layout.face_vertex(face, row, along)
            }
        }
    }

    /// Coordinate of vertex `index`.
    pub fn coordinate(&self, index: usize) -> Result<Vec3, MeshError> {
        let site = self.locate(index)?;
        self.site_coordinate(site)
    }

    fn site_coordinate(&self, site: VertexSite) -> Result<Vec3, MeshError> {
        let base = self.layout.base();
        match site {
            VertexSite::Original { vertex } => Ok(base.vertices[vertex].coords),
            VertexSite::EdgeInterior { edge, position } => {
                let e = &base.edges[edge];
                chord_point(
                    base.vertices[e.first_vertex_a].coords,
                    base.vertices[e.first_vertex_b].coords,
                    edge_fraction(position, self.layout.k()),
                    self.index_of(site),
                )
            }
            VertexSite::FaceInterior { face, row, along } => {
                let (d, t) = (row + 2, along + 1);
                let p = self.coordinate(self.layout.line_point(face, d, 0)?)?;
                let q = self.coordinate(self.layout.line_point(face, d, d)?)?;
                chord_point(p, q, t as f64 / d as f64, self.index_of(site))
            }
        }
    }

    /// Neighbors of vertex `index`, at most one per incident edge.
    ///
    /// Base vertices list neighbors in their base edge order; other vertices
    /// have exactly six, in no guaranteed order.
    pub fn neighbors(&self, index: usize) -> Result<Vec<usize>, MeshError> {
        let l = &self.layout;
        let base = l.base();
        match self.locate(index)? {
            VertexSite::Original { vertex } => base.vertices[vertex]
                .edges
                .iter()
                .map(|&e| {
                    let edge = base.edge(e)?;
                    if edge.first_vertex_a == vertex {
                        Ok(l.edge_vertex(e, 0))
                    } else if edge.first_vertex_b == vertex {
                        Ok(l.edge_vertex(e, l.k() - 1))
                    } else {
                        Err(MeshError::EdgeNotOnVertex { edge: e, vertex })
                    }
                })
                .collect(),
            VertexSite::EdgeInterior { edge, position } => {
                let e = base.edge(edge)?;
                let mut out = Vec::with_capacity(6);
                for face in [e.face_a, e.face_b] {
                    let (d, t) = l.edge_point_on_face(face, edge, position)?;
                    for (dd, tt) in l.grid_neighbors(d, t) {
                        let n = l.line_point(face, dd, tt)?;
                        if !out.contains(&n) {
                            out.push(n);
                        }
                    }
                }
                Ok(out)
            }
            VertexSite::FaceInterior { face, row, along } => l
                .grid_neighbors(row + 2, along + 1)
                .map(|(dd, tt)| l.line_point(face, dd, tt))
                .collect(),
        }
    }

    /// Coordinate and neighbors of vertex `index`.
    pub fn vertex(&self, index: usize) -> Result<SubdividedVertex, MeshError> {
        Ok(SubdividedVertex {
            index,
            coords: self.coordinate(index)?,
            neighbors: self.neighbors(index)?,
        })
    }
}
