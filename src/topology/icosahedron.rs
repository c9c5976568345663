//! Seed icosahedron with a fixed, hand-verified adjacency table.
//!
//! The twelve vertices sit on three mutually orthogonal golden rectangles,
//! `(0, ±1, ±G)`, `(±G, 0, ±1)` and `(±1, ±G, 0)` with `G` the golden ratio,
//! so every edge has length 2 and every vertex lies at `sqrt(1 + G²)` from
//! the origin. Every other mesh in the crate derives its adjacency from this
//! table algorithmically.

use crate::geometry::vector::Vec3;
use crate::topology::mesh::{Edge, Face, Vertex, WingedMesh};
use static_assertions::const_assert_eq;

/// Golden ratio, to the precision the table was verified with.
pub const GOLDEN_RATIO: f64 = 1.61803398875;

const G: f64 = GOLDEN_RATIO;

const COORDS: [Vec3; 12] = [
    [0.0, 1.0, G],
    [0.0, 1.0, -G],
    [0.0, -1.0, G],
    [0.0, -1.0, -G],
    [-G, 0.0, 1.0],
    [G, 0.0, 1.0],
    [-G, 0.0, -1.0],
    [G, 0.0, -1.0],
    [-1.0, G, 0.0],
    [-1.0, -G, 0.0],
    [1.0, G, 0.0],
    [1.0, -G, 0.0],
];

const VERTEX_EDGES: [[usize; 5]; 12] = [
    [4, 3, 2, 1, 0],
    [19, 24, 25, 15, 10],
    [5, 20, 29, 9, 0],
    [11, 12, 13, 14, 10],
    [6, 22, 21, 5, 1],
    [9, 28, 27, 8, 4],
    [18, 22, 23, 19, 14],
    [15, 26, 27, 16, 11],
    [7, 24, 23, 6, 2],
    [17, 20, 21, 18, 13],
    [8, 26, 25, 7, 3],
    [16, 28, 29, 17, 12],
];

const FACE_EDGES: [[usize; 3]; 20] = [
    [9, 4, 0],
    [1, 5, 0],
    [2, 6, 1],
    [3, 7, 2],
    [4, 8, 3],
    [14, 19, 10],
    [15, 11, 10],
    [16, 12, 11],
    [17, 13, 12],
    [18, 14, 13],
    [29, 28, 9],
    [29, 20, 17],
    [21, 20, 5],
    [21, 22, 18],
    [23, 22, 6],
    [23, 24, 19],
    [25, 24, 7],
    [25, 26, 15],
    [27, 26, 8],
    [27, 28, 16],
];

// first_vertex_a, first_vertex_b, face_a, face_b, prev_a, next_a, prev_b, next_b
const EDGES: [[usize; 8]; 30] = [
    [0, 2, 0, 1, 4, 9, 5, 1],
    [0, 4, 1, 2, 0, 5, 6, 2],
    [0, 8, 2, 3, 1, 6, 7, 3],
    [0, 10, 3, 4, 2, 7, 8, 4],
    [0, 5, 4, 0, 3, 8, 9, 0],
    [4, 2, 1, 12, 1, 0, 20, 21],
    [8, 4, 2, 14, 2, 1, 22, 23],
    [10, 8, 3, 16, 3, 2, 24, 25],
    [5, 10, 4, 18, 4, 3, 26, 27],
    [2, 5, 0, 10, 0, 4, 28, 29],
    [1, 3, 5, 6, 19, 14, 11, 15],
    [7, 3, 6, 7, 15, 10, 12, 16],
    [11, 3, 7, 8, 16, 11, 13, 17],
    [9, 3, 8, 9, 17, 12, 14, 18],
    [6, 3, 9, 5, 18, 13, 10, 19],
    [1, 7, 6, 17, 10, 11, 26, 25],
    [7, 11, 7, 19, 11, 12, 28, 27],
    [11, 9, 8, 11, 12, 13, 20, 29],
    [9, 6, 9, 13, 13, 14, 22, 21],
    [6, 1, 5, 15, 14, 10, 24, 23],
    [2, 9, 11, 12, 29, 17, 21, 5],
    [4, 9, 12, 13, 5, 20, 18, 22],
    [4, 6, 13, 14, 21, 18, 23, 6],
    [8, 6, 14, 15, 6, 22, 19, 24],
    [8, 1, 15, 16, 23, 19, 25, 7],
    [10, 1, 16, 17, 7, 24, 15, 26],
    [10, 7, 17, 18, 25, 15, 27, 8],
    [5, 7, 18, 19, 8, 26, 16, 28],
    [5, 11, 19, 10, 27, 16, 29, 9],
    [2, 11, 10, 11, 9, 28, 17, 20],
];

const_assert_eq!(COORDS.len() + FACE_EDGES.len(), EDGES.len() + 2);
const_assert_eq!(2 * EDGES.len(), 3 * FACE_EDGES.len());

/// Build the seed icosahedron: 12 vertices, 30 edges, 20 triangles.
pub fn icosahedron() -> WingedMesh {
    let vertices = COORDS
        .iter()
        .zip(VERTEX_EDGES.iter())
        .map(|(&coords, edges)| Vertex::new(coords, edges.to_vec()))
        .collect();
    let edges = EDGES
        .iter()
        .map(|row| Edge {
            first_vertex_a: row[0],
            first_vertex_b: row[1],
            face_a: row[2],
            face_b: row[3],
            prev_a: row[4],
            next_a: row[5],
            prev_b: row[6],
            next_b: row[7],
        })
        .collect();
    let faces = FACE_EDGES.iter().map(|f| Face::new(f.to_vec())).collect();
    WingedMesh::new(faces, edges, vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vector::distance;

    #[test]
    fn counts() {
        let mesh = icosahedron();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.edge_count(), 30);
        assert_eq!(mesh.face_count(), 20);
        assert_eq!(mesh.euler_characteristic(), 2);
    }

    #[test]
    fn every_edge_has_length_two() {
        let mesh = icosahedron();
        for (i, e) in mesh.edges.iter().enumerate() {
            let d = distance(
                mesh.vertices[e.first_vertex_a].coords,
                mesh.vertices[e.first_vertex_b].coords,
            );
            assert!((d - 2.0) * (d - 2.0) < 1e-8, "edge {i} has length {d}");
        }
    }

    #[test]
    fn vertex_edge_lists_contain_the_vertex() {
        let mesh = icosahedron();
        for (v, vertex) in mesh.vertices.iter().enumerate() {
            assert_eq!(vertex.degree(), 5);
            for &e in &vertex.edges {
                assert!(mesh.edges[e].has_vertex(v), "edge {e} misses vertex {v}");
            }
        }
    }
}
