#![allow(dead_code)]
use hashbrown::HashSet;
use winged_sphere::prelude::*;

/// Icosahedron subdivided with factor `k`.
pub fn sphere(k: usize) -> WingedMesh {
    subdivide(&icosahedron(), k).unwrap()
}

/// `(V, E, F)` of a mesh.
pub fn counts(mesh: &WingedMesh) -> (usize, usize, usize) {
    (mesh.vertex_count(), mesh.edge_count(), mesh.face_count())
}

/// Neighbor set of vertex `v` as stored in the mesh.
pub fn neighbor_set(mesh: &WingedMesh, v: usize) -> HashSet<usize> {
    mesh.neighbors_for_vertex(v).unwrap().iter().copied().collect()
}

/// Compare the evaluator against the materialized mesh at `index`.
pub fn assert_evaluator_matches(mesh: &WingedMesh, eval: &SubdivisionEvaluator<'_>, index: usize) {
    let v = eval.vertex(index).unwrap();
    assert_eq!(
        v.coords, mesh.vertices[index].coords,
        "coordinate mismatch at {index} ({:?})",
        eval.locate(index)
    );
    let got: HashSet<usize> = v.neighbors.iter().copied().collect();
    assert_eq!(got.len(), v.neighbors.len(), "duplicate neighbors at {index}");
    assert_eq!(
        got,
        neighbor_set(mesh, index),
        "neighbor mismatch at {index} ({:?})",
        eval.locate(index)
    );
}

/// Population variance of edge lengths.
pub fn edge_length_variance(mesh: &WingedMesh) -> f64 {
    EdgeLengthStats::from_mesh(mesh).unwrap().unwrap().variance
}
