mod util;

use util::{counts, sphere};
use winged_sphere::geometry::vector::length;
use winged_sphere::prelude::*;
use winged_sphere::topology::refine::layout::SubdivisionLayout;

#[test]
fn k_one_counts() {
    assert_eq!(counts(&sphere(1)), (42, 120, 80));
}

#[test]
fn closed_form_counts() {
    for k in 1..=8 {
        let mesh = sphere(k);
        let f = 20 * (k + 1) * (k + 1);
        assert_eq!(counts(&mesh), (f / 2 + 2, 3 * f / 2, f), "k={k}");
        assert_eq!(mesh.euler_characteristic(), 2);
    }
}

#[test]
fn subdivisions_validate() {
    for k in 1..=6 {
        let mesh = sphere(k);
        validate_mesh(&mesh, &MeshValidationOptions::all())
            .unwrap_or_else(|e| panic!("k={k}: {e}"));
    }
}

#[test]
fn nested_subdivision_validates() {
    let once = sphere(2);
    let twice = subdivide(&once, 2).unwrap();
    validate_mesh(&twice, &MeshValidationOptions::all()).unwrap();
    assert!(twice.vertices[..12].iter().all(|v| v.degree() == 5));
    assert!(twice.vertices[12..].iter().all(|v| v.degree() == 6));
}

#[test]
fn sub_edges_chain_along_base_edges() {
    let ico = icosahedron();
    let k = 4;
    let mesh = subdivide(&ico, k).unwrap();
    let layout = SubdivisionLayout::new(&ico, k).unwrap();
    for (e, edge) in ico.edges.iter().enumerate() {
        let mut prev = edge.first_vertex_a;
        for j in 0..k {
            let v = layout.edge_vertex(e, j);
            assert_eq!(mesh.edges[layout.sub_edge(e, j)].endpoints(), (prev, v));
            prev = v;
        }
        assert_eq!(
            mesh.edges[layout.sub_edge(e, k)].endpoints(),
            (prev, edge.first_vertex_b)
        );
    }
}

#[test]
fn new_points_are_inside_the_sphere() {
    let mesh = sphere(5);
    let radius = length(mesh.vertices[0].coords);
    for v in &mesh.vertices {
        assert!(length(v.coords) <= radius + 1e-9);
    }
}

#[test]
fn non_triangle_base_is_rejected() {
    let dodeca = dual(&icosahedron()).unwrap();
    let err = subdivide(&dodeca, 1).unwrap_err();
    assert_eq!(err, MeshError::NonTriangularFace { face: 0, edges: 5 });
    assert_eq!(err.category(), ErrorCategory::InvalidArgument);
}

#[test]
fn zero_factor_is_invalid_argument() {
    let err = subdivide(&icosahedron(), 0).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::InvalidArgument);
}

#[test]
fn broken_base_is_reported() {
    let mut ico = icosahedron();
    // edge 0 now claims face 0 on both sides, so face 1 loses it
    ico.edges[0].face_b = ico.edges[0].face_a;
    let err = subdivide(&ico, 2).unwrap_err();
    assert_eq!(err, MeshError::EdgeNotOnFace { edge: 0, face: 1 });
}
