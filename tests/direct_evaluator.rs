mod util;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use util::{assert_evaluator_matches, sphere};
use winged_sphere::prelude::*;

fn check_all(base: &WingedMesh, k: usize) {
    let mesh = subdivide(base, k).unwrap();
    let eval = SubdivisionEvaluator::new(base, k).unwrap();
    assert_eq!(eval.vertex_count(), mesh.vertex_count());
    for i in 0..mesh.vertex_count() {
        assert_evaluator_matches(&mesh, &eval, i);
    }
}

#[test]
fn every_vertex_matches_on_icosahedron() {
    let ico = icosahedron();
    for k in 1..=7 {
        check_all(&ico, k);
    }
}

#[test]
fn every_vertex_matches_on_subdivided_base() {
    let base = sphere(2);
    for k in 1..=4 {
        check_all(&base, k);
    }
}

#[test]
fn every_class_is_exercised() {
    let ico = icosahedron();
    let k = 4;
    let eval = SubdivisionEvaluator::new(&ico, k).unwrap();
    let (mut original, mut corner_edge, mut mid_edge, mut face) = (0, 0, 0, 0);
    for i in 0..eval.vertex_count() {
        match eval.locate(i).unwrap() {
            VertexSite::Original { .. } => original += 1,
            VertexSite::EdgeInterior { position, .. } if position == 0 || position == k - 1 => {
                corner_edge += 1
            }
            VertexSite::EdgeInterior { .. } => mid_edge += 1,
            VertexSite::FaceInterior { .. } => face += 1,
        }
    }
    assert_eq!(original, 12);
    assert_eq!(corner_edge, 30 * 2);
    assert_eq!(mid_edge, 30 * 2);
    assert_eq!(face, 20 * 6);
}

#[test]
fn original_neighbors_follow_base_edge_order() {
    let ico = icosahedron();
    let k = 3;
    let eval = SubdivisionEvaluator::new(&ico, k).unwrap();
    for v in 0..12 {
        let neighbors = eval.neighbors(v).unwrap();
        assert_eq!(neighbors.len(), ico.vertices[v].degree());
        for (&n, &e) in neighbors.iter().zip(&ico.vertices[v].edges) {
            match eval.locate(n).unwrap() {
                VertexSite::EdgeInterior { edge, .. } => assert_eq!(edge, e),
                other => panic!("neighbor {n} of {v} is {other:?}"),
            }
        }
    }
}

#[test]
fn out_of_range_index_is_invalid_argument() {
    let ico = icosahedron();
    let eval = SubdivisionEvaluator::new(&ico, 2).unwrap();
    let err = eval.vertex(eval.vertex_count()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::InvalidArgument);
    assert!(SubdivisionEvaluator::new(&ico, 0).is_err());
}

#[test]
fn fine_subdivision_samples_stay_consistent() {
    // neighbor relation must be symmetric even where materializing is too costly
    let ico = icosahedron();
    let eval = SubdivisionEvaluator::new(&ico, 500).unwrap();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let i = rng.gen_range(0..eval.vertex_count());
        let v = eval.vertex(i).unwrap();
        for &n in &v.neighbors {
            assert!(eval.neighbors(n).unwrap().contains(&i), "{i} -> {n} not symmetric");
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_indices_match_materialized(k in 1usize..9, pick in 0.0f64..1.0) {
        let ico = icosahedron();
        let mesh = subdivide(&ico, k).unwrap();
        let eval = SubdivisionEvaluator::new(&ico, k).unwrap();
        let i = ((pick * mesh.vertex_count() as f64) as usize).min(mesh.vertex_count() - 1);
        assert_evaluator_matches(&mesh, &eval, i);
    }
}
