//! Structural and geometric integrity checks for winged meshes.
//!
//! The checks encode the invariants every mesh in this crate satisfies:
//! Euler characteristic 2, face cycles that agree with `next`/`prev`
//! pointers and orientation duality, and vertex cycles that agree with
//! [`WingedMesh::next_edge_for_vertex`]. Geometric checks take explicit
//! tolerances; the right scale depends on the mesh radius.

use crate::DebugInvariants;
use crate::geometry::vector::{Vec3, cross, distance, dot, length, normalize, scale, sub};
use crate::mesh_error::MeshError;
use crate::topology::mesh::WingedMesh;
use itertools::Itertools;

/// How to check face orientation against the direction of the face center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrientationCheck {
    /// Skip orientation checks.
    Ignore,
    /// The right-hand normal of the first three corners must point away from
    /// the origin.
    Outward,
    /// Unit normal and unit center direction must agree component-wise within
    /// a squared `tolerance`.
    Aligned { tolerance: f64 },
}

/// Uniform edge-length expectation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeLengthCheck {
    pub expected: f64,
    /// Squared tolerance on `length - expected`.
    pub tolerance: f64,
}

/// Optional validation toggles for [`validate_mesh`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshValidationOptions {
    /// Require every face to be a triangle and `2E = 3F`.
    pub require_triangles: bool,
    /// Check `next`/`prev` walks and orientation duality around every face.
    pub check_face_cycles: bool,
    /// Check [`WingedMesh::next_edge_for_vertex`] walks around every vertex.
    pub check_vertex_cycles: bool,
    pub orientation: OrientationCheck,
    /// Squared distance tolerance for corner planarity, if checked.
    pub planarity_tolerance: Option<f64>,
    pub edge_length: Option<EdgeLengthCheck>,
    /// Log geometric failures with `log::warn!` instead of returning them.
    pub warn_only_geometry: bool,
}

impl MeshValidationOptions {
    /// Topology checks only, valid for polygonal (dual) meshes.
    pub fn topology_only() -> Self {
        Self {
            require_triangles: false,
            check_face_cycles: true,
            check_vertex_cycles: true,
            orientation: OrientationCheck::Ignore,
            planarity_tolerance: None,
            edge_length: None,
            warn_only_geometry: false,
        }
    }

    /// Every topology check plus outward orientation.
    pub fn all() -> Self {
        Self {
            require_triangles: true,
            orientation: OrientationCheck::Outward,
            ..Self::topology_only()
        }
    }
}

impl Default for MeshValidationOptions {
    fn default() -> Self {
        Self::topology_only()
    }
}

fn violation(msg: String) -> MeshError {
    MeshError::InvariantViolation(msg)
}

/// Validate `mesh` against `options`, returning the first failure.
pub fn validate_mesh(mesh: &WingedMesh, options: &MeshValidationOptions) -> Result<(), MeshError> {
    check_index_ranges(mesh)?;

    let euler = mesh.euler_characteristic();
    if euler != 2 {
        return Err(violation(format!("Euler characteristic is {euler}, expected 2")));
    }

    if options.require_triangles {
        if let Some((f, face)) = mesh
            .faces
            .iter()
            .enumerate()
            .find(|(_, face)| face.edges.len() != 3)
        {
            return Err(MeshError::NonTriangularFace {
                face: f,
                edges: face.edges.len(),
            });
        }
        if 2 * mesh.edge_count() != 3 * mesh.face_count() {
            return Err(violation(format!(
                "{} edges for {} triangles",
                mesh.edge_count(),
                mesh.face_count()
            )));
        }
    }

    if options.check_face_cycles {
        for f in 0..mesh.face_count() {
            if !face_edges_match_order(mesh, f)? {
                return Err(violation(format!("face {f} edge order disagrees with next pointers")));
            }
            check_orientation_duality(mesh, f)?;
        }
    }

    if options.check_vertex_cycles {
        for v in 0..mesh.vertex_count() {
            check_vertex_cycle(mesh, v)?;
        }
    }

    let geometry = check_geometry(mesh, options);
    match geometry {
        Err(e) if options.warn_only_geometry => {
            log::warn!("geometry check failed: {e}");
            Ok(())
        }
        other => other,
    }
}

fn check_index_ranges(mesh: &WingedMesh) -> Result<(), MeshError> {
    let (nv, ne, nf) = (mesh.vertex_count(), mesh.edge_count(), mesh.face_count());
    for (i, e) in mesh.edges.iter().enumerate() {
        for v in [e.first_vertex_a, e.first_vertex_b] {
            if v >= nv {
                return Err(violation(format!("edge {i} references vertex {v} of {nv}")));
            }
        }
        for f in [e.face_a, e.face_b] {
            if f >= nf {
                return Err(violation(format!("edge {i} references face {f} of {nf}")));
            }
        }
        for x in [e.prev_a, e.next_a, e.prev_b, e.next_b] {
            if x >= ne {
                return Err(violation(format!("edge {i} references edge {x} of {ne}")));
            }
        }
    }
    let listed = mesh
        .faces
        .iter()
        .flat_map(|f| &f.edges)
        .chain(mesh.vertices.iter().flat_map(|v| &v.edges));
    if let Some(&bad) = listed.into_iter().find(|&&e| e >= ne) {
        return Err(MeshError::EdgeOutOfRange { edge: bad, len: ne });
    }
    Ok(())
}

/// Whether walking `next` from the face's last listed edge reproduces the
/// listed order and returns to the start after exactly `edges.len()` steps.
pub fn face_edges_match_order(mesh: &WingedMesh, face: usize) -> Result<bool, MeshError> {
    let edges = &mesh.face(face)?.edges;
    if edges.len() < 3 {
        return Err(violation(format!("face {face} has {} edges", edges.len())));
    }
    // a repeated shorter cycle would pass the pairwise walk
    if !edges.iter().all_unique() {
        return Ok(false);
    }
    for (&cur, &want) in edges.iter().circular_tuple_windows() {
        if mesh.next_edge_for_face(cur, face)? != want {
            return Ok(false);
        }
        if mesh.prev_edge_for_face(want, face)? != cur {
            return Ok(false);
        }
    }
    Ok(true)
}

fn check_orientation_duality(mesh: &WingedMesh, face: usize) -> Result<(), MeshError> {
    for &e in &mesh.face(face)?.edges {
        let next = mesh.next_edge_for_face(e, face)?;
        let leaves = mesh.second_vertex_for_face(e, face)?;
        let enters = mesh.first_vertex_for_face(next, face)?;
        if leaves != enters {
            return Err(violation(format!(
                "face {face}: edge {e} ends at {leaves} but edge {next} starts at {enters}"
            )));
        }
    }
    Ok(())
}

fn check_vertex_cycle(mesh: &WingedMesh, vertex: usize) -> Result<(), MeshError> {
    let edges = &mesh.vertex(vertex)?.edges;
    if edges.is_empty() {
        return Err(violation(format!("vertex {vertex} has no edges")));
    }
    if !edges.iter().all_unique() {
        return Err(violation(format!("vertex {vertex} lists an edge twice")));
    }
    for (&cur, &want) in edges.iter().circular_tuple_windows() {
        let next = mesh.next_edge_for_vertex(cur, vertex)?;
        if next != want {
            return Err(violation(format!(
                "vertex {vertex}: edge after {cur} is {next}, listed {want}"
            )));
        }
    }
    Ok(())
}

fn check_geometry(mesh: &WingedMesh, options: &MeshValidationOptions) -> Result<(), MeshError> {
    for f in 0..mesh.face_count() {
        match options.orientation {
            OrientationCheck::Ignore => {}
            OrientationCheck::Outward => {
                if face_orientation(mesh, f)? <= 0.0 {
                    return Err(violation(format!("face {f} faces the origin")));
                }
            }
            OrientationCheck::Aligned { tolerance } => {
                if !face_aligned(mesh, f, tolerance)? {
                    return Err(violation(format!(
                        "face {f} normal deviates from its center direction"
                    )));
                }
            }
        }
        if let Some(tolerance) = options.planarity_tolerance {
            if !face_vertices_planar(mesh, f, tolerance)? {
                return Err(violation(format!("face {f} is not planar")));
            }
        }
    }
    if let Some(check) = options.edge_length {
        for (i, e) in mesh.edges.iter().enumerate() {
            let d = distance(
                mesh.vertices[e.first_vertex_a].coords,
                mesh.vertices[e.first_vertex_b].coords,
            );
            if (d - check.expected) * (d - check.expected) > check.tolerance {
                return Err(violation(format!(
                    "edge {i} has length {d}, expected {}",
                    check.expected
                )));
            }
        }
    }
    Ok(())
}

/// Right-hand normal of the face's first three corners (not normalized).
pub fn face_normal(mesh: &WingedMesh, face: usize) -> Result<Vec3, MeshError> {
    let corners = mesh.face_corners(face)?;
    if corners.len() < 3 {
        return Err(violation(format!("face {face} has fewer than 3 corners")));
    }
    let p = |i: usize| mesh.vertices[corners[i]].coords;
    Ok(cross(sub(p(1), p(0)), sub(p(2), p(0))))
}

/// Cosine between the face normal and the direction of the face center.
/// Positive when the face points away from the origin.
pub fn face_orientation(mesh: &WingedMesh, face: usize) -> Result<f64, MeshError> {
    let n = face_normal(mesh, face)?;
    let c = mesh.face_center(face)?;
    let denom = length(n) * length(c);
    if denom == 0.0 {
        return Err(MeshError::DegenerateGeometry {
            vertex: mesh.face_corners(face)?[0],
            context: "face has zero area or is centered at the origin",
        });
    }
    Ok(dot(n, c) / denom)
}

fn face_aligned(mesh: &WingedMesh, face: usize, tolerance: f64) -> Result<bool, MeshError> {
    let corner = mesh.face_corners(face)?[0];
    let n = normalize(face_normal(mesh, face)?, corner, "face normal")?;
    let c = normalize(mesh.face_center(face)?, corner, "face center")?;
    Ok(n.iter()
        .zip(&c)
        .all(|(a, b)| (a - b) * (a - b) <= tolerance))
}

/// Whether every corner lies within squared `tolerance` of the plane through
/// the first three corners. Always true for triangles.
pub fn face_vertices_planar(
    mesh: &WingedMesh,
    face: usize,
    tolerance: f64,
) -> Result<bool, MeshError> {
    let corners = mesh.face_corners(face)?;
    if corners.len() <= 3 {
        return Ok(true);
    }
    let origin = mesh.vertices[corners[0]].coords;
    let n = face_normal(mesh, face)?;
    let len = length(n);
    if len == 0.0 {
        return Err(MeshError::DegenerateGeometry {
            vertex: corners[0],
            context: "first three corners are collinear",
        });
    }
    let unit = scale(n, 1.0 / len);
    Ok(corners[3..].iter().all(|&v| {
        let h = dot(sub(mesh.vertices[v].coords, origin), unit);
        h * h <= tolerance
    }))
}

impl DebugInvariants for WingedMesh {
    fn validate_invariants(&self) -> Result<(), MeshError> {
        validate_mesh(self, &MeshValidationOptions::topology_only())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::dual::dual;
    use crate::topology::icosahedron::icosahedron;

    #[test]
    fn icosahedron_passes_everything() {
        let mut options = MeshValidationOptions::all();
        options.orientation = OrientationCheck::Aligned { tolerance: 1e-8 };
        options.edge_length = Some(EdgeLengthCheck {
            expected: 2.0,
            tolerance: 1e-8,
        });
        validate_mesh(&icosahedron(), &options).unwrap();
    }

    #[test]
    fn dodecahedron_faces_are_planar_pentagons() {
        let d = dual(&icosahedron()).unwrap();
        let mut options = MeshValidationOptions::topology_only();
        options.orientation = OrientationCheck::Outward;
        options.planarity_tolerance = Some(1e-16);
        validate_mesh(&d, &options).unwrap();
        assert!(validate_mesh(&d, &MeshValidationOptions::all()).is_err());
    }

    #[test]
    fn broken_next_pointer_is_reported() {
        let mut mesh = icosahedron();
        mesh.edges[0].next_a = mesh.edges[0].prev_a;
        assert!(!face_edges_match_order(&mesh, 0).unwrap());
        assert!(matches!(
            mesh.validate_invariants(),
            Err(MeshError::InvariantViolation(_))
        ));
    }

    #[test]
    fn reversed_vertex_cycle_is_reported() {
        let mut mesh = icosahedron();
        mesh.vertices[4].edges.reverse();
        let err = validate_mesh(&mesh, &MeshValidationOptions::topology_only()).unwrap_err();
        assert!(err.to_string().contains("vertex 4"), "{err}");
    }

    #[test]
    fn repeated_cycles_are_reported() {
        let mut mesh = icosahedron();
        let twice = mesh.vertices[4].edges.repeat(2);
        mesh.vertices[4].edges = twice;
        let err = validate_mesh(&mesh, &MeshValidationOptions::topology_only()).unwrap_err();
        assert!(err.to_string().contains("vertex 4"), "{err}");

        let mut mesh = icosahedron();
        let twice = mesh.faces[0].edges.repeat(2);
        mesh.faces[0].edges = twice;
        assert!(!face_edges_match_order(&mesh, 0).unwrap());
        let err = validate_mesh(&mesh, &MeshValidationOptions::topology_only()).unwrap_err();
        assert!(err.to_string().contains("face 0"), "{err}");
    }

    #[test]
    fn inward_geometry_warns_when_asked() {
        let mut mesh = icosahedron();
        for v in &mut mesh.vertices {
            v.coords = scale(v.coords, -1.0);
        }
        let mut options = MeshValidationOptions::all();
        assert!(validate_mesh(&mesh, &options).is_err());
        options.warn_only_geometry = true;
        validate_mesh(&mesh, &options).unwrap();
    }
}
