//! Edge-length statistics used to judge mesh uniformity.

use crate::geometry::vector::distance;
use crate::mesh_error::MeshError;
use crate::topology::mesh::WingedMesh;

/// Length of edge `edge`.
pub fn edge_length(mesh: &WingedMesh, edge: usize) -> Result<f64, MeshError> {
    let e = mesh.edge(edge)?;
    let a = mesh.vertex(e.first_vertex_a)?;
    let b = mesh.vertex(e.first_vertex_b)?;
    Ok(distance(a.coords, b.coords))
}

/// Summary of the edge lengths of a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeLengthStats {
    pub count: usize,
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
    pub min: f64,
    pub max: f64,
}

impl EdgeLengthStats {
    /// Statistics over every edge; `None` for a mesh without edges.
    pub fn from_mesh(mesh: &WingedMesh) -> Result<Option<Self>, MeshError> {
        let lengths = (0..mesh.edge_count())
            .map(|e| edge_length(mesh, e))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_lengths(&lengths))
    }

    pub fn from_lengths(lengths: &[f64]) -> Option<Self> {
        if lengths.is_empty() {
            return None;
        }
        let n = lengths.len() as f64;
        let mean = lengths.iter().sum::<f64>() / n;
        let variance = lengths.iter().map(|l| (l - mean) * (l - mean)).sum::<f64>() / n;
        let (min, max) = lengths
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &l| {
                (lo.min(l), hi.max(l))
            });
        Some(Self {
            count: lengths.len(),
            mean,
            variance,
            min,
            max,
        })
    }

    /// Bessel-corrected variance.
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        self.variance * self.count as f64 / (self.count - 1) as f64
    }

    /// `max / min`, the spread between the longest and shortest edge.
    pub fn ratio(&self) -> f64 {
        self.max / self.min
    }
}
