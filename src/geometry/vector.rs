//! Small fixed-size vector helpers.

use crate::mesh_error::MeshError;

/// A point or direction in 3D space.
pub type Vec3 = [f64; 3];

pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn scale(a: Vec3, s: f64) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Euclidean length.
pub fn length(a: Vec3) -> f64 {
    dot(a, a).sqrt()
}

/// Euclidean distance between two points.
pub fn distance(a: Vec3, b: Vec3) -> f64 {
    length(sub(a, b))
}

/// Angle between two vectors in radians.
///
/// The cosine is clamped to `[-1, 1]` so nearly parallel inputs cannot
/// produce `NaN` through rounding.
pub fn angle(a: Vec3, b: Vec3) -> f64 {
    let cos = dot(a, b) / (length(a) * length(b));
    cos.clamp(-1.0, 1.0).acos()
}

/// Unit vector in the direction of `a`.
///
/// # Errors
/// Returns [`MeshError::DegenerateGeometry`] tagged with `vertex` when `a`
/// has zero (or non-finite) length.
pub fn normalize(a: Vec3, vertex: usize, context: &'static str) -> Result<Vec3, MeshError> {
    let len = length(a);
    if len == 0.0 || !len.is_finite() {
        return Err(MeshError::DegenerateGeometry { vertex, context });
    }
    Ok(scale(a, 1.0 / len))
}

/// Arithmetic mean of a set of points; the origin for an empty set.
pub fn centroid<I>(points: I) -> Vec3
where
    I: IntoIterator<Item = Vec3>,
{
    let mut sum = [0.0; 3];
    let mut count = 0usize;
    for p in points {
        sum = add(sum, p);
        count += 1;
    }
    if count == 0 {
        return sum;
    }
    scale(sum, 1.0 / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn angle_of_orthogonal_axes() {
        let a = angle([1.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
        assert!((a - std::f64::consts::FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn angle_of_parallel_vectors_is_zero() {
        let v = [0.3, 0.1, 1.7];
        assert_eq!(angle(v, scale(v, 3.0)), 0.0);
    }

    #[test]
    fn normalize_rejects_zero() {
        let err = normalize([0.0; 3], 4, "test").unwrap_err();
        assert_eq!(
            err,
            MeshError::DegenerateGeometry {
                vertex: 4,
                context: "test"
            }
        );
    }

    #[test]
    fn cross_is_right_handed() {
        assert_eq!(cross([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn centroid_of_triangle() {
        let c = centroid([[3.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 3.0]]);
        for x in c {
            assert!((x - 1.0).abs() < EPS);
        }
    }
}
