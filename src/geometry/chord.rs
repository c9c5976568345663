//! Chord interpolation between two points on (or near) a sphere.
//!
//! Given points `P` and `Q` measured from the origin, let
//! `θ = angle(P, Q)`, `φ = angle(-P, Q - P)` and `R = |P|`. The point at
//! fraction `t` is placed on the straight segment `P→Q` at distance
//!
//! ```text
//! d = R · sin(θ·t) / sin(π − φ − θ·t)
//! ```
//!
//! from `P`. This is the law of sines applied to the triangle formed by the
//! origin, `P` and the wanted point, so the point's direction from the origin
//! advances uniformly in angle while staying on the chord. It is not the same
//! as normalized linear interpolation, nor a true spherical interpolation.

use super::vector::{Vec3, add, angle, length, normalize, scale, sub};
use crate::mesh_error::MeshError;
use std::f64::consts::PI;

/// Point on the chord from `p` to `q` at angular fraction `t` in `[0, 1]`.
///
/// `vertex` names the point being placed and is reported on failure.
///
/// # Errors
/// [`MeshError::DegenerateGeometry`] if either endpoint sits at the origin,
/// the endpoints coincide, or the placement is not finite.
pub fn chord_point(p: Vec3, q: Vec3, t: f64, vertex: usize) -> Result<Vec3, MeshError> {
    let degenerate = |context| MeshError::DegenerateGeometry { vertex, context };
    let radius = length(p);
    if radius == 0.0 || length(q) == 0.0 {
        return Err(degenerate("chord endpoint at the origin"));
    }
    let toward_q = sub(q, p);
    let dir = normalize(toward_q, vertex, "chord endpoints coincide")?;
    let theta = angle(p, q);
    let phi = angle(scale(p, -1.0), toward_q);
    let d = (theta * t).sin() * radius / (PI - phi - theta * t).sin();
    let out = add(p, scale(dir, d));
    if out.iter().all(|c| c.is_finite()) {
        Ok(out)
    } else {
        Err(degenerate("chord placement is not finite"))
    }
}
