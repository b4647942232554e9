//! Plane–plane intersection with a choice of anchor slice.

use crate::{Line3, PlaneEquation, Point3, Vector3};
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use slipsep_core::error::{Result, SlipSepError};
use slipsep_core::traits::Validate;
use slipsep_core::Tolerance;

/// Smallest ratio between the preferred anchor determinant and the best one
/// before the preferred slice is abandoned.
const MIN_ANCHOR_CONDITION: f64 = 1e-3;

/// The coordinate held at zero when solving for a point on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorAxis {
    X,
    Y,
    Z,
}

impl AnchorAxis {
    /// The 2x2 determinant of the system left after zeroing this axis.
    /// It equals a component of `n1 x n2` (up to sign).
    fn determinant(self, direction: Vector3) -> f64 {
        match self {
            AnchorAxis::X => direction.x,
            AnchorAxis::Y => -direction.y,
            AnchorAxis::Z => direction.z,
        }
    }

    /// Coefficients of the two remaining unknowns, in coordinate order.
    fn coefficients(self, p: &PlaneEquation) -> (f64, f64) {
        match self {
            AnchorAxis::X => (p.b, p.c),
            AnchorAxis::Y => (p.a, p.c),
            AnchorAxis::Z => (p.a, p.b),
        }
    }

    fn point(self, s: f64, t: f64) -> Point3 {
        match self {
            AnchorAxis::X => Point3::new(0.0, s, t),
            AnchorAxis::Y => Point3::new(s, 0.0, t),
            AnchorAxis::Z => Point3::new(s, t, 0.0),
        }
    }
}

/// Intersection line of two planes and the slice it was anchored on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneIntersection {
    pub line: Line3,
    pub anchor_axis: AnchorAxis,
}

/// Intersection for map-view use, anchored at `y = 0` when well conditioned.
pub fn intersect_for_map(
    p1: &PlaneEquation,
    p2: &PlaneEquation,
    tol: Tolerance,
) -> Result<PlaneIntersection> {
    intersect_planes(p1, p2, AnchorAxis::Y, tol)
}

/// Intersection for section-view use, anchored at `z = 0` when well conditioned.
pub fn intersect_for_section(
    p1: &PlaneEquation,
    p2: &PlaneEquation,
    tol: Tolerance,
) -> Result<PlaneIntersection> {
    intersect_planes(p1, p2, AnchorAxis::Z, tol)
}

/// Direction is `n1 x n2`; the anchor point solves both plane equations on
/// the `preferred` slice, or on the best conditioned slice when the preferred
/// one would be singular or nearly so.
pub fn intersect_planes(
    p1: &PlaneEquation,
    p2: &PlaneEquation,
    preferred: AnchorAxis,
    tol: Tolerance,
) -> Result<PlaneIntersection> {
    p1.validate()?;
    p2.validate()?;

    let n1 = p1.normal();
    let n2 = p2.normal();
    let direction = n1.cross(n2);

    if tol.is_negligible(direction.length(), n1.length() * n2.length()) {
        return Err(parallel_outcome(p1, p2, tol));
    }

    let axis = anchor_axis(direction, preferred);
    if axis != preferred {
        tracing::debug!(
            ?preferred,
            chosen = ?axis,
            "preferred anchor slice is ill-conditioned"
        );
    }

    let (a1, b1) = axis.coefficients(p1);
    let (a2, b2) = axis.coefficients(p2);
    let system = Matrix2::new(a1, b1, a2, b2);
    let rhs = Vector2::new(-p1.d, -p2.d);
    let solution = system.try_inverse().map(|inv| inv * rhs).ok_or_else(|| {
        SlipSepError::InvalidInput(format!("singular anchor system on the {axis:?} slice"))
    })?;

    Ok(PlaneIntersection {
        line: Line3::new(axis.point(solution[0], solution[1]), direction),
        anchor_axis: axis,
    })
}

fn anchor_axis(direction: Vector3, preferred: AnchorAxis) -> AnchorAxis {
    let best = [AnchorAxis::X, AnchorAxis::Y, AnchorAxis::Z]
        .into_iter()
        .max_by(|a, b| {
            a.determinant(direction)
                .abs()
                .total_cmp(&b.determinant(direction).abs())
        })
        .unwrap_or(preferred);

    let best_det = best.determinant(direction).abs();
    if preferred.determinant(direction).abs() >= MIN_ANCHOR_CONDITION * best_det {
        preferred
    } else {
        best
    }
}

fn parallel_outcome(p1: &PlaneEquation, p2: &PlaneEquation, tol: Tolerance) -> SlipSepError {
    let n1 = p1.normal();
    let n2 = p2.normal();
    // n2 = s * n1 for parallel normals.
    let s = n1.dot(n2) / n1.length_squared();
    let distance = (p1.d - p2.d / s).abs() / n1.length();
    if distance < tol.linear {
        tracing::debug!("planes are coincident");
        SlipSepError::CoincidentPlanes
    } else {
        tracing::debug!(distance, "planes are parallel");
        SlipSepError::ParallelPlanes { distance }
    }
}
