use crate::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};
use slipsep_core::error::{Result, SlipSepError};
use slipsep_core::Tolerance;

/// An infinite line in 3D space defined by a point and a direction.
///
/// The direction is kept as computed (usually a cross product of two plane
/// normals) and is not normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line3 {
    pub point: Point3,
    pub direction: Vector3,
}

impl Line3 {
    pub fn new(point: Point3, direction: Vector3) -> Self {
        Self { point, direction }
    }

    /// Get a point along the line at parameter t.
    pub fn at(&self, t: f64) -> Point3 {
        self.point + self.direction * t
    }
}

/// A 2D line in slope-intercept form, `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line2 {
    pub slope: f64,
    pub intercept: f64,
}

impl Line2 {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn point_at(&self, x: f64) -> Point2 {
        Point2::new(x, self.y_at(x))
    }

    /// The same line with the abscissa reversed (`x -> -x`).
    pub fn mirrored(&self) -> Self {
        Self::new(-self.slope, self.intercept)
    }

    /// Intersection point of two lines.
    ///
    /// Equal slopes (parallel or coincident lines) give
    /// [`SlipSepError::ParallelLines`].
    pub fn intersect(&self, other: &Line2, tol: Tolerance) -> Result<Point2> {
        if tol.slopes_eq(self.slope, other.slope) {
            tracing::debug!(
                m1 = self.slope,
                m2 = other.slope,
                "lines are parallel and do not intersect"
            );
            return Err(SlipSepError::ParallelLines);
        }
        let x = (other.intercept - self.intercept) / (self.slope - other.slope);
        Ok(Point2::new(x, self.y_at(x)))
    }

    /// Evaluate the line at each abscissa in `xs`.
    pub fn sample(&self, xs: &[f64]) -> Vec<Point2> {
        xs.iter().map(|&x| self.point_at(x)).collect()
    }
}
