use crate::{Line2, Line3, Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};
use slipsep_core::error::{Result, SlipSepError};
use slipsep_core::Tolerance;

/// Orthonormal frame `(i, j, k)` flattening 3D geometry onto the `(i, j)` plane,
/// viewed along `k`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Basis2 {
    pub i: Vector3,
    pub j: Vector3,
    pub k: Vector3,
}

impl Basis2 {
    pub fn new(i: Vector3, j: Vector3, k: Vector3) -> Self {
        Self { i, j, k }
    }

    /// Map view: east, north, up.
    pub fn map() -> Self {
        Self::new(Vector3::X, Vector3::Y, Vector3::Z)
    }

    /// Vertical section whose plane normal is the horizontal vector `k`.
    ///
    /// `j` is vertical and `i = j x k`, so the frame is right-handed.
    pub fn section(k: Vector3) -> Self {
        let j = Vector3::Z;
        Self::new(j.cross(k), j, k)
    }

    /// Coordinates of a point in the `(i, j)` frame.
    pub fn project_point(&self, p: Point3) -> Point2 {
        Point2::new(self.i.dot(p), self.j.dot(p))
    }

    /// Slope-intercept form of a 3D line seen in this view.
    ///
    /// The slope is built from `vp = k x direction`, which lies in the view
    /// plane perpendicular to the projected line. The resulting line is
    /// expressed with the abscissa running along `-i`; use
    /// [`Line2::mirrored`] to return to the `(i, j)` frame.
    ///
    /// A line that projects parallel to `j` has no slope and gives
    /// [`SlipSepError::UndefinedProjection`].
    pub fn project_line(&self, line: &Line3, tol: Tolerance) -> Result<Line2> {
        let a = self.project_point(line.point);
        let vp = self.k.cross(line.direction);
        let p1 = self.i.dot(vp);
        let p2 = self.j.dot(vp);

        if tol.is_negligible(p2, vp.length()) {
            tracing::debug!(p1, p2, "projected line is vertical in the view frame");
            return Err(SlipSepError::UndefinedProjection);
        }

        let slope = p1 / p2;
        let intercept = (a.x * p1 + a.y * p2) / p2;
        Ok(Line2::new(slope, intercept))
    }
}
