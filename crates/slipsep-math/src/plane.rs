use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use slipsep_core::error::{Result, SlipSepError};
use slipsep_core::traits::Validate;

/// A plane in general form `a*x + b*y + c*z + d = 0`.
///
/// The normal `(a, b, c)` is stored as given; it is not normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneEquation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl PlaneEquation {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Plane through `point` with the given normal: `d = -(n . point)`.
    pub fn from_normal_and_point(normal: Vector3, point: Point3) -> Self {
        Self {
            a: normal.x,
            b: normal.y,
            c: normal.z,
            d: -normal.dot(point),
        }
    }

    /// The horizontal plane `z = 0`.
    pub fn horizontal() -> Self {
        Self::new(0.0, 0.0, 1.0, 0.0)
    }

    pub fn normal(&self) -> Vector3 {
        Vector3::new(self.a, self.b, self.c)
    }

    /// Residual of the plane equation at `point`; zero on the plane.
    pub fn evaluate(&self, point: Point3) -> f64 {
        self.normal().dot(point) + self.d
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }
}

impl Validate for PlaneEquation {
    fn validate(&self) -> Result<()> {
        if !self.to_array().iter().all(|v| v.is_finite()) {
            return Err(SlipSepError::InvalidInput(format!(
                "plane coefficients must be finite: {:?}",
                self.to_array()
            )));
        }
        if self.normal() == Vector3::ZERO {
            return Err(SlipSepError::InvalidInput(
                "plane normal must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    #[test]
    fn test_anchor_point_satisfies_equation() {
        let n = dvec3(0.3, -0.5, 0.812).normalize();
        let p = dvec3(4.0, -2.5, 7.25);
        let plane = PlaneEquation::from_normal_and_point(n, p);
        assert!(plane.evaluate(p).abs() < 1e-10);
    }

    #[test]
    fn test_origin_plane_has_zero_d() {
        let plane = PlaneEquation::from_normal_and_point(dvec3(0.0, 1.0, 1.0), Point3::ZERO);
        assert_eq!(plane.d, 0.0);
        assert_eq!(plane.to_array(), [0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_validate_rejects_bad_coefficients() {
        assert!(PlaneEquation::new(0.0, 0.0, 0.0, 1.0).validate().is_err());
        assert!(PlaneEquation::new(f64::NAN, 0.0, 1.0, 0.0).validate().is_err());
        assert!(PlaneEquation::horizontal().validate().is_ok());
    }
}
