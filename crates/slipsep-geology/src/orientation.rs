//! Plane orientation as (dip, dip direction).

use serde::{Deserialize, Serialize};
use slipsep_core::error::{Result, SlipSepError};
use slipsep_core::traits::Validate;
use slipsep_math::{DVec3, Vector3};

/// Offset applied to a dip direction of exactly 90 or 270 degrees.
///
/// There the plane strikes north-south and its map-view trace becomes a
/// vertical line without a slope.
pub const DIP_DIRECTION_EPSILON: f64 = 1e-5;

/// Orientation of a plane in degrees.
///
/// `dip` is the inclination from horizontal in `[0, 90]`; `dip_direction` is
/// the azimuth of steepest descent, clockwise from north, in `[0, 360]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub dip: f64,
    pub dip_direction: f64,
}

impl Orientation {
    /// Build a validated orientation.
    pub fn new(dip: f64, dip_direction: f64) -> Result<Self> {
        let orientation = Self { dip, dip_direction };
        orientation.validate()?;
        Ok(orientation)
    }

    /// Strike by the right-hand rule, `dip_direction - 90`.
    pub fn strike(&self) -> f64 {
        self.dip_direction - 90.0
    }

    /// Both angles truncated toward zero to whole degrees.
    pub fn truncated(&self) -> Self {
        Self {
            dip: self.dip.trunc(),
            dip_direction: self.dip_direction.trunc(),
        }
    }

    /// Whether the plane strikes exactly north-south.
    pub fn strikes_north_south(&self) -> bool {
        self.dip_direction == 90.0 || self.dip_direction == 270.0
    }

    /// Copy with a north-south striking dip direction moved by `epsilon`.
    ///
    /// 90 and 270 move the same way, so both still fold onto the same
    /// half-circle azimuth.
    pub fn perturbed(&self, epsilon: f64) -> Self {
        let mut out = *self;
        if out.strikes_north_south() {
            out.dip_direction += epsilon;
        }
        out
    }

    /// Dip direction folded onto a half circle by removing 180 from values
    /// above 180. Exactly 180 is kept.
    pub fn folded_dip_direction(&self) -> f64 {
        if self.dip_direction > 180.0 {
            self.dip_direction - 180.0
        } else {
            self.dip_direction
        }
    }

    /// Horizontal unit vector along strike.
    pub fn strike_vector(&self) -> Vector3 {
        let s = self.strike().to_radians();
        DVec3::new(s.sin(), s.cos(), 0.0)
    }

    /// Vector pointing down dip with a unit horizontal component.
    pub fn dip_vector(&self) -> Vector3 {
        let dd = self.dip_direction.to_radians();
        DVec3::new(dd.sin(), dd.cos(), -self.dip.to_radians().tan())
    }

    /// Unit normal, `normalize(dip_vector x strike_vector)`.
    ///
    /// The normal points upward for dips below 90.
    pub fn normal(&self) -> Vector3 {
        self.dip_vector().cross(self.strike_vector()).normalize()
    }
}

impl Validate for Orientation {
    fn validate(&self) -> Result<()> {
        if !self.dip.is_finite() || !(0.0..=90.0).contains(&self.dip) {
            return Err(SlipSepError::InvalidInput(format!(
                "dip must be between 0 and 90, got {}",
                self.dip
            )));
        }
        if !self.dip_direction.is_finite() || !(0.0..=360.0).contains(&self.dip_direction) {
            return Err(SlipSepError::InvalidInput(format!(
                "dip direction must be between 0 and 360, got {}",
                self.dip_direction
            )));
        }
        Ok(())
    }
}
