//! Net-slip direction on a fault plane and its displacement.

use serde::{Deserialize, Serialize};
use slipsep_core::error::{Result, SlipSepError};
use slipsep_core::traits::Validate;
use slipsep_math::{DVec3, Point3, Vector3};

use crate::orientation::Orientation;
use crate::stereonet;

/// Net slip of the hangingwall relative to the footwall.
///
/// `rake` is the pitch on the fault plane in `[0, 360]`: values of 180 and
/// above describe the same line as `rake - 180`, travelled the other way.
/// A negative `magnitude` moves the hangingwall against the rake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetSlip {
    pub rake: f64,
    pub magnitude: f64,
}

impl NetSlip {
    pub const DEFAULT_MAGNITUDE: f64 = 10.0;

    pub fn new(rake: f64, magnitude: f64) -> Result<Self> {
        let slip = Self { rake, magnitude };
        slip.validate()?;
        Ok(slip)
    }

    /// Whether the rake runs in the opposite sense of its folded pitch.
    pub fn is_reversed(&self) -> bool {
        self.rake >= 180.0
    }

    /// Pitch folded into `[0, 180)`. A rake of 360 is passed through; it
    /// names the same line as 0.
    pub fn folded_rake(&self) -> f64 {
        if self.is_reversed() && self.rake < 360.0 {
            self.rake - 180.0
        } else {
            self.rake
        }
    }

    /// Unit vector of the slip direction on `fault`, in (east, north, up).
    pub fn unit_direction(&self, fault: &Orientation) -> Vector3 {
        let geo = stereonet::rake(fault.strike(), fault.dip, self.folded_rake());
        let line = stereonet::geographic_to_plunge_bearing(geo);

        let bearing = line.bearing.to_radians();
        let v = DVec3::new(bearing.sin(), bearing.cos(), -line.plunge.to_radians().tan());
        let v = if self.is_reversed() { -v } else { v };
        v.normalize()
    }
}

impl Default for NetSlip {
    fn default() -> Self {
        Self {
            rake: 90.0,
            magnitude: Self::DEFAULT_MAGNITUDE,
        }
    }
}

impl Validate for NetSlip {
    fn validate(&self) -> Result<()> {
        if !self.rake.is_finite() || !(0.0..=360.0).contains(&self.rake) {
            return Err(SlipSepError::InvalidInput(format!(
                "net-slip rake must be between 0 and 360, got {}",
                self.rake
            )));
        }
        if !self.magnitude.is_finite() {
            return Err(SlipSepError::InvalidInput(format!(
                "net-slip magnitude must be finite, got {}",
                self.magnitude
            )));
        }
        Ok(())
    }
}

/// `point + magnitude * direction`.
pub fn apply_displacement(point: Point3, direction: Vector3, magnitude: f64) -> Point3 {
    point + magnitude * direction
}
