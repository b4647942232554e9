//! Bedding cutoff lines on the fault plane.

use serde::{Deserialize, Serialize};
use slipsep_core::error::{Result, SlipSepError};
use slipsep_math::{DVec2, Point2, Vector2};

use crate::orientation::Orientation;
use crate::stereonet;

/// Pitch on the fault plane of the fault/bedding intersection, in `[0, 180)`.
pub fn cutoff_pitch(fault: &Orientation, bedding: &Orientation) -> Result<f64> {
    let line = stereonet::plane_intersection(fault.strike(), fault.dip, bedding.strike(), bedding.dip)?;
    let rake = stereonet::azimuth_to_rake(fault.strike(), fault.dip, line.bearing)?;
    Ok(if rake < 0.0 { rake + 180.0 } else { rake })
}

/// Unit direction in pitch space of a line at `pitch` degrees.
///
/// Pitch space is the fault plane seen face on: `x` along strike, `y` up dip.
fn cutoff_direction(pitch: f64) -> Vector2 {
    let t = pitch.to_radians().tan();
    let v = if pitch == 90.0 {
        DVec2::new(0.0, -1.0)
    } else if pitch < 90.0 {
        DVec2::new(1.0, -t)
    } else {
        DVec2::new(-1.0, t)
    };
    v.normalize()
}

/// Unit direction in pitch space of the net slip at `rake` degrees in `[0, 360]`.
fn slip_direction(rake: f64) -> Vector2 {
    let t = rake.to_radians().tan();
    let v = if rake == 90.0 {
        DVec2::new(0.0, -1.0)
    } else if rake == 270.0 {
        DVec2::new(0.0, 1.0)
    } else if rake < 90.0 || rake > 270.0 {
        DVec2::new(1.0, -t)
    } else {
        DVec2::new(-1.0, t)
    };
    v.normalize()
}

/// Fault plane seen face on, with footwall and hangingwall cutoff lines
/// separated by the net slip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaultPlaneDiagram {
    /// Pitch of the cutoff line, in `[0, 180)`.
    pub cutoff_pitch: f64,
    pub cutoff_direction: Vector2,
    pub slip_direction: Vector2,
    pub footwall_cutoff: [Point2; 2],
    pub hangingwall_cutoff: [Point2; 2],
}

impl FaultPlaneDiagram {
    pub fn new(fault: &Orientation, bedding: &Orientation, rake: f64) -> Result<Self> {
        if !rake.is_finite() || !(0.0..=360.0).contains(&rake) {
            return Err(SlipSepError::InvalidInput(format!(
                "net-slip rake must be between 0 and 360, got {rake}"
            )));
        }
        let pitch = cutoff_pitch(fault, bedding)?;
        let cutoff = cutoff_direction(pitch);
        let slip = slip_direction(rake);
        Ok(Self {
            cutoff_pitch: pitch,
            cutoff_direction: cutoff,
            slip_direction: slip,
            footwall_cutoff: [Point2::ZERO, cutoff],
            hangingwall_cutoff: [slip, slip + cutoff],
        })
    }
}
