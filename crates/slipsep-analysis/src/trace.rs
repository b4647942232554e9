//! Sampled polylines of the traces drawn in section and map view.

use serde::{Deserialize, Serialize};
use slipsep_core::error::{Result, SlipSepError};
use slipsep_core::traits::Validate;
use slipsep_math::{Line2, Point2};

/// Evenly spaced abscissas `start, start + step, ...` strictly below `stop`.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    let count = ((stop - start) / step).ceil();
    if count <= 0.0 {
        return Vec::new();
    }
    (0..count as usize).map(|i| start + i as f64 * step).collect()
}

/// Sampling range along the view abscissa, `[start, end)` by `step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleWindow {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl SampleWindow {
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// Window symmetric about zero.
    pub fn centered(half_width: f64, step: f64) -> Self {
        Self::new(-half_width, half_width, step)
    }

    pub fn abscissas(&self) -> Vec<f64> {
        arange(self.start, self.end, self.step)
    }

    /// Abscissas from the window start up to and including `x`, never past
    /// the window end.
    pub fn abscissas_through(&self, x: f64) -> Vec<f64> {
        arange(self.start, (x + self.step).min(self.end), self.step)
    }

    /// Abscissas from `x` to the window end, never before the window start.
    pub fn abscissas_from(&self, x: f64) -> Vec<f64> {
        arange(x.max(self.start), self.end, self.step)
    }
}

impl Validate for SampleWindow {
    fn validate(&self) -> Result<()> {
        if !(self.step > 0.0) || !self.step.is_finite() {
            return Err(SlipSepError::Config(format!(
                "sample step must be positive, got {}",
                self.step
            )));
        }
        if !(self.start < self.end) {
            return Err(SlipSepError::Config(format!(
                "sample window must satisfy start < end, got [{}, {})",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// Ordered samples of a trace in a 2D view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockTrace {
    pub points: Vec<Point2>,
}

impl BlockTrace {
    pub fn sample(line: &Line2, xs: &[f64]) -> Self {
        Self {
            points: line.sample(xs),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Keep only the samples accepted by `keep`, preserving order.
    pub fn retain(&mut self, keep: impl Fn(Point2) -> bool) {
        self.points.retain(|&p| keep(p));
    }
}
