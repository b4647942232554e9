/// Tolerances for the geometric degeneracy tests.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Linear tolerance for distance comparisons (dimensionless model units)
    pub linear: f64,
    /// Relative tolerance for directions and slopes (sine of the angle, or
    /// fraction of the compared magnitude)
    pub angular: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-7;
    pub const DEFAULT_ANGULAR: f64 = 1e-10;

    pub fn default_precision() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            angular: Self::DEFAULT_ANGULAR,
        }
    }

    /// Check if a value is zero within linear tolerance
    pub fn is_zero(self, v: f64) -> bool {
        v.abs() < self.linear
    }

    /// Check if `v` is negligible next to `scale`.
    ///
    /// Exact zero is always negligible, also for a zero scale.
    pub fn is_negligible(self, v: f64, scale: f64) -> bool {
        v == 0.0 || v.abs() <= self.angular * scale.abs()
    }

    /// Check if two slopes are equal, relative to their magnitude.
    pub fn slopes_eq(self, a: f64, b: f64) -> bool {
        let scale = 1.0_f64.max(a.abs()).max(b.abs());
        self.is_negligible(a - b, scale)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
