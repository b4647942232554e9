use crate::error::Result;

/// Validate the domain of an input value before any geometry is derived from it.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Round a value to a fixed number of decimal places for reporting.
pub trait RoundTo {
    fn round_to(self, decimals: u32) -> Self;
}

impl RoundTo for f64 {
    fn round_to(self, decimals: u32) -> Self {
        let scale = 10f64.powi(decimals as i32);
        (self * scale).round() / scale
    }
}
