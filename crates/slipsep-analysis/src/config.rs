//! Analysis settings, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use slipsep_core::error::{Result, SlipSepError};
use slipsep_core::traits::Validate;
use slipsep_core::Tolerance;
use slipsep_geology::netslip::NetSlip;
use slipsep_geology::orientation::DIP_DIRECTION_EPSILON;

use crate::trace::SampleWindow;

/// Settings shared by every analysis run.
///
/// Missing fields in a config file fall back to [`AnalysisConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub tolerance: Tolerance,
    /// Offset added to a dip direction of exactly 90 or 270 degrees.
    pub dip_direction_epsilon: f64,
    pub section_window: SampleWindow,
    pub map_window: SampleWindow,
    /// Decimal places of the reported separations.
    pub decimals: u32,
    /// Truncate angles, rake and magnitude to whole numbers before use.
    pub truncate_inputs: bool,
    pub default_magnitude: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            dip_direction_epsilon: DIP_DIRECTION_EPSILON,
            section_window: SampleWindow::centered(20.0, 1.0),
            map_window: SampleWindow::centered(50.0, 1.0),
            decimals: 2,
            truncate_inputs: true,
            default_magnitude: NetSlip::DEFAULT_MAGNITUDE,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SlipSepError::Config(format!("invalid analysis config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading analysis config");
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SlipSepError::Config(format!("cannot serialize analysis config: {e}")))
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Result<()> {
        let tol = self.tolerance;
        if !(tol.linear > 0.0) || !(tol.angular > 0.0) {
            return Err(SlipSepError::Config(format!(
                "tolerances must be positive, got linear {} angular {}",
                tol.linear, tol.angular
            )));
        }
        if !self.dip_direction_epsilon.is_finite() || self.dip_direction_epsilon.abs() >= 1.0 {
            return Err(SlipSepError::Config(format!(
                "dip direction epsilon must be below one degree, got {}",
                self.dip_direction_epsilon
            )));
        }
        self.section_window.validate()?;
        self.map_window.validate()?;
        if self.decimals > 15 {
            return Err(SlipSepError::Config(format!(
                "at most 15 decimals can be reported, got {}",
                self.decimals
            )));
        }
        if !(self.default_magnitude > 0.0) || !self.default_magnitude.is_finite() {
            return Err(SlipSepError::Config(format!(
                "default magnitude must be positive, got {}",
                self.default_magnitude
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.decimals, 2);
        assert_eq!(config.dip_direction_epsilon, 1e-5);
        assert_eq!(config.section_window.abscissas().len(), 40);
        assert_eq!(config.map_window.abscissas().len(), 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AnalysisConfig::from_json_str(r#"{ "decimals": 4 }"#).unwrap();
        assert_eq!(config.decimals, 4);
        assert_eq!(config.map_window, SampleWindow::centered(50.0, 1.0));
        assert!(config.truncate_inputs);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = AnalysisConfig::from_json_str("{ decimals: ").unwrap_err();
        assert!(matches!(err, SlipSepError::Config(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = AnalysisConfig::from_json_str(
            r#"{ "map_window": { "start": 10.0, "end": -10.0, "step": 1.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SlipSepError::Config(_)));
        assert!(AnalysisConfig::from_json_str(r#"{ "default_magnitude": 0.0 }"#).is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let config = AnalysisConfig {
            decimals: 3,
            truncate_inputs: false,
            section_window: SampleWindow::centered(30.0, 0.5),
            ..AnalysisConfig::default()
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_json_pretty().unwrap().as_bytes()).unwrap();

        let loaded = AnalysisConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AnalysisConfig::from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SlipSepError::Io(_)));
    }
}
