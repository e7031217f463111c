use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::AnalysisError;

/// Maximum relative frequency spread tolerated within and across files.
pub const DEFAULT_TOL_FREQ_REL: f64 = 1e-3;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "CV_TUNABILITY_CONFIG";

/// Tunables of one analysis run.
///
/// ```json
/// { "tol_freq_rel": 0.001, "target_voltages": [1, 2, 3] }
/// ```
///
/// Absent fields take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub tol_freq_rel: f64,
    /// Bias voltages (V) at which tunability-per-volt is aggregated.
    pub target_voltages: Vec<u32>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tol_freq_rel: DEFAULT_TOL_FREQ_REL,
            target_voltages: (1..=24).collect(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: AnalysisConfig =
            serde_json::from_str(text).context("parsing analysis config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Config from [`CONFIG_ENV_VAR`] if set, defaults otherwise.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.tol_freq_rel.is_finite() || self.tol_freq_rel < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "frequency tolerance must be a non-negative number, got {}",
                self.tol_freq_rel
            )));
        }
        if self.target_voltages.is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "at least one target voltage is required".into(),
            ));
        }
        if self.target_voltages.contains(&0) {
            return Err(AnalysisError::InvalidConfig(
                "target voltages must be non-zero".into(),
            ));
        }
        if self.target_voltages.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AnalysisError::InvalidConfig(
                "target voltages must be strictly ascending".into(),
            ));
        }
        Ok(())
    }
}
