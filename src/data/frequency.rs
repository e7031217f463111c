use super::error::{AnalysisError, AnalysisWarning};
use super::model::{FrequencyProfile, GlobalFrequencyCheck, RecordSet};

// ---------------------------------------------------------------------------
// Per-file check
// ---------------------------------------------------------------------------

impl FrequencyProfile {
    /// Summarise a file's measurement frequency, failing with
    /// [`AnalysisError::FrequencyDrift`] when `(f_max - f_min) / f_min > tol`.
    ///
    /// A non-positive `f_min` leaves the relative spread undefined and is
    /// reported as drift too.
    pub fn from_record_set(records: &RecordSet, tol: f64) -> Result<Self, AnalysisError> {
        let f_min = records.frequencies().fold(f64::INFINITY, f64::min);
        let f_max = records.frequencies().fold(f64::NEG_INFINITY, f64::max);
        let f_mean = records.frequencies().sum::<f64>() / records.len() as f64;

        let drift = || AnalysisError::FrequencyDrift {
            file: records.name.clone(),
            f_min,
            f_max,
        };
        if records.is_empty() || f_min <= 0.0 {
            return Err(drift());
        }
        if (f_max - f_min) / f_min > tol {
            return Err(drift());
        }

        Ok(Self {
            f_min,
            f_max,
            f_mean,
        })
    }

    pub fn relative_spread(&self) -> f64 {
        (self.f_max - self.f_min) / self.f_min
    }
}

// ---------------------------------------------------------------------------
// Cross-file check
// ---------------------------------------------------------------------------

impl GlobalFrequencyCheck {
    /// Reference frequency and worst relative deviation over per-file means.
    /// Returns `None` for an empty slice.
    pub fn from_profiles(profiles: &[FrequencyProfile]) -> Option<Self> {
        if profiles.is_empty() {
            return None;
        }
        let f_ref = profiles.iter().map(|p| p.f_mean).sum::<f64>() / profiles.len() as f64;
        let max_rel_deviation = profiles
            .iter()
            .map(|p| (p.f_mean - f_ref).abs() / f_ref)
            .fold(0.0, f64::max);
        Some(Self {
            f_ref,
            max_rel_deviation,
        })
    }

    pub fn exceeds(&self, tol: f64) -> bool {
        self.max_rel_deviation > tol
    }

    /// Advisory warning when files were measured at different frequencies.
    pub fn warning(
        &self,
        tol: f64,
        names: &[&str],
        profiles: &[FrequencyProfile],
    ) -> Option<AnalysisWarning> {
        if !self.exceeds(tol) {
            return None;
        }
        let file_means = names
            .iter()
            .zip(profiles)
            .map(|(name, p)| (name.to_string(), p.f_mean))
            .collect();
        Some(AnalysisWarning::CrossFileFrequencyMismatch {
            f_ref: self.f_ref,
            max_rel_deviation: self.max_rel_deviation,
            tolerance: tol,
            file_means,
        })
    }
}
