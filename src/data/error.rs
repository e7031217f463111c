use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal conditions. The first one encountered aborts the whole run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("no measurement files were provided")]
    EmptyBatch,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{file}: invalid file ({reason})")]
    MalformedFile { file: String, reason: String },
    #[error("{file}: line {line}, column '{column}': '{value}' is not a finite number")]
    NonNumericData {
        file: String,
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("{file}: frequency drift detected ({f_min:.3e} -> {f_max:.3e} Hz)")]
    FrequencyDrift { file: String, f_min: f64, f_max: f64 },
    #[error("{file}: no measurement point at exactly 0 V")]
    MissingZeroBiasPoint { file: String },
    #[error("{file}: capacitance at 0 V is {c0_pf} pF, cannot normalise")]
    DegenerateZeroBiasCapacitance { file: String, c0_pf: f64 },
}

/// Discriminant of [`AnalysisError`], for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyBatch,
    InvalidConfig,
    MalformedFile,
    NonNumericData,
    FrequencyDrift,
    MissingZeroBiasPoint,
    DegenerateZeroBiasCapacitance,
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::EmptyBatch => ErrorKind::EmptyBatch,
            AnalysisError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            AnalysisError::MalformedFile { .. } => ErrorKind::MalformedFile,
            AnalysisError::NonNumericData { .. } => ErrorKind::NonNumericData,
            AnalysisError::FrequencyDrift { .. } => ErrorKind::FrequencyDrift,
            AnalysisError::MissingZeroBiasPoint { .. } => ErrorKind::MissingZeroBiasPoint,
            AnalysisError::DegenerateZeroBiasCapacitance { .. } => {
                ErrorKind::DegenerateZeroBiasCapacitance
            }
        }
    }

    /// Display name of the file that triggered the error, if any.
    pub fn file(&self) -> Option<&str> {
        match self {
            AnalysisError::EmptyBatch | AnalysisError::InvalidConfig(_) => None,
            AnalysisError::MalformedFile { file, .. }
            | AnalysisError::NonNumericData { file, .. }
            | AnalysisError::FrequencyDrift { file, .. }
            | AnalysisError::MissingZeroBiasPoint { file }
            | AnalysisError::DegenerateZeroBiasCapacitance { file, .. } => Some(file),
        }
    }
}

/// Non-fatal findings attached to a successful report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum AnalysisWarning {
    #[error(
        "measurements taken at different frequencies across files \
         (max relative deviation {max_rel_deviation:.2e} from {f_ref:.3e} Hz, tolerance {tolerance:.1e})"
    )]
    CrossFileFrequencyMismatch {
        f_ref: f64,
        max_rel_deviation: f64,
        tolerance: f64,
        /// `(file, mean frequency)` for every file in the run.
        file_means: Vec<(String, f64)>,
    },
}
