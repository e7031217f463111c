use serde::{Deserialize, Serialize};

use super::config::AnalysisConfig;
use super::error::AnalysisWarning;

// ---------------------------------------------------------------------------
// RawSample / RecordSet – one parsed measurement file
// ---------------------------------------------------------------------------

/// One measurement row: the first four columns of the source file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub frequency_hz: f64,
    pub bias_v: f64,
    pub cp_farad: f64,
    pub rp_ohm: f64,
}

/// All samples of one file, in file order, plus the file's display name.
#[derive(Debug, Clone)]
pub struct RecordSet {
    pub name: String,
    pub samples: Vec<RawSample>,
}

impl RecordSet {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the file contained no data rows.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn frequencies(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.frequency_hz)
    }
}

// ---------------------------------------------------------------------------
// Frequency summaries
// ---------------------------------------------------------------------------

/// Per-file frequency summary. Only exists for files whose relative
/// frequency spread is within tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyProfile {
    pub f_min: f64,
    pub f_max: f64,
    pub f_mean: f64,
}

/// Cross-file frequency summary over the per-file means.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalFrequencyCheck {
    /// Arithmetic mean of the per-file mean frequencies.
    pub f_ref: f64,
    /// `max_i |f_mean_i - f_ref| / f_ref`
    pub max_rel_deviation: f64,
}

// ---------------------------------------------------------------------------
// Derived series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TunabilityPoint {
    pub bias_v: f64,
    /// `(C0 - Cp) / C0 * 100`, with both capacitances in pF.
    pub tune_pct: f64,
}

/// Tunability curve of one file, sorted ascending by bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TunabilityCurve {
    pub name: String,
    /// Zero-bias capacitance in pF.
    pub c0_pf: f64,
    pub points: Vec<TunabilityPoint>,
}

/// Cross-file tunability-per-volt statistics at one target voltage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerVoltStat {
    pub voltage: u32,
    pub mean_tune_per_v: f64,
    /// Population standard deviation (divisor = number of curves).
    pub std_tune_per_v: f64,
}

// ---------------------------------------------------------------------------
// AnalysisReport – the successful outcome of one run
// ---------------------------------------------------------------------------

/// Everything a successful run hands to rendering and export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Reference measurement frequency (Hz).
    pub f_ref: f64,
    /// Series A: one curve per file, in input order.
    pub curves: Vec<TunabilityCurve>,
    /// Series B: one entry per target voltage, ascending.
    pub per_volt: Vec<PerVoltStat>,
    /// Non-fatal findings, e.g. a cross-file frequency mismatch.
    pub warnings: Vec<AnalysisWarning>,
    /// Configuration the report was computed with.
    pub config: AnalysisConfig,
}

impl AnalysisReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
