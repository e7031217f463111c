use super::error::AnalysisError;
use super::model::{RecordSet, TunabilityCurve, TunabilityPoint};

/// Farad → picofarad.
const PF_PER_F: f64 = 1e12;

/// Build the tunability curve of one validated file.
///
/// Samples are sorted by bias (stable, so duplicate biases keep file order)
/// and normalised against the capacitance of the first sample recorded at
/// exactly 0 V: `tune_pct = (C0 - Cp) / C0 * 100`.
pub fn compute_curve(records: &RecordSet) -> Result<TunabilityCurve, AnalysisError> {
    let mut samples: Vec<(f64, f64)> = records
        .samples
        .iter()
        .map(|s| (s.bias_v, s.cp_farad * PF_PER_F))
        .collect();
    samples.sort_by(|a, b| a.0.total_cmp(&b.0));

    // Exact comparison: a point at 1e-7 V is not a zero-bias point.
    let c0_pf = samples
        .iter()
        .find(|(bias, _)| *bias == 0.0)
        .map(|&(_, cp)| cp)
        .ok_or_else(|| AnalysisError::MissingZeroBiasPoint {
            file: records.name.clone(),
        })?;

    if c0_pf == 0.0 || !c0_pf.is_finite() {
        return Err(AnalysisError::DegenerateZeroBiasCapacitance {
            file: records.name.clone(),
            c0_pf,
        });
    }

    let points = samples
        .into_iter()
        .map(|(bias_v, cp_pf)| TunabilityPoint {
            bias_v,
            tune_pct: (c0_pf - cp_pf) / c0_pf * 100.0,
        })
        .collect();

    Ok(TunabilityCurve {
        name: records.name.clone(),
        c0_pf,
        points,
    })
}
