use super::model::{PerVoltStat, TunabilityCurve, TunabilityPoint};

/// Sample whose bias is closest to `voltage`. Ties go to the first sample in
/// ascending-bias order. `None` only for an empty curve.
pub fn nearest_point(curve: &TunabilityCurve, voltage: f64) -> Option<&TunabilityPoint> {
    let mut best: Option<(&TunabilityPoint, f64)> = None;
    for point in &curve.points {
        let distance = (point.bias_v - voltage).abs();
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((point, distance));
        }
    }
    best.map(|(point, _)| point)
}

/// Cross-file tunability-per-volt at each target voltage.
///
/// Every curve contributes `|tune_pct| / V` at its nearest sample; the
/// contributions are reduced to a mean and a population standard deviation.
/// Curves without samples do not contribute. Callers guarantee at least one
/// non-empty curve.
pub fn per_volt_stats(curves: &[TunabilityCurve], target_voltages: &[u32]) -> Vec<PerVoltStat> {
    target_voltages
        .iter()
        .map(|&voltage| {
            let v = f64::from(voltage);
            let contributions: Vec<f64> = curves
                .iter()
                .filter_map(|curve| {
                    let point = nearest_point(curve, v)?;
                    log::debug!(
                        "{}: {v} V matched sample at {} V",
                        curve.name,
                        point.bias_v
                    );
                    Some(point.tune_pct.abs() / v)
                })
                .collect();
            let (mean, std) = mean_and_population_std(&contributions);
            PerVoltStat {
                voltage,
                mean_tune_per_v: mean,
                std_tune_per_v: std,
            }
        })
        .collect()
}

fn mean_and_population_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}
