use std::path::Path;

use anyhow::{Context, Result};

use super::model::AnalysisReport;

/// Pretty-printed JSON of a report: both series, `f_ref`, warnings and the
/// config used.
pub fn report_to_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialising report")
}

pub fn save_report(report: &AnalysisReport, path: &Path) -> Result<()> {
    let json = report_to_json(report)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Report written to {}", path.display());
    Ok(())
}
