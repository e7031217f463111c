use std::path::PathBuf;

use eframe::egui::Color32;

use crate::color::generate_palette;
use crate::data::config::AnalysisConfig;
use crate::data::error::AnalysisError;
use crate::data::model::AnalysisReport;
use crate::data::pipeline::Pipeline;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotTab {
    #[default]
    TunabilityVsBias,
    TunabilityPerVolt,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Configuration every run is computed with.
    pub config: AnalysisConfig,

    /// Files of the current batch (empty until the user opens some).
    pub files: Vec<PathBuf>,

    /// Last successful report (None until a run succeeds).
    pub report: Option<AnalysisReport>,

    /// One colour per curve of `report`.
    pub curve_colors: Vec<Color32>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Visual zoom applied to line width and marker size only.
    pub zoom: f32,

    pub active_tab: PlotTab,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(AnalysisConfig::default())
    }
}

impl AppState {
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            config,
            files: Vec::new(),
            report: None,
            curve_colors: Vec::new(),
            status_message: None,
            zoom: 1.0,
            active_tab: PlotTab::default(),
        }
    }

    pub fn line_width(&self) -> f32 {
        2.0 * self.zoom
    }

    pub fn marker_radius(&self) -> f32 {
        3.0 * self.zoom
    }

    /// Read `paths` from disk and analyse them as one batch. A failure
    /// discards any previous report; nothing from a failed batch is kept.
    pub fn load_files(&mut self, paths: Vec<PathBuf>) {
        let outcome = Pipeline::new(self.config.clone())
            .map_err(anyhow::Error::from)
            .and_then(|p| p.run_paths(&paths));
        self.files = paths;
        match outcome {
            Ok(report) => self.set_report(report),
            Err(e) => {
                log::error!("Analysis failed: {e:#}");
                self.report = None;
                self.curve_colors.clear();
                self.status_message = Some(failure_message(&e));
            }
        }
    }

    pub fn set_report(&mut self, report: AnalysisReport) {
        self.curve_colors = generate_palette(report.curves.len());
        self.status_message = None;
        self.report = Some(report);
    }
}

fn failure_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<AnalysisError>() {
        Some(e) if e.file().is_none() => format!("Error ({:?}): {e}", e.kind()),
        Some(e) => format!("Error: {e}"),
        None => format!("Error: {error:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "Freq\tDCB\tCp\tRp\n1e6\t0\t1e-11\t1e6\n1e6\t2\t9e-12\t1e6\n";

    fn write_batch(dir: &str, files: &[(&str, &str)]) -> Vec<PathBuf> {
        let dir = std::env::temp_dir().join(dir);
        std::fs::create_dir_all(&dir).unwrap();
        files
            .iter()
            .map(|(name, text)| {
                let path = dir.join(name);
                std::fs::write(&path, text).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn successful_batch_sets_report_and_colours() {
        let mut state = AppState::default();
        state.load_files(write_batch("cv_state_ok", &[("a.txt", GOOD), ("b.txt", GOOD)]));
        assert_eq!(state.report.as_ref().unwrap().curves.len(), 2);
        assert_eq!(state.curve_colors.len(), 2);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn failed_batch_clears_previous_report() {
        let mut state = AppState::default();
        state.load_files(write_batch("cv_state_fail_1", &[("a.txt", GOOD)]));
        assert!(state.report.is_some());

        state.load_files(write_batch(
            "cv_state_fail_2",
            &[("a.txt", GOOD), ("bad.txt", "x\ty\n")],
        ));
        assert!(state.report.is_none());
        assert!(state.curve_colors.is_empty());
        assert_eq!(state.files.len(), 2);
        assert!(state.status_message.as_deref().unwrap().contains("bad.txt"));
    }

    #[test]
    fn unreadable_file_is_reported() {
        let mut state = AppState::default();
        state.load_files(vec![std::env::temp_dir().join("cv_state_missing/none.txt")]);
        assert!(state.report.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn zoom_scales_line_and_marker() {
        let mut state = AppState::default();
        state.zoom = 1.5;
        assert_eq!(state.line_width(), 3.0);
        assert_eq!(state.marker_radius(), 4.5);
    }
}
