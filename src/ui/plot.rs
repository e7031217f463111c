use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, PlotUi, Points};

use crate::color::curve_color;
use crate::data::model::AnalysisReport;
use crate::state::{AppState, PlotTab};

/// Half-width (V) of the caps drawn on error bars.
const CAP_HALF_WIDTH: f64 = 0.2;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the plot for the active tab in the central panel.
pub fn plot_area(ui: &mut Ui, state: &AppState) {
    let report = match &state.report {
        Some(r) => r,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open one or more measurement files  (File → Open…)");
            });
            return;
        }
    };

    match state.active_tab {
        PlotTab::TunabilityVsBias => tunability_plot(ui, state, report),
        PlotTab::TunabilityPerVolt => per_volt_plot(ui, state, report),
    }
}

// ---------------------------------------------------------------------------
// Series A: tunability vs bias, one curve per file
// ---------------------------------------------------------------------------

fn tunability_plot(ui: &mut Ui, state: &AppState, report: &AnalysisReport) {
    let width = state.line_width();
    let radius = state.marker_radius();

    Plot::new("tunability_plot")
        .legend(Legend::default())
        .x_axis_label("DC bias (V)")
        .y_axis_label("Tunability (%)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (idx, curve) in report.curves.iter().enumerate() {
                let color = curve_color(&state.curve_colors, idx);
                let xy: Vec<[f64; 2]> = curve
                    .points
                    .iter()
                    .map(|p| [p.bias_v, p.tune_pct])
                    .collect();

                plot_ui.line(
                    Line::new(PlotPoints::new(xy.clone()))
                        .name(&curve.name)
                        .color(color)
                        .width(width),
                );
                plot_ui.points(
                    Points::new(PlotPoints::new(xy))
                        .name(&curve.name)
                        .color(color)
                        .radius(radius),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Series B: tunability per volt, mean ± population std
// ---------------------------------------------------------------------------

fn per_volt_plot(ui: &mut Ui, state: &AppState, report: &AnalysisReport) {
    let width = state.line_width();
    let radius = state.marker_radius();
    let color = Color32::LIGHT_BLUE;

    Plot::new("per_volt_plot")
        .legend(Legend::default())
        .x_axis_label("DC bias (V)")
        .y_axis_label("Tunability per volt (%/V)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let means: Vec<[f64; 2]> = report
                .per_volt
                .iter()
                .map(|s| [f64::from(s.voltage), s.mean_tune_per_v])
                .collect();

            for stat in &report.per_volt {
                error_bar(
                    plot_ui,
                    f64::from(stat.voltage),
                    stat.mean_tune_per_v,
                    stat.std_tune_per_v,
                    color,
                    width,
                );
            }

            plot_ui.line(
                Line::new(PlotPoints::new(means.clone()))
                    .name("mean ± std")
                    .color(color)
                    .width(width),
            );
            plot_ui.points(Points::new(PlotPoints::new(means)).color(color).radius(radius));
        });
}

/// Vertical bar from `mean - std` to `mean + std` with horizontal caps.
/// Unnamed, so it stays out of the legend.
fn error_bar(plot_ui: &mut PlotUi, x: f64, mean: f64, std: f64, color: Color32, width: f32) {
    let (low, high) = (mean - std, mean + std);
    let segments = [
        [[x, low], [x, high]],
        [[x - CAP_HALF_WIDTH, low], [x + CAP_HALF_WIDTH, low]],
        [[x - CAP_HALF_WIDTH, high], [x + CAP_HALF_WIDTH, high]],
    ];
    for segment in segments {
        plot_ui.line(
            Line::new(PlotPoints::new(segment.to_vec()))
                .color(color)
                .width(width * 0.5),
        );
    }
}
