use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::curve_color;
use crate::data::export::save_report;
use crate::state::{AppState, PlotTab};

const WARNING_COLOR: Color32 = Color32::from_rgb(230, 160, 30);

// ---------------------------------------------------------------------------
// Left side panel – display settings and batch summary
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Display");
    ui.separator();

    ui.add(
        egui::Slider::new(&mut state.zoom, 0.5..=2.0)
            .step_by(0.1)
            .text("Zoom (lines / markers)"),
    );
    ui.add_space(4.0);

    ui.selectable_value(
        &mut state.active_tab,
        PlotTab::TunabilityVsBias,
        "📈 Tunability vs bias",
    );
    ui.selectable_value(
        &mut state.active_tab,
        PlotTab::TunabilityPerVolt,
        "⚡ Tunability per volt",
    );
    ui.separator();

    ui.heading("Files");
    ui.separator();

    let Some(report) = &state.report else {
        if state.files.is_empty() {
            ui.label("No files loaded.");
        } else {
            ui.label(format!("{} files, analysis failed.", state.files.len()));
        }
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (idx, curve) in report.curves.iter().enumerate() {
                let color = curve_color(&state.curve_colors, idx);
                ui.label(RichText::new(&curve.name).color(color).strong());
                ui.label(format!(
                    "  C(0 V) = {:.3} pF, {} points",
                    curve.c0_pf,
                    curve.points.len()
                ));
            }

            if report.has_warnings() {
                ui.separator();
                for warning in &report.warnings {
                    ui.label(RichText::new(format!("⚠ {warning}")).color(WARNING_COLOR));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_files_dialog(state);
                ui.close_menu();
            }
            let can_export = state.report.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export report…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(report) = &state.report {
            let text = format!("Measurement frequency: {:.3e} Hz", report.f_ref);
            if report.has_warnings() {
                ui.label(RichText::new(format!("⚠ {text} (files differ)")).color(WARNING_COLOR));
            } else {
                ui.label(RichText::new(text).color(Color32::GREEN));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_files_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Open Agilent measurement files (tab-separated)")
        .add_filter("Measurement files", &["csv", "txt"])
        .pick_files();

    if let Some(paths) = files {
        log::info!("Analysing {} files", paths.len());
        state.load_files(paths);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(report) = &state.report else {
        return;
    };
    let target = rfd::FileDialog::new()
        .set_title("Export tunability report")
        .add_filter("JSON", &["json"])
        .set_file_name("tunability_report.json")
        .save_file();

    if let Some(path) = target {
        if let Err(e) = save_report(report, &path) {
            log::error!("Failed to export report: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
