use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::analytics::metrics::Average;
use crate::state::AppState;
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Overview: headline metrics + age histogram
// ---------------------------------------------------------------------------

pub fn overview(ui: &mut Ui, state: &AppState) {
    let snapshot = state.snapshot();
    let metrics = &snapshot.metrics;

    ui.heading("Overview");
    ui.add_space(6.0);

    ui.columns(3, |cols: &mut [Ui]| {
        metric_card(
            &mut cols[0],
            "Total patients",
            RichText::new(metrics.total_patients.to_string()),
        );
        metric_card(&mut cols[1], "Avg glucose level", average_text(metrics.avg_glucose));
        metric_card(&mut cols[2], "Avg BMI", average_text(metrics.avg_bmi));
    });

    ui.add_space(12.0);
    let height = ui.available_height() - 30.0;
    plot::age_histogram(ui, &snapshot.charts.age_histogram, &state.colors, height.max(150.0));
}

fn metric_card(ui: &mut Ui, title: &str, value: RichText) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(title);
            ui.label(value.size(26.0).strong());
        });
    });
}

/// Undefined means are spelled out, never shown as a number.
fn average_text(avg: Average) -> RichText {
    match avg.value() {
        Some(v) => RichText::new(format!("{v:.2}")),
        None => RichText::new("no data").italics().color(Color32::GRAY),
    }
}

// ---------------------------------------------------------------------------
// Analytics: three charts
// ---------------------------------------------------------------------------

pub fn analytics(ui: &mut Ui, state: &AppState) {
    let snapshot = state.snapshot();
    let charts = &snapshot.charts;

    ui.heading("Analytics");
    if snapshot.view.is_empty() {
        ui.label(RichText::new("No patients match the current filters.").color(Color32::GRAY));
    }
    ui.add_space(6.0);

    let half = ((ui.available_height() - 80.0) / 2.0).max(150.0);
    ui.columns(2, |cols: &mut [Ui]| {
        let colors = &state.colors;
        plot::scatter(&mut cols[0], "glucose_scatter", &charts.glucose_scatter, colors, half);
        plot::scatter(&mut cols[1], "bmi_scatter", &charts.bmi_scatter, colors, half);
    });
    ui.add_space(8.0);
    plot::gender_bars(ui, &charts.gender_outcome, &state.colors, half);
}

// ---------------------------------------------------------------------------
// Data: searchable, paginated table
// ---------------------------------------------------------------------------

pub fn data(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Patient records");
    ui.add_space(6.0);
    table::data_table(ui, state);
}

// ---------------------------------------------------------------------------
// About: static text + load diagnostics
// ---------------------------------------------------------------------------

pub fn about(ui: &mut Ui, state: &AppState) {
    let table = state.table();

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.heading("About");
        ui.label(
            "Explore a stroke-risk patient dataset. Pick a gender, an age range and a \
             smoking status on the left; the metrics, charts and table all follow the \
             same filtered rows.",
        );
        ui.add_space(8.0);

        ui.strong("Dataset");
        ui.label(format!("File: {}", state.dataset_path.display()));
        ui.label(format!(
            "{} rows, {} columns: {}",
            table.len(),
            table.columns.len(),
            table.columns.join(", ")
        ));
        ui.add_space(8.0);

        ui.strong("Values treated as missing");
        if table.coercion.is_clean() {
            ui.label("None: every numeric value could be read.");
            return;
        }
        egui::Grid::new("coercion_report")
            .striped(true)
            .num_columns(3)
            .show(ui, |ui: &mut Ui| {
                ui.strong("Column");
                ui.strong("Missing");
                ui.strong("Examples");
                ui.end_row();
                for (column, c) in &table.coercion.columns {
                    ui.label(column);
                    ui.label(c.missing.to_string());
                    let samples: Vec<String> = c.samples.iter().map(|s| format!("{s:?}")).collect();
                    ui.label(samples.join(", "));
                    ui.end_row();
                }
            });
    });
}
