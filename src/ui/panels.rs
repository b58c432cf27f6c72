use eframe::egui::{self, RichText, Ui};

use crate::data::filter::Selection;
use crate::state::{AppState, Section};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone what we need so we can mutate state while drawing.
    let genders: Vec<String> = state.table().genders.iter().cloned().collect();
    let smoking: Vec<String> = state.table().smoking_statuses.iter().cloned().collect();
    let (lo, hi) = state.table().age_bounds;

    ui.strong("Gender");
    if let Some(picked) = selection_combo(ui, "gender_filter", &state.draft.gender, &genders) {
        state.set_gender(picked);
    }
    ui.add_space(8.0);

    ui.strong("Age range");
    let mut min = state.draft.age.min();
    let mut max = state.draft.age.max();
    if ui
        .add(egui::Slider::new(&mut min, lo..=hi).text("from"))
        .changed()
    {
        state.set_age_min(min);
    }
    if ui
        .add(egui::Slider::new(&mut max, lo..=hi).text("to"))
        .changed()
    {
        state.set_age_max(max);
    }
    ui.add_space(8.0);

    ui.strong("Smoking status");
    if let Some(picked) = selection_combo(ui, "smoking_filter", &state.draft.smoking, &smoking) {
        state.set_smoking(picked);
    }

    ui.separator();
    if ui.button("Reset filters").clicked() {
        state.reset_filters();
    }
}

/// "All" plus one entry per observed value. Returns the clicked choice.
fn selection_combo(
    ui: &mut Ui,
    id: &str,
    current: &Selection,
    options: &[String],
) -> Option<Selection> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(*current == Selection::All, "All")
                .clicked()
            {
                picked = Some(Selection::All);
            }
            for opt in options {
                let choice = Selection::Only(opt.clone());
                if ui.selectable_label(*current == choice, opt).clicked() {
                    picked = Some(choice);
                }
            }
        });
    picked
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the navigation bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        for section in Section::ALL {
            ui.selectable_value(
                &mut state.section,
                section,
                RichText::new(section.title()).strong(),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

/// Row counts of the committed snapshot. Drawn after the filter panel so it
/// never shows a count from before this frame's edits.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    let snapshot = state.snapshot();
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} patients loaded, {} visible",
            state.table().len(),
            snapshot.view.len()
        ));
        ui.separator();
        ui.label(format!(
            "gender: {}  ·  age: {:.0}–{:.0}  ·  smoking: {}",
            snapshot.filter.gender,
            snapshot.filter.age.min(),
            snapshot.filter.age.max(),
            snapshot.filter.smoking
        ));
    });
}
