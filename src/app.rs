use eframe::egui;

use crate::state::{AppState, Section};
use crate::ui::{panels, sections};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StrokeDashApp {
    pub state: AppState,
}

impl StrokeDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for StrokeDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: navigation ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        // Filter edits commit here, before anything that shows derived data
        // is drawn, so the rest of the frame reads one snapshot.
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            panels::status_bar(ui, &self.state);
        });

        // ---- Central panel: active section ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.section {
            Section::Overview => sections::overview(ui, &self.state),
            Section::Analytics => sections::analytics(ui, &self.state),
            Section::Data => sections::data(ui, &mut self.state),
            Section::About => sections::about(ui, &self.state),
        });
    }
}
