use std::path::PathBuf;
use std::sync::Arc;

use crate::color::OutcomeColors;
use crate::config::DashboardConfig;
use crate::data::filter::{AgeRange, FilterState, Selection};
use crate::data::grid::TableView;
use crate::data::model::PatientTable;
use crate::pipeline::{FilterPipeline, Snapshot};

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Overview,
    Analytics,
    Data,
    About,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Overview,
        Section::Analytics,
        Section::Data,
        Section::About,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::Analytics => "Analytics",
            Section::Data => "Data",
            Section::About => "About",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Committed filter state and the snapshot derived from it.
    pub pipeline: FilterPipeline,

    /// Values bound to the filter widgets. Every edit is committed at once.
    pub draft: FilterState,

    /// Which page is shown in the central panel.
    pub section: Section,

    /// Search text and page of the data table.
    pub table_view: TableView,

    /// Colours for the two stroke outcomes.
    pub colors: OutcomeColors,

    /// Where the dataset was read from (shown on the About page).
    pub dataset_path: PathBuf,
}

impl AppState {
    pub fn new(table: Arc<PatientTable>, config: &DashboardConfig) -> Self {
        let pipeline = FilterPipeline::new(table, config.histogram_bin_width);
        let draft = pipeline.snapshot().filter.clone();
        Self {
            pipeline,
            draft,
            section: Section::default(),
            table_view: TableView::default(),
            colors: OutcomeColors::default(),
            dataset_path: config.dataset_path.clone(),
        }
    }

    pub fn table(&self) -> &PatientTable {
        self.pipeline.table()
    }

    /// The one snapshot every widget of a frame reads from.
    pub fn snapshot(&self) -> &Snapshot {
        self.pipeline.snapshot()
    }

    pub fn set_gender(&mut self, gender: Selection) {
        self.draft.gender = gender;
        self.commit();
    }

    pub fn set_smoking(&mut self, smoking: Selection) {
        self.draft.smoking = smoking;
        self.commit();
    }

    /// Move the lower bound; it cannot pass the upper one.
    pub fn set_age_min(&mut self, min: f64) {
        let max = self.draft.age.max();
        self.draft.age = AgeRange::new(min.min(max), max).clamped(self.table().age_bounds);
        self.commit();
    }

    /// Move the upper bound; it cannot pass the lower one.
    pub fn set_age_max(&mut self, max: f64) {
        let min = self.draft.age.min();
        self.draft.age = AgeRange::new(min, max.max(min)).clamped(self.table().age_bounds);
        self.commit();
    }

    pub fn reset_filters(&mut self) {
        if self.pipeline.reset() {
            self.table_view.sync(self.pipeline.snapshot().generation);
        }
        self.draft = self.pipeline.snapshot().filter.clone();
    }

    fn commit(&mut self) {
        if self.pipeline.commit(self.draft.clone()) {
            self.table_view.sync(self.pipeline.snapshot().generation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{record, table};

    fn state() -> AppState {
        let full = Arc::new(table(vec![
            record("1", "Male", "20", "90", "20", "smokes", "0"),
            record("2", "Female", "40", "95", "22", "never smoked", "0"),
            record("3", "Female", "60", "120", "30", "never smoked", "1"),
            record("4", "Other", "80", "130", "N/A", "Unknown", "1"),
        ]));
        AppState::new(full, &DashboardConfig::default())
    }

    #[test]
    fn draft_starts_equal_to_committed_state() {
        let s = state();
        assert_eq!(s.draft, s.snapshot().filter);
        assert_eq!(s.snapshot().view.len(), 4);
        assert_eq!(s.section, Section::Overview);
    }

    #[test]
    fn age_bounds_cannot_cross() {
        let mut s = state();
        s.set_age_max(50.0);
        s.set_age_min(70.0);
        assert_eq!((s.draft.age.min(), s.draft.age.max()), (50.0, 50.0));

        s.set_age_max(10.0);
        assert_eq!((s.draft.age.min(), s.draft.age.max()), (50.0, 50.0));

        s.set_age_max(500.0);
        assert_eq!(s.draft.age.max(), 80.0);
    }

    #[test]
    fn every_edit_is_committed() {
        let mut s = state();
        s.set_gender(Selection::Only("Female".into()));
        assert_eq!(s.snapshot().metrics.total_patients, 2);
        s.set_smoking(Selection::Only("smokes".into()));
        assert_eq!(s.snapshot().metrics.total_patients, 0);
        assert_eq!(s.snapshot().filter, s.draft);

        s.reset_filters();
        assert_eq!(s.snapshot().metrics.total_patients, 4);
    }

    #[test]
    fn reset_goes_through_pipeline_and_rewinds_table() {
        let mut s = state();
        s.set_gender(Selection::Only("Female".into()));
        s.table_view.sync(s.snapshot().generation);
        s.table_view.last_page(100);
        let filtered_generation = s.snapshot().generation;

        s.reset_filters();
        assert_eq!(s.draft, FilterState::unfiltered(s.table()));
        assert_eq!(s.snapshot().filter, s.draft);
        assert_eq!(s.snapshot().generation, filtered_generation + 1);
        assert_eq!(s.table_view.page(), 0);

        s.reset_filters();
        assert_eq!(s.snapshot().generation, filtered_generation + 1);
    }

    #[test]
    fn filter_change_resets_table_page() {
        let mut s = state();
        s.table_view.sync(s.snapshot().generation);
        s.table_view.last_page(100);
        assert_eq!(s.table_view.page(), 9);

        s.set_age_min(30.0);
        assert_eq!(s.table_view.page(), 0);
    }
}
