use std::sync::Arc;

use crate::analytics::charts::ChartSet;
use crate::analytics::metrics::SummaryMetrics;
use crate::data::filter::{apply, FilterState, FilteredTable};
use crate::data::model::PatientTable;

// ---------------------------------------------------------------------------
// Snapshot: everything one frame shows, derived from one filter state
// ---------------------------------------------------------------------------

/// The filtered table and every derivation of it, published together.
///
/// `generation` identifies the snapshot; consumers that keep their own view
/// state compare it to notice a recomputation.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub generation: u64,
    pub filter: FilterState,
    pub view: FilteredTable,
    pub metrics: SummaryMetrics,
    pub charts: ChartSet,
}

impl Snapshot {
    fn derive(
        generation: u64,
        table: &Arc<PatientTable>,
        filter: FilterState,
        bin_width: f64,
    ) -> Self {
        let view = apply(table, &filter);
        let metrics = SummaryMetrics::compute(&view);
        let charts = ChartSet::build(&view, bin_width);
        Snapshot {
            generation,
            filter,
            view,
            metrics,
            charts,
        }
    }
}

// ---------------------------------------------------------------------------
// FilterPipeline
// ---------------------------------------------------------------------------

/// Owns the committed filter state of one session and the snapshot derived
/// from it. The full table is shared; nothing else is.
#[derive(Debug)]
pub struct FilterPipeline {
    table: Arc<PatientTable>,
    bin_width: f64,
    current: Snapshot,
}

impl FilterPipeline {
    /// Start unfiltered.
    pub fn new(table: Arc<PatientTable>, bin_width: f64) -> Self {
        let filter = FilterState::unfiltered(&table);
        let current = Snapshot::derive(0, &table, filter, bin_width);
        FilterPipeline {
            table,
            bin_width,
            current,
        }
    }

    pub fn table(&self) -> &Arc<PatientTable> {
        &self.table
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.current
    }

    /// Commit a new filter state.
    ///
    /// Returns `false` and keeps the current snapshot when `filter` equals the
    /// committed state. Otherwise the whole snapshot is rebuilt before it
    /// replaces the old one, so no reader ever sees a mix of the two.
    pub fn commit(&mut self, filter: FilterState) -> bool {
        if filter == self.current.filter {
            return false;
        }
        let generation = self.current.generation + 1;
        let next = Snapshot::derive(generation, &self.table, filter, self.bin_width);
        log::debug!(
            "filter generation {generation}: {} of {} rows ({:?})",
            next.view.len(),
            self.table.len(),
            next.filter
        );
        self.current = next;
        true
    }

    /// Back to the unfiltered state.
    pub fn reset(&mut self) -> bool {
        let filter = FilterState::unfiltered(&self.table);
        self.commit(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::metrics::Average;
    use crate::data::filter::{AgeRange, Selection};
    use crate::data::model::tests::{record, table};

    fn full() -> Arc<PatientTable> {
        Arc::new(table(vec![
            record("1", "Male", "67", "228.69", "36.6", "formerly smoked", "1"),
            record("2", "Female", "61", "202.21", "N/A", "never smoked", "1"),
            record("3", "Male", "80", "105.92", "32.5", "never smoked", "1"),
            record("4", "Female", "49", "171.23", "34.4", "smokes", "0"),
            record("5", "Female", "79", "174.12", "24", "never smoked", "0"),
        ]))
    }

    fn females(table: &PatientTable) -> FilterState {
        FilterState {
            gender: Selection::Only("Female".into()),
            ..FilterState::unfiltered(table)
        }
    }

    #[test]
    fn starts_unfiltered_at_generation_zero() {
        let p = FilterPipeline::new(full(), 5.0);
        let snap = p.snapshot();
        assert_eq!(snap.generation, 0);
        assert_eq!(snap.view.len(), 5);
        assert_eq!(snap.metrics.total_patients, 5);
    }

    #[test]
    fn commit_rederives_everything_from_one_view() {
        let table = full();
        let mut p = FilterPipeline::new(Arc::clone(&table), 5.0);
        assert!(p.commit(females(&table)));

        let snap = p.snapshot();
        assert_eq!(snap.generation, 1);
        assert_eq!(snap.metrics.total_patients, snap.view.len());
        assert_eq!(snap.metrics.total_patients, 3);
        assert_eq!(snap.metrics.avg_bmi, Average::Value(29.2));
        assert_eq!(snap.charts, ChartSet::build(&snap.view, 5.0));
        assert_eq!(snap.charts.gender_outcome.genders(), vec!["Female"]);
    }

    #[test]
    fn committing_same_state_is_a_no_op() {
        let table = full();
        let mut p = FilterPipeline::new(Arc::clone(&table), 5.0);
        assert!(p.commit(females(&table)));
        let before = p.snapshot().clone();

        assert!(!p.commit(females(&table)));
        let after = p.snapshot();
        assert_eq!(after.generation, before.generation);
        assert_eq!(after.view.indices(), before.view.indices());
        assert_eq!(after.metrics, before.metrics);
        assert_eq!(after.charts, before.charts);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let table = full();
        let mut p = FilterPipeline::new(Arc::clone(&table), 5.0);
        p.commit(FilterState {
            gender: Selection::Only("Male".into()),
            age: AgeRange::new(49.0, 50.0),
            smoking: Selection::All,
        });
        let snap = p.snapshot();
        assert!(snap.view.is_empty());
        assert_eq!(snap.metrics.avg_glucose, Average::NoData);
        assert_eq!(snap.metrics.avg_bmi, Average::NoData);
        assert!(snap.charts.age_histogram.bins.is_empty());
    }

    #[test]
    fn sessions_sharing_a_table_are_independent() {
        let table = full();
        let mut a = FilterPipeline::new(Arc::clone(&table), 5.0);
        let b = FilterPipeline::new(Arc::clone(&table), 5.0);

        a.commit(females(&table));
        assert_eq!(a.snapshot().view.len(), 3);
        assert_eq!(b.snapshot().view.len(), 5);
        assert_eq!(b.snapshot().generation, 0);
        assert!(Arc::ptr_eq(a.table(), b.table()));
    }

    #[test]
    fn reset_returns_to_full_table() {
        let table = full();
        let mut p = FilterPipeline::new(Arc::clone(&table), 5.0);
        p.commit(females(&table));
        assert!(p.reset());
        assert_eq!(p.snapshot().view.len(), 5);
        assert_eq!(p.snapshot().generation, 2);
        assert!(!p.reset());
    }
}
