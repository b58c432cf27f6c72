use std::fmt;
use std::sync::Arc;

use super::model::{PatientRecord, PatientTable};

// ---------------------------------------------------------------------------
// Filter parameters
// ---------------------------------------------------------------------------

/// A categorical selector: everything, or one observed value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "All"),
            Selection::Only(v) => write!(f, "{v}"),
        }
    }
}

/// Inclusive age interval. The endpoints never invert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeRange {
    min: f64,
    max: f64,
}

impl AgeRange {
    /// Build a range from two endpoints in either order.
    pub fn new(a: f64, b: f64) -> Self {
        AgeRange {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Restrict both endpoints to `(lo, hi)`.
    pub fn clamped(self, (lo, hi): (f64, f64)) -> Self {
        AgeRange::new(self.min.clamp(lo, hi), self.max.clamp(lo, hi))
    }

    /// Missing ages never fall inside a range.
    pub fn contains(&self, age: Option<f64>) -> bool {
        age.is_some_and(|a| a >= self.min && a <= self.max)
    }
}

/// Snapshot of the three user-controlled filter parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub gender: Selection,
    pub age: AgeRange,
    pub smoking: Selection,
}

impl FilterState {
    /// All genders, the dataset's whole age span, all smoking statuses.
    pub fn unfiltered(table: &PatientTable) -> Self {
        let (lo, hi) = table.age_bounds;
        FilterState {
            gender: Selection::All,
            age: AgeRange::new(lo, hi),
            smoking: Selection::All,
        }
    }

    /// A row passes when every predicate holds.
    ///
    /// A row whose age is missing fails the age predicate and is excluded.
    pub fn admits(&self, record: &PatientRecord) -> bool {
        self.gender.matches(&record.gender)
            && self.age.contains(record.age.value())
            && self.smoking.matches(&record.smoking_status)
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// The rows of the full table that pass a [`FilterState`], in source order.
///
/// Holds the shared table handle plus row indices; it is rebuilt wholesale
/// on every filter change and never edited in place.
#[derive(Debug, Clone)]
pub struct FilteredTable {
    source: Arc<PatientTable>,
    rows: Vec<usize>,
}

impl FilteredTable {
    pub fn source(&self) -> &PatientTable {
        &self.source
    }

    /// Indices into the full table, ascending.
    #[cfg(test)]
    pub fn indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&PatientRecord> {
        self.rows.get(i).map(|&idx| &self.source.records[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatientRecord> + '_ {
        self.rows.iter().map(|&idx| &self.source.records[idx])
    }
}

/// Return the rows of `table` that pass all active filters. O(n), pure.
pub fn apply(table: &Arc<PatientTable>, state: &FilterState) -> FilteredTable {
    let rows = table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| state.admits(rec))
        .map(|(i, _)| i)
        .collect();

    FilteredTable {
        source: Arc::clone(table),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{record, table};

    fn sample() -> Arc<PatientTable> {
        Arc::new(table(vec![
            record("1", "Male", "67", "228.69", "36.6", "formerly smoked", "1"),
            record("2", "Female", "61", "202.21", "N/A", "never smoked", "1"),
            record("3", "Male", "80", "105.92", "32.5", "never smoked", "1"),
            record("4", "Female", "49", "171.23", "34.4", "smokes", "0"),
            record("5", "Female", "50", "174.12", "24", "never smoked", "0"),
            record("6", "Other", "26", "143.33", "22.4", "formerly smoked", "0"),
            record("7", "Female", "N/A", "90", "25", "Unknown", "0"),
            record("8", "Male", "50", "80.5", "29", "Unknown", "0"),
        ]))
    }

    fn state(gender: Selection, lo: f64, hi: f64, smoking: Selection) -> FilterState {
        FilterState {
            gender,
            age: AgeRange::new(lo, hi),
            smoking,
        }
    }

    fn ids(view: &FilteredTable) -> Vec<&str> {
        view.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn wide_open_filter_returns_every_row_with_an_age() {
        let full = sample();
        let view = apply(&full, &state(Selection::All, 0.0, 120.0, Selection::All));
        // Row 7 has no age and cannot satisfy the age predicate.
        assert_eq!(ids(&view), vec!["1", "2", "3", "4", "5", "6", "8"]);
    }

    #[test]
    fn gender_filter_counts_match() {
        let full = sample();
        let view = apply(
            &full,
            &state(Selection::Only("Female".into()), 0.0, 120.0, Selection::All),
        );
        assert_eq!(ids(&view), vec!["2", "4", "5"]);
        assert!(view.iter().all(|r| r.gender == "Female"));
    }

    #[test]
    fn point_age_range_returns_only_that_age() {
        let full = sample();
        let view = apply(&full, &state(Selection::All, 50.0, 50.0, Selection::All));
        assert_eq!(ids(&view), vec!["5", "8"]);
        assert!(view.iter().all(|r| r.age.value() == Some(50.0)));
    }

    #[test]
    fn predicates_compose() {
        let full = sample();
        let view = apply(
            &full,
            &state(
                Selection::Only("Male".into()),
                60.0,
                90.0,
                Selection::Only("never smoked".into()),
            ),
        );
        assert_eq!(ids(&view), vec!["3"]);
    }

    #[test]
    fn no_match_yields_empty_view() {
        let full = sample();
        let view = apply(
            &full,
            &state(Selection::Only("Other".into()), 70.0, 90.0, Selection::All),
        );
        assert!(view.is_empty());
        assert_eq!(view.get(0).map(|r| r.id.as_str()), None);
    }

    #[test]
    fn result_is_ordered_subset_and_deterministic() {
        let full = sample();
        let s = state(Selection::All, 30.0, 70.0, Selection::Only("never smoked".into()));
        let a = apply(&full, &s);
        let b = apply(&full, &s);
        assert_eq!(a.indices(), b.indices());
        assert!(a.indices().windows(2).all(|w| w[0] < w[1]));
        assert!(a.indices().iter().all(|&i| i < full.len()));
    }

    #[test]
    fn narrowing_age_never_increases_count() {
        let full = sample();
        let mut previous = usize::MAX;
        for (lo, hi) in [(0.0, 120.0), (20.0, 90.0), (45.0, 70.0), (50.0, 61.0), (55.0, 56.0)] {
            let n = apply(&full, &state(Selection::All, lo, hi, Selection::All)).len();
            assert!(n <= previous);
            previous = n;
        }
    }

    #[test]
    fn missing_bmi_does_not_exclude_row() {
        let full = sample();
        let view = apply(&full, &FilterState::unfiltered(&full));
        assert!(view.iter().any(|r| r.id == "2" && r.bmi.is_missing()));
    }

    #[test]
    fn unfiltered_state_spans_observed_ages() {
        let full = sample();
        let s = FilterState::unfiltered(&full);
        assert_eq!((s.age.min(), s.age.max()), (26.0, 80.0));
        assert_eq!(apply(&full, &s).len(), 7);
    }

    #[test]
    fn age_range_never_inverts() {
        let r = AgeRange::new(70.0, 20.0);
        assert_eq!((r.min(), r.max()), (20.0, 70.0));
        let c = AgeRange::new(-5.0, 200.0).clamped((0.08, 82.0));
        assert_eq!((c.min(), c.max()), (0.08, 82.0));
        assert!(!r.contains(None));
    }
}
