use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Columns every source table must provide.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "id",
    "gender",
    "age",
    "avg_glucose_level",
    "bmi",
    "smoking_status",
    "stroke",
];

// ---------------------------------------------------------------------------
// Numeric – a coerced numeric cell
// ---------------------------------------------------------------------------

/// A numeric cell after load-time coercion.
///
/// Propagation rules for `Missing`:
/// * excluded from means (neither numerator nor denominator),
/// * fails every range comparison, so a filter on that field drops the row,
/// * omitted from the chart that plots that field only,
/// * kept in the row and shown verbatim in the data table.
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
    Value(f64),
    /// Coercion failed; `raw` is the original text, kept for diagnostics.
    Missing { raw: String },
}

impl Numeric {
    /// Coerce a text cell. Empty, non-numeric and non-finite text is missing.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Numeric::Value(v),
            _ => Numeric::Missing {
                raw: raw.to_string(),
            },
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Numeric::Value(v) => Some(*v),
            Numeric::Missing { .. } => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Numeric::Missing { .. })
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Value(v) => write!(f, "{v}"),
            Numeric::Missing { raw } => write!(f, "{raw}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome – the binary stroke label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    NoStroke,
    Stroke,
}

impl Outcome {
    pub const ALL: [Outcome; 2] = [Outcome::NoStroke, Outcome::Stroke];

    /// Accepts `0`/`1`, their float spellings and `true`/`false`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "0" | "0.0" | "false" => Some(Outcome::NoStroke),
            "1" | "1.0" | "true" => Some(Outcome::Stroke),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Outcome::NoStroke => 0,
            Outcome::Stroke => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::NoStroke => "No stroke (0)",
            Outcome::Stroke => "Stroke (1)",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// PatientRecord – one row of the source table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PatientRecord {
    pub id: String,
    pub gender: String,
    pub age: Numeric,
    pub avg_glucose_level: Numeric,
    pub bmi: Numeric,
    pub smoking_status: String,
    /// `None` when the label could not be read; such rows stay in the table
    /// but are left out of every outcome-split chart.
    pub stroke: Option<Outcome>,
    /// Display text for every source column, in source column order.
    pub cells: Vec<String>,
}

// ---------------------------------------------------------------------------
// CoercionReport – what the loader had to mark missing
// ---------------------------------------------------------------------------

const MAX_SAMPLES: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnCoercion {
    pub missing: usize,
    /// First few distinct raw strings that failed to parse.
    pub samples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoercionReport {
    pub columns: BTreeMap<String, ColumnCoercion>,
}

impl CoercionReport {
    pub fn record(&mut self, column: &str, raw: &str) {
        let entry = self.columns.entry(column.to_string()).or_default();
        entry.missing += 1;
        if entry.samples.len() < MAX_SAMPLES && !entry.samples.iter().any(|s| s == raw) {
            entry.samples.push(raw.to_string());
        }
    }

    #[cfg(test)]
    pub fn missing_in(&self, column: &str) -> usize {
        self.columns.get(column).map_or(0, |c| c.missing)
    }

    pub fn is_clean(&self) -> bool {
        self.columns.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PatientTable – the full, immutable dataset
// ---------------------------------------------------------------------------

/// The full dataset with the value domains the filter controls need.
///
/// Built once by the loader and then shared read-only behind an `Arc`.
#[derive(Debug, Clone)]
pub struct PatientTable {
    /// All source columns in source order.
    pub columns: Vec<String>,
    pub records: Vec<PatientRecord>,
    /// Sorted set of observed genders.
    pub genders: BTreeSet<String>,
    /// Sorted set of observed smoking statuses.
    pub smoking_statuses: BTreeSet<String>,
    /// `(min, max)` over all present ages; `(0, 0)` if there are none.
    pub age_bounds: (f64, f64),
    pub coercion: CoercionReport,
}

impl PatientTable {
    pub fn from_records(
        columns: Vec<String>,
        records: Vec<PatientRecord>,
        coercion: CoercionReport,
    ) -> Self {
        let genders = records.iter().map(|r| r.gender.clone()).collect();
        let smoking_statuses = records.iter().map(|r| r.smoking_status.clone()).collect();

        let age_bounds = records
            .iter()
            .filter_map(|r| r.age.value())
            .fold(None, |acc: Option<(f64, f64)>, age| match acc {
                None => Some((age, age)),
                Some((lo, hi)) => Some((lo.min(age), hi.max(age))),
            })
            .unwrap_or((0.0, 0.0));

        PatientTable {
            columns,
            records,
            genders,
            smoking_statuses,
            age_bounds,
            coercion,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a record with a cell per required column, in required order.
    pub(crate) fn record(
        id: &str,
        gender: &str,
        age: &str,
        glucose: &str,
        bmi: &str,
        smoking: &str,
        stroke: &str,
    ) -> PatientRecord {
        PatientRecord {
            id: id.to_string(),
            gender: gender.to_string(),
            age: Numeric::parse(age),
            avg_glucose_level: Numeric::parse(glucose),
            bmi: Numeric::parse(bmi),
            smoking_status: smoking.to_string(),
            stroke: Outcome::parse(stroke),
            cells: [id, gender, age, glucose, bmi, smoking, stroke]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub(crate) fn table(records: Vec<PatientRecord>) -> PatientTable {
        let columns = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        PatientTable::from_records(columns, records, CoercionReport::default())
    }

    #[test]
    fn numeric_parse_keeps_raw_text_when_missing() {
        assert_eq!(Numeric::parse(" 28.1 "), Numeric::Value(28.1));
        assert_eq!(
            Numeric::parse("N/A"),
            Numeric::Missing {
                raw: "N/A".to_string()
            }
        );
        assert!(Numeric::parse("").is_missing());
        assert!(Numeric::parse("NaN").is_missing());
        assert!(Numeric::parse("inf").is_missing());
        assert_eq!(Numeric::parse("N/A").to_string(), "N/A");
    }

    #[test]
    fn outcome_accepts_common_spellings() {
        assert_eq!(Outcome::parse("1"), Some(Outcome::Stroke));
        assert_eq!(Outcome::parse("0.0"), Some(Outcome::NoStroke));
        assert_eq!(Outcome::parse("yes"), None);
    }

    #[test]
    fn coercion_report_keeps_distinct_samples() {
        let mut report = CoercionReport::default();
        for raw in ["N/A", "N/A", "", "?", "x", "y", "z", "w"] {
            report.record("bmi", raw);
        }
        assert_eq!(report.missing_in("bmi"), 8);
        assert_eq!(report.columns["bmi"].samples, vec!["N/A", "", "?", "x", "y"]);
        assert_eq!(report.missing_in("age"), 0);
    }

    #[test]
    fn table_derives_domains_and_age_bounds() {
        let t = table(vec![
            record("1", "Male", "67", "228.69", "36.6", "formerly smoked", "1"),
            record("2", "Female", "0.08", "100", "N/A", "Unknown", "0"),
            record("3", "Female", "bad", "100", "20", "never smoked", "0"),
        ]);
        assert_eq!(t.len(), 3);
        assert_eq!(t.age_bounds, (0.08, 67.0));
        assert_eq!(
            t.genders.iter().cloned().collect::<Vec<_>>(),
            vec!["Female", "Male"]
        );
        assert_eq!(t.smoking_statuses.len(), 3);
    }

    #[test]
    fn empty_table_has_zero_bounds() {
        let t = table(Vec::new());
        assert!(t.is_empty());
        assert_eq!(t.age_bounds, (0.0, 0.0));
    }
}
