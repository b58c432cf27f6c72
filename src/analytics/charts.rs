use std::collections::BTreeMap;

use crate::data::filter::FilteredTable;
use crate::data::model::{Numeric, Outcome, PatientRecord};

// ---------------------------------------------------------------------------
// Chart specifications
//
// Every builder is a pure function of the filtered table: same rows in,
// same bins / points / groups out. Rows without a readable stroke label are
// left out of all of them.
// ---------------------------------------------------------------------------

/// One age bucket `[start, end)` with a count per outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    counts: [usize; 2],
}

impl HistogramBin {
    pub fn count(&self, outcome: Outcome) -> usize {
        self.counts[outcome.code() as usize]
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Most bins a histogram is densified to. Wider age spans (outlier ages,
/// tiny bin widths) keep only the occupied bins.
pub const MAX_DENSE_BINS: u64 = 512;

/// Age distribution split by outcome, drawn as two stacked series.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeHistogram {
    pub bin_width: f64,
    /// Ascending bins. Contiguous from the youngest to the oldest plotted
    /// age unless that span exceeds [`MAX_DENSE_BINS`].
    pub bins: Vec<HistogramBin>,
}

impl AgeHistogram {
    pub fn build(view: &FilteredTable, bin_width: f64) -> Self {
        let mut buckets: BTreeMap<i64, [usize; 2]> = BTreeMap::new();
        for rec in view.iter() {
            let (Some(age), Some(outcome)) = (rec.age.value(), rec.stroke) else {
                continue;
            };
            // `as` saturates, so huge ages land in the extreme buckets.
            let key = (age / bin_width).floor() as i64;
            buckets.entry(key).or_default()[outcome.code() as usize] += 1;
        }

        let bin = |key: i64, counts: [usize; 2]| {
            let start = key as f64 * bin_width;
            HistogramBin {
                start,
                end: start + bin_width,
                counts,
            }
        };

        let span = buckets.keys().next().zip(buckets.keys().next_back());
        let bins = match span {
            Some((&first, &last)) if last.abs_diff(first) < MAX_DENSE_BINS => (first..=last)
                .map(|key| bin(key, buckets.get(&key).copied().unwrap_or_default()))
                .collect(),
            _ => buckets.iter().map(|(&key, &counts)| bin(key, counts)).collect(),
        };

        AgeHistogram { bin_width, bins }
    }

    pub fn total(&self, outcome: Outcome) -> usize {
        self.bins.iter().map(|b| b.count(outcome)).sum()
    }
}

/// Points of one outcome in a scatter chart, in source row order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub outcome: Outcome,
    pub points: Vec<[f64; 2]>,
}

/// `x = age` against one numeric field, one series per outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: &'static str,
    pub y_label: &'static str,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    /// Rows missing either coordinate are omitted from this chart only.
    pub fn build(
        view: &FilteredTable,
        title: &'static str,
        y_label: &'static str,
        y: fn(&PatientRecord) -> &Numeric,
    ) -> Self {
        let series = Outcome::ALL
            .iter()
            .map(|&outcome| ScatterSeries {
                outcome,
                points: view
                    .iter()
                    .filter(|rec| rec.stroke == Some(outcome))
                    .filter_map(|rec| Some([rec.age.value()?, y(rec).value()?]))
                    .collect(),
            })
            .collect();

        ScatterChart {
            title,
            y_label,
            series,
        }
    }

    pub fn glucose(view: &FilteredTable) -> Self {
        Self::build(
            view,
            "Age vs average glucose level",
            "Avg glucose level",
            |r| &r.avg_glucose_level,
        )
    }

    pub fn bmi(view: &FilteredTable) -> Self {
        Self::build(view, "Age vs BMI", "BMI", |r| &r.bmi)
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Row count of one `(gender, stroke)` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub gender: String,
    pub outcome: Outcome,
    pub count: usize,
}

/// Group-by `(gender, stroke)` with counts. Groups without rows are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenderOutcomeCounts {
    /// Sorted by gender, then outcome.
    pub groups: Vec<GroupCount>,
}

impl GenderOutcomeCounts {
    pub fn build(view: &FilteredTable) -> Self {
        let mut counts: BTreeMap<(&str, Outcome), usize> = BTreeMap::new();
        for rec in view.iter() {
            if let Some(outcome) = rec.stroke {
                *counts.entry((rec.gender.as_str(), outcome)).or_default() += 1;
            }
        }

        let groups = counts
            .into_iter()
            .map(|((gender, outcome), count)| GroupCount {
                gender: gender.to_string(),
                outcome,
                count,
            })
            .collect();
        GenderOutcomeCounts { groups }
    }

    /// Distinct genders present, in group order.
    pub fn genders(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for g in &self.groups {
            if out.last() != Some(&g.gender.as_str()) {
                out.push(&g.gender);
            }
        }
        out
    }

    pub fn count(&self, gender: &str, outcome: Outcome) -> Option<usize> {
        self.groups
            .iter()
            .find(|g| g.gender == gender && g.outcome == outcome)
            .map(|g| g.count)
    }
}

/// All four charts derived from one filtered table.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub age_histogram: AgeHistogram,
    pub glucose_scatter: ScatterChart,
    pub bmi_scatter: ScatterChart,
    pub gender_outcome: GenderOutcomeCounts,
}

impl ChartSet {
    pub fn build(view: &FilteredTable, bin_width: f64) -> Self {
        ChartSet {
            age_histogram: AgeHistogram::build(view, bin_width),
            glucose_scatter: ScatterChart::glucose(view),
            bmi_scatter: ScatterChart::bmi(view),
            gender_outcome: GenderOutcomeCounts::build(view),
        }
    }
}
