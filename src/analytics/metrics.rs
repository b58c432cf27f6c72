use std::fmt;

use crate::data::filter::FilteredTable;
use crate::data::model::Numeric;

/// A mean that may be undefined (empty table or every value missing).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Average {
    /// Rounded to two decimal places.
    Value(f64),
    NoData,
}

impl Average {
    pub fn value(self) -> Option<f64> {
        match self {
            Average::Value(v) => Some(v),
            Average::NoData => None,
        }
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Average::Value(v) => write!(f, "{v:.2}"),
            Average::NoData => write!(f, "no data"),
        }
    }
}

/// The three headline numbers of the overview page.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetrics {
    pub total_patients: usize,
    pub avg_glucose: Average,
    pub avg_bmi: Average,
}

impl SummaryMetrics {
    pub fn compute(view: &FilteredTable) -> Self {
        SummaryMetrics {
            total_patients: view.len(),
            avg_glucose: mean(view.iter().map(|r| &r.avg_glucose_level)),
            avg_bmi: mean(view.iter().map(|r| &r.bmi)),
        }
    }
}

/// Mean of the present values, rounded to 2 decimals. Missing values count
/// toward neither the sum nor the denominator.
pub fn mean<'a>(values: impl Iterator<Item = &'a Numeric>) -> Average {
    let (sum, n) = values
        .filter_map(Numeric::value)
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        return Average::NoData;
    }
    Average::Value(round2(sum / n as f64))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
