//! Derivations over a [`FilteredTable`](crate::data::filter::FilteredTable):
//! headline metrics and the chart specifications the UI draws.

pub mod charts;
pub mod metrics;
