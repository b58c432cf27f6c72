/// Data layer: core types, loading, filtering and table paging.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, coerce numerics → PatientTable
///   └──────────┘
///        │  Arc<PatientTable> (read-only, shared)
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterState predicates → FilteredTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  grid     │  search + 10-row pages for the data table
///   └──────────┘
/// ```

pub mod filter;
pub mod grid;
pub mod loader;
pub mod model;
