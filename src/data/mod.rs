/// Data layer: survey table types, loading, caching, and cascading filters.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  store    │  load once, cache for the process
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  state → district → category → indicator
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   kpi     │  first matching row → KpiResult
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod kpi;
pub mod loader;
pub mod model;
pub mod store;
