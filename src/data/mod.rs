/// Data layer: core types, loading, filtering and reshaping.
///
/// Architecture:
/// ```text
///  .csv / .json (wide: one column per year)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → WideTable (projected to required columns)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  series code + country allowlist → retained rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  melt year columns → Vec<Observation>
///   └──────────┘
/// ```

pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;
