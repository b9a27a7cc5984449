/// Data layer: raw reading, normalization, and queries.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  reader   │  parse file → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  validate, explode, normalize → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  period / country predicates, selector options
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  type counts, per-type sample, country aggregate
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod query;
pub mod reader;
