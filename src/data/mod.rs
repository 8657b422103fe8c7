/// Data layer: CSV loading, field inference, aggregation, and the static
/// category catalog.
///
/// Architecture:
/// ```text
///   dataset.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRecord>  (Records / Empty / Failed)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  fields   │  year / category / value per record
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  pivot    │  totals → top-2 categories → one WideRow per year
///   └──────────┘
/// ```

pub mod catalog;
pub mod error;
pub mod fields;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pivot;
