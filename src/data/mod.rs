/// Data layer: the in-memory table and the file loaders.
///
/// Architecture:
/// ```text
///  .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table, infer column types
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<Column> in file order, per-column statistics
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
