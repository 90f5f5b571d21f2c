/// Data layer: typed tables, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet        built-in samples
///        │                              │
///        ▼                              ▼
///   ┌──────────┐                  ┌──────────┐
///   │  loader   │  infer schema    │ samples  │
///   └──────────┘                  └──────────┘
///        │                              │
///        └──────────────┬───────────────┘
///                       ▼
///                ┌──────────────┐
///                │    Table     │  typed Schema + rows
///                └──────────────┘
///                       │
///          ┌────────────┴────────────┐
///          ▼                         ▼
///   ┌──────────┐              ┌───────────┐
///   │  filter   │ keyword,     │ aggregate │  counts per value
///   └──────────┘ range, min   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod samples;

pub use aggregate::{AggregationSpec, count_by_value};
pub use filter::{FilterSpec, filter_by_keyword, filter_by_range, filter_by_threshold};
pub use model::{ColumnNotFoundError, ColumnType, Record, Schema, SchemaError, Table, Value};
