//! Data layer: core types and loading.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → rows of Value
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset   │  typed columns, immutable rows
//!   └──────────┘
//!        │
//!        ▼
//!   crate::analysis (aggregates for each chart)
//! ```

pub mod error;
pub mod loader;
pub mod model;

pub use error::LoadError;
pub use loader::load_file;
pub use model::{Column, ColumnKind, Dataset, Value};
