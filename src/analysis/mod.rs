//! Aggregates feeding each chart.
//!
//! Every operation is a pure function of a borrowed [`Dataset`]. Missing cells
//! in the columns an operation touches are skipped; when nothing is left to
//! aggregate the operation returns an [`AnalysisError`] instead of a partial
//! result.

pub mod correlation;
pub mod frequency;
pub mod grouped;
pub mod summary;

use thiserror::Error;

use crate::data::{ColumnKind, Dataset};

pub use correlation::{correlation_matrix, Coefficient, CorrelationMatrix};
pub use frequency::{categorical_distribution, FrequencyTable};
pub use grouped::{grouped_mean, GroupAggregate, GroupMean};
pub use summary::{basic_stats, BasicStats};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("column '{column}' not found in dataset")]
    MissingColumn { column: String },

    #[error("column '{column}' is {kind}, expected numeric")]
    NonNumericColumn { column: String, kind: ColumnKind },

    #[error("no values left to aggregate: {what}")]
    EmptyAggregate { what: String },

    #[error("not enough data for a correlation matrix: {reason}")]
    InsufficientData { reason: String },
}

/// Position of `column`, or [`AnalysisError::MissingColumn`].
pub(crate) fn require_column(dataset: &Dataset, column: &str) -> Result<usize, AnalysisError> {
    dataset
        .position(column)
        .ok_or_else(|| AnalysisError::MissingColumn {
            column: column.to_string(),
        })
}

/// Like [`require_column`], additionally requiring a numeric column.
pub(crate) fn require_numeric(dataset: &Dataset, column: &str) -> Result<usize, AnalysisError> {
    let idx = require_column(dataset, column)?;
    match dataset.columns()[idx].kind {
        ColumnKind::Numeric => Ok(idx),
        kind => Err(AnalysisError::NonNumericColumn {
            column: column.to_string(),
            kind,
        }),
    }
}

/// Round to `places` decimals, exact ties going to the even digit.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::data::{Dataset, Value};

    /// The three-child survey used throughout the aggregate tests.
    pub fn three_children() -> Dataset {
        let names = ["Age", "Avg_Daily_Screen_Time", "Primary_Device", "Gender"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = vec![
            vec![
                Value::Integer(10),
                Value::Float(2.0),
                Value::Text("Phone".into()),
                Value::Text("M".into()),
            ],
            vec![
                Value::Integer(10),
                Value::Float(4.0),
                Value::Text("Tablet".into()),
                Value::Text("F".into()),
            ],
            vec![
                Value::Integer(12),
                Value::Float(3.0),
                Value::Text("Phone".into()),
                Value::Text("M".into()),
            ],
        ];
        Dataset::from_rows(names, rows).unwrap()
    }

    pub fn dataset(names: &[&str], rows: Vec<Vec<Value>>) -> Dataset {
        Dataset::from_rows(names.iter().map(|s| s.to_string()).collect(), rows).unwrap()
    }
}
