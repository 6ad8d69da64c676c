use std::fmt;

use super::AnalysisError;
use crate::data::{ColumnKind, Dataset};

/// One cell of a [`CorrelationMatrix`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coefficient {
    /// Pearson coefficient in [-1, 1].
    Value(f64),
    /// Fewer than two complete rows, or zero variance on either side.
    Undefined,
}

impl Coefficient {
    pub fn value(self) -> Option<f64> {
        match self {
            Coefficient::Value(v) => Some(v),
            Coefficient::Undefined => None,
        }
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coefficient::Value(v) => write!(f, "{v:.2}"),
            Coefficient::Undefined => write!(f, "n/a"),
        }
    }
}

/// Square, symmetric matrix of Pearson coefficients over numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    /// Row-major, `columns.len()²` cells.
    cells: Vec<Coefficient>,
}

impl CorrelationMatrix {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Coefficient {
        self.cells[row * self.columns.len() + col]
    }

    /// Look up a pair by column names.
    pub fn between(&self, a: &str, b: &str) -> Option<Coefficient> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.get(i, j))
    }
}

/// Pearson correlation between every pair of numeric columns.
///
/// Missing data is handled pairwise: each pair uses the rows where both of
/// its columns are present. Boolean and text columns are left out.
pub fn correlation_matrix(dataset: &Dataset) -> Result<CorrelationMatrix, AnalysisError> {
    let numeric: Vec<(usize, &str)> = dataset
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.kind == ColumnKind::Numeric)
        .map(|(i, c)| (i, c.name.as_str()))
        .collect();

    log::debug!(
        "correlating numeric columns {:?}",
        numeric.iter().map(|(_, name)| *name).collect::<Vec<_>>()
    );

    if numeric.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            reason: format!("found {} numeric column(s), need 2", numeric.len()),
        });
    }

    let data: Vec<Vec<Option<f64>>> = numeric
        .iter()
        .map(|(idx, _)| dataset.cells(*idx).map(|v| v.as_f64()).collect())
        .collect();

    let n = numeric.len();
    let mut cells = vec![Coefficient::Undefined; n * n];
    let mut best_pair_rows = 0;

    for i in 0..n {
        for j in i..n {
            let (coefficient, rows) = pearson(&data[i], &data[j]);
            let coefficient = match coefficient {
                Coefficient::Value(_) if i == j => Coefficient::Value(1.0),
                other => other,
            };
            if i != j {
                best_pair_rows = best_pair_rows.max(rows);
            }
            cells[i * n + j] = coefficient;
            cells[j * n + i] = coefficient;
        }
    }

    if best_pair_rows < 2 {
        return Err(AnalysisError::InsufficientData {
            reason: "no pair of numeric columns has 2 complete rows".to_string(),
        });
    }

    Ok(CorrelationMatrix {
        columns: numeric.iter().map(|(_, name)| name.to_string()).collect(),
        cells,
    })
}

/// Pearson coefficient over the rows where both sides are present, plus the
/// number of such rows.
fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> (Coefficient, usize) {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    let rows = pairs.len();
    if rows < 2 {
        return (Coefficient::Undefined, rows);
    }

    let n = rows as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let denominator = (sum_sq_x * sum_sq_y).sqrt();
    if denominator == 0.0 {
        (Coefficient::Undefined, rows)
    } else {
        (
            Coefficient::Value((numerator / denominator).clamp(-1.0, 1.0)),
            rows,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{dataset, three_children};
    use crate::data::Value;

    fn assert_close(c: Coefficient, expected: f64) {
        match c {
            Coefficient::Value(v) => assert!((v - expected).abs() < 1e-9, "{v} != {expected}"),
            Coefficient::Undefined => panic!("expected {expected}, got undefined"),
        }
    }

    #[test]
    fn test_only_numeric_columns() {
        let m = correlation_matrix(&three_children()).unwrap();
        assert_eq!(m.columns(), &["Age", "Avg_Daily_Screen_Time"]);
        assert_eq!(m.get(0, 0), Coefficient::Value(1.0));
        assert_eq!(m.get(1, 1), Coefficient::Value(1.0));
        // Ages 10,10,12 vs screen time 2,4,3 are uncorrelated.
        assert_close(m.get(0, 1), 0.0);
    }

    #[test]
    fn test_symmetric_with_known_values() {
        let ds = dataset(
            &["a", "b", "c"],
            vec![
                vec![Value::Float(1.0), Value::Float(2.0), Value::Float(5.0)],
                vec![Value::Float(2.0), Value::Float(4.0), Value::Float(3.0)],
                vec![Value::Float(3.0), Value::Float(6.0), Value::Float(4.0)],
                vec![Value::Float(4.0), Value::Float(8.0), Value::Float(1.0)],
            ],
        );
        let m = correlation_matrix(&ds).unwrap();

        assert_close(m.get(0, 1), 1.0);
        for i in 0..m.size() {
            for j in 0..m.size() {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
        let ac = m.between("a", "c").and_then(Coefficient::value).unwrap();
        assert!(ac < -0.7 && ac >= -1.0);
    }

    #[test]
    fn test_zero_variance_is_undefined() {
        let ds = dataset(
            &["Age", "Sleep_Hours"],
            vec![
                vec![Value::Integer(9), Value::Float(8.0)],
                vec![Value::Integer(11), Value::Float(8.0)],
                vec![Value::Integer(13), Value::Float(8.0)],
            ],
        );
        let m = correlation_matrix(&ds).unwrap();
        assert_eq!(m.get(0, 0), Coefficient::Value(1.0));
        assert_eq!(m.get(1, 1), Coefficient::Undefined);
        assert_eq!(m.get(0, 1), Coefficient::Undefined);
    }

    #[test]
    fn test_pairwise_complete_rows() {
        let ds = dataset(
            &["x", "y", "z"],
            vec![
                vec![Value::Float(1.0), Value::Float(1.0), Value::Null],
                vec![Value::Float(2.0), Value::Float(2.0), Value::Float(5.0)],
                vec![Value::Float(3.0), Value::Float(3.0), Value::Null],
                vec![Value::Float(4.0), Value::Null, Value::Null],
            ],
        );
        let m = correlation_matrix(&ds).unwrap();
        assert_close(m.get(0, 1), 1.0);
        // z is present in a single row, so it cannot correlate with anything.
        assert_eq!(m.get(0, 2), Coefficient::Undefined);
        assert_eq!(m.get(2, 2), Coefficient::Undefined);
    }

    #[test]
    fn test_single_numeric_column() {
        let ds = dataset(
            &["Age", "Gender"],
            vec![
                vec![Value::Integer(9), Value::Text("F".into())],
                vec![Value::Integer(10), Value::Text("M".into())],
            ],
        );
        let err = correlation_matrix(&ds).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { .. }));
    }

    #[test]
    fn test_boolean_columns_excluded() {
        let ds = dataset(
            &["Age", "Exceeded_Recommended_Limit"],
            vec![
                vec![Value::Integer(9), Value::Bool(true)],
                vec![Value::Integer(10), Value::Bool(false)],
            ],
        );
        let err = correlation_matrix(&ds).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { .. }));
    }

    #[test]
    fn test_too_few_complete_rows() {
        let ds = dataset(
            &["x", "y"],
            vec![
                vec![Value::Float(1.0), Value::Null],
                vec![Value::Null, Value::Float(2.0)],
                vec![Value::Float(3.0), Value::Float(4.0)],
            ],
        );
        let err = correlation_matrix(&ds).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { .. }));
    }
}
