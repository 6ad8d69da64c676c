use super::{require_numeric, AnalysisError};
use crate::data::Dataset;

/// Mean of the value column within one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupMean {
    pub key: f64,
    pub mean: f64,
    /// Rows that contributed a value to `mean`.
    pub count: usize,
}

/// Per-group means, ascending by key with each key at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAggregate {
    pub group_column: String,
    pub value_column: String,
    pub groups: Vec<GroupMean>,
}

impl GroupAggregate {
    /// `(key, mean)` pairs ready to plot as a line.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.groups.iter().map(|g| [g.key, g.mean]).collect()
    }
}

/// Mean of `value_column` for each distinct value of `group_column`.
///
/// Rows with a missing group key are dropped; missing values are left out of
/// their group's mean, and a group left with no values is omitted.
pub fn grouped_mean(
    dataset: &Dataset,
    group_column: &str,
    value_column: &str,
) -> Result<GroupAggregate, AnalysisError> {
    let group_idx = require_numeric(dataset, group_column)?;
    let value_idx = require_numeric(dataset, value_column)?;

    let mut pairs: Vec<(f64, f64)> = dataset
        .cells(group_idx)
        .zip(dataset.cells(value_idx))
        .filter_map(|(key, value)| Some((key.as_f64()?, value.as_f64()?)))
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    // (key, sum, count) per run of equal keys
    let mut runs: Vec<(f64, f64, usize)> = Vec::new();
    for (key, value) in pairs {
        match runs.last_mut() {
            Some((last_key, sum, count)) if *last_key == key => {
                *sum += value;
                *count += 1;
            }
            _ => runs.push((key, value, 1)),
        }
    }

    let groups: Vec<GroupMean> = runs
        .into_iter()
        .map(|(key, sum, count)| GroupMean {
            key,
            mean: sum / count as f64,
            count,
        })
        .collect();

    if groups.is_empty() {
        return Err(AnalysisError::EmptyAggregate {
            what: format!("no '{group_column}' group has a '{value_column}' value"),
        });
    }

    log::debug!(
        "mean of '{value_column}' over {} groups of '{group_column}'",
        groups.len()
    );

    Ok(GroupAggregate {
        group_column: group_column.to_string(),
        value_column: value_column.to_string(),
        groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{dataset, three_children};
    use crate::data::Value;

    #[test]
    fn test_screen_time_by_age() {
        let agg = grouped_mean(&three_children(), "Age", "Avg_Daily_Screen_Time").unwrap();
        assert_eq!(agg.points(), vec![[10.0, 3.0], [12.0, 3.0]]);
        assert_eq!(agg.groups[0].count, 2);
    }

    #[test]
    fn test_sorted_unique_and_bounded() {
        let ds = dataset(
            &["Age", "Avg_Daily_Screen_Time"],
            vec![
                vec![Value::Integer(14), Value::Float(6.0)],
                vec![Value::Integer(9), Value::Float(1.0)],
                vec![Value::Integer(14), Value::Float(2.0)],
                vec![Value::Null, Value::Float(9.0)],
                vec![Value::Integer(9), Value::Null],
                vec![Value::Integer(11), Value::Float(4.5)],
                vec![Value::Integer(9), Value::Float(2.0)],
            ],
        );
        let agg = grouped_mean(&ds, "Age", "Avg_Daily_Screen_Time").unwrap();

        let keys: Vec<f64> = agg.groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec![9.0, 11.0, 14.0]);

        assert_eq!(agg.groups[0].mean, 1.5);
        assert_eq!(agg.groups[0].count, 2);
        assert_eq!(agg.groups[2].mean, 4.0);
        for g in &agg.groups {
            assert!(g.mean >= 1.0 && g.mean <= 6.0);
        }
    }

    #[test]
    fn test_group_without_values_is_omitted() {
        let ds = dataset(
            &["Age", "Avg_Daily_Screen_Time"],
            vec![
                vec![Value::Integer(8), Value::Null],
                vec![Value::Integer(10), Value::Float(3.0)],
            ],
        );
        let agg = grouped_mean(&ds, "Age", "Avg_Daily_Screen_Time").unwrap();
        assert_eq!(agg.points(), vec![[10.0, 3.0]]);
    }

    #[test]
    fn test_no_groups_left() {
        let ds = dataset(
            &["Age", "Avg_Daily_Screen_Time"],
            vec![vec![Value::Integer(8), Value::Null], vec![Value::Null, Value::Float(2.0)]],
        );
        let err = grouped_mean(&ds, "Age", "Avg_Daily_Screen_Time").unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyAggregate { .. }));
    }

    #[test]
    fn test_text_group_column_rejected() {
        let err = grouped_mean(&three_children(), "Gender", "Avg_Daily_Screen_Time").unwrap_err();
        assert!(matches!(err, AnalysisError::NonNumericColumn { .. }));
    }
}
