use std::collections::HashMap;

use super::{require_column, round_to, AnalysisError};
use crate::data::{Dataset, Value};

/// Occurrence count per distinct value of one column.
///
/// Entries keep the order in which each category first appears in the
/// dataset; [`sorted_by_count`](Self::sorted_by_count) and
/// [`sorted_by_label`](Self::sorted_by_label) give the presentation orders.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    pub column: String,
    entries: Vec<(Value, usize)>,
}

impl FrequencyTable {
    /// Categories in first-appearance order.
    pub fn entries(&self) -> &[(Value, usize)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, value: &Value) -> Option<usize> {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, count)| *count)
    }

    /// Sum of all counts, i.e. the number of non-missing cells.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Most frequent first; ties keep first-appearance order.
    pub fn sorted_by_count(&self) -> Vec<(Value, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    /// Ascending by category.
    pub fn sorted_by_label(&self) -> Vec<(Value, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        sorted
    }

    /// Percentage share of each category (one decimal), most frequent first.
    pub fn shares(&self) -> Vec<(Value, f64)> {
        let total = self.total() as f64;
        self.sorted_by_count()
            .into_iter()
            .map(|(value, count)| (value, round_to(count as f64 * 100.0 / total, 1)))
            .collect()
    }
}

/// Count each distinct non-missing value of `column`.
pub fn categorical_distribution(
    dataset: &Dataset,
    column: &str,
) -> Result<FrequencyTable, AnalysisError> {
    let idx = require_column(dataset, column)?;

    let mut positions: HashMap<&Value, usize> = HashMap::new();
    let mut entries: Vec<(Value, usize)> = Vec::new();

    for value in dataset.cells(idx).filter(|v| !v.is_missing()) {
        match positions.get(value) {
            Some(&pos) => entries[pos].1 += 1,
            None => {
                positions.insert(value, entries.len());
                entries.push((value.clone(), 1));
            }
        }
    }

    if entries.is_empty() {
        return Err(AnalysisError::EmptyAggregate {
            what: format!("column '{column}' has only missing values"),
        });
    }

    log::debug!("'{column}' has {} distinct values", entries.len());

    Ok(FrequencyTable {
        column: column.to_string(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{dataset, three_children};

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_device_counts() {
        let table = categorical_distribution(&three_children(), "Primary_Device").unwrap();
        assert_eq!(table.entries(), &[(text("Phone"), 2), (text("Tablet"), 1)]);
        assert_eq!(table.get(&text("Laptop")), None);
    }

    #[test]
    fn test_counts_sum_to_non_missing_cells() {
        let ds = dataset(
            &["Gender"],
            vec![
                vec![text("Female")],
                vec![Value::Null],
                vec![text("Male")],
                vec![text("Female")],
                vec![Value::Null],
            ],
        );
        let table = categorical_distribution(&ds, "Gender").unwrap();
        assert_eq!(table.total(), 3);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_presentation_orders() {
        let ds = dataset(
            &["Primary_Device"],
            vec![
                vec![text("TV")],
                vec![text("Phone")],
                vec![text("Laptop")],
                vec![text("Phone")],
                vec![text("Laptop")],
                vec![text("Phone")],
            ],
        );
        let table = categorical_distribution(&ds, "Primary_Device").unwrap();

        assert_eq!(
            table.sorted_by_count(),
            vec![(text("Phone"), 3), (text("Laptop"), 2), (text("TV"), 1)]
        );
        assert_eq!(
            table.sorted_by_label(),
            vec![(text("Laptop"), 2), (text("Phone"), 3), (text("TV"), 1)]
        );
        assert_eq!(
            table.shares(),
            vec![(text("Phone"), 50.0), (text("Laptop"), 33.3), (text("TV"), 16.7)]
        );
    }

    #[test]
    fn test_numeric_column_is_countable() {
        let table = categorical_distribution(&three_children(), "Age").unwrap();
        assert_eq!(table.get(&Value::Integer(10)), Some(2));
    }

    #[test]
    fn test_signed_zeros_share_a_category() {
        let ds = dataset(
            &["Ratio"],
            vec![
                vec![Value::Float(0.0)],
                vec![Value::Float(-0.0)],
                vec![Value::Float(0.0)],
            ],
        );
        let table = categorical_distribution(&ds, "Ratio").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&Value::Float(0.0)), Some(3));
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_missing_column() {
        let err = categorical_distribution(&three_children(), "Region").unwrap_err();
        assert!(matches!(err, AnalysisError::MissingColumn { column } if column == "Region"));
    }

    #[test]
    fn test_all_missing_column() {
        let ds = dataset(&["Gender"], vec![vec![Value::Null], vec![Value::Null]]);
        let err = categorical_distribution(&ds, "Gender").unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyAggregate { .. }));
    }
}
