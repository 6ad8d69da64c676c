use super::{require_numeric, round_to, AnalysisError};
use crate::data::Dataset;

/// Headline numbers of the survey, rounded for display.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicStats {
    /// Every row, including rows with a missing age or screen time.
    pub count: usize,
    pub mean_age: f64,
    pub mean_screen_time: f64,
}

impl BasicStats {
    /// Multi-line text shown in the statistics view.
    pub fn summary(&self) -> String {
        format!(
            "Total Records: {}\nAverage Age: {:.2}\nAverage Daily Screen Time: {:.2} hrs",
            self.count, self.mean_age, self.mean_screen_time
        )
    }
}

/// Record count plus the means of the age and screen-time columns.
pub fn basic_stats(
    dataset: &Dataset,
    age_column: &str,
    screen_time_column: &str,
) -> Result<BasicStats, AnalysisError> {
    let age_idx = require_numeric(dataset, age_column)?;
    let screen_idx = require_numeric(dataset, screen_time_column)?;

    Ok(BasicStats {
        count: dataset.len(),
        mean_age: round_to(column_mean(dataset, age_idx, age_column)?, 2),
        mean_screen_time: round_to(column_mean(dataset, screen_idx, screen_time_column)?, 2),
    })
}

fn column_mean(dataset: &Dataset, idx: usize, column: &str) -> Result<f64, AnalysisError> {
    let (sum, n) = dataset
        .cells(idx)
        .filter_map(|v| v.as_f64())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));

    log::debug!(
        "mean of '{column}' over {n} values ({} missing)",
        dataset.len() - n
    );

    if n == 0 {
        return Err(AnalysisError::EmptyAggregate {
            what: format!("column '{column}' has only missing values"),
        });
    }
    Ok(sum / n as f64)
}
