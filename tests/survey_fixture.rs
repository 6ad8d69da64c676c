use std::path::{Path, PathBuf};

use screentime_viewer::analysis::{
    basic_stats, categorical_distribution, correlation_matrix, grouped_mean, AnalysisError,
};
use screentime_viewer::data::{load_file, ColumnKind, Dataset, Value};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/screentime_small.csv")
}

fn survey() -> Dataset {
    load_file(&fixture()).unwrap()
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

#[test]
fn test_fixture_schema() {
    let ds = survey();
    assert_eq!(ds.len(), 10);

    let kinds: Vec<(&str, ColumnKind)> = ds
        .columns()
        .iter()
        .map(|c| (c.name.as_str(), c.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("Age", ColumnKind::Numeric),
            ("Gender", ColumnKind::Text),
            ("Avg_Daily_Screen_Time", ColumnKind::Numeric),
            ("Primary_Device", ColumnKind::Text),
            ("Exceeded_Recommended_Limit", ColumnKind::Boolean),
            ("Educational_to_Recreational_Ratio", ColumnKind::Numeric),
            ("Urban_or_Rural", ColumnKind::Text),
        ]
    );
}

#[test]
fn test_basic_stats_skip_missing_screen_time() {
    let stats = basic_stats(&survey(), "Age", "Avg_Daily_Screen_Time").unwrap();
    assert_eq!(stats.count, 10);
    assert_eq!(stats.mean_age, 11.0);
    assert_eq!(stats.mean_screen_time, 3.42);
}

#[test]
fn test_device_distribution() {
    let table = categorical_distribution(&survey(), "Primary_Device").unwrap();
    assert_eq!(
        table.entries(),
        &[
            (text("TV"), 2),
            (text("Smartphone"), 5),
            (text("Tablet"), 1),
            (text("Laptop"), 2),
        ]
    );
    assert_eq!(
        table.sorted_by_count(),
        vec![
            (text("Smartphone"), 5),
            (text("TV"), 2),
            (text("Laptop"), 2),
            (text("Tablet"), 1),
        ]
    );
    assert_eq!(table.total(), 10);
}

#[test]
fn test_gender_distribution() {
    let table = categorical_distribution(&survey(), "Gender").unwrap();
    assert_eq!(table.get(&text("Male")), Some(5));
    assert_eq!(table.get(&text("Female")), Some(5));
}

#[test]
fn test_screen_time_by_age() {
    let agg = grouped_mean(&survey(), "Age", "Avg_Daily_Screen_Time").unwrap();
    assert_eq!(
        agg.points(),
        vec![
            [8.0, 1.5],
            [9.0, 2.25],
            [10.0, 3.0],
            [11.0, 3.0],
            [12.0, 4.25],
            [13.0, 4.5],
            [14.0, 4.75],
        ]
    );
    // The age-9 group lost one row to a missing screen time.
    assert_eq!(agg.groups[1].count, 1);
}

#[test]
fn test_correlation_over_numeric_columns() {
    let m = correlation_matrix(&survey()).unwrap();
    assert_eq!(
        m.columns(),
        &["Age", "Avg_Daily_Screen_Time", "Educational_to_Recreational_Ratio"]
    );

    let close = |a: &str, b: &str, expected: f64| {
        let v = m.between(a, b).and_then(|c| c.value()).unwrap();
        assert!((v - expected).abs() < 1e-9, "{a}/{b}: {v} != {expected}");
    };
    close("Age", "Avg_Daily_Screen_Time", 0.932_483_158_751_849_6);
    close("Age", "Educational_to_Recreational_Ratio", -0.968_245_836_551_854_1);
    close(
        "Avg_Daily_Screen_Time",
        "Educational_to_Recreational_Ratio",
        -0.953_028_279_788_871_5,
    );
    for i in 0..m.size() {
        assert_eq!(m.get(i, i).value(), Some(1.0));
        for j in 0..m.size() {
            assert_eq!(m.get(i, j), m.get(j, i));
        }
    }
}

#[test]
fn test_unknown_column_is_reported() {
    let err = basic_stats(&survey(), "Age", "Avg_Daily_Screen_Time_hr").unwrap_err();
    assert_eq!(
        err,
        AnalysisError::MissingColumn {
            column: "Avg_Daily_Screen_Time_hr".into()
        }
    );
    assert_eq!(
        err.to_string(),
        "column 'Avg_Daily_Screen_Time_hr' not found in dataset"
    );
}
