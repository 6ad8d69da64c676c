use std::path::{Path, PathBuf};

use screentime_viewer::analysis::{
    basic_stats, categorical_distribution, correlation_matrix, grouped_mean, AnalysisError,
    BasicStats, CorrelationMatrix, FrequencyTable, GroupAggregate,
};
use screentime_viewer::config::ViewerConfig;
use screentime_viewer::data::{load_file, Dataset};

// ---------------------------------------------------------------------------
// User actions and their results
// ---------------------------------------------------------------------------

/// The analysis buttons of the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ShowStats,
    DeviceChart,
    GenderChart,
    ScreenTimeByAge,
    Correlation,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::ShowStats,
        Action::DeviceChart,
        Action::GenderChart,
        Action::ScreenTimeByAge,
        Action::Correlation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::ShowStats => "Show Basic Stats",
            Action::DeviceChart => "Device Usage Chart",
            Action::GenderChart => "Gender Distribution Chart",
            Action::ScreenTimeByAge => "Screen Time by Age",
            Action::Correlation => "Correlation Analysis",
        }
    }

    /// Title of the error notice when the action fails.
    fn failure_title(self) -> &'static str {
        match self {
            Action::ShowStats => "Cannot calculate stats",
            Action::DeviceChart => "Cannot plot device distribution",
            Action::GenderChart => "Cannot plot gender distribution",
            Action::ScreenTimeByAge => "Cannot plot screen time by age",
            Action::Correlation => "Cannot generate correlation heatmap",
        }
    }
}

/// What the central panel currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Stats(BasicStats),
    DeviceShare(FrequencyTable),
    GenderCounts(FrequencyTable),
    ScreenTimeByAge(GroupAggregate),
    Correlation(CorrelationMatrix),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A message shown to the user in a dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, title: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    pub config: ViewerConfig,

    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    /// File the dataset was read from.
    pub source: Option<PathBuf>,

    /// Result of the last successful action.
    pub view: Option<View>,

    /// Pending dialog.
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Ingest a newly loaded dataset; any previous view no longer applies.
    pub fn set_dataset(&mut self, dataset: Dataset, source: Option<PathBuf>) {
        log::info!(
            "Loaded {} records with columns {:?}",
            dataset.len(),
            dataset.column_names()
        );
        self.notice = Some(Notice::new(
            NoticeKind::Info,
            "Success",
            format!("Dataset loaded!\n{} records.", dataset.len()),
        ));
        self.dataset = Some(dataset);
        self.source = source;
        self.view = None;
    }

    /// Load a file, keeping the current dataset if loading fails.
    pub fn load_from(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => self.set_dataset(dataset, Some(path.to_path_buf())),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.notice = Some(Notice::new(
                    NoticeKind::Error,
                    "Error",
                    format!("Could not load dataset:\n{e}"),
                ));
            }
        }
    }

    /// Run an analysis action against the loaded dataset.
    pub fn run(&mut self, action: Action) {
        let Some(dataset) = &self.dataset else {
            log::warn!("'{}' requested before a dataset was loaded", action.label());
            self.notice = Some(Notice::new(
                NoticeKind::Warning,
                "Warning",
                "Load a CSV file first!",
            ));
            return;
        };

        match compute(action, dataset, &self.config) {
            Ok(view) => {
                log::info!("'{}' ready", action.label());
                self.view = Some(view);
            }
            Err(e) => {
                log::error!("'{}' failed: {e}", action.label());
                self.notice = Some(Notice::new(
                    NoticeKind::Error,
                    "Error",
                    format!("{}:\n{e}", action.failure_title()),
                ));
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

fn compute(action: Action, dataset: &Dataset, config: &ViewerConfig) -> Result<View, AnalysisError> {
    let columns = &config.columns;
    Ok(match action {
        Action::ShowStats => View::Stats(basic_stats(dataset, &columns.age, &columns.screen_time)?),
        Action::DeviceChart => {
            View::DeviceShare(categorical_distribution(dataset, &columns.device)?)
        }
        Action::GenderChart => {
            View::GenderCounts(categorical_distribution(dataset, &columns.gender)?)
        }
        Action::ScreenTimeByAge => {
            View::ScreenTimeByAge(grouped_mean(dataset, &columns.age, &columns.screen_time)?)
        }
        Action::Correlation => View::Correlation(correlation_matrix(dataset)?),
    })
}
