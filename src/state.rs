use std::path::Path;
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::loader::load_file;
use crate::data::model::CompensationDataset;
use crate::data::session::Session;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Analyses,
    Geography,
    Data,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Analyses, Tab::Geography, Tab::Data];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Analyses => "Analyses",
            Tab::Geography => "Geography",
            Tab::Data => "Data",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Exploration session (None until a dataset is loaded).
    pub session: Option<Session>,

    /// Selected central tab.
    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            session: None,
            tab: Tab::default(),
            status_message: None,
        }
    }

    /// Start a fresh session over a newly loaded dataset.
    pub fn set_dataset(&mut self, dataset: CompensationDataset) {
        self.session = Some(Session::new(
            Arc::new(dataset),
            self.config.aggregate_settings(),
        ));
        self.status_message = None;
    }

    /// Load a file and start a session; a failure keeps the previous session.
    pub fn open(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn failed_load_reports_and_keeps_no_session() {
        let mut state = AppState::new(DashboardConfig::default());
        state.open(Path::new("does-not-exist.csv"));
        assert!(state.session.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
    }

    #[test]
    fn successful_load_starts_a_session() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(
            file,
            "year,seniority,contract_type,company_size,role,residence_iso3,compensation_usd"
        )
        .unwrap();
        writeln!(file, "2024,SE,FT,L,Data Scientist,CAN,140000").unwrap();
        file.flush().unwrap();

        let mut state = AppState::new(DashboardConfig::default());
        state.status_message = Some("stale".to_string());
        state.open(file.path());

        let session = state.session.as_mut().unwrap();
        assert_eq!(session.current_snapshot().filtered_count, 1);
        assert!(state.status_message.is_none());
    }
}
