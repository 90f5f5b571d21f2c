use std::path::Path;

use research_dashboard::data::loader::{ColumnTypes, load_file};
use research_dashboard::data::samples::{SampleDataset, SampleTables};
use research_dashboard::data::{SchemaError, Table};
use research_dashboard::profile::Profile;
use research_dashboard::view::{ControlValue, DashboardInputs, DashboardView, TableSources, render};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Message shown in the top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Success(String),
    Error(String),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub profile: Profile,

    /// Types enforced on every loaded projects file.
    pub column_types: ColumnTypes,

    pub samples: SampleTables,

    /// Uploaded projects/publications (None until the user opens a file).
    pub projects: Option<Table>,

    /// File name of the loaded projects table.
    pub projects_name: Option<String>,

    /// Keyword, selected dataset and slider positions.
    pub inputs: DashboardInputs,

    /// Output of the last successful render (cached).
    pub view: Option<DashboardView>,

    pub status: Option<Status>,
}

impl AppState {
    pub fn new(profile: Profile, column_types: ColumnTypes) -> Result<Self, SchemaError> {
        let mut state = Self {
            profile,
            column_types,
            samples: SampleTables::load()?,
            projects: None,
            projects_name: None,
            inputs: DashboardInputs::default(),
            view: None,
            status: None,
        };
        state.refresh();
        Ok(state)
    }

    /// Recompute the cached view after any input change.
    pub fn refresh(&mut self) {
        let sources = TableSources {
            projects: self.projects.as_ref(),
            samples: &self.samples,
        };
        match render(&self.inputs, sources) {
            Ok(view) => self.view = Some(view),
            Err(e) => {
                log::error!("Render failed: {e}");
                self.status = Some(Status::Error(format!("Error: {e}")));
            }
        }
    }

    /// Ingest a newly loaded projects table.
    pub fn set_projects(&mut self, table: Table, name: String) {
        self.projects = Some(table);
        self.projects_name = Some(name);
        self.status = Some(Status::Success("File uploaded successfully!".to_string()));
        self.refresh();
    }

    /// Load a projects file, keeping the previous table on failure.
    pub fn load_projects(&mut self, path: &Path) {
        match load_file(path, &self.column_types) {
            Ok(table) => {
                log::info!(
                    "Loaded {} projects with columns {:?}",
                    table.len(),
                    table.column_names()
                );
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.set_projects(table, name);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status = Some(Status::Error(format!("Error: {e:#}")));
            }
        }
    }

    // The input setters return whether anything changed, so the caller knows
    // the view it is drawing from is stale.

    pub fn set_keyword(&mut self, keyword: String) -> bool {
        if self.inputs.keyword == keyword {
            return false;
        }
        self.inputs.keyword = keyword;
        self.refresh();
        true
    }

    pub fn select_dataset(&mut self, dataset: SampleDataset) -> bool {
        if self.inputs.dataset == dataset {
            return false;
        }
        self.inputs.dataset = dataset;
        self.refresh();
        true
    }

    pub fn set_control(&mut self, dataset: SampleDataset, value: ControlValue) -> bool {
        if self.inputs.control(dataset) == value {
            return false;
        }
        self.inputs.set_control(dataset, value);
        self.refresh();
        true
    }

    /// Move the cached view out for drawing while the state stays mutable.
    pub fn take_view(&mut self) -> Option<DashboardView> {
        self.view.take()
    }

    /// Put a taken view back unless a refresh replaced it in the meantime.
    pub fn restore_view(&mut self, view: DashboardView) {
        if self.view.is_none() {
            self.view = Some(view);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use research_dashboard::view::ActivityView;

    fn state() -> AppState {
        AppState::new(Profile::default(), ColumnTypes::new()).unwrap()
    }

    #[test]
    fn test_initial_view_is_rendered() {
        let state = state();
        let view = state.view.as_ref().unwrap();
        assert!(view.projects.is_none());
        assert_eq!(view.explorer.filtered.len(), 5);
    }

    #[test]
    fn test_load_projects_updates_view() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "Title,Year\nSolar flares,2022\nAurora,2022\n").unwrap();

        let mut state = state();
        state.load_projects(file.path());

        assert_eq!(
            state.status,
            Some(Status::Success("File uploaded successfully!".to_string()))
        );
        let view = state.view.as_ref().unwrap();
        assert!(matches!(&view.activity, ActivityView::YearCounts(c) if c.len() == 1));

        state.set_keyword("aurora".to_string());
        let search = state.view.as_ref().unwrap().projects.as_ref().unwrap().search.as_ref();
        assert_eq!(search.unwrap().matches.len(), 1);
    }

    #[test]
    fn test_failed_load_keeps_previous_table() {
        let mut state = state();
        state.load_projects(Path::new("/nonexistent/projects.csv"));
        assert!(state.projects.is_none());
        assert!(matches!(state.status, Some(Status::Error(_))));
    }

    #[test]
    fn test_slider_change_refilters() {
        let mut state = state();
        let value = ControlValue { low: 400, high: 900 };
        assert!(state.set_control(SampleDataset::SpaceMissions, value));
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.explorer.filtered.len(), 4);
        assert!(!state.set_control(SampleDataset::SpaceMissions, value));
    }

    #[test]
    fn test_setters_report_changes() {
        let mut state = state();
        assert!(!state.set_keyword(String::new()));
        assert!(state.set_keyword("pulsar".to_string()));
        assert!(!state.set_keyword("pulsar".to_string()));
        assert!(!state.select_dataset(SampleDataset::SpaceMissions));
        assert!(state.select_dataset(SampleDataset::QuantumExperiments));
    }

    #[test]
    fn test_restore_view_keeps_newer_render() {
        let mut state = state();
        let taken = state.take_view().unwrap();
        assert!(state.view.is_none());
        state.restore_view(taken.clone());
        assert_eq!(state.view.as_ref(), Some(&taken));

        let stale = state.take_view().unwrap();
        state.select_dataset(SampleDataset::SouthAfricaWeather);
        state.restore_view(stale);
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.explorer.dataset, SampleDataset::SouthAfricaWeather);
    }
}
