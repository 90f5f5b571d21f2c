use std::collections::HashMap;

use crate::data::loader::YEAR_COLUMN;
use crate::data::samples::{ControlKind, SampleDataset, SampleTables};
use crate::data::{
    ColumnNotFoundError, FilterSpec, Table, Value, count_by_value, filter_by_keyword,
};

/// Shown in the activity section when there is nothing to chart.
pub const MISSING_YEAR_MESSAGE: &str = "Upload a CSV with a 'Year' column to see trends.";

// ---------------------------------------------------------------------------
// Inputs: everything the user can change
// ---------------------------------------------------------------------------

/// Current slider position(s) of one explorer dataset. A threshold control
/// only reads `low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlValue {
    pub low: i64,
    pub high: i64,
}

impl ControlValue {
    pub fn default_for(dataset: SampleDataset) -> Self {
        let (low, high) = dataset.control().default;
        Self { low, high }
    }

    /// The filter this control stands for on `dataset`.
    pub fn filter(self, dataset: SampleDataset) -> FilterSpec {
        let control = dataset.control();
        let column = control.column.to_string();
        match control.kind {
            ControlKind::Range => FilterSpec::Range {
                column,
                low: self.low as f64,
                high: self.high as f64,
            },
            ControlKind::Threshold => FilterSpec::Threshold {
                column,
                minimum: self.low as f64,
            },
        }
    }
}

/// Filter parameters driving one render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardInputs {
    pub keyword: String,
    pub dataset: SampleDataset,
    controls: HashMap<SampleDataset, ControlValue>,
}

impl DashboardInputs {
    /// Slider values of `dataset`; untouched datasets report their defaults.
    pub fn control(&self, dataset: SampleDataset) -> ControlValue {
        self.controls
            .get(&dataset)
            .copied()
            .unwrap_or_else(|| ControlValue::default_for(dataset))
    }

    pub fn set_control(&mut self, dataset: SampleDataset, value: ControlValue) {
        self.controls.insert(dataset, value);
    }
}

/// The tables a render reads from.
#[derive(Debug, Clone, Copy)]
pub struct TableSources<'a> {
    /// The uploaded projects/publications table, if any.
    pub projects: Option<&'a Table>,
    pub samples: &'a SampleTables,
}

// ---------------------------------------------------------------------------
// View: everything the UI paints
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// `None` until a projects file is loaded.
    pub projects: Option<ProjectsView>,
    pub activity: ActivityView,
    pub explorer: ExplorerView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectsView {
    pub all: Table,
    /// Present only for a non-empty keyword.
    pub search: Option<SearchResults>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub keyword: String,
    pub matches: Table,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActivityView {
    /// `(year, count)` in ascending year order.
    YearCounts(Vec<(Value, usize)>),
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerView {
    pub dataset: SampleDataset,
    pub all: Table,
    pub filter: FilterSpec,
    pub filtered: Table,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Compute the whole dashboard from the current inputs. Pure: the UI calls it
/// again whenever an input changes.
pub fn render(
    inputs: &DashboardInputs,
    sources: TableSources<'_>,
) -> Result<DashboardView, ColumnNotFoundError> {
    let projects = sources.projects.map(|table| ProjectsView {
        all: table.clone(),
        search: (!inputs.keyword.is_empty()).then(|| SearchResults {
            keyword: inputs.keyword.clone(),
            matches: filter_by_keyword(table, &inputs.keyword),
        }),
    });

    let activity = match sources.projects {
        Some(table) if table.schema().contains(YEAR_COLUMN) => {
            ActivityView::YearCounts(count_by_value(table, YEAR_COLUMN)?)
        }
        _ => ActivityView::Missing(MISSING_YEAR_MESSAGE),
    };

    let dataset = inputs.dataset;
    let all = sources.samples.get(dataset);
    let filter = inputs.control(dataset).filter(dataset);
    let filtered = filter.apply(all)?;
    log::debug!(
        "{}: {} of {} rows pass {:?}",
        dataset.label(),
        filtered.len(),
        all.len(),
        filter
    );

    Ok(DashboardView {
        projects,
        activity,
        explorer: ExplorerView {
            dataset,
            all: all.clone(),
            filter,
            filtered,
        },
    })
}
