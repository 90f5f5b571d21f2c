use eframe::egui::{self, Ui};

use research_dashboard::data::samples::{ControlKind, SampleDataset};
use research_dashboard::view::{ActivityView, DashboardView, ExplorerView, ProjectsView};

use crate::state::AppState;
use crate::ui::{grid, plot};

/// Render the three central sections from the cached view.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let Some(view) = state.take_view() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Nothing to show yet.");
        });
        return;
    };
    draw_sections(ui, state, &view);
    state.restore_view(view);
}

fn draw_sections(ui: &mut Ui, state: &mut AppState, view: &DashboardView) {
    ui.heading("📚 Projects & Publications");
    ui.separator();
    projects_section(ui, state, view.projects.as_ref());
    ui.add_space(16.0);

    ui.heading("📈 Research Activity");
    ui.separator();
    match &view.activity {
        ActivityView::YearCounts(counts) => plot::activity_chart(ui, counts),
        ActivityView::Missing(msg) => {
            ui.label(format!("ℹ {msg}"));
        }
    }
    ui.add_space(16.0);

    ui.heading("🔬 STEM Data Explorer");
    ui.separator();
    explorer_section(ui, state, &view.explorer);
}

// ---------------------------------------------------------------------------
// Projects & publications
// ---------------------------------------------------------------------------

fn projects_section(ui: &mut Ui, state: &mut AppState, projects: Option<&ProjectsView>) {
    let Some(projects) = projects else {
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Upload your projects/publications CSV");
            if ui.button("Browse…").clicked() {
                crate::ui::panels::open_file_dialog(state);
            }
        });
        return;
    };

    grid::data_grid(ui, "projects_all", &projects.all);
    ui.add_space(8.0);

    let mut keyword = state.inputs.keyword.clone();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("🔍 Search by keyword");
        ui.text_edit_singleline(&mut keyword);
    });
    if state.set_keyword(keyword) {
        ui.ctx().request_repaint();
    }

    if let Some(search) = &projects.search {
        ui.label(egui::RichText::new(format!("Results for: {}", search.keyword)).strong());
        grid::data_grid(ui, "projects_search", &search.matches);
    }
}

// ---------------------------------------------------------------------------
// Sample-data explorer
// ---------------------------------------------------------------------------

fn explorer_section(ui: &mut Ui, state: &mut AppState, explorer: &ExplorerView) {
    let mut selected = state.inputs.dataset;
    egui::ComboBox::from_label("Choose dataset")
        .selected_text(selected.label())
        .show_ui(ui, |ui: &mut Ui| {
            for dataset in SampleDataset::ALL {
                ui.selectable_value(&mut selected, dataset, dataset.label());
            }
        });
    if state.select_dataset(selected) || selected != explorer.dataset {
        // The view being drawn is for the previous dataset.
        ui.ctx().request_repaint();
        return;
    }

    ui.strong(explorer.dataset.title());
    grid::data_grid(ui, "explorer_all", &explorer.all);
    ui.add_space(8.0);

    let control = explorer.dataset.control();
    let mut value = state.inputs.control(explorer.dataset);
    match control.kind {
        ControlKind::Range => {
            ui.label(control.label);
            ui.add(egui::Slider::new(&mut value.low, control.min..=control.max).text("from"));
            ui.add(egui::Slider::new(&mut value.high, control.min..=control.max).text("to"));
        }
        ControlKind::Threshold => {
            ui.add(
                egui::Slider::new(&mut value.low, control.min..=control.max).text(control.label),
            );
        }
    }
    if state.set_control(explorer.dataset, value) {
        ui.ctx().request_repaint();
    }

    grid::data_grid(ui, "explorer_filtered", &explorer.filtered);
}
