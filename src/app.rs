use eframe::egui;

use research_dashboard::config::DashboardConfig;
use research_dashboard::data::SchemaError;

use crate::state::AppState;
use crate::ui::{panels, sections};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(config: DashboardConfig) -> Result<Self, SchemaError> {
        let mut state = AppState::new(config.profile, config.column_types)?;
        if let Some(path) = config.projects_file {
            if path.exists() {
                state.load_projects(&path);
            } else {
                log::warn!("Configured projects file {} does not exist", path.display());
            }
        }
        Ok(Self { state })
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: profile ----
        egui::SidePanel::left("profile_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state.profile);
            });

        // ---- Central panel: projects, activity, explorer ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    sections::dashboard(ui, &mut self.state);
                });
        });
    }
}
