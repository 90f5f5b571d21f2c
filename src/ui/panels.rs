use eframe::egui::{self, Color32, RichText, Ui};

use research_dashboard::profile::Profile;

use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Left side panel – profile
// ---------------------------------------------------------------------------

/// Render the profile overview, interests, picture and contact links.
pub fn side_panel(ui: &mut Ui, profile: &Profile) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("👨🏽‍🔬 Profile Overview");
            ui.separator();

            egui::Grid::new("profile_grid")
                .num_columns(2)
                .spacing([8.0, 4.0])
                .show(ui, |ui: &mut Ui| {
                    for (label, value) in [
                        ("Name:", profile.name.as_str()),
                        ("Field:", profile.field.as_str()),
                        ("Institution:", profile.institution.as_str()),
                    ] {
                        ui.strong(label);
                        ui.label(value);
                        ui.end_row();
                    }
                });

            ui.add_space(8.0);
            ui.strong("Research Interests");
            for interest in &profile.interests {
                ui.label(format!("• {interest}"));
            }

            if let Some(uri) = profile.picture_uri() {
                ui.add_space(8.0);
                ui.vertical_centered(|ui: &mut Ui| {
                    ui.add(
                        egui::Image::new(uri)
                            .max_width(ui.available_width() * 0.9)
                            .max_height(180.0),
                    );
                    ui.label(RichText::new(&profile.picture_caption).italics().small());
                });
            }

            ui.add_space(12.0);
            ui.heading("📬 Contact");
            ui.separator();
            ui.horizontal(|ui: &mut Ui| {
                ui.label("📧 Email:");
                ui.hyperlink_to(profile.email.as_str(), format!("mailto:{}", profile.email));
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("🌍 GitHub:");
                ui.hyperlink(&profile.github);
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open projects…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("🚀 Research & Portfolio Dashboard");

        if let (Some(table), Some(name)) = (&state.projects, &state.projects_name) {
            ui.separator();
            ui.label(format!("{name}: {} records", table.len()));
        }

        match &state.status {
            Some(Status::Success(msg)) => {
                ui.separator();
                ui.label(RichText::new(msg).color(Color32::GREEN));
            }
            Some(Status::Error(msg)) => {
                ui.separator();
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload your projects/publications")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_projects(&path);
    }
}
