mod app;
mod color;
mod state;
mod ui;

use app::DashboardApp;
use eframe::egui;
use research_dashboard::config::DashboardConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_args(std::env::args()).unwrap_or_else(|e| {
        log::error!("Falling back to the default config: {e:#}");
        DashboardConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = format!("🚀 {}", config.profile.window_title());
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc: &eframe::CreationContext<'_>| -> Result<Box<dyn eframe::App>, BoxError> {
            // Install image loaders so egui can render the profile picture.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(DashboardApp::new(config)?))
        }),
    )
}
