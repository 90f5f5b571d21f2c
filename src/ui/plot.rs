use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use research_dashboard::data::Value;
use research_dashboard::data::loader::YEAR_COLUMN;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Research activity bar chart
// ---------------------------------------------------------------------------

/// One bar per year, height = number of projects/publications that year.
pub fn activity_chart(ui: &mut Ui, counts: &[(Value, usize)]) {
    let colors = ColorMap::new(counts.iter().map(|(v, _)| v));

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (value, n))| {
            // Non-numeric years fall back to their position.
            let x = value.as_f64().unwrap_or(i as f64);
            let label = if value.is_null() {
                "(missing)".to_string()
            } else {
                value.to_string()
            };
            Bar::new(x, *n as f64)
                .name(label)
                .fill(colors.color_for(value))
                .width(0.6)
        })
        .collect();

    Plot::new("activity_chart")
        .height(240.0)
        .x_axis_label(YEAR_COLUMN)
        .y_axis_label("Entries")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
