use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use research_dashboard::data::Table;

const ROW_HEIGHT: f32 = 18.0;

/// Render a table as a scrollable, striped grid. `id` must be unique per
/// call site.
pub fn data_grid(ui: &mut Ui, id: &str, table: &Table) {
    let columns = table.column_names();
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(true)
            .max_scroll_height(220.0)
            .columns(Column::auto().at_least(80.0), columns.len())
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for name in &columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(*name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.len(), |mut row| {
                    let values = &table.rows()[row.index()];
                    for value in values {
                        row.col(|ui: &mut Ui| {
                            ui.label(value.to_string());
                        });
                    }
                });
            });
    });
    ui.label(
        egui::RichText::new(format!("{} rows × {} columns", table.len(), columns.len())).small(),
    );
}
