use eframe::egui::{self, RichText, Ui};

use crate::data::filter::Field;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – cascading filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔎 Filters");
    ui.separator();

    if state.dataset.is_empty() {
        ui.label("The data file has no rows.");
    }

    // Apply at most one change per frame, after the widgets release `state`.
    let mut pending: Option<(Field, String)> = None;

    for field in Field::CASCADE {
        ui.strong(format!("Select {}", step_label(field)));

        let options = state.options(field);
        if options.is_empty() {
            ui.add_enabled_ui(false, |ui: &mut Ui| {
                egui::ComboBox::from_id_salt(field.column())
                    .selected_text(RichText::new("no options").italics())
                    .width(ui.available_width())
                    .show_ui(ui, |_ui: &mut Ui| {});
            });
        } else {
            let current = state.selection.get(field).unwrap_or_default();
            egui::ComboBox::from_id_salt(field.column())
                .selected_text(current)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for option in options {
                        if ui.selectable_label(option == current, option.as_str()).clicked() {
                            pending = Some((field, option.clone()));
                        }
                    }
                });
        }
        ui.add_space(6.0);
    }

    if let Some((field, value)) = pending {
        state.choose(field, value);
    }
}

fn step_label(field: Field) -> &'static str {
    match field {
        Field::State => "State",
        Field::District => "District",
        Field::Category => "Category",
        Field::Indicator => "Indicator",
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title, menu, and row counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} rows loaded, {} matching",
            state.dataset.len(),
            state.subset_len
        ));
    });

    ui.heading("📊 NFHS 4 vs NFHS 5 Dashboard - India");
    ui.label("Comparison of health indicators across States and Districts");
    ui.add_space(4.0);
}
