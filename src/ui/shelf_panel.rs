//! Shelf management panel.

use chrono::Local;
use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{PLUS, TRASH};

use super::app::{App, DeleteTarget, ToastKind};
use super::components::{back_button, colors, danger_action_button, panel_header, primary_button_enabled};
use crate::data::shelves;

/// Show the shelf panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Shelf Management", "Storage slots at this station");

    let can_manage = app.session.can_manage_shelves();
    if !can_manage {
        ui.colored_label(colors::WARNING, "Only station managers and admins can add or remove shelves");
        ui.add_space(10.0);
    }

    ui.horizontal(|ui| {
        ui.label("New shelf:");
        ui.add_enabled(
            can_manage,
            egui::TextEdit::singleline(&mut app.new_shelf_name)
                .desired_width(160.0)
                .hint_text("e.g. D1"),
        );
        ui.add_space(10.0);

        let ready = can_manage && !app.new_shelf_name.trim().is_empty();
        if primary_button_enabled(ui, ready, PLUS, "Add Shelf").clicked() {
            let today = Local::now().date_naive();
            match shelves::add(&mut app.shelves, &app.new_shelf_name, &app.session, today) {
                Ok(shelf) => {
                    app.new_shelf_name.clear();
                    app.show_toast(format!("Shelf '{}' added", shelf.name), ToastKind::Success);
                }
                Err(e) => app.toast_error(&e),
            }
        }
    });

    ui.add_space(15.0);

    let total: u32 = app.shelves.iter().map(|s| s.parcel_count).sum();
    ui.label(format!("{} shelves holding {} parcels", app.shelves.len(), total));
    ui.add_space(10.0);

    ScrollArea::vertical().id_salt("shelf_scroll").show(ui, |ui| {
        egui::Grid::new("shelves_grid")
            .num_columns(5)
            .striped(true)
            .min_col_width(80.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Shelf");
                ui.strong("Parcels");
                ui.strong("Created By");
                ui.strong("Created");
                ui.strong("Actions");
                ui.end_row();

                for shelf in &app.shelves {
                    ui.label(RichText::new(&shelf.name).strong());
                    ui.label(shelf.parcel_count.to_string());
                    ui.label(&shelf.created_by);
                    ui.label(shelf.created_at.to_string());

                    ui.horizontal(|ui| {
                        ui.add_space(8.0);
                        let empty = shelves::is_removable(shelf, &app.parcels);
                        ui.add_enabled_ui(can_manage && empty, |ui| {
                            let tooltip = if empty {
                                "Delete"
                            } else {
                                "Only empty shelves can be deleted"
                            };
                            if danger_action_button(ui, TRASH, tooltip).clicked() {
                                app.delete_target = Some(DeleteTarget::Shelf(shelf.id.clone(), shelf.name.clone()));
                                app.show_delete_confirm = true;
                            }
                        });
                    });

                    ui.end_row();
                }
            });
    });

    go_back
}
