//! Parcel search with field filters, quick search, and CSV export.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{FILE_CSV, MAGNIFYING_GLASS};

use super::app::App;
use super::components::{back_button, date_input, money, panel_header, section, status_label, styled_button, styled_button_with_icon};
use crate::data::parcels::{self, showing_label};
use crate::models::parcel::{Parcel, ParcelStatus};

/// Show the parcel search panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Parcel Search", "Search parcels held across stations");

    ui.horizontal(|ui| {
        ui.label(MAGNIFYING_GLASS);
        ui.add(
            egui::TextEdit::singleline(&mut app.quick_search)
                .desired_width(300.0)
                .hint_text("Quick search by name or parcel ID..."),
        );
        if !app.quick_search.is_empty() && styled_button(ui, "Clear").clicked() {
            app.quick_search.clear();
        }
    });

    ui.add_space(10.0);

    if app.quick_search.trim().is_empty() {
        show_filters(app, ui);
    }

    ui.add_space(15.0);

    let currency = app.currency().to_string();
    let results: Vec<&Parcel> = if app.quick_search.trim().is_empty() {
        parcels::search(&app.parcels, &app.search_query)
    } else {
        parcels::quick_search(&app.parcels, &app.quick_search)
    };

    ui.label(showing_label(results.len(), app.parcels.len()));
    ui.add_space(10.0);

    ScrollArea::vertical().id_salt("parcel_search_scroll").show(ui, |ui| {
        egui::Grid::new("parcel_search_grid")
            .num_columns(8)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Parcel ID");
                ui.strong("Recipient");
                ui.strong("Phone");
                ui.strong("Item");
                ui.strong("Value");
                ui.strong("Shelf");
                ui.strong("Status");
                ui.strong("Registered");
                ui.end_row();

                for parcel in &results {
                    ui.label(&parcel.id);
                    ui.label(&parcel.recipient_name);
                    ui.label(&parcel.phone_number);
                    ui.label(&parcel.item_description);
                    ui.label(money(&currency, parcel.item_value));
                    ui.label(&parcel.shelf_location);
                    status_label(ui, parcel.status);
                    ui.label(parcel.registered_date.to_string());
                    ui.end_row();
                }
            });

        if results.is_empty() {
            ui.add_space(10.0);
            ui.label(RichText::new("No parcels match the current filters").weak());
        }
    });

    go_back
}

fn show_filters(app: &mut App, ui: &mut Ui) {
    let shelves = parcels::unique_shelves(&app.parcels);

    section(ui, "Filters", |ui| {
        egui::Grid::new("parcel_search_filters")
            .num_columns(4)
            .spacing([20.0, 8.0])
            .show(ui, |ui| {
                ui.label("Recipient:");
                ui.add(egui::TextEdit::singleline(&mut app.search_query.recipient_name).desired_width(180.0));
                ui.label("Phone:");
                ui.add(egui::TextEdit::singleline(&mut app.search_query.phone_number).desired_width(160.0));
                ui.end_row();

                ui.label("Parcel ID:");
                ui.add(egui::TextEdit::singleline(&mut app.search_query.parcel_id).desired_width(180.0));
                ui.label("Status:");
                egui::ComboBox::from_id_salt("search_status")
                    .width(160.0)
                    .selected_text(app.search_query.status.map(|s| s.label()).unwrap_or("All"))
                    .show_ui(ui, |ui| {
                        if ui.selectable_label(app.search_query.status.is_none(), "All").clicked() {
                            app.search_query.status = None;
                        }
                        for status in ParcelStatus::ALL {
                            if ui
                                .selectable_label(app.search_query.status == Some(status), status.label())
                                .clicked()
                            {
                                app.search_query.status = Some(status);
                            }
                        }
                    });
                ui.end_row();

                ui.label("Shelf:");
                egui::ComboBox::from_id_salt("search_shelf")
                    .width(180.0)
                    .selected_text(app.search_query.shelf.as_deref().unwrap_or("All"))
                    .show_ui(ui, |ui| {
                        if ui.selectable_label(app.search_query.shelf.is_none(), "All").clicked() {
                            app.search_query.shelf = None;
                        }
                        for shelf in &shelves {
                            if ui
                                .selectable_label(app.search_query.shelf.as_ref() == Some(shelf), shelf)
                                .clicked()
                            {
                                app.search_query.shelf = Some(shelf.clone());
                            }
                        }
                    });
                ui.label("Registered:");
                ui.horizontal(|ui| {
                    app.search_query.start_date = date_input(ui, &mut app.search_start_input, "From");
                    ui.label("-");
                    app.search_query.end_date = date_input(ui, &mut app.search_end_input, "To");
                });
                ui.end_row();
            });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if styled_button(ui, "Clear Filters").clicked() {
                app.search_query.reset();
                app.search_start_input.clear();
                app.search_end_input.clear();
            }
            ui.add_space(10.0);
            if styled_button_with_icon(ui, FILE_CSV, "Export CSV").clicked() {
                app.export_parcel_search();
            }
        });
    });
}
