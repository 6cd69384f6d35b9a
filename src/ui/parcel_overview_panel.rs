//! System-wide parcel overview for admins.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::FILE_CSV;

use super::app::App;
use super::components::{back_button, date_input, money, panel_header, section, status_label, styled_button, styled_button_with_icon};
use crate::data::parcels::{self, showing_label};
use crate::models::parcel::ParcelStatus;

/// Show the parcel overview panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Parcel Overview", "Every parcel across all stations");

    let stations = parcels::unique_stations(&app.parcels);

    section(ui, "Filters", |ui| {
        ui.horizontal_wrapped(|ui| {
            ui.label("Station:");
            egui::ComboBox::from_id_salt("overview_station")
                .width(160.0)
                .selected_text(app.overview_filter.station.as_deref().unwrap_or("All"))
                .show_ui(ui, |ui| {
                    if ui.selectable_label(app.overview_filter.station.is_none(), "All").clicked() {
                        app.overview_filter.station = None;
                    }
                    for station in &stations {
                        if ui
                            .selectable_label(app.overview_filter.station.as_ref() == Some(station), station)
                            .clicked()
                        {
                            app.overview_filter.station = Some(station.clone());
                        }
                    }
                });

            ui.add_space(10.0);

            ui.label("Status:");
            egui::ComboBox::from_id_salt("overview_status")
                .width(150.0)
                .selected_text(app.overview_filter.status.map(|s| s.label()).unwrap_or("All"))
                .show_ui(ui, |ui| {
                    if ui.selectable_label(app.overview_filter.status.is_none(), "All").clicked() {
                        app.overview_filter.status = None;
                    }
                    for status in ParcelStatus::ALL {
                        if ui
                            .selectable_label(app.overview_filter.status == Some(status), status.label())
                            .clicked()
                        {
                            app.overview_filter.status = Some(status);
                        }
                    }
                });

            ui.add_space(10.0);

            ui.label("From:");
            app.overview_filter.date_from = date_input(ui, &mut app.overview_from_input, "YYYY-MM-DD");
            ui.label("To:");
            app.overview_filter.date_to = date_input(ui, &mut app.overview_to_input, "YYYY-MM-DD");

            ui.add_space(10.0);

            if styled_button(ui, "Clear Filters").clicked() {
                app.overview_filter.reset();
                app.overview_from_input.clear();
                app.overview_to_input.clear();
            }

            if styled_button_with_icon(ui, FILE_CSV, "Export CSV").clicked() {
                app.export_parcel_overview();
            }
        });
    });

    ui.add_space(15.0);

    let currency = app.currency().to_string();
    let results = app.overview_filter.apply(&app.parcels);

    ui.label(showing_label(results.len(), app.parcels.len()));
    ui.add_space(10.0);

    ScrollArea::vertical().id_salt("parcel_overview_scroll").show(ui, |ui| {
        egui::Grid::new("parcel_overview_grid")
            .num_columns(8)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Parcel ID");
                ui.strong("Station");
                ui.strong("Recipient");
                ui.strong("Value");
                ui.strong("Delivery");
                ui.strong("Rider");
                ui.strong("Status");
                ui.strong("Registered");
                ui.end_row();

                for parcel in &results {
                    ui.label(&parcel.id);
                    ui.label(&parcel.station);
                    ui.label(&parcel.recipient_name);
                    ui.label(money(&currency, parcel.item_value));
                    ui.label(parcel.delivery_type.label());
                    ui.label(parcel.rider_display());
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
