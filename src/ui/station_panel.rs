//! Station and location management, backed by the station service.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, MAP_PIN, PLUS};

use super::app::{App, LocationForm, StationForm};
use super::components::{
    back_button, panel_header, primary_button_with_icon, section, styled_button, styled_button_with_icon,
};

/// Show the station panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Station Management", "Stations and the locations they serve");

    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Add Station").clicked() {
            app.station_form = StationForm {
                is_open: true,
                ..Default::default()
            };
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, MAP_PIN, "Add Location").clicked() {
            app.location_form = LocationForm::open();
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.refresh_stations();
        }

        if app.is_loading {
            ui.spinner();
        }
    });

    ui.add_space(15.0);

    ScrollArea::vertical().id_salt("stations_scroll").show(ui, |ui| {
        section(ui, &format!("Stations ({})", app.stations.len()), |ui| {
            egui::Grid::new("stations_grid")
                .num_columns(5)
                .striped(true)
                .min_col_width(80.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Code");
                    ui.strong("Name");
                    ui.strong("Address");
                    ui.strong("Location");
                    ui.strong("Manager");
                    ui.end_row();

                    for station in &app.stations {
                        ui.label(RichText::new(&station.code).monospace());
                        ui.label(&station.name);
                        ui.label(&station.address);
                        let location = app
                            .locations
                            .iter()
                            .find(|l| l.id == station.location_id)
                            .map(|l| l.name.as_str())
                            .unwrap_or(station.location_id.as_str());
                        ui.label(location);
                        let manager = station
                            .manager_id
                            .as_ref()
                            .and_then(|id| app.users.iter().find(|u| &u.id == id))
                            .map(|u| u.name.as_str())
                            .unwrap_or("-");
                        ui.label(manager);
                        ui.end_row();
                    }
                });
        });

        ui.add_space(15.0);

        section(ui, &format!("Locations ({})", app.locations.len()), |ui| {
            egui::Grid::new("locations_grid")
                .num_columns(4)
                .striped(true)
                .min_col_width(80.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("ID");
                    ui.strong("Name");
                    ui.strong("Region");
                    ui.strong("Country");
                    ui.end_row();

                    for location in &app.locations {
                        ui.label(&location.id);
                        ui.label(&location.name);
                        ui.label(&location.region);
                        ui.label(&location.country);
                        ui.end_row();
                    }
                });
        });
    });

    if app.station_form.is_open {
        show_station_dialog(app, ui.ctx());
    }
    if app.location_form.is_open {
        show_location_dialog(app, ui.ctx());
    }

    go_back
}

fn show_station_dialog(app: &mut App, ctx: &egui::Context) {
    egui::Window::new("Add Station")
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            egui::Grid::new("station_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.add(egui::TextEdit::singleline(&mut app.station_form.name).desired_width(250.0));
                    ui.end_row();

                    ui.label("Address:");
                    ui.add(egui::TextEdit::singleline(&mut app.station_form.address).desired_width(250.0));
                    ui.end_row();

                    ui.label("Location:");
                    egui::ComboBox::from_id_salt("station_form_location")
                        .width(250.0)
                        .selected_text(
                            app.station_form
                                .location_id
                                .as_ref()
                                .and_then(|id| app.locations.iter().find(|l| &l.id == id))
                                .map(|l| l.name.as_str())
                                .unwrap_or("Select..."),
                        )
                        .show_ui(ui, |ui| {
                            for location in &app.locations {
                                if ui
                                    .selectable_label(
                                        app.station_form.location_id.as_ref() == Some(&location.id),
                                        &location.name,
                                    )
                                    .clicked()
                                {
                                    app.station_form.location_id = Some(location.id.clone());
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("Manager:");
                    egui::ComboBox::from_id_salt("station_form_manager")
                        .width(250.0)
                        .selected_text(
                            app.station_form
                                .manager_id
                                .as_ref()
                                .and_then(|id| app.users.iter().find(|u| &u.id == id))
                                .map(|u| u.name.as_str())
                                .unwrap_or("None"),
                        )
                        .show_ui(ui, |ui| {
                            if ui
                                .selectable_label(app.station_form.manager_id.is_none(), "None")
                                .clicked()
                            {
                                app.station_form.manager_id = None;
                            }
                            for user in &app.users {
                                if ui
                                    .selectable_label(app.station_form.manager_id.as_ref() == Some(&user.id), &user.name)
                                    .clicked()
                                {
                                    app.station_form.manager_id = Some(user.id.clone());
                                }
                            }
                        });
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    app.station_form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button_with_icon(ui, "", "Create").clicked() {
                        match app.station_form.to_request() {
                            Ok(request) => {
                                app.log_info(format!("Creating station {}", request.name));
                                app.create_station(request);
                            }
                            Err(e) => app.toast_error(&e),
                        }
                    }
                });
            });
        });
}

fn show_location_dialog(app: &mut App, ctx: &egui::Context) {
    egui::Window::new("Add Location")
        .collapsible(false)
        .resizable(false)
        .default_width(380.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            egui::Grid::new("location_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.add(egui::TextEdit::singleline(&mut app.location_form.name).desired_width(220.0));
                    ui.end_row();

                    ui.label("Region:");
                    ui.add(egui::TextEdit::singleline(&mut app.location_form.region).desired_width(220.0));
                    ui.end_row();

                    ui.label("Country:");
                    ui.add(egui::TextEdit::singleline(&mut app.location_form.country).desired_width(220.0));
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    app.location_form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button_with_icon(ui, "", "Create").clicked() {
                        match app.location_form.to_request() {
                            Ok(request) => {
                                app.log_info(format!("Creating location {}", request.name));
                                app.create_location(request);
                            }
                            Err(e) => app.toast_error(&e),
                        }
                    }
                });
            });
        });
}
