//! User management panel.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{PLUS, PROHIBIT, USER_CHECK};

use super::app::{App, ToastKind, UserForm};
use super::components::{action_button, back_button, colors, panel_header, primary_button_with_icon, styled_button};
use crate::data::users;
use crate::models::user::{UserRole, UserStatus};

/// Show the user panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "User Management", "Console accounts and their roles");

    let station_names = users::stations(&app.users);

    ui.horizontal(|ui| {
        ui.label("Role:");
        egui::ComboBox::from_id_salt("user_filter_role")
            .width(140.0)
            .selected_text(app.user_filter.role.map(|r| r.label()).unwrap_or("All"))
            .show_ui(ui, |ui| {
                if ui.selectable_label(app.user_filter.role.is_none(), "All").clicked() {
                    app.user_filter.role = None;
                }
                for role in UserRole::ALL {
                    if ui
                        .selectable_label(app.user_filter.role == Some(role), role.label())
                        .clicked()
                    {
                        app.user_filter.role = Some(role);
                    }
                }
            });

        ui.add_space(10.0);

        ui.label("Station:");
        egui::ComboBox::from_id_salt("user_filter_station")
            .width(160.0)
            .selected_text(app.user_filter.station.as_deref().unwrap_or("All"))
            .show_ui(ui, |ui| {
                if ui.selectable_label(app.user_filter.station.is_none(), "All").clicked() {
                    app.user_filter.station = None;
                }
                for name in &station_names {
                    if ui
                        .selectable_label(app.user_filter.station.as_ref() == Some(name), name)
                        .clicked()
                    {
                        app.user_filter.station = Some(name.clone());
                    }
                }
            });

        ui.add_space(10.0);

        ui.label("Status:");
        egui::ComboBox::from_id_salt("user_filter_status")
            .width(110.0)
            .selected_text(app.user_filter.status.map(|s| s.label()).unwrap_or("All"))
            .show_ui(ui, |ui| {
                if ui.selectable_label(app.user_filter.status.is_none(), "All").clicked() {
                    app.user_filter.status = None;
                }
                for status in [UserStatus::Active, UserStatus::Disabled] {
                    if ui
                        .selectable_label(app.user_filter.status == Some(status), status.label())
                        .clicked()
                    {
                        app.user_filter.status = Some(status);
                    }
                }
            });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if primary_button_with_icon(ui, PLUS, "Add User").clicked() {
                app.user_form = UserForm {
                    is_open: true,
                    ..Default::default()
                };
            }
        });
    });

    ui.add_space(15.0);

    let mut toggle = None;
    let shown = app.user_filter.apply(&app.users);

    ui.label(format!("Showing {} of {} users", shown.len(), app.users.len()));
    ui.add_space(10.0);

    ScrollArea::vertical().id_salt("users_scroll").show(ui, |ui| {
        egui::Grid::new("users_grid")
            .num_columns(7)
            .striped(true)
            .min_col_width(70.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Name");
                ui.strong("Email");
                ui.strong("Role");
                ui.strong("Station");
                ui.strong("Status");
                ui.strong("Last Login");
                ui.strong("Actions");
                ui.end_row();

                for user in &shown {
                    ui.label(&user.name);
                    ui.label(&user.email);
                    ui.label(user.role.label());
                    ui.label(&user.station);
                    let color = match user.status {
                        UserStatus::Active => colors::SUCCESS,
                        UserStatus::Disabled => colors::NEUTRAL,
                    };
                    ui.colored_label(color, user.status.label());
                    ui.label(user.last_login.as_deref().unwrap_or("Never"));

                    let (icon, text) = match user.status {
                        UserStatus::Active => (PROHIBIT, "Disable"),
                        UserStatus::Disabled => (USER_CHECK, "Enable"),
                    };
                    if action_button(ui, icon, text).clicked() {
                        toggle = Some(user.id.clone());
                    }
                    ui.end_row();
                }
            });

        if shown.is_empty() {
            ui.add_space(10.0);
            ui.label(RichText::new("No users match the current filters").weak());
        }
    });

    if let Some(id) = toggle {
        match users::toggle_status(&mut app.users, &id) {
            Ok(status) => app.log_info(format!("{id} is now {}", status.label())),
            Err(e) => app.toast_error(&e),
        }
    }

    if app.user_form.is_open {
        show_user_dialog(app, ui.ctx());
    }

    go_back
}

fn show_user_dialog(app: &mut App, ctx: &egui::Context) {
    egui::Window::new("Add User")
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            egui::Grid::new("user_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.add(egui::TextEdit::singleline(&mut app.user_form.name).desired_width(250.0));
                    ui.end_row();

                    ui.label("Email:");
                    ui.add(egui::TextEdit::singleline(&mut app.user_form.email).desired_width(250.0));
                    ui.end_row();

                    ui.label("Phone:");
                    ui.add(egui::TextEdit::singleline(&mut app.user_form.phone).desired_width(250.0));
                    ui.end_row();

                    ui.label("Role:");
                    egui::ComboBox::from_id_salt("user_form_role")
                        .width(250.0)
                        .selected_text(app.user_form.role.label())
                        .show_ui(ui, |ui| {
                            for role in UserRole::ALL {
                                ui.selectable_value(&mut app.user_form.role, role, role.label());
                            }
                        });
                    ui.end_row();

                    ui.label("Station:");
                    egui::ComboBox::from_id_salt("user_form_station")
                        .width(250.0)
                        .selected_text(
                            app.user_form
                                .station_id
                                .as_ref()
                                .and_then(|id| app.stations.iter().find(|s| &s.id == id))
                                .map(|s| s.name.as_str())
                                .unwrap_or("Select..."),
                        )
                        .show_ui(ui, |ui| {
                            for station in &app.stations {
                                if ui
                                    .selectable_label(app.user_form.station_id.as_ref() == Some(&station.id), &station.name)
                                    .clicked()
                                {
                                    app.user_form.station_id = Some(station.id.clone());
                                }
                            }
                        });
                    ui.end_row();
                });

            if app.stations.is_empty() {
                ui.add_space(5.0);
                ui.label(RichText::new("Stations are still loading").weak());
            }

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    app.user_form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button_with_icon(ui, "", "Create").clicked() {
                        let created = app
                            .user_form
                            .to_request(&app.stations)
                            .and_then(|request| users::create(&mut app.users, request));
                        match created {
                            Ok(user) => {
                                app.user_form.reset();
                                app.show_toast(format!("User {} created", user.name), ToastKind::Success);
                            }
                            Err(e) => app.toast_error(&e),
                        }
                    }
                });
            });
        });
}
