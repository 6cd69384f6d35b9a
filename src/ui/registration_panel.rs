//! Three-step parcel registration wizard.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROW_LEFT, ARROW_RIGHT, CHECK, PLAY, PLUS, X};

use super::app::{App, ToastKind};
use super::components::{
    back_button, colors, money, panel_header, primary_button_enabled, section, styled_button_with_icon,
};
use crate::models::registration::WizardStep;
use crate::models::shelf::Shelf;
use crate::registration::{EntryMode, IntakeForm, SessionState};

/// Show the registration panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    let step = app.wizard.step();
    panel_header(
        ui,
        "Parcel Registration",
        &format!("Step {} of {}: {}", step.number(), WizardStep::TOTAL, step.title()),
    );

    step_indicator(ui, step);
    ui.add_space(15.0);

    ScrollArea::vertical().id_salt("registration_scroll").show(ui, |ui| match step {
        WizardStep::Info => show_info_step(app, ui),
        WizardStep::CostsAndPod => show_costs_step(app, ui),
        WizardStep::Review => show_review_step(app, ui),
    });

    go_back
}

fn step_indicator(ui: &mut Ui, current: WizardStep) {
    ui.horizontal(|ui| {
        for step in [WizardStep::Info, WizardStep::CostsAndPod, WizardStep::Review] {
            let text = RichText::new(format!("{}. {}", step.number(), step.title()));
            if step == current {
                ui.label(text.strong().color(colors::ACCENT));
            } else if step.number() < current.number() {
                ui.label(text.color(colors::SUCCESS));
            } else {
                ui.label(text.weak());
            }
            if step != WizardStep::Review {
                ui.label(RichText::new(ARROW_RIGHT).weak());
            }
        }
    });
}

fn show_info_step(app: &mut App, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.label("Entry mode:");
        ui.add_space(10.0);
        if ui
            .selectable_label(app.wizard.mode() == EntryMode::Single, "Single Parcel")
            .clicked()
        {
            app.wizard.choose_mode(EntryMode::Single);
        }
        if ui
            .selectable_label(app.wizard.mode() == EntryMode::Bulk, "Bulk Drop-off")
            .clicked()
        {
            app.wizard.choose_mode(EntryMode::Bulk);
        }
    });

    ui.add_space(15.0);

    match app.wizard.mode() {
        EntryMode::Undecided => {
            ui.label(RichText::new("Choose single parcel or bulk drop-off to begin.").weak());
        }
        EntryMode::Single => show_single_entry(app, ui),
        EntryMode::Bulk => show_bulk_entry(app, ui),
    }
}

fn show_single_entry(app: &mut App, ui: &mut Ui) {
    section(ui, "Recipient", |ui| {
        intake_fields(ui, &mut app.intake_form, &app.shelves, "single");
    });

    ui.add_space(15.0);

    ui.horizontal(|ui| {
        if primary_button_enabled(ui, app.intake_form.is_complete(), ARROW_RIGHT, "Next").clicked() {
            match app.intake_form.to_draft() {
                Ok(draft) => {
                    app.wizard.set_single_draft(draft);
                    app.wizard.advance();
                }
                Err(e) => app.toast_error(&e),
            }
        }
    });
}

fn show_bulk_entry(app: &mut App, ui: &mut Ui) {
    if app.wizard.session_state() == SessionState::NoSession {
        section(ui, "Driver Details", |ui| {
            egui::Grid::new("bulk_start_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Driver Name:");
                    ui.add(egui::TextEdit::singleline(&mut app.bulk_form.driver_name).desired_width(250.0));
                    ui.end_row();

                    ui.label("Vehicle Number:");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.bulk_form.vehicle_number)
                            .desired_width(150.0)
                            .hint_text("GR-123-20"),
                    );
                    ui.end_row();
                });

            ui.add_space(10.0);

            if primary_button_enabled(ui, app.bulk_form.is_ready(), PLAY, "Start Session").clicked()
                && app
                    .wizard
                    .start_bulk_session(&app.bulk_form.driver_name, &app.bulk_form.vehicle_number)
            {
                app.log_info(format!("Bulk session started for {}", app.bulk_form.driver_name.trim()));
            }
        });
        return;
    }

    if let Some(session) = app.wizard.session() {
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("Driver: {}", session.driver_name)).strong());
            ui.add_space(20.0);
            ui.label(format!("Vehicle: {}", session.vehicle_number));
            ui.add_space(20.0);
            ui.label(format!("Started {}", session.entry_date.with_timezone(&chrono::Local).format("%H:%M")));
        });
    }

    ui.add_space(10.0);

    section(ui, "Add Parcel", |ui| {
        intake_fields(ui, &mut app.intake_form, &app.shelves, "bulk");
        ui.add_space(10.0);

        if primary_button_enabled(ui, app.intake_form.is_complete(), PLUS, "Add Parcel").clicked() {
            match app.intake_form.to_draft() {
                Ok(draft) => {
                    let name = draft.recipient_name().to_string();
                    if app.wizard.add_parcel_to_session(draft) {
                        app.intake_form.reset();
                        app.log_info(format!("Added parcel for {name}"));
                    }
                }
                Err(e) => app.toast_error(&e),
            }
        }
    });

    ui.add_space(15.0);

    let currency = app.currency().to_string();
    if let Some(session) = app.wizard.session() {
        ui.label(RichText::new(format!("Parcels in session ({})", session.parcels.len())).strong());
        ui.add_space(5.0);

        if session.parcels.is_empty() {
            ui.label(RichText::new("No parcels added yet").weak());
        } else {
            egui::Grid::new("bulk_parcels_grid")
                .num_columns(5)
                .striped(true)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.strong("Recipient");
                    ui.strong("Phone");
                    ui.strong("Item");
                    ui.strong("Shelf");
                    ui.strong("Value");
                    ui.end_row();

                    for draft in &session.parcels {
                        ui.label(draft.recipient_name());
                        ui.label(draft.phone_number());
                        ui.label(draft.item_description());
                        ui.label(draft.shelf());
                        ui.label(money(&currency, draft.item_value()));
                        ui.end_row();
                    }
                });
        }
    }

    ui.add_space(15.0);

    ui.horizontal(|ui| {
        if styled_button_with_icon(ui, X, "End Session").clicked() {
            app.wizard.end_session();
            app.intake_form.reset();
            app.bulk_form.reset();
            app.costs_form.reset();
            app.log_warning("Bulk session ended without submitting");
        }

        ui.add_space(10.0);

        if primary_button_enabled(ui, app.wizard.can_proceed(), ARROW_RIGHT, "Next").clicked() {
            app.wizard.advance();
        }
    });
}

/// Recipient and item inputs shared by single and bulk entry.
fn intake_fields(ui: &mut Ui, form: &mut IntakeForm, shelves: &[Shelf], id: &str) {
    egui::Grid::new(format!("intake_grid_{id}"))
        .num_columns(2)
        .spacing([20.0, 10.0])
        .show(ui, |ui| {
            ui.label("Recipient Name:");
            ui.add(egui::TextEdit::singleline(&mut form.recipient_name).desired_width(250.0));
            ui.end_row();

            ui.label("Phone Number:");
            ui.add(
                egui::TextEdit::singleline(&mut form.phone_number)
                    .desired_width(200.0)
                    .hint_text("+233..."),
            );
            ui.end_row();

            ui.label("Item Description:");
            ui.add(
                egui::TextEdit::singleline(&mut form.item_description)
                    .desired_width(250.0)
                    .hint_text("Optional"),
            );
            ui.end_row();

            ui.label("Shelf:");
            egui::ComboBox::from_id_salt(format!("intake_shelf_{id}"))
                .width(150.0)
                .selected_text(if form.shelf.is_empty() { "Select..." } else { form.shelf.as_str() })
                .show_ui(ui, |ui| {
                    for shelf in shelves {
                        if ui.selectable_label(form.shelf == shelf.name, &shelf.name).clicked() {
                            form.shelf = shelf.name.clone();
                        }
                    }
                });
            ui.end_row();

            ui.label("Item Value:");
            ui.add(
                egui::TextEdit::singleline(&mut form.item_value)
                    .desired_width(100.0)
                    .hint_text("0.00"),
            );
            ui.end_row();
        });
}

fn show_costs_step(app: &mut App, ui: &mut Ui) {
    let currency = app.currency().to_string();

    section(ui, "Delivery Costs", |ui| {
        egui::Grid::new("costs_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                ui.label("Base Delivery Fee:");
                ui.add(egui::TextEdit::singleline(&mut app.costs_form.base_fee).desired_width(100.0).hint_text("0.00"));
                ui.end_row();

                ui.label("Distance Charge:");
                ui.add(
                    egui::TextEdit::singleline(&mut app.costs_form.distance_charge)
                        .desired_width(100.0)
                        .hint_text("0.00"),
                );
                ui.end_row();

                ui.label("Insurance Fee:");
                ui.add(
                    egui::TextEdit::singleline(&mut app.costs_form.insurance_fee)
                        .desired_width(100.0)
                        .hint_text("0.00"),
                );
                ui.end_row();

                ui.label(RichText::new("Total:").strong());
                ui.label(RichText::new(money(&currency, app.costs_form.breakdown().total())).strong());
                ui.end_row();
            });
    });

    if let Some(session) = app.wizard.session() {
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            ui.label(format!("{} parcel(s)", session.parcels.len()));
            ui.add_space(20.0);
            ui.label(format!("Total item value: {}", money(&currency, session.total_value())));
        });
    }

    ui.add_space(15.0);

    ui.horizontal(|ui| {
        if styled_button_with_icon(ui, ARROW_LEFT, "Back").clicked() {
            app.wizard.retreat();
        }
        ui.add_space(10.0);
        if primary_button_enabled(ui, app.wizard.can_proceed(), ARROW_RIGHT, "Next").clicked() {
            app.wizard.set_costs(app.costs_form.breakdown());
            app.wizard.advance();
        }
    });
}

fn show_review_step(app: &mut App, ui: &mut Ui) {
    let currency = app.currency().to_string();
    let has_data = app.wizard.session().is_some() || app.wizard.single_draft().is_some();

    if !has_data {
        ui.colored_label(colors::WARNING, "No bulk session data available");
    } else {
        if let Some(session) = app.wizard.session() {
            section(ui, "Driver", |ui| {
                ui.label(format!("Name: {}", session.driver_name));
                ui.label(format!("Vehicle: {}", session.vehicle_number));
            });
            ui.add_space(10.0);
        }

        let drafts: Vec<_> = match (app.wizard.session(), app.wizard.single_draft()) {
            (Some(session), _) => session.parcels.iter().collect(),
            (None, Some(draft)) => vec![draft],
            (None, None) => Vec::new(),
        };

        section(ui, &format!("Parcels ({})", drafts.len()), |ui| {
            egui::Grid::new("review_grid")
                .num_columns(4)
                .striped(true)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.strong("Recipient");
                    ui.strong("Phone");
                    ui.strong("Shelf");
                    ui.strong("Value");
                    ui.end_row();

                    for draft in &drafts {
                        ui.label(draft.recipient_name());
                        ui.label(draft.phone_number());
                        ui.label(draft.shelf());
                        ui.label(money(&currency, draft.item_value()));
                        ui.end_row();
                    }
                });
        });

        ui.add_space(10.0);

        let costs = app.wizard.costs();
        section(ui, "Costs", |ui| {
            ui.label(format!("Base fee: {}", money(&currency, costs.base_fee)));
            ui.label(format!("Distance charge: {}", money(&currency, costs.distance_charge)));
            ui.label(format!("Insurance: {}", money(&currency, costs.insurance_fee)));
            ui.label(RichText::new(format!("Total: {}", money(&currency, costs.total()))).strong());
        });
    }

    ui.add_space(15.0);

    ui.horizontal(|ui| {
        if styled_button_with_icon(ui, ARROW_LEFT, "Back").clicked() {
            app.wizard.retreat();
        }
        ui.add_space(10.0);
        if primary_button_enabled(ui, has_data, CHECK, "Confirm Registration").clicked() {
            app.submit_registration();
        } else if !has_data && ui.button("Start Over").clicked() {
            app.wizard.end_session();
            app.show_toast("Registration reset", ToastKind::Success);
        }
    });
}
