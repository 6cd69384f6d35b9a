//! Package assignments and active delivery tracking.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROW_RIGHT, TRUCK, X_CIRCLE};

use super::app::{App, ToastKind};
use super::components::{
    action_button, back_button, danger_action_button, money, panel_header, primary_button_enabled, section,
    status_label,
};
use crate::data::deliveries;

/// Row action picked in the active deliveries table.
enum RowAction {
    Advance(String),
    Fail(String),
}

/// Show the deliveries panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Package Assignments", "Hand ready parcels to riders and follow them out");

    ScrollArea::vertical().id_salt("deliveries_scroll").show(ui, |ui| {
        show_assignments(app, ui);
        ui.add_space(20.0);
        show_active(app, ui);
    });

    go_back
}

fn show_assignments(app: &mut App, ui: &mut Ui) {
    let currency = app.currency().to_string();

    section(ui, "Ready for Assignment", |ui| {
        let ready: Vec<(String, String, String, f64)> = deliveries::ready_for_assignment(&app.parcels)
            .into_iter()
            .map(|p| (p.id.clone(), p.recipient_name.clone(), p.address.clone(), p.item_value))
            .collect();

        // Drop selections that are no longer assignable.
        app.assignment_selection
            .retain(|id| ready.iter().any(|(ready_id, ..)| ready_id == id));

        if ready.is_empty() {
            ui.label(RichText::new("No parcels are ready for delivery").weak());
            return;
        }

        egui::Grid::new("ready_grid")
            .num_columns(4)
            .striped(true)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.strong("");
                ui.strong("Parcel");
                ui.strong("Recipient / Address");
                ui.strong("Value");
                ui.end_row();

                for (id, recipient, address, value) in &ready {
                    let mut checked = app.assignment_selection.contains(id);
                    if ui.checkbox(&mut checked, "").changed() {
                        if checked {
                            app.assignment_selection.push(id.clone());
                        } else {
                            app.assignment_selection.retain(|s| s != id);
                        }
                    }
                    ui.label(id);
                    ui.label(format!("{recipient}  {address}"));
                    ui.label(money(&currency, *value));
                    ui.end_row();
                }
            });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            ui.label("Rider:");
            egui::ComboBox::from_id_salt("assignment_rider")
                .width(200.0)
                .selected_text(app.assignment_rider.as_deref().unwrap_or("Select..."))
                .show_ui(ui, |ui| {
                    for driver in &app.drivers {
                        if ui
                            .selectable_label(app.assignment_rider.as_ref() == Some(&driver.name), &driver.name)
                            .clicked()
                        {
                            app.assignment_rider = Some(driver.name.clone());
                        }
                    }
                });

            ui.add_space(10.0);

            let ready_to_assign = app.assignment_rider.is_some() && !app.assignment_selection.is_empty();
            let label = format!("Assign {} parcel(s)", app.assignment_selection.len());
            if primary_button_enabled(ui, ready_to_assign, TRUCK, &label).clicked() {
                let rider = app.assignment_rider.clone().unwrap_or_default();
                match deliveries::assign(&mut app.parcels, &app.assignment_selection, &rider) {
                    Ok(count) => {
                        app.assignment_selection.clear();
                        app.show_toast(format!("{count} parcel(s) assigned to {rider}"), ToastKind::Success);
                    }
                    Err(e) => app.toast_error(&e),
                }
            }
        });
    });
}

fn show_active(app: &mut App, ui: &mut Ui) {
    let mut action = None;

    section(ui, "Active Deliveries", |ui| {
        let active = deliveries::active_deliveries(&app.parcels);
        if active.is_empty() {
            ui.label(RichText::new("No parcels are out with riders").weak());
            return;
        }

        egui::Grid::new("active_grid")
            .num_columns(5)
            .striped(true)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.strong("Parcel");
                ui.strong("Recipient");
                ui.strong("Rider");
                ui.strong("Status");
                ui.strong("Actions");
                ui.end_row();

                for parcel in active {
                    ui.label(&parcel.id);
                    ui.label(&parcel.recipient_name);
                    ui.label(parcel.rider_display());
                    status_label(ui, parcel.status);

                    ui.horizontal(|ui| {
                        if let Some(next) = parcel.status.next_delivery_step()
                            && action_button(ui, ARROW_RIGHT, &format!("Mark {}", next.label())).clicked()
                        {
                            action = Some(RowAction::Advance(parcel.id.clone()));
                        }
                        ui.add_space(4.0);
                        if danger_action_button(ui, X_CIRCLE, "Mark failed").clicked() {
                            action = Some(RowAction::Fail(parcel.id.clone()));
                        }
                    });
                    ui.end_row();
                }
            });
    });

    match action {
        Some(RowAction::Advance(id)) => match deliveries::advance_delivery(&mut app.parcels, &id) {
            Ok(status) => app.log_success(format!("{id} is now {}", status.label())),
            Err(e) => app.toast_error(&e),
        },
        Some(RowAction::Fail(id)) => match deliveries::mark_failed(&mut app.parcels, &id) {
            Ok(()) => app.log_warning(format!("{id} marked as failed delivery")),
            Err(e) => app.toast_error(&e),
        },
        None => {}
    }
}
