//! Call-center queue: contact recipients and record delivery preferences.

use chrono::Local;
use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{FLOPPY_DISK, PHONE};

use super::app::{App, ToastKind};
use super::components::{
    back_button, colors, money, panel_header, primary_button_with_icon, section, stat_card, styled_button,
};
use crate::data::call_center;
use crate::models::call_center::{ContactStatus, DeliveryPreference};

/// Show the call center panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Call Center", "Contact recipients to arrange pickup or delivery");

    let (uncontacted, contacted, ready) = call_center::status_counts(&app.call_queue);
    ui.horizontal(|ui| {
        stat_card(ui, "Uncontacted", &uncontacted.to_string(), "Waiting for a call");
        stat_card(ui, "Contacted", &contacted.to_string(), "");
        stat_card(ui, "Ready for Delivery", &ready.to_string(), "Preferences recorded");
    });

    ui.add_space(15.0);

    ui.columns(2, |cols| {
        show_queue(app, &mut cols[0]);
        show_contact_form(app, &mut cols[1]);
    });

    go_back
}

fn show_queue(app: &mut App, ui: &mut Ui) {
    let currency = app.currency().to_string();

    section(ui, "Uncontacted Parcels", |ui| {
        ScrollArea::vertical().id_salt("call_queue_scroll").max_height(420.0).show(ui, |ui| {
            let queue = call_center::uncontacted(&app.call_queue);
            if queue.is_empty() {
                ui.label(RichText::new("Everyone has been contacted").weak());
            }

            let mut clicked = None;
            for parcel in queue {
                let selected = app.selected_call.as_deref() == Some(parcel.id.as_str());
                let text = format!(
                    "{}  {}  {}  ({})",
                    parcel.id,
                    parcel.recipient_name,
                    parcel.phone_number,
                    money(&currency, parcel.item_value)
                );
                if ui.selectable_label(selected, text).clicked() {
                    clicked = Some(parcel.id.clone());
                }
            }

            if let Some(id) = clicked {
                app.selected_call = Some(id);
                app.contact_form.reset();
            }
        });
    });
}

fn show_contact_form(app: &mut App, ui: &mut Ui) {
    let Some(parcel) = app
        .selected_call
        .as_ref()
        .and_then(|id| app.call_queue.iter().find(|p| &p.id == id))
        .cloned()
    else {
        section(ui, "Delivery Preference", |ui| {
            ui.label(RichText::new("Select a parcel to record the customer's choice").weak());
        });
        return;
    };

    section(ui, "Delivery Preference", |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(PHONE).color(colors::ACCENT));
            ui.label(RichText::new(&parcel.recipient_name).strong());
            ui.label(&parcel.phone_number);
        });
        ui.label(
            RichText::new(format!("{} · {} · shelf {}", parcel.id, parcel.item_description, parcel.shelf_location)).weak(),
        );

        ui.add_space(10.0);

        let form = &mut app.contact_form;
        ui.horizontal(|ui| {
            if ui
                .selectable_label(form.preference == DeliveryPreference::HomeDelivery, "Home Delivery")
                .clicked()
            {
                form.preference = DeliveryPreference::HomeDelivery;
            }
            if ui
                .selectable_label(form.preference == DeliveryPreference::Pickup, "Pickup at Station")
                .clicked()
            {
                form.preference = DeliveryPreference::Pickup;
            }
        });

        ui.add_space(10.0);

        egui::Grid::new("contact_form_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                if form.preference == DeliveryPreference::HomeDelivery {
                    ui.label("Address:");
                    ui.add(egui::TextEdit::singleline(&mut form.address).desired_width(260.0));
                    ui.end_row();

                    ui.label("Delivery Fee:");
                    ui.add(
                        egui::TextEdit::singleline(&mut form.delivery_fee)
                            .desired_width(100.0)
                            .hint_text("0.00"),
                    );
                    ui.end_row();
                }

                ui.label("Preferred Date:");
                ui.horizontal(|ui| {
                    let mut has_date = form.preferred_date.is_some();
                    if ui.checkbox(&mut has_date, "").changed() {
                        form.preferred_date = has_date.then(|| Local::now().date_naive());
                    }
                    if let Some(date) = form.preferred_date.as_mut() {
                        ui.add(egui_extras::DatePickerButton::new(date).id_salt("preferred_date"));
                    }
                });
                ui.end_row();

                ui.label("Notes:");
                ui.add(
                    egui::TextEdit::multiline(&mut form.notes)
                        .desired_width(260.0)
                        .desired_rows(3),
                );
                ui.end_row();
            });

        ui.add_space(15.0);

        ui.horizontal(|ui| {
            if styled_button(ui, "Cancel").clicked() {
                app.selected_call = None;
                app.contact_form.reset();
            }
            ui.add_space(10.0);
            if primary_button_with_icon(ui, FLOPPY_DISK, "Save Preferences").clicked() {
                save(app, &parcel.id, &parcel.recipient_name);
            }
        });
    });

    if parcel.status != ContactStatus::Uncontacted {
        ui.add_space(10.0);
        ui.colored_label(colors::WARNING, "This parcel already has preferences recorded");
    }
}

fn save(app: &mut App, id: &str, recipient: &str) {
    let outcome = match app.contact_form.to_outcome() {
        Ok(outcome) => outcome,
        Err(e) => {
            app.toast_error(&e);
            return;
        }
    };

    match call_center::save_preferences(&mut app.call_queue, &mut app.parcels, id, outcome) {
        Ok(()) => {
            app.selected_call = None;
            app.contact_form.reset();
            app.show_toast(format!("Preferences saved for {recipient}"), ToastKind::Success);
        }
        Err(e) => app.toast_error(&e),
    }
}
