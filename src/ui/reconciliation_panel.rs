//! Rider cash reconciliation.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::CHECK;

use super::app::{App, ToastKind};
use super::components::{back_button, colors, money, panel_header, primary_button_enabled, section};
use crate::data::deliveries::{self, RiderCollection};
use crate::models::registration::parse_amount;

/// Show the reconciliation panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Reconciliation", "Match cash handed in by riders against delivered parcels");

    let currency = app.currency().to_string();
    let pending = deliveries::pending_collections(&app.parcels);

    // Forget a rider who has nothing left to reconcile.
    let stale = app
        .reconcile_rider
        .as_ref()
        .is_some_and(|rider| !pending.iter().any(|c| &c.rider == rider));
    if stale {
        app.reconcile_rider = None;
    }

    ui.columns(2, |cols| {
        section(&mut cols[0], "Awaiting Reconciliation", |ui| {
            if pending.is_empty() {
                ui.label(RichText::new("All delivered parcels are reconciled").weak());
            }
            for collection in &pending {
                let selected = app.reconcile_rider.as_ref() == Some(&collection.rider);
                let text = format!(
                    "{}  ({} parcel(s), {})",
                    collection.rider,
                    collection.parcel_ids.len(),
                    money(&currency, collection.expected)
                );
                if ui.selectable_label(selected, text).clicked() {
                    app.reconcile_rider = Some(collection.rider.clone());
                    app.reconcile_collected = format!("{:.2}", collection.expected);
                }
            }
        });

        let selected = app
            .reconcile_rider
            .as_ref()
            .and_then(|rider| pending.iter().find(|c| &c.rider == rider))
            .cloned();
        show_confirm(app, &mut cols[1], selected, &currency);
    });

    ui.add_space(20.0);
    show_history(app, ui, &currency);

    go_back
}

fn show_confirm(app: &mut App, ui: &mut Ui, selected: Option<RiderCollection>, currency: &str) {
    section(ui, "Confirm Collection", |ui| {
        let Some(collection) = selected else {
            ui.label(RichText::new("Select a rider").weak());
            return;
        };

        ui.label(RichText::new(&collection.rider).strong());
        ui.label(RichText::new(collection.parcel_ids.join(", ")).weak());
        ui.add_space(10.0);

        let collected = parse_amount(&app.reconcile_collected);
        let difference = collected - collection.expected;

        egui::Grid::new("reconcile_grid")
            .num_columns(2)
            .spacing([20.0, 8.0])
            .show(ui, |ui| {
                ui.label("Expected:");
                ui.label(money(currency, collection.expected));
                ui.end_row();

                ui.label("Collected:");
                ui.add(egui::TextEdit::singleline(&mut app.reconcile_collected).desired_width(120.0));
                ui.end_row();

                ui.label("Difference:");
                let color = if difference.abs() < 0.005 {
                    colors::SUCCESS
                } else if difference < 0.0 {
                    colors::ERROR
                } else {
                    colors::WARNING
                };
                ui.colored_label(color, money(currency, difference));
                ui.end_row();
            });

        ui.add_space(10.0);

        if primary_button_enabled(ui, !app.reconcile_collected.trim().is_empty(), CHECK, "Confirm").clicked() {
            match deliveries::reconcile(&mut app.parcels, &collection.rider, collected) {
                Ok(entry) => {
                    let message = format!(
                        "Reconciled {} for {}",
                        money(currency, entry.collected),
                        entry.rider
                    );
                    app.reconciliations.push(entry);
                    app.reconcile_rider = None;
                    app.reconcile_collected.clear();
                    app.show_toast(message, ToastKind::Success);
                }
                Err(e) => app.toast_error(&e),
            }
        }
    });
}

fn show_history(app: &App, ui: &mut Ui, currency: &str) {
    section(ui, "Confirmed Today", |ui| {
        if app.reconciliations.is_empty() {
            ui.label(RichText::new("No reconciliations yet").weak());
            return;
        }

        ScrollArea::vertical().id_salt("reconcile_history").max_height(200.0).show(ui, |ui| {
            egui::Grid::new("reconcile_history_grid")
                .num_columns(5)
                .striped(true)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.strong("Time");
                    ui.strong("Rider");
                    ui.strong("Expected");
                    ui.strong("Collected");
                    ui.strong("Difference");
                    ui.end_row();

                    for entry in app.reconciliations.iter().rev() {
                        ui.label(entry.confirmed_at.format("%H:%M:%S").to_string());
                        ui.label(&entry.rider);
                        ui.label(money(currency, entry.expected));
                        ui.label(money(currency, entry.collected));
                        ui.label(money(currency, entry.difference()));
                        ui.end_row();
                    }
                });
        });
    });
}
