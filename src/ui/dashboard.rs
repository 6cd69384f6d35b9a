//! Dashboard panel with stats, navigation cards, quick actions, and activity log.

use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARCHIVE_BOX, MAGNIFYING_GLASS, PACKAGE, PHONE, SHIELD_CHECK, TRUCK};

use super::app::{App, LogLevel, Panel};
use super::components::{colors, dashboard_card, money, stat_card};
use crate::data::{call_center, deliveries};
use crate::models::parcel::ParcelStatus;

/// Show the dashboard panel.
///
/// Returns `Some(panel)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next_panel = None;

    let station_name = app
        .session
        .current_station()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "No station".to_string());

    ui.vertical_centered(|ui| {
        ui.add_space(30.0);

        // Header
        ui.label(RichText::new("Parcel Desk").size(32.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new(format!("{} · {}", station_name, app.session.user_name())).size(14.0).weak());

        ui.add_space(30.0);

        let (uncontacted, _, _) = call_center::status_counts(&app.call_queue);
        let awaiting = app
            .parcels
            .iter()
            .filter(|p| p.status == ParcelStatus::Registered)
            .count();

        // Stat cards row
        ui.horizontal(|ui| {
            let available = ui.available_width();
            let start_offset = ((available - 680.0) / 2.0).max(0.0);
            ui.add_space(start_offset);

            stat_card(ui, "Parcels", &app.parcels.len().to_string(), "Across all stations");
            stat_card(ui, "Awaiting Contact", &uncontacted.to_string(), "Call-center queue");
            stat_card(
                ui,
                "Out with Riders",
                &deliveries::active_deliveries(&app.parcels).len().to_string(),
                &format!("{awaiting} newly registered"),
            );
            stat_card(
                ui,
                "Pending Payouts",
                &money(app.currency(), app.financial_summary.pending_payments),
                "Owed to riders",
            );
        });

        ui.add_space(30.0);

        // Navigation cards row
        let available = ui.available_width();
        let num_cards = 6.0;
        let spacing = 20.0;
        let total_spacing = spacing * (num_cards - 1.0);
        let card_width = ((available - total_spacing) / num_cards).clamp(130.0, 220.0);
        let card_height = card_width * 0.75;
        let card_size = egui::vec2(card_width, card_height);
        let total_width = card_width * num_cards + total_spacing;
        let start_offset = ((available - total_width) / 2.0).max(0.0);

        let cards = [
            (Panel::Registration, "Register", "New parcels", PACKAGE),
            (Panel::ParcelSearch, "Search", "Find parcels", MAGNIFYING_GLASS),
            (Panel::CallCenter, "Call Center", "Contact recipients", PHONE),
            (Panel::Shelves, "Shelves", "Storage slots", ARCHIVE_BOX),
            (Panel::Deliveries, "Assignments", "Riders & runs", TRUCK),
            (Panel::Reconciliation, "Reconcile", "Rider cash", SHIELD_CHECK),
        ];

        ui.horizontal(|ui| {
            ui.add_space(start_offset);

            for (i, (panel, title, desc, icon)) in cards.into_iter().enumerate() {
                if i > 0 {
                    ui.add_space(spacing);
                }
                if dashboard_card(ui, title, desc, icon, card_size).clicked() {
                    next_panel = Some(panel);
                }
            }
        });

        ui.add_space(30.0);
    });

    // Two-column layout: Quick Actions | Recent Activity
    let available_width = ui.available_width();
    let column_width = (available_width - 40.0) / 2.0;

    ui.horizontal(|ui| {
        ui.add_space(10.0);

        // Left column - Quick Actions
        ui.vertical(|ui| {
            ui.set_width(column_width);

            egui::Frame::new()
                .fill(ui.style().visuals.extreme_bg_color)
                .inner_margin(Margin::same(15))
                .corner_radius(CornerRadius::same(8))
                .show(ui, |ui| {
                    ui.set_min_width(column_width - 30.0);

                    ui.label(RichText::new("Quick Actions").strong());
                    ui.add_space(10.0);

                    if ui.button("Start Bulk Drop-off").clicked() {
                        app.wizard.end_session();
                        app.wizard.choose_mode(crate::registration::EntryMode::Bulk);
                        next_panel = Some(Panel::Registration);
                    }

                    ui.add_space(5.0);

                    if ui.button("Export Parcel List").clicked() {
                        app.search_query.reset();
                        app.export_parcel_search();
                    }

                    ui.add_space(5.0);

                    if ui.button("Open Admin Dashboard").clicked() {
                        next_panel = Some(Panel::AdminDashboard);
                    }
                });
        });

        ui.add_space(20.0);

        // Right column - Recent Activity
        ui.vertical(|ui| {
            ui.set_width(column_width);

            egui::Frame::new()
                .fill(ui.style().visuals.extreme_bg_color)
                .inner_margin(Margin::same(15))
                .corner_radius(CornerRadius::same(8))
                .show(ui, |ui| {
                    ui.set_min_width(column_width - 30.0);

                    ui.label(RichText::new("Recent Activity").strong());
                    ui.add_space(10.0);

                    ScrollArea::vertical().max_height(150.0).show(ui, |ui| {
                        if app.log_messages.is_empty() {
                            ui.label(RichText::new("No recent activity").weak());
                        } else {
                            for entry in app.log_messages.iter().rev().take(10) {
                                let color = match entry.level {
                                    LogLevel::Info => Color32::GRAY,
                                    LogLevel::Success => colors::SUCCESS,
                                    LogLevel::Warning => colors::WARNING,
                                    LogLevel::Error => colors::ERROR,
                                };

                                ui.horizontal(|ui| {
                                    ui.label(
                                        RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                            .small()
                                            .color(Color32::DARK_GRAY),
                                    );
                                    ui.label(RichText::new(&entry.message).color(color));
                                });
                            }
                        }
                    });
                });
        });
    });

    next_panel
}
