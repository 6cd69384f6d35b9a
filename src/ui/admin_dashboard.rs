//! System-wide admin dashboard.

use eframe::egui::{self, ProgressBar, Ui};
use egui_phosphor::regular::{BUILDINGS, CHART_BAR, LIST_MAGNIFYING_GLASS, USERS, WALLET};

use super::app::{App, Panel};
use super::components::{back_button, dashboard_card, money, panel_header, section, stat_card};
use crate::data::finance::status_percentages;

/// Show the admin dashboard.
///
/// Returns `Some(panel)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next_panel = None;

    if back_button(ui) {
        next_panel = Some(Panel::Dashboard);
    }

    panel_header(ui, "Admin Dashboard", "All stations");

    let currency = app.currency().to_string();
    let metrics = &app.system_metrics;

    ui.horizontal_wrapped(|ui| {
        stat_card(ui, "Stations", &metrics.total_stations.to_string(), "");
        stat_card(ui, "Parcels", &metrics.total_parcels.to_string(), "All time");
        stat_card(
            ui,
            "Delivery Earnings",
            &money(&currency, metrics.total_delivery_earnings),
            "",
        );
        stat_card(
            ui,
            "Driver Payments",
            &money(&currency, metrics.total_driver_payments),
            "",
        );
        stat_card(
            ui,
            "Success Rate",
            &format!("{:.1}%", metrics.delivery_success_rate),
            "Delivered vs attempted",
        );
        stat_card(ui, "Active Users", &metrics.active_users.to_string(), "");
    });

    ui.add_space(20.0);

    let card_size = egui::vec2(160.0, 120.0);
    let cards = [
        (Panel::Stations, "Stations", "Locations & hubs", BUILDINGS),
        (Panel::Users, "Users", "Roles & access", USERS),
        (Panel::ParcelOverview, "Parcels", "System overview", LIST_MAGNIFYING_GLASS),
        (Panel::FinancialReports, "Reports", "Revenue reports", CHART_BAR),
        (Panel::DriverPayments, "Payouts", "Rider payments", WALLET),
    ];
    ui.horizontal(|ui| {
        for (panel, title, desc, icon) in cards {
            if dashboard_card(ui, title, desc, icon, card_size).clicked() {
                next_panel = Some(panel);
            }
            ui.add_space(15.0);
        }
    });

    ui.add_space(20.0);

    ui.columns(2, |cols| {
        section(&mut cols[0], "Parcels by Status", |ui| {
            egui::Grid::new("status_breakdown_grid")
                .num_columns(3)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    for (status, count, share) in status_percentages(&app.status_counts) {
                        ui.label(status);
                        ui.label(count.to_string());
                        ui.add(
                            ProgressBar::new((share / 100.0) as f32)
                                .desired_width(160.0)
                                .text(format!("{share:.1}%")),
                        );
                        ui.end_row();
                    }
                });
        });

        section(&mut cols[1], "Station Performance", |ui| {
            egui::Grid::new("station_performance_grid")
                .num_columns(5)
                .striped(true)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Station");
                    ui.strong("Parcels");
                    ui.strong("Earnings");
                    ui.strong("Owed");
                    ui.strong("Success");
                    ui.end_row();

                    for station in &app.station_performance {
                        ui.label(&station.station_name);
                        ui.label(station.total_parcels.to_string());
                        ui.label(money(&currency, station.delivery_earnings));
                        ui.label(money(&currency, station.driver_payments_owed));
                        ui.label(format!("{:.1}%", station.success_rate));
                        ui.end_row();
                    }
                });
        });
    });

    next_panel
}
