//! Station financial dashboard.

use eframe::egui::{self, RichText, ScrollArea, Ui};

use super::app::App;
use super::components::{back_button, money, panel_header, section, stat_card};
use crate::data::finance::percent;

/// Show the financial dashboard.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    let station = app
        .session
        .current_station()
        .map(|s| s.name.clone())
        .unwrap_or_default();
    panel_header(ui, "Financial Dashboard", &station);

    let currency = app.currency().to_string();
    let summary = &app.financial_summary;
    let net = summary.total_delivery_earnings + summary.total_item_collections - summary.total_driver_payments;

    ui.horizontal_wrapped(|ui| {
        stat_card(
            ui,
            "Delivery Earnings",
            &money(&currency, summary.total_delivery_earnings),
            "Fees charged",
        );
        stat_card(
            ui,
            "Item Collections",
            &money(&currency, summary.total_item_collections),
            "Cash on delivery",
        );
        stat_card(
            ui,
            "Driver Payments",
            &money(&currency, summary.total_driver_payments),
            "Paid to riders",
        );
        stat_card(
            ui,
            "Pending Payments",
            &money(&currency, summary.pending_payments),
            "Still owed",
        );
        stat_card(ui, "Net Revenue", &money(&currency, net), "");
    });

    ui.add_space(20.0);

    let total_earned: f64 = summary.driver_breakdown.iter().map(|d| d.amount_earned).sum();

    section(ui, "Driver Breakdown", |ui| {
        ScrollArea::vertical().id_salt("driver_breakdown").show(ui, |ui| {
            egui::Grid::new("driver_breakdown_grid")
                .num_columns(5)
                .striped(true)
                .min_col_width(80.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Driver ID");
                    ui.strong("Name");
                    ui.strong("Deliveries");
                    ui.strong("Earned");
                    ui.strong("Share");
                    ui.end_row();

                    for driver in &summary.driver_breakdown {
                        ui.label(&driver.driver_id);
                        ui.label(&driver.driver_name);
                        ui.label(driver.deliveries_completed.to_string());
                        ui.label(money(&currency, driver.amount_earned));
                        ui.label(format!("{:.1}%", percent(driver.amount_earned, total_earned)));
                        ui.end_row();
                    }
                });

            if summary.driver_breakdown.is_empty() {
                ui.label(RichText::new("No rider activity yet").weak());
            }
        });
    });

    go_back
}
