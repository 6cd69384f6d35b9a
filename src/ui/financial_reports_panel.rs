//! Daily and per-station financial reports.

use eframe::egui::{self, ProgressBar, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{CALENDAR, FILE_XLS, STOREFRONT};

use super::app::{App, ReportView};
use super::components::{back_button, date_input, money, panel_header, section, stat_card, styled_button, styled_button_with_icon};
use crate::data::finance::{self, FinancialTotals};

/// Show the financial reports panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Financial Reports", "Revenue, collections and rider payouts");

    ui.horizontal(|ui| {
        let view = &mut app.report_filter.view;
        ui.selectable_value(view, ReportView::Daily, format!("{CALENDAR} Daily"));
        ui.selectable_value(view, ReportView::Station, format!("{STOREFRONT} By Station"));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if styled_button_with_icon(ui, FILE_XLS, "Export Excel").clicked() {
                app.export_financial_report();
            }
        });
    });

    ui.add_space(15.0);

    let currency = app.currency().to_string();

    ScrollArea::vertical().id_salt("financial_reports_scroll").show(ui, |ui| match app.report_filter.view {
        ReportView::Daily => show_daily(app, ui, &currency),
        ReportView::Station => show_stations(app, ui, &currency),
    });

    go_back
}

fn show_totals(ui: &mut Ui, totals: &FinancialTotals, currency: &str) {
    ui.horizontal_wrapped(|ui| {
        stat_card(
            ui,
            "Delivery Fees",
            &money(currency, totals.delivery_fees),
            &format!("{:.1}% of gross", totals.share_of_gross(totals.delivery_fees)),
        );
        stat_card(
            ui,
            "Item Collections",
            &money(currency, totals.item_collections),
            &format!("{:.1}% of gross", totals.share_of_gross(totals.item_collections)),
        );
        stat_card(ui, "Driver Payments", &money(currency, totals.driver_payments), "");
        stat_card(
            ui,
            "Net Revenue",
            &money(currency, totals.net_revenue()),
            &format!("{:.1}% margin", totals.margin_percent()),
        );
    });
}

fn show_daily(app: &mut App, ui: &mut Ui, currency: &str) {
    ui.horizontal(|ui| {
        ui.label("From:");
        date_input(ui, &mut app.report_filter.start_date_input, "YYYY-MM-DD");
        ui.label("To:");
        date_input(ui, &mut app.report_filter.end_date_input, "YYYY-MM-DD");
        ui.add_space(10.0);
        if styled_button(ui, "All Dates").clicked() {
            app.report_filter.start_date_input.clear();
            app.report_filter.end_date_input.clear();
        }
    });

    ui.add_space(10.0);

    let days = app.report_filter.daily_rows(&app.daily_financials);
    show_totals(ui, &finance::daily_totals(&days), currency);

    ui.add_space(15.0);

    section(ui, "Daily Breakdown", |ui| {
        if days.is_empty() {
            ui.label(RichText::new("No days in the selected range").weak());
            return;
        }

        egui::Grid::new("daily_report_grid")
            .num_columns(5)
            .striped(true)
            .min_col_width(90.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Date");
                ui.strong("Delivery Fees");
                ui.strong("Collections");
                ui.strong("Driver Payments");
                ui.strong("Net Revenue");
                ui.end_row();

                for day in &days {
                    ui.label(day.date.format("%a %d %b %Y").to_string());
                    ui.label(money(currency, day.delivery_fees));
                    ui.label(money(currency, day.item_collections));
                    ui.label(money(currency, day.driver_payments));
                    ui.label(RichText::new(money(currency, day.net_revenue())).strong());
                    ui.end_row();
                }
            });
    });
}

fn show_stations(app: &App, ui: &mut Ui, currency: &str) {
    let stations = &app.station_financials;
    show_totals(ui, &finance::station_totals(stations), currency);

    ui.add_space(15.0);

    section(ui, "Station Breakdown", |ui| {
        egui::Grid::new("station_report_grid")
            .num_columns(6)
            .striped(true)
            .min_col_width(90.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Station");
                ui.strong("Delivery Fees");
                ui.strong("Collections");
                ui.strong("Driver Payments");
                ui.strong("Net Revenue");
                ui.strong("Margin");
                ui.end_row();

                for station in stations {
                    ui.label(&station.station);
                    ui.label(money(currency, station.delivery_fees));
                    ui.label(money(currency, station.item_collections));
                    ui.label(money(currency, station.driver_payments));
                    ui.label(RichText::new(money(currency, station.net_revenue)).strong());
                    ui.label(format!("{:.1}%", station.margin_percent()));
                    ui.end_row();
                }
            });
    });

    ui.add_space(15.0);

    section(ui, "Share of Net Revenue", |ui| {
        egui::Grid::new("revenue_share_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                for (station, share) in finance::revenue_shares(stations) {
                    ui.label(station);
                    ui.add(
                        ProgressBar::new((share / 100.0) as f32)
                            .desired_width(240.0)
                            .text(format!("{share:.1}%")),
                    );
                    ui.end_row();
                }
            });
    });
}
