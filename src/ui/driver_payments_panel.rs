//! Rider payouts.

use chrono::Local;
use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{FILE_XLS, MONEY, STAR};

use super::app::{App, PaymentForm, ToastKind};
use super::components::{
    action_button, back_button, colors, money, panel_header, primary_button_enabled, section, stat_card,
    styled_button, styled_button_with_icon,
};
use crate::data::drivers::{self, DriverSort};
use crate::models::finance::PaymentStatus;
use crate::models::registration::parse_amount;

fn payment_color(status: PaymentStatus) -> egui::Color32 {
    match status {
        PaymentStatus::Paid => colors::SUCCESS,
        PaymentStatus::Partial => colors::WARNING,
        PaymentStatus::Pending => colors::ERROR,
    }
}

/// Show the driver payments panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Driver Payments", "Rider earnings and outstanding balances");

    let currency = app.currency().to_string();
    let totals = drivers::totals(&app.drivers);

    ui.horizontal_wrapped(|ui| {
        stat_card(ui, "Total Earned", &money(&currency, totals.earned), "");
        stat_card(ui, "Paid Out", &money(&currency, totals.paid), "");
        stat_card(ui, "Outstanding", &money(&currency, totals.outstanding), "");
        stat_card(ui, "Deliveries", &totals.deliveries.to_string(), "Completed");
    });

    ui.add_space(10.0);

    ui.horizontal(|ui| {
        for (status, count, share) in drivers::status_distribution(&app.drivers) {
            ui.colored_label(
                payment_color(status),
                format!("{}: {count} ({share:.0}%)", status.label()),
            );
            ui.add_space(15.0);
        }
    });

    ui.add_space(10.0);

    ui.horizontal(|ui| {
        ui.label("Status:");
        egui::ComboBox::from_id_salt("driver_status_filter")
            .width(120.0)
            .selected_text(app.driver_status_filter.map(|s| s.label()).unwrap_or("All"))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut app.driver_status_filter, None, "All");
                for status in PaymentStatus::ALL {
                    ui.selectable_value(&mut app.driver_status_filter, Some(status), status.label());
                }
            });

        ui.add_space(10.0);

        ui.label("Sort by:");
        egui::ComboBox::from_id_salt("driver_sort")
            .width(170.0)
            .selected_text(app.driver_sort.label())
            .show_ui(ui, |ui| {
                for sort in DriverSort::ALL {
                    ui.selectable_value(&mut app.driver_sort, sort, sort.label());
                }
            });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if styled_button_with_icon(ui, FILE_XLS, "Export Excel").clicked() {
                app.export_driver_payments();
            }
        });
    });

    ui.add_space(15.0);

    let mut pay = None;

    section(ui, "Riders", |ui| {
        let rows = drivers::filter_and_sort(&app.drivers, app.driver_status_filter, app.driver_sort);

        ScrollArea::vertical().id_salt("driver_payments_scroll").show(ui, |ui| {
            egui::Grid::new("driver_payments_grid")
                .num_columns(9)
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Rider");
                    ui.strong("Station");
                    ui.strong("Deliveries");
                    ui.strong("Earned");
                    ui.strong("Paid");
                    ui.strong("Outstanding");
                    ui.strong("Status");
                    ui.strong("Last Paid");
                    ui.strong("");
                    ui.end_row();

                    for driver in &rows {
                        ui.vertical(|ui| {
                            ui.label(&driver.name);
                            ui.label(RichText::new(format!("{} {STAR} {:.1}", driver.id, driver.rating)).small().weak());
                        });
                        ui.label(&driver.station);
                        ui.label(driver.completed_deliveries.to_string());
                        ui.label(money(&currency, driver.total_earned));
                        ui.label(money(&currency, driver.amount_paid));
                        ui.label(money(&currency, driver.outstanding_balance));
                        ui.colored_label(payment_color(driver.payment_status), driver.payment_status.label());
                        ui.label(
                            driver
                                .last_payment_date
                                .map(|d| d.to_string())
                                .unwrap_or_else(|| "-".to_string()),
                        );
                        let payable = driver.outstanding_balance > 0.0;
                        if ui
                            .add_enabled_ui(payable, |ui| action_button(ui, MONEY, "Process payment"))
                            .inner
                            .clicked()
                        {
                            pay = Some(PaymentForm::for_driver(driver));
                        }
                        ui.end_row();
                    }
                });

            if rows.is_empty() {
                ui.add_space(10.0);
                ui.label(RichText::new("No riders match the current filter").weak());
            }
        });
    });

    if let Some(form) = pay {
        app.payment_form = form;
    }

    if app.payment_form.is_open {
        show_payment_dialog(app, ui.ctx(), &currency);
    }

    go_back
}

fn show_payment_dialog(app: &mut App, ctx: &egui::Context, currency: &str) {
    egui::Window::new("Process Payment")
        .collapsible(false)
        .resizable(false)
        .default_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            egui::Grid::new("payment_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Rider:");
                    ui.label(RichText::new(&app.payment_form.driver_name).strong());
                    ui.end_row();

                    ui.label("Outstanding:");
                    ui.label(money(currency, app.payment_form.outstanding));
                    ui.end_row();

                    ui.label("Amount:");
                    ui.add(egui::TextEdit::singleline(&mut app.payment_form.amount).desired_width(140.0));
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    app.payment_form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let amount = parse_amount(&app.payment_form.amount);
                    if primary_button_enabled(ui, amount > 0.0, MONEY, "Pay").clicked() {
                        let today = Local::now().date_naive();
                        let driver_id = app.payment_form.driver_id.clone();
                        match drivers::process_payment(&mut app.drivers, &driver_id, amount, today) {
                            Ok(status) => {
                                let message = format!(
                                    "Paid {} to {} ({})",
                                    money(currency, amount),
                                    app.payment_form.driver_name,
                                    status.label()
                                );
                                app.payment_form.reset();
                                app.show_toast(message, ToastKind::Success);
                            }
                            Err(e) => app.toast_error(&e),
                        }
                    }
                });
            });
        });
}
