//! Shared UI components.

use chrono::NaiveDate;
use eframe::egui::{self, Color32, CornerRadius, Margin, Response, RichText, Sense, StrokeKind, Ui};

use crate::models::parcel::ParcelStatus;

/// Render a clickable dashboard card with dynamic size.
///
/// Returns the response which can be checked for `.clicked()`.
pub fn dashboard_card(ui: &mut Ui, title: &str, description: &str, icon: &str, size: egui::Vec2) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact(&response);

        // Scale factor based on width (200 is the reference size)
        let scale = size.x / 200.0;

        ui.painter().rect_filled(rect, 8.0, visuals.bg_fill);
        ui.painter()
            .rect_stroke(rect, 8.0, visuals.bg_stroke, StrokeKind::Outside);

        let icon_pos = egui::pos2(rect.center().x, rect.top() + size.y * 0.25);
        ui.painter().text(
            icon_pos,
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(32.0 * scale),
            colors::ACCENT,
        );

        let title_pos = egui::pos2(rect.center().x, rect.center().y + size.y * 0.07);
        ui.painter().text(
            title_pos,
            egui::Align2::CENTER_CENTER,
            title,
            egui::FontId::proportional(16.0 * scale),
            visuals.text_color(),
        );

        let desc_pos = egui::pos2(rect.center().x, rect.bottom() - size.y * 0.17);
        ui.painter().text(
            desc_pos,
            egui::Align2::CENTER_CENTER,
            description,
            egui::FontId::proportional(11.0 * scale),
            ui.visuals().weak_text_color(),
        );
    }

    response
}

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const INFO: Color32 = Color32::from_rgb(100, 150, 230);
    /// Brand orange used for primary actions.
    pub const ACCENT: Color32 = Color32::from_rgb(234, 105, 12);
    pub const DANGER: Color32 = Color32::from_rgb(226, 36, 32);
}

/// Render a back button that returns true when clicked.
pub fn back_button(ui: &mut Ui) -> bool {
    ui.button(RichText::new("< Back to Dashboard").size(14.0)).clicked()
}

/// Render a panel header with title and subtitle.
pub fn panel_header(ui: &mut Ui, title: &str, subtitle: &str) {
    ui.heading(RichText::new(title).size(24.0));
    if !subtitle.is_empty() {
        ui.label(RichText::new(subtitle).weak());
    }
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

pub fn styled_button(ui: &mut Ui, text: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(text).size(14.0)).min_size(egui::vec2(80.0, 28.0)))
}

pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(format!("{icon} {text}")).size(14.0)).min_size(egui::vec2(80.0, 28.0)))
}

/// Filled accent button for the main action on a screen.
pub fn primary_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    let label = if icon.is_empty() {
        text.to_string()
    } else {
        format!("{icon} {text}")
    };
    ui.add(
        egui::Button::new(RichText::new(label).size(14.0).color(Color32::WHITE))
            .fill(colors::ACCENT)
            .min_size(egui::vec2(90.0, 28.0)),
    )
}

/// Like [`primary_button_with_icon`] but greyed out when `enabled` is false.
pub fn primary_button_enabled(ui: &mut Ui, enabled: bool, icon: &str, text: &str) -> Response {
    ui.add_enabled_ui(enabled, |ui| primary_button_with_icon(ui, icon, text))
        .inner
}

/// Small icon button used in table rows.
pub fn action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(icon).size(16.0)).frame(false))
        .on_hover_text(tooltip)
}

pub fn danger_action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(icon).size(16.0).color(colors::DANGER)).frame(false))
        .on_hover_text(tooltip)
}

/// Render a stat card with title, value, and subtitle.
pub fn stat_card(ui: &mut Ui, title: &str, value: &str, subtitle: &str) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(150.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).heading().strong());
                if !subtitle.is_empty() {
                    ui.label(RichText::new(subtitle).small().weak());
                }
            });
        });
}

/// Rounded section frame used to group content.
pub fn section<R>(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            if !title.is_empty() {
                ui.label(RichText::new(title).strong());
                ui.add_space(10.0);
            }
            add_contents(ui)
        })
        .inner
}

pub fn status_color(status: ParcelStatus) -> Color32 {
    match status {
        ParcelStatus::Registered => colors::NEUTRAL,
        ParcelStatus::Contacted => colors::INFO,
        ParcelStatus::ReadyForDelivery => colors::WARNING,
        ParcelStatus::Assigned | ParcelStatus::PickedUp => Color32::from_rgb(170, 120, 220),
        ParcelStatus::OutForDelivery => Color32::from_rgb(110, 110, 220),
        ParcelStatus::Delivered => colors::SUCCESS,
        ParcelStatus::Failed => colors::ERROR,
    }
}

pub fn status_label(ui: &mut Ui, status: ParcelStatus) -> Response {
    ui.label(RichText::new(status.label()).color(status_color(status)).strong())
}

/// `GHC 1,234.50` style amount.
pub fn money(currency: &str, amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{currency} {sign}{grouped}.{:02}", cents % 100)
}

/// Parse date from multiple formats: "2024-1-15", "2024/1/15", "2024 1 15", "2024.1.15"
pub fn parse_flexible_date(input: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = input
        .trim()
        .split(['-', '/', ' ', '.'])
        .filter(|s| !s.is_empty())
        .collect();

    if parts.len() != 3 {
        return None;
    }

    let year: i32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let day: u32 = parts[2].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Text date field that turns red on unparseable input.
///
/// Returns the parsed date; an empty field yields `None`.
pub fn date_input(ui: &mut Ui, text: &mut String, hint: &str) -> Option<NaiveDate> {
    let parsed = parse_flexible_date(text);
    let valid = text.trim().is_empty() || parsed.is_some();

    ui.add(
        egui::TextEdit::singleline(text)
            .desired_width(100.0)
            .hint_text(hint)
            .text_color(if valid { ui.visuals().text_color() } else { colors::ERROR }),
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_grouping() {
        assert_eq!(money("GHC", 0.0), "GHC 0.00");
        assert_eq!(money("GHC", 1200.0), "GHC 1,200.00");
        assert_eq!(money("GHC", 15750.5), "GHC 15,750.50");
        assert_eq!(money("GHC", 1_000_000.0), "GHC 1,000,000.00");
        assert_eq!(money("GHC", -20.0), "GHC -20.00");
    }

    #[test]
    fn test_parse_flexible_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(parse_flexible_date("2024-01-15"), expected);
        assert_eq!(parse_flexible_date("2024/1/15"), expected);
        assert_eq!(parse_flexible_date(" 2024.1.15 "), expected);
        assert_eq!(parse_flexible_date("2024-13-01"), None);
        assert_eq!(parse_flexible_date(""), None);
    }
}
