//! CSV and Excel export functionality.

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};

use crate::config::ExportConfig;
use crate::error::Result;
use crate::models::finance::{DailyFinancial, DriverPayment, StationFinancial};
use crate::models::parcel::Parcel;

/// Output file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
        }
    }

    fn filter_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV Files",
            ExportFormat::Excel => "Excel Files",
        }
    }
}

/// Render rows as CSV.
///
/// Every field, header included, is wrapped in double quotes. Lines are
/// joined with `\n` and embedded quotes are written as-is.
pub fn to_csv<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(quote_row(headers.iter().copied()));
    for row in rows {
        lines.push(quote_row(row.iter().map(|f| f.as_ref())));
    }
    lines.join("\n")
}

fn quote_row<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields.map(|f| format!("\"{f}\"")).collect::<Vec<_>>().join(",")
}

pub const PARCEL_SEARCH_HEADERS: [&str; 7] = [
    "Parcel ID",
    "Recipient Name",
    "Phone",
    "Address",
    "Shelf",
    "Status",
    "Registered Date",
];

pub const PARCEL_OVERVIEW_HEADERS: [&str; 9] = [
    "Parcel ID",
    "Station",
    "Recipient",
    "Phone",
    "Status",
    "Shelf",
    "Rider",
    "Delivery Type",
    "Date Registered",
];

/// Rows for the Parcel Search export.
pub fn parcel_search_rows(parcels: &[&Parcel]) -> Vec<Vec<String>> {
    parcels
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.recipient_name.clone(),
                p.phone_number.clone(),
                p.address.clone(),
                p.shelf_location.clone(),
                p.status.label().to_string(),
                p.registered_date.to_string(),
            ]
        })
        .collect()
}

/// Rows for the system-wide parcel overview export.
pub fn parcel_overview_rows(parcels: &[&Parcel]) -> Vec<Vec<String>> {
    parcels
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.station.clone(),
                p.recipient_name.clone(),
                p.phone_number.clone(),
                p.status.code().to_string(),
                p.shelf_location.clone(),
                p.rider_display().to_string(),
                p.delivery_type.label().to_string(),
                p.registered_date.to_string(),
            ]
        })
        .collect()
}

/// Write CSV content to disk.
pub fn write_csv(content: &str, path: &Path) -> Result<()> {
    std::fs::write(path, content)?;
    Ok(())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str, format: ExportFormat) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter(format.filter_name(), &[format.extension()])
        .save_file()
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str, format: ExportFormat) -> String {
    let now = Local::now();
    format!(
        "{prefix}_{ts}.{ext}",
        ts = now.format("%Y%m%d_%H%M%S"),
        ext = format.extension()
    )
}

/// Where to write an export: ask the user, or use the configured directory.
///
/// `None` means the user cancelled the dialog.
pub fn resolve_export_path(config: &ExportConfig, default_name: &str, format: ExportFormat) -> Option<PathBuf> {
    if config.use_save_dialog {
        return show_save_dialog(default_name, format);
    }

    let dir = config.directory.clone().unwrap_or_else(|| PathBuf::from("."));
    Some(dir.join(default_name))
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
}

/// Write the header row and column widths.
fn write_headers(worksheet: &mut Worksheet, headers: &[(&str, f64)]) -> std::result::Result<(), XlsxError> {
    let format = header_format();
    for (col, (header, width)) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &format)?;
        worksheet.set_column_width(col as u16, *width)?;
    }
    Ok(())
}

/// Autofilter over the data and a frozen header row.
fn finish_sheet(worksheet: &mut Worksheet, rows: usize, last_col: u16) -> std::result::Result<(), XlsxError> {
    if rows > 0 {
        worksheet.autofilter(0, 0, rows as u32, last_col)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

/// Export rider payouts to an Excel file.
pub fn export_driver_payments_to_excel(drivers: &[&DriverPayment], path: &Path) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Driver Payments")?;

    let money = Format::new().set_num_format("#,##0.00");

    write_headers(
        worksheet,
        &[
            ("Driver ID", 12.0),
            ("Name", 25.0),
            ("Station", 15.0),
            ("Deliveries", 12.0),
            ("Total Earned", 14.0),
            ("Amount Paid", 14.0),
            ("Outstanding", 14.0),
            ("Status", 10.0),
            ("Last Payment", 14.0),
            ("Rating", 8.0),
        ],
    )?;

    for (idx, d) in drivers.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, &d.id)?;
        worksheet.write_string(row, 1, &d.name)?;
        worksheet.write_string(row, 2, &d.station)?;
        worksheet.write_number(row, 3, d.completed_deliveries)?;
        worksheet.write_number_with_format(row, 4, d.total_earned, &money)?;
        worksheet.write_number_with_format(row, 5, d.amount_paid, &money)?;
        worksheet.write_number_with_format(row, 6, d.outstanding_balance, &money)?;
        worksheet.write_string(row, 7, d.payment_status.label())?;
        match d.last_payment_date {
            Some(date) => worksheet.write_string(row, 8, date.to_string())?,
            None => worksheet.write_string(row, 8, "N/A")?,
        };
        worksheet.write_number(row, 9, d.rating)?;
    }

    finish_sheet(worksheet, drivers.len(), 9)?;

    workbook.save(path)?;
    Ok(())
}

/// Export the daily and per-station financial views to one workbook.
pub fn export_financial_report_to_excel(
    daily: &[DailyFinancial],
    stations: &[StationFinancial],
    path: &Path,
) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let money = Format::new().set_num_format("#,##0.00");
    let total_format = Format::new().set_bold().set_num_format("#,##0.00");

    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Daily")?;
        write_headers(
            worksheet,
            &[
                ("Date", 12.0),
                ("Delivery Fees", 15.0),
                ("Item Collections", 17.0),
                ("Driver Payments", 16.0),
                ("Net Revenue", 14.0),
            ],
        )?;

        for (idx, day) in daily.iter().enumerate() {
            let row = (idx + 1) as u32;
            worksheet.write_string(row, 0, day.date.to_string())?;
            worksheet.write_number_with_format(row, 1, day.delivery_fees, &money)?;
            worksheet.write_number_with_format(row, 2, day.item_collections, &money)?;
            worksheet.write_number_with_format(row, 3, day.driver_payments, &money)?;
            worksheet.write_number_with_format(row, 4, day.net_revenue(), &money)?;
        }

        // Totals row below the data
        let totals_row = (daily.len() + 1) as u32;
        worksheet.write_string_with_format(totals_row, 0, "Total", &Format::new().set_bold())?;
        worksheet.write_number_with_format(totals_row, 1, daily.iter().map(|d| d.delivery_fees).sum::<f64>(), &total_format)?;
        worksheet.write_number_with_format(totals_row, 2, daily.iter().map(|d| d.item_collections).sum::<f64>(), &total_format)?;
        worksheet.write_number_with_format(totals_row, 3, daily.iter().map(|d| d.driver_payments).sum::<f64>(), &total_format)?;
        worksheet.write_number_with_format(totals_row, 4, daily.iter().map(|d| d.net_revenue()).sum::<f64>(), &total_format)?;

        worksheet.set_freeze_panes(1, 0)?;
    }

    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Stations")?;
        write_headers(
            worksheet,
            &[
                ("Station", 20.0),
                ("Delivery Fees", 15.0),
                ("Item Collections", 17.0),
                ("Driver Payments", 16.0),
                ("Net Revenue", 14.0),
                ("Margin %", 10.0),
            ],
        )?;

        let percent = Format::new().set_num_format("0.0");
        for (idx, s) in stations.iter().enumerate() {
            let row = (idx + 1) as u32;
            worksheet.write_string(row, 0, &s.station)?;
            worksheet.write_number_with_format(row, 1, s.delivery_fees, &money)?;
            worksheet.write_number_with_format(row, 2, s.item_collections, &money)?;
            worksheet.write_number_with_format(row, 3, s.driver_payments, &money)?;
            worksheet.write_number_with_format(row, 4, s.net_revenue, &money)?;
            worksheet.write_number_with_format(row, 5, s.margin_percent(), &percent)?;
        }

        finish_sheet(worksheet, stations.len(), 5)?;
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::seed;
    use tempfile::TempDir;

    #[test]
    fn test_csv_line_count_and_quoting() {
        let parcels = seed::parcels();
        let refs: Vec<&Parcel> = parcels.iter().collect();
        let csv = to_csv(&PARCEL_SEARCH_HEADERS, &parcel_search_rows(&refs));

        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), parcels.len() + 1);
        assert!(lines[0].starts_with("\"Parcel ID\",\"Recipient Name\""));
        for line in &lines {
            for field in line.split("\",\"") {
                assert!(!field.is_empty());
            }
            assert!(line.starts_with('"') && line.ends_with('"'));
        }
        assert!(lines[1].contains("\"45 Main Street, Accra\""));
    }

    #[test]
    fn test_csv_empty_rows_is_header_only() {
        let rows: Vec<Vec<String>> = Vec::new();
        assert_eq!(to_csv(&["A", "B"], &rows), "\"A\",\"B\"");
    }

    #[test]
    fn test_csv_does_not_escape_quotes() {
        let rows = vec![vec!["say \"hi\""]];
        assert_eq!(to_csv(&["Note"], &rows), "\"Note\"\n\"say \"hi\"\"");
    }

    #[test]
    fn test_overview_rows_use_rider_placeholder() {
        let parcels = seed::parcels();
        let refs: Vec<&Parcel> = parcels.iter().collect();
        let rows = parcel_overview_rows(&refs);
        assert_eq!(rows[2][6], "N/A");
        assert_eq!(rows[0][4], "delivered");
    }

    #[test]
    fn test_generate_export_filename() {
        let name = generate_export_filename("driver_payments", ExportFormat::Excel);
        assert!(name.starts_with("driver_payments_"));
        assert!(name.ends_with(".xlsx"));
    }

    #[test]
    fn test_resolve_path_without_dialog() {
        let dir = TempDir::new().unwrap();
        let config = ExportConfig {
            directory: Some(dir.path().to_path_buf()),
            use_save_dialog: false,
        };
        let path = resolve_export_path(&config, "parcels.csv", ExportFormat::Csv).unwrap();
        assert_eq!(path, dir.path().join("parcels.csv"));
    }

    #[test]
    fn test_excel_exports_write_files() {
        let dir = TempDir::new().unwrap();

        let drivers = seed::driver_payments();
        let refs: Vec<&DriverPayment> = drivers.iter().collect();
        let path = dir.path().join("drivers.xlsx");
        export_driver_payments_to_excel(&refs, &path).unwrap();
        assert!(path.exists());

        let path = dir.path().join("finance.xlsx");
        export_financial_report_to_excel(&seed::daily_financials(), &seed::station_financials(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_csv("\"A\"", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "\"A\"");
    }
}
