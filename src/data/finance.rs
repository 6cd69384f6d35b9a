//! Financial report aggregates.

use chrono::NaiveDate;

use crate::data::parcels::within_range;
use crate::models::finance::{DailyFinancial, StationFinancial, StatusCount};

/// Column sums over a set of daily or station rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FinancialTotals {
    pub delivery_fees: f64,
    pub item_collections: f64,
    pub driver_payments: f64,
}

impl FinancialTotals {
    pub fn gross(&self) -> f64 {
        self.delivery_fees + self.item_collections
    }

    pub fn net_revenue(&self) -> f64 {
        self.gross() - self.driver_payments
    }

    /// `part` as a percentage of gross takings; 0 when there are none.
    pub fn share_of_gross(&self, part: f64) -> f64 {
        percent(part, self.gross())
    }

    pub fn margin_percent(&self) -> f64 {
        self.share_of_gross(self.net_revenue())
    }
}

/// `part / whole * 100`, or 0 for an empty whole.
pub fn percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 { 0.0 } else { part / whole * 100.0 }
}

/// Days inside the inclusive range.
pub fn daily_in_range(
    days: &[DailyFinancial],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<DailyFinancial> {
    days.iter()
        .filter(|d| within_range(d.date, start, end))
        .cloned()
        .collect()
}

pub fn daily_totals(days: &[DailyFinancial]) -> FinancialTotals {
    days.iter().fold(FinancialTotals::default(), |acc, d| FinancialTotals {
        delivery_fees: acc.delivery_fees + d.delivery_fees,
        item_collections: acc.item_collections + d.item_collections,
        driver_payments: acc.driver_payments + d.driver_payments,
    })
}

pub fn station_totals(stations: &[StationFinancial]) -> FinancialTotals {
    stations.iter().fold(FinancialTotals::default(), |acc, s| FinancialTotals {
        delivery_fees: acc.delivery_fees + s.delivery_fees,
        item_collections: acc.item_collections + s.item_collections,
        driver_payments: acc.driver_payments + s.driver_payments,
    })
}

/// Each station's share of total net revenue, in percent.
pub fn revenue_shares(stations: &[StationFinancial]) -> Vec<(String, f64)> {
    let total: f64 = stations.iter().map(|s| s.net_revenue).sum();
    stations
        .iter()
        .map(|s| (s.station.clone(), percent(s.net_revenue, total)))
        .collect()
}

/// Percentage of all parcels in each status bucket.
pub fn status_percentages(counts: &[StatusCount]) -> Vec<(String, u32, f64)> {
    let total: u32 = counts.iter().map(|c| c.count).sum();
    counts
        .iter()
        .map(|c| (c.status.clone(), c.count, percent(c.count as f64, total as f64)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::seed;

    #[test]
    fn test_daily_totals_full_range() {
        let totals = daily_totals(&seed::daily_financials());
        assert_eq!(totals.delivery_fees, 9000.0);
        assert_eq!(totals.item_collections, 16820.0);
        assert_eq!(totals.driver_payments, 6365.0);
        assert_eq!(totals.net_revenue(), 19455.0);
    }

    #[test]
    fn test_daily_range_filter() {
        let days = seed::daily_financials();
        let start = NaiveDate::from_ymd_opt(2024, 1, 19);
        let end = NaiveDate::from_ymd_opt(2024, 1, 20);
        let filtered = daily_in_range(&days, start, end);
        assert_eq!(filtered.len(), 2);
        assert_eq!(daily_totals(&filtered).delivery_fees, 3300.0);
    }

    #[test]
    fn test_shares_and_margin() {
        let totals = FinancialTotals {
            delivery_fees: 25.0,
            item_collections: 75.0,
            driver_payments: 40.0,
        };
        assert_eq!(totals.share_of_gross(totals.delivery_fees), 25.0);
        assert_eq!(totals.margin_percent(), 60.0);
        assert_eq!(FinancialTotals::default().margin_percent(), 0.0);
    }

    #[test]
    fn test_revenue_shares_sum_to_hundred() {
        let shares = revenue_shares(&seed::station_financials());
        let sum: f64 = shares.iter().map(|(_, pct)| pct).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert_eq!(shares[0].0, "Accra Central");
    }

    #[test]
    fn test_status_percentages() {
        let rows = status_percentages(&seed::status_counts());
        let total: u32 = rows.iter().map(|r| r.1).sum();
        assert_eq!(total, 1265);
        let delivered = rows.iter().find(|r| r.0 == "Delivered").unwrap();
        assert!((delivered.2 - 680.0 / 1265.0 * 100.0).abs() < 1e-9);
    }
}
