//! Financial view models for dashboards, reports and rider payments.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// One day of station takings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyFinancial {
    pub date: NaiveDate,
    pub delivery_fees: f64,
    pub item_collections: f64,
    pub driver_payments: f64,
}

impl DailyFinancial {
    pub fn net_revenue(&self) -> f64 {
        self.delivery_fees + self.item_collections - self.driver_payments
    }
}

/// Takings per station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationFinancial {
    pub station: String,
    pub delivery_fees: f64,
    pub item_collections: f64,
    pub driver_payments: f64,
    pub net_revenue: f64,
}

impl StationFinancial {
    /// Net revenue as a percentage of gross takings.
    pub fn margin_percent(&self) -> f64 {
        let gross = self.delivery_fees + self.item_collections;
        if gross == 0.0 { 0.0 } else { self.net_revenue / gross * 100.0 }
    }
}

/// Rider payout state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Partial,
    Pending,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [PaymentStatus::Paid, PaymentStatus::Partial, PaymentStatus::Pending];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Partial => "Partial",
            PaymentStatus::Pending => "Pending",
        }
    }
}

/// Earnings and payouts for one rider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverPayment {
    pub id: String,
    pub name: String,
    pub station: String,
    pub completed_deliveries: u32,
    pub total_earned: f64,
    pub amount_paid: f64,
    pub outstanding_balance: f64,
    pub payment_status: PaymentStatus,
    pub last_payment_date: Option<NaiveDate>,
    pub rating: f32,
}

/// Deliveries and earnings of a rider at the current station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverEarnings {
    pub driver_id: String,
    pub driver_name: String,
    pub deliveries_completed: u32,
    pub amount_earned: f64,
}

/// Station-level financial dashboard figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_delivery_earnings: f64,
    pub total_driver_payments: f64,
    pub total_item_collections: f64,
    pub pending_payments: f64,
    pub driver_breakdown: Vec<DriverEarnings>,
}

/// System-wide admin figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub total_stations: u32,
    pub total_parcels: u32,
    pub total_delivery_earnings: f64,
    pub total_driver_payments: f64,
    pub delivery_success_rate: f64,
    pub active_users: u32,
}

/// Per-station row on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationPerformance {
    pub station_id: String,
    pub station_name: String,
    pub total_parcels: u32,
    pub delivery_earnings: f64,
    pub driver_payments_owed: f64,
    pub success_rate: f64,
}

/// Parcel count for one status bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u32,
}

/// A confirmed reconciliation of a rider's collections.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationEntry {
    pub rider: String,
    pub parcel_ids: Vec<String>,
    pub expected: f64,
    pub collected: f64,
    pub confirmed_at: DateTime<Local>,
}

impl ReconciliationEntry {
    /// Positive when the rider handed in more than expected.
    pub fn difference(&self) -> f64 {
        self.collected - self.expected
    }
}
