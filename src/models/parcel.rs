//! Parcel records and lifecycle status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a parcel held at a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParcelStatus {
    Registered,
    Contacted,
    ReadyForDelivery,
    Assigned,
    PickedUp,
    OutForDelivery,
    Delivered,
    Failed,
}

impl ParcelStatus {
    pub const ALL: [ParcelStatus; 8] = [
        ParcelStatus::Registered,
        ParcelStatus::Contacted,
        ParcelStatus::ReadyForDelivery,
        ParcelStatus::Assigned,
        ParcelStatus::PickedUp,
        ParcelStatus::OutForDelivery,
        ParcelStatus::Delivered,
        ParcelStatus::Failed,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ParcelStatus::Registered => "Registered",
            ParcelStatus::Contacted => "Contacted",
            ParcelStatus::ReadyForDelivery => "Ready for Delivery",
            ParcelStatus::Assigned => "Assigned",
            ParcelStatus::PickedUp => "Picked Up",
            ParcelStatus::OutForDelivery => "Out for Delivery",
            ParcelStatus::Delivered => "Delivered",
            ParcelStatus::Failed => "Failed",
        }
    }

    /// Wire code, e.g. `ready-for-delivery`.
    pub fn code(&self) -> &'static str {
        match self {
            ParcelStatus::Registered => "registered",
            ParcelStatus::Contacted => "contacted",
            ParcelStatus::ReadyForDelivery => "ready-for-delivery",
            ParcelStatus::Assigned => "assigned",
            ParcelStatus::PickedUp => "picked-up",
            ParcelStatus::OutForDelivery => "out-for-delivery",
            ParcelStatus::Delivered => "delivered",
            ParcelStatus::Failed => "failed",
        }
    }

    /// Next step on the delivery run, if any.
    pub fn next_delivery_step(&self) -> Option<ParcelStatus> {
        match self {
            ParcelStatus::Assigned => Some(ParcelStatus::PickedUp),
            ParcelStatus::PickedUp => Some(ParcelStatus::OutForDelivery),
            ParcelStatus::OutForDelivery => Some(ParcelStatus::Delivered),
            _ => None,
        }
    }

    /// Whether the parcel is still sitting on a station shelf.
    pub fn is_on_shelf(&self) -> bool {
        matches!(
            self,
            ParcelStatus::Registered | ParcelStatus::Contacted | ParcelStatus::ReadyForDelivery | ParcelStatus::Failed
        )
    }

    /// Whether the parcel is currently with a rider.
    pub fn is_active_delivery(&self) -> bool {
        matches!(
            self,
            ParcelStatus::Assigned | ParcelStatus::PickedUp | ParcelStatus::OutForDelivery
        )
    }
}

/// How the recipient receives the parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryType {
    HomeDelivery,
    Pickup,
}

impl DeliveryType {
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryType::HomeDelivery => "Home Delivery",
            DeliveryType::Pickup => "Pickup",
        }
    }
}

/// A registered parcel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parcel {
    pub id: String,
    pub station: String,
    pub recipient_name: String,
    pub phone_number: String,
    pub address: String,
    pub shelf_location: String,
    pub item_description: String,
    pub item_value: f64,
    pub status: ParcelStatus,
    pub registered_date: NaiveDate,
    pub driver_name: Option<String>,
    pub delivery_type: DeliveryType,
    /// Set once the rider's collection for this parcel has been reconciled.
    #[serde(default)]
    pub reconciled: bool,
}

impl Parcel {
    /// Rider name or a placeholder for display and export.
    pub fn rider_display(&self) -> &str {
        self.driver_name.as_deref().unwrap_or("N/A")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_matches_serde() {
        for status in ParcelStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.code()));
        }
    }

    #[test]
    fn test_delivery_progression_ends_at_delivered() {
        let mut status = ParcelStatus::Assigned;
        let mut steps = 0;
        while let Some(next) = status.next_delivery_step() {
            status = next;
            steps += 1;
        }
        assert_eq!(status, ParcelStatus::Delivered);
        assert_eq!(steps, 3);
        assert_eq!(ParcelStatus::Registered.next_delivery_step(), None);
    }
}
