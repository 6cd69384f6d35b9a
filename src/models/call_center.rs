//! Call-center contact records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Contact progress for a parcel awaiting a customer call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactStatus {
    Uncontacted,
    Contacted,
    ReadyForDelivery,
}

/// What the customer chose on the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeliveryPreference {
    Pickup,
    #[default]
    HomeDelivery,
}

/// Recorded outcome of a customer call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactOutcome {
    pub preference: DeliveryPreference,
    pub address: Option<String>,
    pub delivery_fee: f64,
    pub preferred_date: Option<NaiveDate>,
    pub notes: String,
}

/// A parcel in the call-center queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallParcel {
    pub id: String,
    pub recipient_name: String,
    pub phone_number: String,
    pub item_description: String,
    pub item_value: f64,
    pub status: ContactStatus,
    pub shelf_location: String,
    pub outcome: Option<ContactOutcome>,
}
