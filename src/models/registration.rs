//! Parcel intake types: drafts, bulk sessions and wizard steps.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{AppError, Result};

static LAST_DRAFT_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Current epoch millis, bumped past the last value handed out.
fn next_draft_millis() -> i64 {
    let now = Utc::now().timestamp_millis();
    let prev = LAST_DRAFT_MILLIS
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| Some(now.max(last + 1)))
        .unwrap_or_else(|last| last);
    now.max(prev + 1)
}

/// A parcel captured at intake, validated at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParcelDraft {
    id: String,
    recipient_name: String,
    phone_number: String,
    item_description: String,
    shelf: String,
    item_value: f64,
}

impl ParcelDraft {
    /// Build a draft with a generated `PAK-<millis>` id, unique within the process.
    pub fn new(
        recipient_name: &str,
        phone_number: &str,
        item_description: &str,
        shelf: &str,
        item_value: f64,
    ) -> Result<Self> {
        let id = format!("PAK-{}", next_draft_millis());
        Self::with_id(id, recipient_name, phone_number, item_description, shelf, item_value)
    }

    /// Build a draft with an explicit id.
    pub fn with_id(
        id: impl Into<String>,
        recipient_name: &str,
        phone_number: &str,
        item_description: &str,
        shelf: &str,
        item_value: f64,
    ) -> Result<Self> {
        if recipient_name.trim().is_empty() {
            return Err(AppError::validation("Recipient name is required"));
        }
        if phone_number.trim().is_empty() {
            return Err(AppError::validation("Phone number is required"));
        }
        if shelf.trim().is_empty() {
            return Err(AppError::validation("Shelf location is required"));
        }
        if !item_value.is_finite() {
            return Err(AppError::validation("Item value must be a number"));
        }
        if item_value < 0.0 {
            return Err(AppError::validation("Item value cannot be negative"));
        }

        Ok(Self {
            id: id.into(),
            recipient_name: recipient_name.trim().to_string(),
            phone_number: phone_number.trim().to_string(),
            item_description: item_description.trim().to_string(),
            shelf: shelf.trim().to_string(),
            item_value,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn item_description(&self) -> &str {
        &self.item_description
    }

    pub fn shelf(&self) -> &str {
        &self.shelf
    }

    pub fn item_value(&self) -> f64 {
        self.item_value
    }
}

/// Parcels dropped off together by one driver.
#[derive(Debug, Clone, Serialize)]
pub struct BulkEntrySession {
    pub driver_name: String,
    pub vehicle_number: String,
    pub entry_date: DateTime<Utc>,
    pub parcels: Vec<ParcelDraft>,
}

impl BulkEntrySession {
    pub fn new(driver_name: &str, vehicle_number: &str) -> Self {
        Self {
            driver_name: driver_name.trim().to_string(),
            vehicle_number: vehicle_number.trim().to_string(),
            entry_date: Utc::now(),
            parcels: Vec::new(),
        }
    }

    /// Sum of declared item values.
    pub fn total_value(&self) -> f64 {
        self.parcels.iter().map(|p| p.item_value).sum()
    }
}

/// Registration wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    Info = 1,
    CostsAndPod = 2,
    Review = 3,
}

impl WizardStep {
    pub const TOTAL: usize = 3;

    /// 1-based step number.
    pub fn number(&self) -> usize {
        *self as usize
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Info => "Parcel Information",
            WizardStep::CostsAndPod => "Costs & POD",
            WizardStep::Review => "Review & Submit",
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Info => Some(WizardStep::CostsAndPod),
            WizardStep::CostsAndPod => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Info => None,
            WizardStep::CostsAndPod => Some(WizardStep::Info),
            WizardStep::Review => Some(WizardStep::CostsAndPod),
        }
    }
}

/// Fees entered on the Costs & POD step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub base_fee: f64,
    pub distance_charge: f64,
    pub insurance_fee: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.base_fee + self.distance_charge + self.insurance_fee
    }
}

/// Parse a money field, falling back to 0 on empty, invalid or negative input.
pub fn parse_amount(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_requires_fields() {
        assert!(ParcelDraft::new("", "+233500000000", "", "A1", 0.0).is_err());
        assert!(ParcelDraft::new("Ama", "  ", "", "A1", 0.0).is_err());
        assert!(ParcelDraft::new("Ama", "+233500000000", "", "", 0.0).is_err());
        assert!(ParcelDraft::new("Ama", "+233500000000", "", "A1", -1.0).is_err());
    }

    #[test]
    fn test_draft_trims_and_generates_id() {
        let draft = ParcelDraft::new(" Ama ", "+233500000000", "Shoes", "A1 ", 50.0).unwrap();
        assert_eq!(draft.recipient_name(), "Ama");
        assert_eq!(draft.shelf(), "A1");
        assert!(draft.id().starts_with("PAK-"));
    }

    #[test]
    fn test_drafts_in_same_millisecond_get_distinct_ids() {
        let ids: std::collections::HashSet<String> = (0..500)
            .map(|_| ParcelDraft::new("Ama", "+233500000000", "", "A1", 0.0).unwrap().id().to_string())
            .collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_non_finite_value_message() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = ParcelDraft::new("Ama", "+233500000000", "", "A1", value).unwrap_err();
            assert_eq!(err.user_message(), "Item value must be a number");
        }
        let err = ParcelDraft::new("Ama", "+233500000000", "", "A1", -1.0).unwrap_err();
        assert_eq!(err.user_message(), "Item value cannot be negative");
    }

    #[test]
    fn test_parse_amount_fallbacks() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("-3"), 0.0);
        assert_eq!(parse_amount(" 12.5 "), 12.5);
        assert_eq!(parse_amount("1000000"), 1_000_000.0);
    }

    #[test]
    fn test_cost_total() {
        let costs = CostBreakdown {
            base_fee: 5.0,
            distance_charge: 2.5,
            insurance_fee: 1.0,
        };
        assert_eq!(costs.total(), 8.5);
    }

    #[test]
    fn test_step_numbers() {
        assert_eq!(WizardStep::Info.number(), 1);
        assert_eq!(WizardStep::Review.number(), WizardStep::TOTAL);
        assert_eq!(WizardStep::Review.next(), None);
        assert_eq!(WizardStep::Info.previous(), None);
    }
}
