//! Text-input state for the wizard steps.

use crate::error::Result;
use crate::models::registration::{CostBreakdown, ParcelDraft, parse_amount};

/// Recipient details typed on the Info step.
#[derive(Debug, Default, Clone)]
pub struct IntakeForm {
    pub recipient_name: String,
    pub phone_number: String,
    pub item_description: String,
    pub shelf: String,
    pub item_value: String,
}

impl IntakeForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Required fields are filled in.
    pub fn is_complete(&self) -> bool {
        !self.recipient_name.trim().is_empty()
            && !self.phone_number.trim().is_empty()
            && !self.shelf.trim().is_empty()
    }

    /// Build a validated draft. The item value falls back to 0.
    pub fn to_draft(&self) -> Result<ParcelDraft> {
        ParcelDraft::new(
            &self.recipient_name,
            &self.phone_number,
            &self.item_description,
            &self.shelf,
            parse_amount(&self.item_value),
        )
    }
}

/// Driver and vehicle for a bulk drop-off.
#[derive(Debug, Default, Clone)]
pub struct BulkStartForm {
    pub driver_name: String,
    pub vehicle_number: String,
}

impl BulkStartForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_ready(&self) -> bool {
        !self.driver_name.trim().is_empty() && !self.vehicle_number.trim().is_empty()
    }
}

/// Fee inputs on the Costs & POD step.
#[derive(Debug, Default, Clone)]
pub struct CostsForm {
    pub base_fee: String,
    pub distance_charge: String,
    pub insurance_fee: String,
}

impl CostsForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn breakdown(&self) -> CostBreakdown {
        CostBreakdown {
            base_fee: parse_amount(&self.base_fee),
            distance_charge: parse_amount(&self.distance_charge),
            insurance_fee: parse_amount(&self.insurance_fee),
        }
    }
}
