//! Call-center contact workflow.

use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::models::call_center::{CallParcel, ContactOutcome, ContactStatus, DeliveryPreference};
use crate::models::parcel::{DeliveryType, Parcel, ParcelStatus};
use crate::models::registration::parse_amount;

/// Preference form shown after selecting a parcel.
#[derive(Debug, Default, Clone)]
pub struct ContactForm {
    pub preference: DeliveryPreference,
    pub address: String,
    pub delivery_fee: String,
    pub preferred_date: Option<NaiveDate>,
    pub notes: String,
}

impl ContactForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate into an outcome. Home delivery needs an address.
    pub fn to_outcome(&self) -> Result<ContactOutcome> {
        let address = self.address.trim();
        let address = match self.preference {
            DeliveryPreference::HomeDelivery if address.is_empty() => {
                return Err(AppError::validation("Delivery address is required"));
            }
            DeliveryPreference::HomeDelivery => Some(address.to_string()),
            DeliveryPreference::Pickup => None,
        };

        Ok(ContactOutcome {
            preference: self.preference,
            address,
            delivery_fee: match self.preference {
                DeliveryPreference::HomeDelivery => parse_amount(&self.delivery_fee),
                DeliveryPreference::Pickup => 0.0,
            },
            preferred_date: self.preferred_date,
            notes: self.notes.trim().to_string(),
        })
    }
}

/// `(uncontacted, contacted, ready)` counts.
pub fn status_counts(queue: &[CallParcel]) -> (usize, usize, usize) {
    let count = |status: ContactStatus| queue.iter().filter(|p| p.status == status).count();
    (
        count(ContactStatus::Uncontacted),
        count(ContactStatus::Contacted),
        count(ContactStatus::ReadyForDelivery),
    )
}

pub fn uncontacted(queue: &[CallParcel]) -> Vec<&CallParcel> {
    queue.iter().filter(|p| p.status == ContactStatus::Uncontacted).collect()
}

/// Record the customer's choice and mark the parcel ready for delivery.
///
/// The matching station parcel, if any, follows along so it shows up for
/// rider assignment.
pub fn save_preferences(
    queue: &mut [CallParcel],
    parcels: &mut [Parcel],
    id: &str,
    outcome: ContactOutcome,
) -> Result<()> {
    let entry = queue
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::not_found(format!("Parcel {id}")))?;

    if let Some(parcel) = parcels.iter_mut().find(|p| p.id == id)
        && !parcel.status.is_active_delivery()
        && parcel.status != ParcelStatus::Delivered
    {
        parcel.status = ParcelStatus::ReadyForDelivery;
        match (&outcome.preference, &outcome.address) {
            (DeliveryPreference::HomeDelivery, Some(address)) => {
                parcel.delivery_type = DeliveryType::HomeDelivery;
                parcel.address = address.clone();
            }
            _ => parcel.delivery_type = DeliveryType::Pickup,
        }
    }

    entry.status = ContactStatus::ReadyForDelivery;
    entry.outcome = Some(outcome);
    tracing::info!("Preferences saved for {} ({})", entry.recipient_name, entry.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::seed;

    #[test]
    fn test_home_delivery_requires_address() {
        let form = ContactForm::default();
        assert!(form.to_outcome().is_err());

        let form = ContactForm {
            address: "12 Airport Road, Tema".to_string(),
            delivery_fee: "15".to_string(),
            ..Default::default()
        };
        let outcome = form.to_outcome().unwrap();
        assert_eq!(outcome.delivery_fee, 15.0);
    }

    #[test]
    fn test_pickup_ignores_address_and_fee() {
        let form = ContactForm {
            preference: DeliveryPreference::Pickup,
            address: "ignored".to_string(),
            delivery_fee: "15".to_string(),
            ..Default::default()
        };
        let outcome = form.to_outcome().unwrap();
        assert!(outcome.address.is_none());
        assert_eq!(outcome.delivery_fee, 0.0);
    }

    #[test]
    fn test_save_preferences_updates_counts() {
        let mut queue = seed::call_queue();
        let mut parcels = seed::parcels();
        assert_eq!(status_counts(&queue), (3, 0, 0));

        let outcome = ContactForm {
            preference: DeliveryPreference::Pickup,
            ..Default::default()
        }
        .to_outcome()
        .unwrap();
        save_preferences(&mut queue, &mut parcels, "PAK-003", outcome).unwrap();

        assert_eq!(status_counts(&queue), (2, 0, 1));
        assert_eq!(uncontacted(&queue).len(), 2);
        // Other parcels are untouched.
        assert_eq!(parcels[0].status, ParcelStatus::Delivered);
    }

    #[test]
    fn test_save_unknown_parcel() {
        let mut queue = seed::call_queue();
        let mut parcels = seed::parcels();
        let outcome = ContactForm {
            preference: DeliveryPreference::Pickup,
            ..Default::default()
        }
        .to_outcome()
        .unwrap();
        assert!(save_preferences(&mut queue, &mut parcels, "PAK-999", outcome).is_err());
    }

    #[test]
    fn test_save_syncs_station_parcel() {
        let mut queue = seed::call_queue();
        let mut parcels = seed::parcels();
        parcels[2].status = ParcelStatus::Contacted;
        let outcome = ContactForm {
            address: "5 Ring Road, Tema".to_string(),
            ..Default::default()
        }
        .to_outcome()
        .unwrap();
        save_preferences(&mut queue, &mut parcels, "PAK-003", outcome).unwrap();
        assert_eq!(parcels[2].status, ParcelStatus::ReadyForDelivery);
        assert_eq!(parcels[2].delivery_type, DeliveryType::HomeDelivery);
        assert_eq!(parcels[2].address, "5 Ring Road, Tema");
    }
}
