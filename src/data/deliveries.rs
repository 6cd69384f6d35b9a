//! Rider assignment, delivery progress and cash reconciliation.

use chrono::Local;

use crate::error::{AppError, Result};
use crate::models::finance::ReconciliationEntry;
use crate::models::parcel::{Parcel, ParcelStatus};

/// Parcels waiting for a rider.
pub fn ready_for_assignment(parcels: &[Parcel]) -> Vec<&Parcel> {
    parcels
        .iter()
        .filter(|p| p.status == ParcelStatus::ReadyForDelivery)
        .collect()
}

/// Parcels currently with a rider.
pub fn active_deliveries(parcels: &[Parcel]) -> Vec<&Parcel> {
    parcels.iter().filter(|p| p.status.is_active_delivery()).collect()
}

/// Hand the selected ready parcels to `rider`.
///
/// Returns how many parcels were assigned. Ids that are unknown or not ready
/// are skipped.
pub fn assign(parcels: &mut [Parcel], ids: &[String], rider: &str) -> Result<usize> {
    let rider = rider.trim();
    if rider.is_empty() {
        return Err(AppError::validation("Select a rider"));
    }
    if ids.is_empty() {
        return Err(AppError::validation("Select at least one parcel"));
    }

    let mut assigned = 0;
    for parcel in parcels
        .iter_mut()
        .filter(|p| p.status == ParcelStatus::ReadyForDelivery && ids.contains(&p.id))
    {
        parcel.status = ParcelStatus::Assigned;
        parcel.driver_name = Some(rider.to_string());
        assigned += 1;
    }

    tracing::info!("Assigned {} parcel(s) to {}", assigned, rider);
    Ok(assigned)
}

/// Move a parcel one step along its delivery run.
pub fn advance_delivery(parcels: &mut [Parcel], id: &str) -> Result<ParcelStatus> {
    let parcel = parcels
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::not_found(format!("Parcel {id}")))?;

    let next = parcel.status.next_delivery_step().ok_or_else(|| {
        AppError::validation(format!("Parcel {id} is {}", parcel.status.label()))
    })?;

    parcel.status = next;
    tracing::info!("Parcel {} -> {}", id, next.code());
    Ok(next)
}

/// Mark a parcel as failed delivery.
pub fn mark_failed(parcels: &mut [Parcel], id: &str) -> Result<()> {
    let parcel = parcels
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::not_found(format!("Parcel {id}")))?;

    if !parcel.status.is_active_delivery() {
        return Err(AppError::validation(format!("Parcel {id} is not out with a rider")));
    }
    parcel.status = ParcelStatus::Failed;
    tracing::warn!("Parcel {} marked failed", id);
    Ok(())
}

/// What a rider owes for delivered, unreconciled parcels.
#[derive(Debug, Clone, PartialEq)]
pub struct RiderCollection {
    pub rider: String,
    pub parcel_ids: Vec<String>,
    pub expected: f64,
}

fn pending_for_rider<'a>(parcels: &'a [Parcel], rider: &'a str) -> impl Iterator<Item = &'a Parcel> {
    parcels.iter().filter(move |p| {
        p.status == ParcelStatus::Delivered && !p.reconciled && p.driver_name.as_deref() == Some(rider)
    })
}

/// Outstanding collections grouped by rider, in first-seen order.
pub fn pending_collections(parcels: &[Parcel]) -> Vec<RiderCollection> {
    let mut riders: Vec<&str> = Vec::new();
    for parcel in parcels {
        if parcel.status == ParcelStatus::Delivered
            && !parcel.reconciled
            && let Some(rider) = parcel.driver_name.as_deref()
            && !riders.contains(&rider)
        {
            riders.push(rider);
        }
    }

    riders
        .into_iter()
        .map(|rider| {
            let owed: Vec<&Parcel> = pending_for_rider(parcels, rider).collect();
            RiderCollection {
                rider: rider.to_string(),
                parcel_ids: owed.iter().map(|p| p.id.clone()).collect(),
                expected: owed.iter().map(|p| p.item_value).sum(),
            }
        })
        .collect()
}

/// Confirm the cash a rider handed in and mark their parcels reconciled.
pub fn reconcile(parcels: &mut [Parcel], rider: &str, collected: f64) -> Result<ReconciliationEntry> {
    if !collected.is_finite() || collected < 0.0 {
        return Err(AppError::validation("Collected amount cannot be negative"));
    }

    let parcel_ids: Vec<String> = pending_for_rider(parcels, rider).map(|p| p.id.clone()).collect();
    if parcel_ids.is_empty() {
        return Err(AppError::not_found(format!("No delivered parcels awaiting reconciliation for {rider}")));
    }

    let mut expected = 0.0;
    for parcel in parcels.iter_mut().filter(|p| parcel_ids.contains(&p.id)) {
        expected += parcel.item_value;
        parcel.reconciled = true;
    }

    let entry = ReconciliationEntry {
        rider: rider.to_string(),
        parcel_ids,
        expected,
        collected,
        confirmed_at: Local::now(),
    };

    if entry.difference() != 0.0 {
        tracing::warn!(
            "Reconciliation for {}: expected {:.2}, collected {:.2}",
            rider,
            expected,
            collected
        );
    } else {
        tracing::info!("Reconciled {} parcel(s) for {}", entry.parcel_ids.len(), rider);
    }
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::seed;

    #[test]
    fn test_assign_ready_parcels() {
        let mut parcels = seed::parcels();
        let count = assign(&mut parcels, &["PAK-003".to_string(), "PAK-005".to_string()], "Ama Kofi").unwrap();
        // PAK-005 is only registered.
        assert_eq!(count, 1);

        let p3 = parcels.iter().find(|p| p.id == "PAK-003").unwrap();
        assert_eq!(p3.status, ParcelStatus::Assigned);
        assert_eq!(p3.rider_display(), "Ama Kofi");
        assert!(ready_for_assignment(&parcels).is_empty());
    }

    #[test]
    fn test_assign_requires_rider_and_selection() {
        let mut parcels = seed::parcels();
        assert!(assign(&mut parcels, &["PAK-003".to_string()], " ").is_err());
        assert!(assign(&mut parcels, &[], "Ama Kofi").is_err());
    }

    #[test]
    fn test_advance_through_delivery() {
        let mut parcels = seed::parcels();
        assert_eq!(advance_delivery(&mut parcels, "PAK-006").unwrap(), ParcelStatus::PickedUp);
        assert_eq!(advance_delivery(&mut parcels, "PAK-006").unwrap(), ParcelStatus::OutForDelivery);
        assert_eq!(advance_delivery(&mut parcels, "PAK-006").unwrap(), ParcelStatus::Delivered);
        assert!(advance_delivery(&mut parcels, "PAK-006").is_err());
        assert!(advance_delivery(&mut parcels, "PAK-999").is_err());
    }

    #[test]
    fn test_active_deliveries() {
        let parcels = seed::parcels();
        let active: Vec<_> = active_deliveries(&parcels).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(active, ["PAK-002", "PAK-006"]);
    }

    #[test]
    fn test_mark_failed_only_active() {
        let mut parcels = seed::parcels();
        assert!(mark_failed(&mut parcels, "PAK-005").is_err());
        mark_failed(&mut parcels, "PAK-002").unwrap();
        assert_eq!(parcels[1].status, ParcelStatus::Failed);
    }

    #[test]
    fn test_reconcile_marks_parcels() {
        let mut parcels = seed::parcels();
        let pending = pending_collections(&parcels);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].rider, "Kwame Asante");
        assert_eq!(pending[0].expected, 500.0);

        let entry = reconcile(&mut parcels, "Kwame Asante", 480.0).unwrap();
        assert_eq!(entry.difference(), -20.0);
        assert_eq!(entry.parcel_ids, ["PAK-001"]);
        assert!(pending_collections(&parcels).is_empty());
        assert!(reconcile(&mut parcels, "Kwame Asante", 0.0).is_err());
    }

    #[test]
    fn test_reconcile_rejects_negative() {
        let mut parcels = seed::parcels();
        assert!(reconcile(&mut parcels, "Kwame Asante", -1.0).is_err());
        assert!(!parcels[0].reconciled);
    }
}
