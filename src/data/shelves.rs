//! Shelf repository.

use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::models::parcel::Parcel;
use crate::models::shelf::Shelf;
use crate::session::AppSession;

fn require_manager(session: &AppSession) -> Result<()> {
    if session.can_manage_shelves() {
        Ok(())
    } else {
        Err(AppError::validation("Only station managers and admins can manage shelves"))
    }
}

/// Add an empty shelf. Names are unique regardless of case.
pub fn add(shelves: &mut Vec<Shelf>, name: &str, session: &AppSession, today: NaiveDate) -> Result<Shelf> {
    require_manager(session)?;

    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Shelf name is required"));
    }
    if shelves.iter().any(|s| s.name.eq_ignore_ascii_case(name)) {
        return Err(AppError::validation(format!("Shelf '{name}' already exists")));
    }

    let shelf = Shelf {
        id: format!("SHELF-{:03}", next_number(shelves)),
        name: name.to_string(),
        parcel_count: 0,
        created_by: session.user_name().to_string(),
        created_at: today,
    };
    tracing::info!("Shelf {} added by {}", shelf.name, shelf.created_by);
    shelves.push(shelf.clone());
    Ok(shelf)
}

/// Highest numeric `SHELF-nnn` suffix plus one.
fn next_number(shelves: &[Shelf]) -> u32 {
    shelves
        .iter()
        .filter_map(|s| s.id.strip_prefix("SHELF-").and_then(|n| n.parse::<u32>().ok()))
        .max()
        .unwrap_or(0)
        + 1
}

/// Count newly registered parcels against the shelves they were put on.
pub fn record_intake(shelves: &mut [Shelf], parcels: &[Parcel]) {
    for parcel in parcels {
        if let Some(shelf) = shelves.iter_mut().find(|s| s.name == parcel.shelf_location) {
            shelf.parcel_count += 1;
        }
    }
}

/// Parcels still held on `shelf`.
pub fn held_on<'a>(shelf: &Shelf, parcels: &'a [Parcel]) -> Vec<&'a Parcel> {
    parcels
        .iter()
        .filter(|p| p.status.is_on_shelf() && p.shelf_location == shelf.name)
        .collect()
}

/// A shelf can go once its counter is zero and no held parcel points at it.
pub fn is_removable(shelf: &Shelf, parcels: &[Parcel]) -> bool {
    shelf.is_removable() && held_on(shelf, parcels).is_empty()
}

/// Remove an empty shelf.
pub fn delete(shelves: &mut Vec<Shelf>, parcels: &[Parcel], id: &str, session: &AppSession) -> Result<Shelf> {
    require_manager(session)?;

    let index = shelves
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| AppError::not_found(format!("Shelf {id}")))?;

    let shelf = &shelves[index];
    if !is_removable(shelf, parcels) {
        let held = (shelf.parcel_count as usize).max(held_on(shelf, parcels).len());
        return Err(AppError::validation(format!(
            "Shelf {} still holds {} parcel(s)",
            shelf.name, held
        )));
    }

    let removed = shelves.remove(index);
    tracing::info!("Shelf {} removed", removed.name);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OperatorConfig;
    use crate::data::seed;
    use crate::models::parcel::ParcelStatus;
    use crate::models::user::UserRole;

    fn session(role: UserRole) -> AppSession {
        let config = OperatorConfig {
            role,
            ..Default::default()
        };
        AppSession::from_config(&config)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 21).unwrap()
    }

    #[test]
    fn test_front_desk_cannot_add() {
        let mut shelves = seed::shelves();
        assert!(add(&mut shelves, "C3", &session(UserRole::FrontDesk), today()).is_err());
        assert_eq!(shelves.len(), 3);
    }

    #[test]
    fn test_manager_adds_unique_shelf() {
        let mut shelves = seed::shelves();
        let manager = session(UserRole::StationManager);

        let shelf = add(&mut shelves, " C3 ", &manager, today()).unwrap();
        assert_eq!(shelf.id, "SHELF-004");
        assert_eq!(shelf.name, "C3");
        assert_eq!(shelf.parcel_count, 0);

        assert!(add(&mut shelves, "c3", &manager, today()).is_err());
        assert!(add(&mut shelves, "   ", &manager, today()).is_err());
        assert_eq!(shelves.len(), 4);
    }

    #[test]
    fn test_delete_only_empty() {
        let mut shelves = seed::shelves();
        let admin = session(UserRole::Admin);

        assert!(delete(&mut shelves, &[], "SHELF-001", &admin).is_err());

        let added = add(&mut shelves, "D1", &admin, today()).unwrap();
        delete(&mut shelves, &[], &added.id, &admin).unwrap();
        assert_eq!(shelves.len(), 3);
        assert!(delete(&mut shelves, &[], "SHELF-404", &admin).is_err());
    }

    #[test]
    fn test_intake_blocks_delete() {
        let mut shelves = seed::shelves();
        let admin = session(UserRole::Admin);
        let added = add(&mut shelves, "D1", &admin, today()).unwrap();

        let mut parcel = seed::parcels().remove(0);
        parcel.shelf_location = "D1".to_string();
        parcel.status = ParcelStatus::Registered;
        record_intake(&mut shelves, std::slice::from_ref(&parcel));

        assert_eq!(shelves[3].parcel_count, 1);
        assert!(delete(&mut shelves, &[parcel], &added.id, &admin).is_err());
        assert_eq!(shelves.len(), 4);
    }

    #[test]
    fn test_held_parcel_blocks_delete_even_at_zero_count() {
        let mut shelves = seed::shelves();
        let admin = session(UserRole::Admin);
        let added = add(&mut shelves, "D1", &admin, today()).unwrap();

        let mut parcel = seed::parcels().remove(0);
        parcel.shelf_location = "D1".to_string();
        parcel.status = ParcelStatus::ReadyForDelivery;
        assert!(!is_removable(&shelves[3], std::slice::from_ref(&parcel)));
        assert!(delete(&mut shelves, std::slice::from_ref(&parcel), &added.id, &admin).is_err());

        // Once the rider has it, the shelf is free.
        parcel.status = ParcelStatus::Assigned;
        delete(&mut shelves, &[parcel], &added.id, &admin).unwrap();
        assert_eq!(shelves.len(), 3);
    }
}
