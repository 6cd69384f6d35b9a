//! Unit tests for the registration wizard.

use chrono::NaiveDate;

use super::{BulkStartForm, CostsForm, EntryMode, IntakeForm, RegistrationWizard, SessionState};
use crate::models::parcel::ParcelStatus;
use crate::models::registration::{ParcelDraft, WizardStep};

fn draft(name: &str) -> ParcelDraft {
    ParcelDraft::new(name, "+233500000000", "Parcel", "A1", 10.0).unwrap()
}

#[test]
fn test_initial_state() {
    let wizard = RegistrationWizard::new();
    assert_eq!(wizard.step(), WizardStep::Info);
    assert_eq!(wizard.mode(), EntryMode::Undecided);
    assert_eq!(wizard.session_state(), SessionState::NoSession);
    assert!(!wizard.can_proceed());
}

#[test]
fn test_advance_stops_at_review() {
    let mut wizard = RegistrationWizard::new();
    for _ in 0..5 {
        wizard.advance();
    }
    assert_eq!(wizard.step(), WizardStep::Review);
    assert_eq!(wizard.step().number(), 3);
}

#[test]
fn test_retreat_stops_at_info() {
    let mut wizard = RegistrationWizard::new();
    wizard.advance();
    for _ in 0..5 {
        wizard.retreat();
    }
    assert_eq!(wizard.step(), WizardStep::Info);
    assert_eq!(wizard.step().number(), 1);
}

#[test]
fn test_start_bulk_session_requires_both_fields() {
    let mut wizard = RegistrationWizard::new();
    assert!(!wizard.start_bulk_session("", "X"));
    assert!(!wizard.start_bulk_session("X", ""));
    assert!(!wizard.start_bulk_session("   ", "X"));
    assert_eq!(wizard.session_state(), SessionState::NoSession);
    assert_eq!(wizard.mode(), EntryMode::Undecided);
}

#[test]
fn test_start_bulk_session_resets_step() {
    let mut wizard = RegistrationWizard::new();
    wizard.advance();
    assert!(wizard.start_bulk_session("Kojo", "GR-123-20"));
    assert_eq!(wizard.step(), WizardStep::Info);
    assert_eq!(wizard.mode(), EntryMode::Bulk);
    assert_eq!(wizard.session_state(), SessionState::AwaitingFirstParcel);
    assert!(!wizard.can_proceed());
}

#[test]
fn test_add_parcel_without_session_is_ignored() {
    let mut wizard = RegistrationWizard::new();
    assert!(!wizard.add_parcel_to_session(draft("Ama")));
    assert!(wizard.session().is_none());
}

#[test]
fn test_each_valid_add_appends_one() {
    let mut wizard = RegistrationWizard::new();
    wizard.start_bulk_session("Kojo", "GR-123-20");

    for (i, name) in ["Ama", "Esi", "Yaw"].iter().enumerate() {
        assert!(wizard.add_parcel_to_session(draft(name)));
        assert_eq!(wizard.session().unwrap().parcels.len(), i + 1);
    }

    // Rejected at the form, so the session never sees it.
    let form = IntakeForm {
        recipient_name: String::new(),
        phone_number: "+233500000000".to_string(),
        shelf: "A1".to_string(),
        ..Default::default()
    };
    assert!(form.to_draft().is_err());
    assert_eq!(wizard.session().unwrap().parcels.len(), 3);

    let names: Vec<_> = wizard
        .session()
        .unwrap()
        .parcels
        .iter()
        .map(|p| p.recipient_name().to_string())
        .collect();
    assert_eq!(names, ["Ama", "Esi", "Yaw"]);
}

#[test]
fn test_bulk_drop_off_scenario() {
    let mut wizard = RegistrationWizard::new();
    let start = BulkStartForm {
        driver_name: "Kojo".to_string(),
        vehicle_number: "GR-123-20".to_string(),
    };
    assert!(start.is_ready());
    assert!(wizard.start_bulk_session(&start.driver_name, &start.vehicle_number));

    let form = IntakeForm {
        recipient_name: "Ama".to_string(),
        phone_number: "+233500000000".to_string(),
        item_description: String::new(),
        shelf: "A1".to_string(),
        item_value: "50".to_string(),
    };
    assert!(wizard.add_parcel_to_session(form.to_draft().unwrap()));

    let session = wizard.session().unwrap();
    assert_eq!(session.driver_name, "Kojo");
    assert_eq!(session.vehicle_number, "GR-123-20");
    assert_eq!(session.parcels.len(), 1);
    assert_eq!(session.total_value(), 50.0);
    assert_eq!(wizard.session_state(), SessionState::AccumulatingParcels);
    assert!(wizard.can_proceed());
}

#[test]
fn test_end_session_twice_is_safe() {
    let mut wizard = RegistrationWizard::new();
    wizard.start_bulk_session("Kojo", "GR-123-20");
    wizard.add_parcel_to_session(draft("Ama"));
    wizard.advance();

    wizard.end_session();
    wizard.end_session();

    assert_eq!(wizard.session_state(), SessionState::NoSession);
    assert_eq!(wizard.step(), WizardStep::Info);
    assert_eq!(wizard.mode(), EntryMode::Single);
    assert!(wizard.single_draft().is_none());
}

#[test]
fn test_submit_bulk_ends_session() {
    let mut wizard = RegistrationWizard::new();
    wizard.start_bulk_session("Kojo", "GR-123-20");
    wizard.add_parcel_to_session(draft("Ama"));
    wizard.add_parcel_to_session(draft("Esi"));
    let costs = CostsForm {
        base_fee: "10".to_string(),
        distance_charge: "abc".to_string(),
        insurance_fee: "-2".to_string(),
    };
    wizard.set_costs(costs.breakdown());
    wizard.advance();
    wizard.advance();

    let batch = wizard.submit().unwrap();
    assert_eq!(batch.parcels.len(), 2);
    assert_eq!(batch.driver.as_ref().map(|d| d.0.as_str()), Some("Kojo"));
    assert_eq!(batch.costs.total(), 10.0);
    assert_eq!(batch.total_value(), 20.0);

    assert_eq!(wizard.session_state(), SessionState::NoSession);
    assert_eq!(wizard.step(), WizardStep::Info);
    assert_eq!(wizard.costs().total(), 0.0);
}

#[test]
fn test_submit_single_draft() {
    let mut wizard = RegistrationWizard::new();
    wizard.choose_mode(EntryMode::Single);
    assert!(!wizard.can_proceed());
    wizard.set_single_draft(draft("Ama"));
    assert!(wizard.can_proceed());

    let batch = wizard.submit().unwrap();
    assert!(batch.driver.is_none());
    assert_eq!(batch.parcels.len(), 1);
    assert!(wizard.single_draft().is_none());
}

#[test]
fn test_submit_with_nothing_returns_none() {
    let mut wizard = RegistrationWizard::new();
    assert!(wizard.submit().is_none());
}

#[test]
fn test_choose_single_drops_bulk_session() {
    let mut wizard = RegistrationWizard::new();
    wizard.start_bulk_session("Kojo", "GR-123-20");
    wizard.choose_mode(EntryMode::Single);
    assert_eq!(wizard.session_state(), SessionState::NoSession);
}

#[test]
fn test_batch_to_parcels() {
    let mut wizard = RegistrationWizard::new();
    wizard.start_bulk_session("Kojo", "GR-123-20");
    wizard.add_parcel_to_session(draft("Ama"));
    let batch = wizard.submit().unwrap();

    let date = NaiveDate::from_ymd_opt(2024, 1, 21).unwrap();
    let parcels = batch.to_parcels("Accra Central", date);
    assert_eq!(parcels.len(), 1);
    assert_eq!(parcels[0].status, ParcelStatus::Registered);
    assert_eq!(parcels[0].station, "Accra Central");
    assert_eq!(parcels[0].shelf_location, "A1");
}

#[test]
fn test_intake_form_completeness() {
    let mut form = IntakeForm {
        recipient_name: "Ama".to_string(),
        phone_number: "+233500000000".to_string(),
        ..Default::default()
    };
    assert!(!form.is_complete());
    form.shelf = "B2".to_string();
    assert!(form.is_complete());
    form.reset();
    assert!(!form.is_complete());
}
