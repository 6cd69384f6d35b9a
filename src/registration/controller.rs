//! Wizard state machine.

use chrono::NaiveDate;

use crate::models::parcel::{DeliveryType, Parcel, ParcelStatus};
use crate::models::registration::{BulkEntrySession, CostBreakdown, ParcelDraft, WizardStep};

/// How parcels are being captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryMode {
    #[default]
    Undecided,
    Single,
    Bulk,
}

/// Observable state of the bulk session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    AwaitingFirstParcel,
    AccumulatingParcels,
}

/// Parcels handed over by a successful submit.
#[derive(Debug, Clone)]
pub struct SubmittedBatch {
    /// Driver and vehicle for bulk drop-offs.
    pub driver: Option<(String, String)>,
    pub parcels: Vec<ParcelDraft>,
    pub costs: CostBreakdown,
}

impl SubmittedBatch {
    pub fn total_value(&self) -> f64 {
        self.parcels.iter().map(|p| p.item_value()).sum()
    }

    /// Convert drafts into registered parcels held at `station`.
    pub fn to_parcels(&self, station: &str, registered_date: NaiveDate) -> Vec<Parcel> {
        self.parcels
            .iter()
            .map(|draft| Parcel {
                id: draft.id().to_string(),
                station: station.to_string(),
                recipient_name: draft.recipient_name().to_string(),
                phone_number: draft.phone_number().to_string(),
                address: String::new(),
                shelf_location: draft.shelf().to_string(),
                item_description: draft.item_description().to_string(),
                item_value: draft.item_value(),
                status: ParcelStatus::Registered,
                registered_date,
                driver_name: None,
                delivery_type: DeliveryType::Pickup,
                reconciled: false,
            })
            .collect()
    }
}

/// Registration wizard controller.
///
/// Owns the step cursor, the entry mode and at most one bulk session.
#[derive(Debug, Default)]
pub struct RegistrationWizard {
    step: WizardStep,
    mode: EntryMode,
    session: Option<BulkEntrySession>,
    single_draft: Option<ParcelDraft>,
    costs: CostBreakdown,
}

impl RegistrationWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn session(&self) -> Option<&BulkEntrySession> {
        self.session.as_ref()
    }

    pub fn single_draft(&self) -> Option<&ParcelDraft> {
        self.single_draft.as_ref()
    }

    pub fn costs(&self) -> CostBreakdown {
        self.costs
    }

    pub fn session_state(&self) -> SessionState {
        match &self.session {
            None => SessionState::NoSession,
            Some(s) if s.parcels.is_empty() => SessionState::AwaitingFirstParcel,
            Some(_) => SessionState::AccumulatingParcels,
        }
    }

    /// Move to the next step. No-op on the last step.
    pub fn advance(&mut self) {
        if let Some(next) = self.step.next() {
            self.step = next;
        }
    }

    /// Move to the previous step. No-op on the first step.
    pub fn retreat(&mut self) {
        if let Some(prev) = self.step.previous() {
            self.step = prev;
        }
    }

    /// Whether the Next button should be enabled on the current step.
    pub fn can_proceed(&self) -> bool {
        match self.step {
            WizardStep::Info => match self.mode {
                EntryMode::Undecided => false,
                EntryMode::Single => self.single_draft.is_some(),
                EntryMode::Bulk => self.session_state() == SessionState::AccumulatingParcels,
            },
            WizardStep::CostsAndPod => true,
            WizardStep::Review => false,
        }
    }

    /// Pick single or bulk entry. Choosing single drops any open bulk session.
    pub fn choose_mode(&mut self, mode: EntryMode) {
        if mode == self.mode {
            return;
        }
        if mode != EntryMode::Bulk && self.session.take().is_some() {
            tracing::debug!("Bulk session discarded on mode change");
        }
        self.mode = mode;
        self.step = WizardStep::Info;
    }

    /// Open a bulk session for a driver drop-off.
    ///
    /// Returns `false` and changes nothing unless both fields are non-blank.
    pub fn start_bulk_session(&mut self, driver_name: &str, vehicle_number: &str) -> bool {
        if driver_name.trim().is_empty() || vehicle_number.trim().is_empty() {
            return false;
        }

        let session = BulkEntrySession::new(driver_name, vehicle_number);
        tracing::info!(
            "Bulk session started: driver={}, vehicle={}",
            session.driver_name,
            session.vehicle_number
        );
        self.session = Some(session);
        self.mode = EntryMode::Bulk;
        self.step = WizardStep::Info;
        true
    }

    /// Append a parcel to the open bulk session.
    pub fn add_parcel_to_session(&mut self, draft: ParcelDraft) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                tracing::debug!("Parcel {} added to bulk session", draft.id());
                session.parcels.push(draft);
                true
            }
            None => false,
        }
    }

    /// Store the single-entry parcel captured on the Info step.
    pub fn set_single_draft(&mut self, draft: ParcelDraft) {
        self.mode = EntryMode::Single;
        self.single_draft = Some(draft);
    }

    pub fn set_costs(&mut self, costs: CostBreakdown) {
        self.costs = costs;
    }

    /// Discard all captured data and start over in single-entry mode.
    pub fn end_session(&mut self) {
        self.session = None;
        self.single_draft = None;
        self.costs = CostBreakdown::default();
        self.step = WizardStep::Info;
        self.mode = EntryMode::Single;
    }

    /// Hand over the captured parcels and reset the wizard.
    ///
    /// Returns `None` when there is nothing to submit.
    pub fn submit(&mut self) -> Option<SubmittedBatch> {
        let batch = if let Some(session) = self.session.take() {
            SubmittedBatch {
                driver: Some((session.driver_name, session.vehicle_number)),
                parcels: session.parcels,
                costs: self.costs,
            }
        } else if let Some(draft) = self.single_draft.take() {
            SubmittedBatch {
                driver: None,
                parcels: vec![draft],
                costs: self.costs,
            }
        } else {
            return None;
        };

        match &batch.driver {
            Some((driver, vehicle)) => tracing::info!(
                "Registered {} parcel(s) from driver {} ({}), total value {:.2}, fees {:.2}",
                batch.parcels.len(),
                driver,
                vehicle,
                batch.total_value(),
                batch.costs.total()
            ),
            None => tracing::info!(
                "Registered parcel {}, fees {:.2}",
                batch.parcels.first().map(|p| p.id()).unwrap_or_default(),
                batch.costs.total()
            ),
        }

        self.end_session();
        Some(batch)
    }
}
