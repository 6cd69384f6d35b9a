//! Parcel registration wizard.
//!
//! Three steps (parcel information, costs & POD, review) driven by
//! [`RegistrationWizard`]. Parcels arrive either one at a time or as a bulk
//! drop-off from a single driver.

mod controller;
mod forms;

#[cfg(test)]
mod tests;

pub use controller::{EntryMode, RegistrationWizard, SessionState, SubmittedBatch};
pub use forms::{BulkStartForm, CostsForm, IntakeForm};
