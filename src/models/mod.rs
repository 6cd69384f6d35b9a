//! Data models for parcels, shelves, stations, users and finances.

pub mod call_center;
pub mod finance;
pub mod parcel;
pub mod registration;
pub mod shelf;
pub mod station;
pub mod user;

pub use call_center::{CallParcel, ContactStatus, DeliveryPreference};
pub use parcel::{Parcel, ParcelStatus};
pub use registration::{BulkEntrySession, CostBreakdown, ParcelDraft, WizardStep};
pub use shelf::Shelf;
pub use station::{CreateLocation, CreateStation, Location, ServiceResponse, Station};
pub use user::{CreateUser, User, UserRole, UserStatus};
