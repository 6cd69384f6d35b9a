//! GUI panels and application state.

pub mod admin_dashboard;
pub mod app;
pub mod call_center_panel;
pub mod components;
pub mod dashboard;
pub mod deliveries_panel;
pub mod driver_payments_panel;
pub mod financial_dashboard;
pub mod financial_reports_panel;
pub mod parcel_overview_panel;
pub mod parcel_search_panel;
pub mod reconciliation_panel;
pub mod registration_panel;
pub mod shelf_panel;
pub mod station_panel;
pub mod user_panel;

pub use app::App;
