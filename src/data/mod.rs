//! In-memory station data and the queries the screens run over it.

pub mod call_center;
pub mod deliveries;
pub mod drivers;
pub mod finance;
pub mod parcels;
pub mod seed;
pub mod shelves;
pub mod users;
