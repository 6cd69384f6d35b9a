//! Shelf records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A physical storage slot at a station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shelf {
    pub id: String,
    pub name: String,
    pub parcel_count: u32,
    pub created_by: String,
    pub created_at: NaiveDate,
}

impl Shelf {
    /// Only empty shelves may be removed.
    pub fn is_removable(&self) -> bool {
        self.parcel_count == 0
    }
}
