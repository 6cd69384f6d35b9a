//! Parcel queries for the search and overview screens.

use chrono::NaiveDate;

use crate::models::parcel::{Parcel, ParcelStatus};

/// Strip all whitespace, for phone comparisons.
fn compact(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Criteria from the Parcel Search form. Empty fields match everything.
#[derive(Debug, Default, Clone)]
pub struct ParcelSearchQuery {
    pub recipient_name: String,
    pub phone_number: String,
    pub parcel_id: String,
    pub status: Option<ParcelStatus>,
    pub shelf: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ParcelSearchQuery {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.recipient_name.trim().is_empty()
            && self.phone_number.trim().is_empty()
            && self.parcel_id.trim().is_empty()
            && self.status.is_none()
            && self.shelf.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    pub fn matches(&self, parcel: &Parcel) -> bool {
        let name = self.recipient_name.trim().to_lowercase();
        if !parcel.recipient_name.to_lowercase().contains(&name) {
            return false;
        }

        if !compact(&parcel.phone_number).contains(&compact(&self.phone_number)) {
            return false;
        }

        let id = self.parcel_id.trim().to_lowercase();
        if !parcel.id.to_lowercase().contains(&id) {
            return false;
        }

        if let Some(status) = self.status
            && parcel.status != status
        {
            return false;
        }

        if let Some(shelf) = &self.shelf
            && &parcel.shelf_location != shelf
        {
            return false;
        }

        within_range(parcel.registered_date, self.start_date, self.end_date)
    }
}

/// Inclusive date range check; open ends match everything.
pub fn within_range(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    start.is_none_or(|s| date >= s) && end.is_none_or(|e| date <= e)
}

/// Apply the search form.
pub fn search<'a>(parcels: &'a [Parcel], query: &ParcelSearchQuery) -> Vec<&'a Parcel> {
    parcels.iter().filter(|p| query.matches(p)).collect()
}

/// Quick search bar: case-insensitive match on recipient name or parcel id.
pub fn quick_search<'a>(parcels: &'a [Parcel], term: &str) -> Vec<&'a Parcel> {
    let term = term.trim().to_lowercase();
    parcels
        .iter()
        .filter(|p| p.recipient_name.to_lowercase().contains(&term) || p.id.to_lowercase().contains(&term))
        .collect()
}

/// Sorted, de-duplicated shelf names for the shelf filter.
pub fn unique_shelves(parcels: &[Parcel]) -> Vec<String> {
    let mut shelves: Vec<String> = parcels.iter().map(|p| p.shelf_location.clone()).collect();
    shelves.sort();
    shelves.dedup();
    shelves
}

/// Distinct stations in first-seen order.
pub fn unique_stations(parcels: &[Parcel]) -> Vec<String> {
    let mut stations: Vec<String> = Vec::new();
    for parcel in parcels {
        if !stations.contains(&parcel.station) {
            stations.push(parcel.station.clone());
        }
    }
    stations
}

/// Filters on the admin parcel overview. All exact-match.
#[derive(Debug, Default, Clone)]
pub struct SystemParcelFilter {
    pub station: Option<String>,
    pub status: Option<ParcelStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl SystemParcelFilter {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, parcel: &Parcel) -> bool {
        if let Some(station) = &self.station
            && &parcel.station != station
        {
            return false;
        }
        if let Some(status) = self.status
            && parcel.status != status
        {
            return false;
        }
        within_range(parcel.registered_date, self.date_from, self.date_to)
    }

    pub fn apply<'a>(&self, parcels: &'a [Parcel]) -> Vec<&'a Parcel> {
        parcels.iter().filter(|p| self.matches(p)).collect()
    }
}

/// `"Showing X of Y parcels"`.
pub fn showing_label(shown: usize, total: usize) -> String {
    format!("Showing {shown} of {total} parcels")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::seed;

    fn ids(parcels: &[&Parcel]) -> Vec<String> {
        parcels.iter().map(|p| p.id.clone()).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_query_matches_all() {
        let parcels = seed::parcels();
        let query = ParcelSearchQuery::default();
        assert!(query.is_empty());
        assert_eq!(search(&parcels, &query).len(), 6);
    }

    #[test]
    fn test_status_delivered_only_pak_001() {
        let parcels = seed::parcels();
        let query = ParcelSearchQuery {
            status: Some(ParcelStatus::Delivered),
            ..Default::default()
        };
        assert_eq!(ids(&search(&parcels, &query)), ["PAK-001"]);
    }

    #[test]
    fn test_name_is_case_insensitive() {
        let parcels = seed::parcels();
        let query = ParcelSearchQuery {
            recipient_name: "JANE".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&search(&parcels, &query)), ["PAK-002"]);
    }

    #[test]
    fn test_phone_ignores_whitespace() {
        let parcels = seed::parcels();
        let query = ParcelSearchQuery {
            phone_number: "+233555345678".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&search(&parcels, &query)), ["PAK-003"]);

        let spaced = ParcelSearchQuery {
            phone_number: "555 345".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&search(&parcels, &spaced)), ["PAK-003"]);
    }

    #[test]
    fn test_date_range_inclusive() {
        let parcels = seed::parcels();
        let query = ParcelSearchQuery {
            start_date: Some(date(2024, 1, 16)),
            end_date: Some(date(2024, 1, 18)),
            ..Default::default()
        };
        assert_eq!(ids(&search(&parcels, &query)), ["PAK-002", "PAK-003", "PAK-004"]);
    }

    #[test]
    fn test_shelf_exact() {
        let parcels = seed::parcels();
        let query = ParcelSearchQuery {
            shelf: Some("A".to_string()),
            ..Default::default()
        };
        assert!(search(&parcels, &query).is_empty());
    }

    #[test]
    fn test_quick_search_name_or_id() {
        let parcels = seed::parcels();
        assert_eq!(ids(&quick_search(&parcels, "diana")), ["PAK-006"]);
        assert_eq!(ids(&quick_search(&parcels, "pak-004")), ["PAK-004"]);
        assert_eq!(quick_search(&parcels, "").len(), 6);
    }

    #[test]
    fn test_unique_shelves_sorted() {
        let parcels = seed::parcels();
        assert_eq!(unique_shelves(&parcels), ["A1", "A2", "B1", "B2", "C1", "C2"]);
    }

    #[test]
    fn test_system_filter() {
        let parcels = seed::parcels();
        let filter = SystemParcelFilter {
            station: Some("Accra Central".to_string()),
            ..Default::default()
        };
        let shown = filter.apply(&parcels);
        assert_eq!(ids(&shown), ["PAK-001", "PAK-005", "PAK-006"]);
        assert_eq!(showing_label(shown.len(), parcels.len()), "Showing 3 of 6 parcels");

        let filter = SystemParcelFilter {
            station: Some("Accra Central".to_string()),
            status: Some(ParcelStatus::Registered),
            date_from: Some(date(2024, 1, 19)),
            date_to: Some(date(2024, 1, 19)),
        };
        assert_eq!(ids(&filter.apply(&parcels)), ["PAK-005"]);
    }
}
