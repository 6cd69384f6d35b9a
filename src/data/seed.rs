//! Demo data loaded at startup.

use chrono::NaiveDate;

use crate::models::call_center::{CallParcel, ContactStatus};
use crate::models::finance::{
    DailyFinancial, DriverEarnings, DriverPayment, FinancialSummary, PaymentStatus, StationFinancial,
    StationPerformance, StatusCount, SystemMetrics,
};
use crate::models::parcel::{DeliveryType, Parcel, ParcelStatus};
use crate::models::shelf::Shelf;
use crate::models::user::{User, UserRole, UserStatus};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn parcel(
    id: &str,
    station: &str,
    recipient: &str,
    phone: &str,
    address: &str,
    shelf: &str,
    description: &str,
    value: f64,
    status: ParcelStatus,
    registered: NaiveDate,
    driver: Option<&str>,
    delivery_type: DeliveryType,
) -> Parcel {
    Parcel {
        id: id.to_string(),
        station: station.to_string(),
        recipient_name: recipient.to_string(),
        phone_number: phone.to_string(),
        address: address.to_string(),
        shelf_location: shelf.to_string(),
        item_description: description.to_string(),
        item_value: value,
        status,
        registered_date: registered,
        driver_name: driver.map(str::to_string),
        delivery_type,
        reconciled: false,
    }
}

/// Parcels shared by search, overview, assignment and reconciliation screens.
pub fn parcels() -> Vec<Parcel> {
    use DeliveryType::{HomeDelivery, Pickup};
    use ParcelStatus::*;

    vec![
        parcel(
            "PAK-001",
            "Accra Central",
            "John Smith",
            "+233 555 123 456",
            "45 Main Street, Accra",
            "A1",
            "Electronics Package",
            500.0,
            Delivered,
            date(2024, 1, 15),
            Some("Kwame Asante"),
            HomeDelivery,
        ),
        parcel(
            "PAK-002",
            "Kumasi Hub",
            "Jane Doe",
            "+233 555 234 567",
            "78 Market Circle, Kumasi",
            "B2",
            "Documents",
            0.0,
            OutForDelivery,
            date(2024, 1, 16),
            Some("Ama Mensah"),
            HomeDelivery,
        ),
        parcel(
            "PAK-003",
            "Tema Port",
            "Bob Wilson",
            "+233 555 345 678",
            "12 Airport Road, Tema",
            "C1",
            "Clothing",
            150.0,
            ReadyForDelivery,
            date(2024, 1, 17),
            None,
            Pickup,
        ),
        parcel(
            "PAK-004",
            "Takoradi West",
            "Alice Johnson",
            "+233 555 456 789",
            "56 High Street, Takoradi",
            "A2",
            "Books",
            75.0,
            Contacted,
            date(2024, 1, 18),
            None,
            HomeDelivery,
        ),
        parcel(
            "PAK-005",
            "Accra Central",
            "Charlie Brown",
            "+233 555 567 890",
            "90 Independence Ave, Accra",
            "B1",
            "Food Items",
            200.0,
            Registered,
            date(2024, 1, 19),
            None,
            Pickup,
        ),
        parcel(
            "PAK-006",
            "Accra Central",
            "Diana Prince",
            "+233 555 678 901",
            "34 Tower Road, Cape Coast",
            "C2",
            "Cosmetics",
            120.0,
            Assigned,
            date(2024, 1, 20),
            Some("Kofi Boateng"),
            HomeDelivery,
        ),
    ]
}

/// Call-center queue.
pub fn call_queue() -> Vec<CallParcel> {
    let entry = |id: &str, name: &str, phone: &str, description: &str, value: f64, shelf: &str| CallParcel {
        id: id.to_string(),
        recipient_name: name.to_string(),
        phone_number: phone.to_string(),
        item_description: description.to_string(),
        item_value: value,
        status: ContactStatus::Uncontacted,
        shelf_location: shelf.to_string(),
        outcome: None,
    };

    vec![
        entry("PAK-001", "John Smith", "+233 555 123 456", "Electronics Package", 500.0, "A1"),
        entry("PAK-002", "Jane Doe", "+233 555 234 567", "Documents", 0.0, "B2"),
        entry("PAK-003", "Bob Wilson", "+233 555 345 678", "Clothing", 150.0, "C1"),
    ]
}

pub fn shelves() -> Vec<Shelf> {
    let shelf = |id: &str, name: &str, count: u32, created: NaiveDate| Shelf {
        id: id.to_string(),
        name: name.to_string(),
        parcel_count: count,
        created_by: "Station Manager".to_string(),
        created_at: created,
    };

    vec![
        shelf("SHELF-001", "A1", 5, date(2024, 1, 15)),
        shelf("SHELF-002", "A2", 3, date(2024, 1, 15)),
        shelf("SHELF-003", "B1", 8, date(2024, 1, 16)),
    ]
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: "USER-001".to_string(),
            name: "Adams Godfred".to_string(),
            email: "adams@example.com".to_string(),
            phone: "+233 555 100 001".to_string(),
            role: UserRole::FrontDesk,
            station_id: "STATION-001".to_string(),
            station: "Accra Central".to_string(),
            status: UserStatus::Active,
            last_login: Some("2024-01-20 14:30".to_string()),
        },
        User {
            id: "USER-002".to_string(),
            name: "Kwame Asante".to_string(),
            email: "kwame@example.com".to_string(),
            phone: "+233 555 100 002".to_string(),
            role: UserRole::StationManager,
            station_id: "STATION-002".to_string(),
            station: "Kumasi Hub".to_string(),
            status: UserStatus::Active,
            last_login: Some("2024-01-20 09:15".to_string()),
        },
        User {
            id: "USER-003".to_string(),
            name: "Ama Mensah".to_string(),
            email: "ama@example.com".to_string(),
            phone: "+233 555 100 003".to_string(),
            role: UserRole::CallCenter,
            station_id: "STATION-001".to_string(),
            station: "Accra Central".to_string(),
            status: UserStatus::Active,
            last_login: None,
        },
        User {
            id: "USER-004".to_string(),
            name: "System Admin".to_string(),
            email: "admin@example.com".to_string(),
            phone: "+233 555 100 004".to_string(),
            role: UserRole::Admin,
            station_id: "STATION-001".to_string(),
            station: "Accra Central".to_string(),
            status: UserStatus::Active,
            last_login: None,
        },
    ]
}

/// Riders and their payout state.
pub fn driver_payments() -> Vec<DriverPayment> {
    #[allow(clippy::too_many_arguments)]
    fn driver(
        id: &str,
        name: &str,
        station: &str,
        deliveries: u32,
        earned: f64,
        paid: f64,
        status: PaymentStatus,
        last_payment: Option<NaiveDate>,
        rating: f32,
    ) -> DriverPayment {
        DriverPayment {
            id: id.to_string(),
            name: name.to_string(),
            station: station.to_string(),
            completed_deliveries: deliveries,
            total_earned: earned,
            amount_paid: paid,
            outstanding_balance: earned - paid,
            payment_status: status,
            last_payment_date: last_payment,
            rating,
        }
    }

    vec![
        driver("DRV-001", "John Mensah", "Accra", 24, 1200.0, 1200.0, PaymentStatus::Paid, Some(date(2024, 1, 18)), 4.8),
        driver("DRV-002", "Kwame Asante", "Kumasi", 18, 950.0, 650.0, PaymentStatus::Partial, Some(date(2024, 1, 15)), 4.9),
        driver("DRV-003", "Ama Kofi", "Tema", 15, 850.0, 0.0, PaymentStatus::Pending, None, 4.7),
        driver("DRV-004", "Kofi Boateng", "Accra", 20, 1100.0, 1100.0, PaymentStatus::Paid, Some(date(2024, 1, 19)), 4.6),
    ]
}

/// Six days of takings, 15 to 20 January 2024.
pub fn daily_financials() -> Vec<DailyFinancial> {
    let fees = [1250.0, 1480.0, 1320.0, 1650.0, 1520.0, 1780.0];
    let collections = [2340.0, 2680.0, 2450.0, 3120.0, 2890.0, 3340.0];
    let payments = [875.0, 1050.0, 920.0, 1180.0, 1080.0, 1260.0];

    (0..fees.len())
        .map(|i| DailyFinancial {
            date: date(2024, 1, 15 + i as u32),
            delivery_fees: fees[i],
            item_collections: collections[i],
            driver_payments: payments[i],
        })
        .collect()
}

pub fn station_financials() -> Vec<StationFinancial> {
    let row = |station: &str, fees: f64, collections: f64, payments: f64, net: f64| StationFinancial {
        station: station.to_string(),
        delivery_fees: fees,
        item_collections: collections,
        driver_payments: payments,
        net_revenue: net,
    };

    vec![
        row("Accra Central", 5625.0, 8450.0, 3375.0, 10700.0),
        row("Kumasi Hub", 4000.0, 6200.0, 2400.0, 7800.0),
        row("Tema Port", 3500.0, 5100.0, 2100.0, 6500.0),
        row("Takoradi West", 2625.0, 3850.0, 1575.0, 4900.0),
    ]
}

/// Station-level dashboard for the signed-in station.
pub fn financial_summary() -> FinancialSummary {
    let earnings = |id: &str, name: &str, deliveries: u32, amount: f64| DriverEarnings {
        driver_id: id.to_string(),
        driver_name: name.to_string(),
        deliveries_completed: deliveries,
        amount_earned: amount,
    };

    FinancialSummary {
        total_delivery_earnings: 5250.0,
        total_driver_payments: 3150.0,
        total_item_collections: 8920.0,
        pending_payments: 1200.0,
        driver_breakdown: vec![
            earnings("DRV-001", "John Mensah", 24, 1200.0),
            earnings("DRV-002", "Kwame Asante", 18, 950.0),
            earnings("DRV-003", "Ama Kofi", 15, 850.0),
        ],
    }
}

pub fn system_metrics() -> SystemMetrics {
    SystemMetrics {
        total_stations: 5,
        total_parcels: 1245,
        total_delivery_earnings: 15750.50,
        total_driver_payments: 9450.75,
        delivery_success_rate: 94.2,
        active_users: 28,
    }
}

pub fn station_performance() -> Vec<StationPerformance> {
    let row = |id: &str, name: &str, parcels: u32, earnings: f64, owed: f64, rate: f64| StationPerformance {
        station_id: id.to_string(),
        station_name: name.to_string(),
        total_parcels: parcels,
        delivery_earnings: earnings,
        driver_payments_owed: owed,
        success_rate: rate,
    };

    vec![
        row("STATION-001", "Accra Central", 450, 5625.0, 3375.0, 96.5),
        row("STATION-002", "Kumasi Hub", 320, 4000.0, 2400.0, 92.3),
        row("STATION-003", "Tema Port", 280, 3500.0, 2100.0, 94.1),
        row("STATION-004", "Takoradi West", 195, 2625.0, 1575.0, 91.8),
    ]
}

/// System-wide parcel counts per status bucket.
pub fn status_counts() -> Vec<StatusCount> {
    [
        ("Registered", 120),
        ("Contacted", 85),
        ("Ready for Delivery", 145),
        ("Out for Delivery", 210),
        ("Delivered", 680),
        ("Failed", 25),
    ]
    .into_iter()
    .map(|(status, count)| StatusCount {
        status: status.to_string(),
        count,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_sizes() {
        assert_eq!(parcels().len(), 6);
        assert_eq!(call_queue().len(), 3);
        assert_eq!(shelves().len(), 3);
        assert_eq!(driver_payments().len(), 4);
        assert_eq!(daily_financials().len(), 6);
    }

    #[test]
    fn test_station_net_revenue_consistent() {
        for row in station_financials() {
            let net = row.delivery_fees + row.item_collections - row.driver_payments;
            assert_eq!(net, row.net_revenue, "{}", row.station);
        }
    }

    #[test]
    fn test_daily_dates_consecutive() {
        let days = daily_financials();
        assert_eq!(days[0].date, date(2024, 1, 15));
        assert_eq!(days[5].date, date(2024, 1, 20));
    }
}
