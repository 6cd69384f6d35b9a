//! Rider payout queries and payment processing.

use chrono::NaiveDate;

use crate::data::finance::percent;
use crate::error::{AppError, Result};
use crate::models::finance::{DriverPayment, PaymentStatus};

/// Sort key on the driver payments table. Always descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverSort {
    #[default]
    Earnings,
    Deliveries,
    Outstanding,
}

impl DriverSort {
    pub const ALL: [DriverSort; 3] = [DriverSort::Earnings, DriverSort::Deliveries, DriverSort::Outstanding];

    pub fn label(&self) -> &'static str {
        match self {
            DriverSort::Earnings => "Total Earnings",
            DriverSort::Deliveries => "Deliveries",
            DriverSort::Outstanding => "Outstanding Balance",
        }
    }
}

/// Fleet-wide payout totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PayoutTotals {
    pub earned: f64,
    pub paid: f64,
    pub outstanding: f64,
    pub deliveries: u32,
}

pub fn totals(drivers: &[DriverPayment]) -> PayoutTotals {
    drivers.iter().fold(PayoutTotals::default(), |acc, d| PayoutTotals {
        earned: acc.earned + d.total_earned,
        paid: acc.paid + d.amount_paid,
        outstanding: acc.outstanding + d.outstanding_balance,
        deliveries: acc.deliveries + d.completed_deliveries,
    })
}

/// Filter by payment status (`None` = all), then sort descending.
pub fn filter_and_sort<'a>(
    drivers: &'a [DriverPayment],
    status: Option<PaymentStatus>,
    sort: DriverSort,
) -> Vec<&'a DriverPayment> {
    let mut rows: Vec<&DriverPayment> = drivers
        .iter()
        .filter(|d| status.is_none_or(|s| d.payment_status == s))
        .collect();

    match sort {
        DriverSort::Earnings => rows.sort_by(|a, b| b.total_earned.total_cmp(&a.total_earned)),
        DriverSort::Deliveries => rows.sort_by(|a, b| b.completed_deliveries.cmp(&a.completed_deliveries)),
        DriverSort::Outstanding => rows.sort_by(|a, b| b.outstanding_balance.total_cmp(&a.outstanding_balance)),
    }
    rows
}

/// Count and percentage of riders in each payment status.
pub fn status_distribution(drivers: &[DriverPayment]) -> Vec<(PaymentStatus, usize, f64)> {
    PaymentStatus::ALL
        .iter()
        .map(|&status| {
            let count = drivers.iter().filter(|d| d.payment_status == status).count();
            (status, count, percent(count as f64, drivers.len() as f64))
        })
        .collect()
}

/// Pay `amount` towards a rider's outstanding balance.
pub fn process_payment(
    drivers: &mut [DriverPayment],
    driver_id: &str,
    amount: f64,
    paid_on: NaiveDate,
) -> Result<PaymentStatus> {
    let driver = drivers
        .iter_mut()
        .find(|d| d.id == driver_id)
        .ok_or_else(|| AppError::not_found(format!("Driver {driver_id}")))?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::validation("Payment amount must be greater than zero"));
    }
    if amount > driver.outstanding_balance {
        return Err(AppError::validation(format!(
            "Payment exceeds outstanding balance of {:.2}",
            driver.outstanding_balance
        )));
    }

    driver.amount_paid += amount;
    driver.outstanding_balance -= amount;
    driver.last_payment_date = Some(paid_on);
    driver.payment_status = if driver.outstanding_balance <= f64::EPSILON {
        driver.outstanding_balance = 0.0;
        PaymentStatus::Paid
    } else {
        PaymentStatus::Partial
    };

    tracing::info!(
        "Paid {:.2} to {} ({}), outstanding {:.2}",
        amount,
        driver.name,
        driver.id,
        driver.outstanding_balance
    );
    Ok(driver.payment_status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::seed;

    fn names(rows: &[&DriverPayment]) -> Vec<String> {
        rows.iter().map(|d| d.name.clone()).collect()
    }

    #[test]
    fn test_totals() {
        let t = totals(&seed::driver_payments());
        assert_eq!(t.earned, 4100.0);
        assert_eq!(t.paid, 2950.0);
        assert_eq!(t.outstanding, 1150.0);
        assert_eq!(t.deliveries, 77);
    }

    #[test]
    fn test_sort_descending() {
        let drivers = seed::driver_payments();
        assert_eq!(
            names(&filter_and_sort(&drivers, None, DriverSort::Earnings)),
            ["John Mensah", "Kofi Boateng", "Kwame Asante", "Ama Kofi"]
        );
        assert_eq!(
            names(&filter_and_sort(&drivers, None, DriverSort::Outstanding))[0],
            "Ama Kofi"
        );
        assert_eq!(
            names(&filter_and_sort(&drivers, None, DriverSort::Deliveries))[0],
            "John Mensah"
        );
    }

    #[test]
    fn test_filter_by_status() {
        let drivers = seed::driver_payments();
        let paid = filter_and_sort(&drivers, Some(PaymentStatus::Paid), DriverSort::Earnings);
        assert_eq!(names(&paid), ["John Mensah", "Kofi Boateng"]);
    }

    #[test]
    fn test_distribution() {
        let dist = status_distribution(&seed::driver_payments());
        assert_eq!(dist[0], (PaymentStatus::Paid, 2, 50.0));
        assert_eq!(dist[1].1, 1);
        assert_eq!(dist[2].2, 25.0);
    }

    #[test]
    fn test_process_payment() {
        let mut drivers = seed::driver_payments();
        let today = NaiveDate::from_ymd_opt(2024, 1, 21).unwrap();

        assert_eq!(process_payment(&mut drivers, "DRV-003", 350.0, today).unwrap(), PaymentStatus::Partial);
        assert_eq!(drivers[2].outstanding_balance, 500.0);
        assert_eq!(process_payment(&mut drivers, "DRV-003", 500.0, today).unwrap(), PaymentStatus::Paid);
        assert_eq!(drivers[2].amount_paid, 850.0);
        assert_eq!(drivers[2].last_payment_date, Some(today));

        assert!(process_payment(&mut drivers, "DRV-001", 1.0, today).is_err());
        assert!(process_payment(&mut drivers, "DRV-002", 0.0, today).is_err());
        assert!(process_payment(&mut drivers, "DRV-404", 10.0, today).is_err());
    }
}
