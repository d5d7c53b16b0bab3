use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Booking, PaymentMethod, PaymentState, SlotTime};

/// Billable hours between two slot times. Same-day when the end hour is
/// later; otherwise the interval crosses midnight and wraps the 24h clock
/// (the venue runs 6 AM through 3 AM). Billing is whole-hour: the half-hour
/// slot component does not count.
pub fn duration_hours(start: SlotTime, end: SlotTime) -> u32 {
    let start = start.hour as u32;
    let end = end.hour as u32;
    if end > start {
        end - start
    } else {
        24 - start + end
    }
}

pub fn total_price(price_per_hour: Decimal, start: SlotTime, end: SlotTime) -> Decimal {
    price_per_hour * Decimal::from(duration_hours(start, end))
}

// ── Revenue summary ──

#[derive(Debug, Serialize)]
pub struct RevenueSummary {
    pub today_revenue: Decimal,
    pub payments_collected: usize,
    pub cash_payments: usize,
    pub online_payments: usize,
    pub pending_payments: usize,
    pub pending: Vec<PendingPayment>,
    pub total_revenue: Decimal,
}

#[derive(Debug, Serialize)]
pub struct PendingPayment {
    pub client_name: String,
    pub reason: &'static str,
}

fn recorded_total(bookings: &[Booking]) -> Decimal {
    bookings
        .iter()
        .filter(|b| b.payment_state() == PaymentState::Recorded)
        .filter_map(|b| b.price)
        .sum()
}

/// Day-level payment metrics over the day's bookings plus the full list,
/// computed from the rows as fetched rather than aggregated in the store.
pub fn revenue_summary(today: &[Booking], all: &[Booking]) -> RevenueSummary {
    let recorded = |b: &&Booking| b.payment_state() == PaymentState::Recorded;

    let pending: Vec<PendingPayment> = today
        .iter()
        .filter(|b| b.payment_state() == PaymentState::Unpaid)
        .map(|b| PendingPayment {
            client_name: b.client_name.clone().unwrap_or_else(|| "walk-in".to_string()),
            reason: if b.price.is_none() {
                "no amount set"
            } else {
                "payment type not selected"
            },
        })
        .collect();

    RevenueSummary {
        today_revenue: recorded_total(today),
        payments_collected: today.iter().filter(recorded).count(),
        cash_payments: today
            .iter()
            .filter(|b| b.payment_type == Some(PaymentMethod::Cash))
            .count(),
        online_payments: today
            .iter()
            .filter(|b| b.payment_type == Some(PaymentMethod::Online))
            .count(),
        pending_payments: pending.len(),
        pending,
        total_revenue: recorded_total(all),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use crate::models::Court;

    fn slot(s: &str) -> SlotTime {
        s.parse().unwrap()
    }

    fn booking(id: &str, price: Option<i64>, method: Option<PaymentMethod>) -> Booking {
        Booking {
            id: id.to_string(),
            court: Court::CourtOne,
            booking_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            start_time: slot("09:00"),
            end_time: slot("10:00"),
            client_id: None,
            client_name: Some("Asha".to_string()),
            price_per_hour: None,
            total_price: None,
            price: price.map(Decimal::from),
            payment_type: method,
            created_at: NaiveDateTime::parse_from_str(
                "2025-07-01 08:00:00",
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
        }
    }

    #[test]
    fn test_same_day_duration() {
        assert_eq!(duration_hours(slot("09:00"), slot("10:00")), 1);
        assert_eq!(duration_hours(slot("06:00"), slot("23:00")), 17);
    }

    #[test]
    fn test_overnight_duration_wraps() {
        assert_eq!(duration_hours(slot("22:00"), slot("02:00")), 4);
        assert_eq!(duration_hours(slot("23:00"), slot("01:00")), 2);
    }

    #[test]
    fn test_half_hours_do_not_bill() {
        // Whole-hour deltas only, even on half-hour slots.
        assert_eq!(duration_hours(slot("09:30"), slot("11:00")), 2);
        assert_eq!(duration_hours(slot("09:00"), slot("10:30")), 1);
    }

    #[test]
    fn test_total_price_overnight() {
        let total = total_price(Decimal::from(1000), slot("22:00"), slot("02:00"));
        assert_eq!(total, Decimal::from(4000));
    }

    #[test]
    fn test_revenue_summary_counts() {
        let today = vec![
            booking("a", Some(500), Some(PaymentMethod::Cash)),
            booking("b", Some(800), Some(PaymentMethod::Online)),
            booking("c", None, None),
        ];
        let all = vec![
            today[0].clone(),
            today[1].clone(),
            today[2].clone(),
            booking("old", Some(1200), Some(PaymentMethod::Cash)),
        ];

        let summary = revenue_summary(&today, &all);
        assert_eq!(summary.today_revenue, Decimal::from(1300));
        assert_eq!(summary.payments_collected, 2);
        assert_eq!(summary.cash_payments, 1);
        assert_eq!(summary.online_payments, 1);
        assert_eq!(summary.pending_payments, 1);
        assert_eq!(summary.pending[0].client_name, "Asha");
        assert_eq!(summary.pending[0].reason, "no amount set");
        assert_eq!(summary.total_revenue, Decimal::from(2500));
    }

    #[test]
    fn test_price_without_method_is_pending() {
        let today = vec![booking("a", Some(500), None)];
        let summary = revenue_summary(&today, &today);
        assert_eq!(summary.today_revenue, Decimal::from(0));
        assert_eq!(summary.pending_payments, 1);
        assert_eq!(summary.pending[0].reason, "payment type not selected");
    }
}
