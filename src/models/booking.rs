use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::slot::SlotTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub court: Court,
    pub booking_date: NaiveDate,
    pub start_time: SlotTime,
    pub end_time: SlotTime,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub price_per_hour: Option<Decimal>,
    pub total_price: Option<Decimal>,
    pub price: Option<Decimal>,
    pub payment_type: Option<PaymentMethod>,
    pub created_at: NaiveDateTime,
}

impl Booking {
    /// UNPAID until an amount and a payment method are both on record.
    pub fn payment_state(&self) -> PaymentState {
        if self.price.is_some() && self.payment_type.is_some() {
            PaymentState::Recorded
        } else {
            PaymentState::Unpaid
        }
    }
}

/// Fields the caller supplies; the store assigns id and created_at.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub court: Court,
    pub booking_date: NaiveDate,
    pub start_time: SlotTime,
    pub end_time: SlotTime,
    pub client_id: Option<String>,
    pub price_per_hour: Option<Decimal>,
    pub total_price: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Court {
    CourtOne,
    CourtTwo,
}

impl Court {
    pub fn as_str(&self) -> &'static str {
        match self {
            Court::CourtOne => "COURT_ONE",
            Court::CourtTwo => "COURT_TWO",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "COURT_TWO" => Court::CourtTwo,
            _ => Court::CourtOne,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Cash,
    Online,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Online => "ONLINE",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "ONLINE" => PaymentMethod::Online,
            _ => PaymentMethod::Cash,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentState {
    Unpaid,
    Recorded,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking() -> Booking {
        Booking {
            id: "b-1".to_string(),
            court: Court::CourtOne,
            booking_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            start_time: "09:00".parse().unwrap(),
            end_time: "10:00".parse().unwrap(),
            client_id: Some("c-1".to_string()),
            client_name: Some("Asha".to_string()),
            price_per_hour: None,
            total_price: None,
            price: None,
            payment_type: None,
            created_at: NaiveDateTime::parse_from_str("2025-07-01 08:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        }
    }

    #[test]
    fn test_payment_state_unpaid_by_default() {
        assert_eq!(booking().payment_state(), PaymentState::Unpaid);
    }

    #[test]
    fn test_payment_state_needs_both_fields() {
        let mut b = booking();
        b.price = Some(Decimal::from(500));
        assert_eq!(b.payment_state(), PaymentState::Unpaid);

        b.payment_type = Some(PaymentMethod::Cash);
        assert_eq!(b.payment_state(), PaymentState::Recorded);
    }

    #[test]
    fn test_court_round_trip() {
        assert_eq!(Court::parse(Court::CourtTwo.as_str()), Court::CourtTwo);
        assert_eq!(Court::parse("COURT_ONE"), Court::CourtOne);
    }

    #[test]
    fn test_court_serde_names() {
        assert_eq!(
            serde_json::to_string(&Court::CourtOne).unwrap(),
            "\"COURT_ONE\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Online).unwrap(),
            "\"ONLINE\""
        );
    }
}
