use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Booking, Court, SlotTime};

/// One grid row: a start time and the booking (if any) occupying each court.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRow {
    pub start_time: SlotTime,
    pub court_one: Option<Booking>,
    pub court_two: Option<Booking>,
}

/// Projects one day's bookings into a two-column, time-ordered grid.
///
/// Emits exactly one row per start time occupied on at least one court,
/// ascending; unoccupied cells stay empty, free slots are implicit. Pure and
/// order-independent. If the input ever holds two bookings for the same
/// (court, start time) cell, the last one seen wins; the store's unique
/// constraint keeps that from happening upstream.
pub fn build_day_grid(bookings: &[Booking]) -> Vec<ScheduleRow> {
    let mut rows: BTreeMap<SlotTime, (Option<Booking>, Option<Booking>)> = BTreeMap::new();

    for booking in bookings {
        let cell = rows.entry(booking.start_time).or_default();
        match booking.court {
            Court::CourtOne => cell.0 = Some(booking.clone()),
            Court::CourtTwo => cell.1 = Some(booking.clone()),
        }
    }

    rows.into_iter()
        .map(|(start_time, (court_one, court_two))| ScheduleRow {
            start_time,
            court_one,
            court_two,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn booking(id: &str, court: Court, start: &str, end: &str) -> Booking {
        Booking {
            id: id.to_string(),
            court,
            booking_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            client_id: None,
            client_name: None,
            price_per_hour: None,
            total_price: None,
            price: None,
            payment_type: None,
            created_at: NaiveDateTime::parse_from_str(
                "2025-07-01 08:00:00",
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
        }
    }

    #[test]
    fn test_two_courts_interleaved() {
        let grid = build_day_grid(&[
            booking("a", Court::CourtOne, "09:00", "10:00"),
            booking("b", Court::CourtTwo, "09:30", "10:30"),
        ]);

        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0].start_time.to_string(), "09:00");
        assert_eq!(grid[0].court_one.as_ref().unwrap().id, "a");
        assert!(grid[0].court_two.is_none());
        assert_eq!(grid[1].start_time.to_string(), "09:30");
        assert!(grid[1].court_one.is_none());
        assert_eq!(grid[1].court_two.as_ref().unwrap().id, "b");
    }

    #[test]
    fn test_shared_start_time_is_one_row() {
        let grid = build_day_grid(&[
            booking("a", Court::CourtOne, "18:00", "19:00"),
            booking("b", Court::CourtTwo, "18:00", "20:00"),
        ]);

        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].court_one.as_ref().unwrap().id, "a");
        assert_eq!(grid[0].court_two.as_ref().unwrap().id, "b");
    }

    #[test]
    fn test_order_independent() {
        let a = booking("a", Court::CourtOne, "09:00", "10:00");
        let b = booking("b", Court::CourtTwo, "07:30", "08:30");
        let c = booking("c", Court::CourtOne, "22:00", "02:00");

        let forward = build_day_grid(&[a.clone(), b.clone(), c.clone()]);
        let backward = build_day_grid(&[c, b, a]);

        let starts: Vec<String> = forward.iter().map(|r| r.start_time.to_string()).collect();
        let starts_rev: Vec<String> = backward.iter().map(|r| r.start_time.to_string()).collect();
        assert_eq!(starts, starts_rev);
        assert_eq!(starts, vec!["07:30", "09:00", "22:00"]);
    }

    #[test]
    fn test_no_rows_without_bookings() {
        assert!(build_day_grid(&[]).is_empty());
    }

    #[test]
    fn test_duplicate_cell_keeps_last() {
        let grid = build_day_grid(&[
            booking("first", Court::CourtOne, "09:00", "10:00"),
            booking("second", Court::CourtOne, "09:00", "11:00"),
        ]);

        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].court_one.as_ref().unwrap().id, "second");
    }
}
