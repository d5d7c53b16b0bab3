use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Booking, Client, Court, NewBooking, PaymentMethod, SlotTime};

const BOOKING_COLUMNS: &str = "b.id, b.court, b.booking_date, b.start_time, b.end_time, \
     b.client_id, c.name, b.price_per_hour, b.total_price, b.price, b.payment_type, b.created_at";

// ── Clients ──

pub fn create_client(conn: &Connection, name: &str) -> Result<Client, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("client name is required".to_string()));
    }

    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now().naive_utc();
    conn.execute(
        "INSERT INTO clients (id, name, created_at) VALUES (?1, ?2, ?3)",
        params![id, name, created_at.format("%Y-%m-%d %H:%M:%S").to_string()],
    )?;

    Ok(Client {
        id,
        name: name.to_string(),
        created_at,
    })
}

pub fn list_clients(conn: &Connection) -> Result<Vec<Client>, AppError> {
    let mut stmt =
        conn.prepare("SELECT id, name, created_at FROM clients ORDER BY name COLLATE NOCASE ASC")?;
    let rows = stmt.query_map([], |row| {
        let id: String = row.get(0)?;
        let name: String = row.get(1)?;
        let created_at_str: String = row.get(2)?;
        Ok(Client {
            id,
            name,
            created_at: parse_datetime(&created_at_str),
        })
    })?;

    let mut clients = vec![];
    for row in rows {
        clients.push(row?);
    }
    Ok(clients)
}

// ── Bookings ──

pub fn create_booking(conn: &Connection, new: &NewBooking) -> Result<Booking, AppError> {
    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now().naive_utc();

    conn.execute(
        "INSERT INTO bookings (id, court, booking_date, start_time, end_time, client_id, price_per_hour, total_price, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            id,
            new.court.as_str(),
            new.booking_date.format("%Y-%m-%d").to_string(),
            new.start_time.to_string(),
            new.end_time.to_string(),
            new.client_id,
            new.price_per_hour.map(|p| p.to_string()),
            new.total_price.map(|p| p.to_string()),
            created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;

    match get_booking_by_id(conn, &id)? {
        Some(booking) => Ok(booking),
        None => Err(AppError::NotFound(format!("booking {id}"))),
    }
}

pub fn get_bookings_for_date(conn: &Connection, date: NaiveDate) -> Result<Vec<Booking>, AppError> {
    let sql = format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings b
         LEFT JOIN clients c ON c.id = b.client_id
         WHERE b.booking_date = ?1
         ORDER BY b.start_time ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![date.format("%Y-%m-%d").to_string()],
        parse_booking_row,
    )?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn get_all_bookings(conn: &Connection) -> Result<Vec<Booking>, AppError> {
    let sql = format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings b
         LEFT JOIN clients c ON c.id = b.client_id
         ORDER BY b.booking_date DESC, b.start_time ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], parse_booking_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> Result<Option<Booking>, AppError> {
    let sql = format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings b
         LEFT JOIN clients c ON c.id = b.client_id
         WHERE b.id = ?1"
    );
    let result = conn.query_row(&sql, params![id], parse_booking_row);

    match result {
        Ok(booking) => Ok(Some(booking)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Price and payment method are written together; there is no partial update.
pub fn update_booking_payment(
    conn: &Connection,
    id: &str,
    price: Decimal,
    method: PaymentMethod,
) -> Result<bool, AppError> {
    let count = conn.execute(
        "UPDATE bookings SET price = ?1, payment_type = ?2 WHERE id = ?3",
        params![price.to_string(), method.as_str(), id],
    )?;
    Ok(count > 0)
}

pub fn delete_booking(conn: &Connection, id: &str) -> Result<bool, AppError> {
    let count = conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

// ── Row parsing ──

fn parse_booking_row(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    let id: String = row.get(0)?;
    let court_str: String = row.get(1)?;
    let date_str: String = row.get(2)?;
    let start_str: String = row.get(3)?;
    let end_str: String = row.get(4)?;
    let client_id: Option<String> = row.get(5)?;
    let client_name: Option<String> = row.get(6)?;
    let price_per_hour: Option<String> = row.get(7)?;
    let total_price: Option<String> = row.get(8)?;
    let price: Option<String> = row.get(9)?;
    let payment_type: Option<String> = row.get(10)?;
    let created_at_str: String = row.get(11)?;

    Ok(Booking {
        id,
        court: Court::parse(&court_str),
        booking_date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive()),
        start_time: parse_slot(&start_str),
        end_time: parse_slot(&end_str),
        client_id,
        client_name,
        price_per_hour: price_per_hour.as_deref().and_then(parse_decimal),
        total_price: total_price.as_deref().and_then(parse_decimal),
        price: price.as_deref().and_then(parse_decimal),
        payment_type: payment_type.as_deref().map(PaymentMethod::parse),
        created_at: parse_datetime(&created_at_str),
    })
}

fn parse_slot(s: &str) -> SlotTime {
    s.parse()
        .unwrap_or(SlotTime { hour: 0, minute: 0 })
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    s.parse().ok()
}

fn parse_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc())
}
