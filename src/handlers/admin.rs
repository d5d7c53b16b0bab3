use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, Court, NewBooking, PaymentMethod, PaymentState, SlotTime};
use crate::services::auth::require_session;
use crate::services::billing::{self, RevenueSummary};
use crate::services::schedule;
use crate::state::AppState;

#[derive(Serialize)]
pub struct BookingResponse {
    id: String,
    court: Court,
    booking_date: String,
    start_time: SlotTime,
    end_time: SlotTime,
    client_id: Option<String>,
    client_name: Option<String>,
    price_per_hour: Option<Decimal>,
    total_price: Option<Decimal>,
    price: Option<Decimal>,
    payment_type: Option<PaymentMethod>,
    payment_state: PaymentState,
    created_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        let payment_state = b.payment_state();
        BookingResponse {
            id: b.id,
            court: b.court,
            booking_date: b.booking_date.format("%Y-%m-%d").to_string(),
            start_time: b.start_time,
            end_time: b.end_time,
            client_id: b.client_id,
            client_name: b.client_name,
            price_per_hour: b.price_per_hour,
            total_price: b.total_price,
            price: b.price,
            payment_type: b.payment_type,
            payment_state,
            created_at: b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

// GET /api/admin/bookings
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub date: Option<NaiveDate>,
}

pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    require_session(&state, &headers)?;

    let bookings = {
        let db = state.db.lock().unwrap();
        match query.date {
            Some(date) => queries::get_bookings_for_date(&db, date)?,
            None => queries::get_all_bookings(&db)?,
        }
    };

    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

// POST /api/admin/bookings
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub court: Court,
    pub booking_date: NaiveDate,
    pub start_time: SlotTime,
    pub end_time: SlotTime,
    pub client_id: Option<String>,
    pub price_per_hour: Option<Decimal>,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    require_session(&state, &headers)?;

    if body.client_id.is_none() && body.price_per_hour.is_none() {
        return Err(AppError::Validation(
            "a client or an hourly rate is required".to_string(),
        ));
    }

    let total_price = body
        .price_per_hour
        .map(|rate| billing::total_price(rate, body.start_time, body.end_time));

    let new = NewBooking {
        court: body.court,
        booking_date: body.booking_date,
        start_time: body.start_time,
        end_time: body.end_time,
        client_id: body.client_id,
        price_per_hour: body.price_per_hour,
        total_price,
    };

    let booking = {
        let db = state.db.lock().unwrap();
        queries::create_booking(&db, &new)?
    };

    tracing::info!(
        booking_id = %booking.id,
        court = booking.court.as_str(),
        date = %booking.booking_date,
        "booking created"
    );

    Ok(Json(booking.into()))
}

// POST /api/admin/bookings/:id/payment
#[derive(Deserialize)]
pub struct PaymentRequest {
    pub amount: String,
    pub method: PaymentMethod,
}

pub async fn record_payment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<PaymentRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    require_session(&state, &headers)?;

    let amount: Decimal = body
        .amount
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("invalid amount".to_string()))?;

    let updated = {
        let db = state.db.lock().unwrap();
        queries::update_booking_payment(&db, &id, amount, body.method)?
    };

    if updated {
        Ok(Json(serde_json::json!({"ok": true})))
    } else {
        Err(AppError::NotFound(format!("booking {id}")))
    }
}

// DELETE /api/admin/bookings/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    require_session(&state, &headers)?;

    let removed = {
        let db = state.db.lock().unwrap();
        queries::delete_booking(&db, &id)?
    };

    if removed {
        tracing::info!(booking_id = %id, "booking deleted");
        Ok(Json(serde_json::json!({"ok": true})))
    } else {
        Err(AppError::NotFound(format!("booking {id}")))
    }
}

// GET /api/admin/schedule
#[derive(Deserialize)]
pub struct ScheduleQuery {
    pub date: NaiveDate,
}

#[derive(Serialize)]
pub struct ScheduleRowResponse {
    start_time: SlotTime,
    court_one: Option<BookingResponse>,
    court_two: Option<BookingResponse>,
}

pub async fn get_schedule(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Vec<ScheduleRowResponse>>, AppError> {
    require_session(&state, &headers)?;

    let bookings = {
        let db = state.db.lock().unwrap();
        queries::get_bookings_for_date(&db, query.date)?
    };

    let rows = schedule::build_day_grid(&bookings)
        .into_iter()
        .map(|row| ScheduleRowResponse {
            start_time: row.start_time,
            court_one: row.court_one.map(Into::into),
            court_two: row.court_two.map(Into::into),
        })
        .collect();

    Ok(Json(rows))
}

// GET /api/admin/clients
#[derive(Deserialize)]
pub struct ClientsQuery {
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct ClientResponse {
    id: String,
    name: String,
    created_at: String,
}

pub async fn get_clients(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ClientsQuery>,
) -> Result<Json<Vec<ClientResponse>>, AppError> {
    require_session(&state, &headers)?;

    let clients = {
        let db = state.db.lock().unwrap();
        queries::list_clients(&db)?
    };

    // The directory is small; filtering happens here, not in SQL.
    let needle = query.search.unwrap_or_default().trim().to_lowercase();
    let response = clients
        .into_iter()
        .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
        .map(|c| ClientResponse {
            id: c.id,
            name: c.name,
            created_at: c.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();

    Ok(Json(response))
}

// POST /api/admin/clients
#[derive(Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
}

pub async fn create_client(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateClientRequest>,
) -> Result<Json<ClientResponse>, AppError> {
    require_session(&state, &headers)?;

    let client = {
        let db = state.db.lock().unwrap();
        queries::create_client(&db, &body.name)?
    };

    Ok(Json(ClientResponse {
        id: client.id,
        name: client.name,
        created_at: client.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    }))
}

// GET /api/admin/stats
#[derive(Deserialize)]
pub struct StatsQuery {
    pub date: Option<NaiveDate>,
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<StatsQuery>,
) -> Result<Json<RevenueSummary>, AppError> {
    require_session(&state, &headers)?;

    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    let (today, all) = {
        let db = state.db.lock().unwrap();
        (
            queries::get_bookings_for_date(&db, date)?,
            queries::get_all_bookings(&db)?,
        )
    };

    Ok(Json(billing::revenue_summary(&today, &all)))
}
