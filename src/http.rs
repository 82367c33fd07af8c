//! HTTP surface for the booking engine.
//!
//! ## Routes
//!
//! - `GET    /bookings`     — every booking, in insertion order.
//! - `GET    /bookings/:id` — one booking, or 404.
//! - `POST   /bookings`     — create from `{userId, startTime, endTime}`; 201.
//! - `PUT    /bookings/:id` — replace user and times; id is kept.
//! - `DELETE /bookings/:id` — remove and return the booking.
//! - `GET    /health`       — `{ "ok": true, "bookings": n }`.
//!
//! Failures are `{ "error": "..." }` with 400, 404 or 409.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use ulid::Ulid;

use crate::engine::{Engine, EngineError};
use crate::model::BookingRequest;
use crate::observability::{REQUEST_DURATION_SECONDS, REQUESTS_TOTAL, op_label};

/// Which endpoint handled a request. Used as a metrics label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    List,
    Get,
    Create,
    Update,
    Delete,
    Health,
}

/// Everything a handler can fail with, mapped to a status in one place.
#[derive(Debug)]
pub enum ApiError {
    Engine(EngineError),
    /// Path segment that is not a booking id at all.
    UnknownId,
    /// Body missing, not JSON, or fields of the wrong type.
    BadBody(String),
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        ApiError::Engine(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Engine(EngineError::NotFound(_)) | ApiError::UnknownId => {
                StatusCode::NOT_FOUND
            }
            ApiError::Engine(EngineError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Engine(
                EngineError::InvalidInput
                | EngineError::InvalidTimeRange
                | EngineError::LimitExceeded(_),
            )
            | ApiError::BadBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Engine(e) => e.to_string(),
            ApiError::UnknownId => "Booking not found".to_string(),
            ApiError::BadBody(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}

/// Build the router over a shared engine.
pub fn router(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/bookings", get(list_bookings).post(create_booking))
        .route(
            "/bookings/:id",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
        .with_state(engine)
}

/// Serve until `shutdown` resolves, then let in-flight requests finish.
pub async fn serve(
    engine: Arc<Engine>,
    listener: TcpListener,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, router(engine))
        .with_graceful_shutdown(shutdown)
        .await
}

fn parse_id(raw: &str) -> Result<Ulid, ApiError> {
    Ulid::from_string(raw).map_err(|_| ApiError::UnknownId)
}

fn parse_body(
    body: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<BookingRequest, ApiError> {
    body.map(|Json(req)| req)
        .map_err(|rejection| ApiError::BadBody(rejection.body_text()))
}

fn finish(op: Op, started: Instant, response: Response) -> Response {
    let label = op_label(op);
    let status = response.status().as_u16().to_string();
    metrics::counter!(REQUESTS_TOTAL, "op" => label, "status" => status).increment(1);
    metrics::histogram!(REQUEST_DURATION_SECONDS, "op" => label)
        .record(started.elapsed().as_secs_f64());
    response
}

async fn health(State(engine): State<Arc<Engine>>) -> Response {
    let started = Instant::now();
    let body = Json(json!({ "ok": true, "bookings": engine.booking_count().await }));
    finish(Op::Health, started, body.into_response())
}

async fn list_bookings(State(engine): State<Arc<Engine>>) -> Response {
    let started = Instant::now();
    let bookings = engine.list_bookings().await;
    finish(Op::List, started, Json(bookings).into_response())
}

async fn get_booking(State(engine): State<Arc<Engine>>, Path(id): Path<String>) -> Response {
    let started = Instant::now();
    let result = async {
        let booking = engine.get_booking(parse_id(&id)?).await?;
        Ok::<_, ApiError>(Json(booking))
    }
    .await;
    finish(Op::Get, started, result.into_response())
}

async fn create_booking(
    State(engine): State<Arc<Engine>>,
    body: Result<Json<BookingRequest>, JsonRejection>,
) -> Response {
    let started = Instant::now();
    let result = async {
        let req = parse_body(body)?;
        let booking = engine.create_booking(req).await?;
        Ok::<_, ApiError>((StatusCode::CREATED, Json(booking)))
    }
    .await;
    finish(Op::Create, started, result.into_response())
}

async fn update_booking(
    State(engine): State<Arc<Engine>>,
    Path(id): Path<String>,
    body: Result<Json<BookingRequest>, JsonRejection>,
) -> Response {
    let started = Instant::now();
    let result = async {
        // An id that can't exist is a 404 before the body is looked at.
        let id = parse_id(&id)?;
        let req = parse_body(body)?;
        let booking = engine.update_booking(id, req).await?;
        Ok::<_, ApiError>(Json(booking))
    }
    .await;
    finish(Op::Update, started, result.into_response())
}

async fn delete_booking(State(engine): State<Arc<Engine>>, Path(id): Path<String>) -> Response {
    let started = Instant::now();
    let result = async {
        let booking = engine.delete_booking(parse_id(&id)?).await?;
        Ok::<_, ApiError>(Json(booking))
    }
    .await;
    finish(Op::Delete, started, result.into_response())
}
