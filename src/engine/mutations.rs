use tracing::{debug, info};
use ulid::Ulid;

use crate::model::*;

use super::conflict::{check_no_conflict, validate_request};
use super::{Engine, EngineError};

impl Engine {
    /// Validate, check for overlap, append. Serialized with other writers.
    pub async fn create_booking(&self, req: BookingRequest) -> Result<Booking, EngineError> {
        self.serializer
            .run_exclusive(move || async move {
                let valid = {
                    let bookings = self.bookings.read().await;
                    let valid = validate_request(req)?;
                    if bookings.len() >= self.max_bookings {
                        return Err(EngineError::LimitExceeded("too many bookings"));
                    }
                    check_no_conflict(&bookings, &valid.span, None)?;
                    valid
                };

                let booking = Booking {
                    id: Ulid::new(),
                    user_id: valid.user_id,
                    start_time: valid.start_time,
                    end_time: valid.end_time,
                    span: valid.span,
                };
                let mut bookings = self.bookings.write().await;
                bookings.push(booking.clone());
                self.record_active(bookings.len());
                info!("booking {} created for {}", booking.id, booking.user_id);
                Ok::<_, EngineError>(booking)
            })
            .await
            .inspect_err(|e| note_rejection("create", e))
    }

    /// Replace a booking's user and times in place. Id and position are kept.
    /// Serialized with other writers.
    pub async fn update_booking(
        &self,
        id: Ulid,
        req: BookingRequest,
    ) -> Result<Booking, EngineError> {
        self.serializer
            .run_exclusive(move || async move {
                let valid = {
                    let bookings = self.bookings.read().await;
                    if !bookings.iter().any(|b| b.id == id) {
                        return Err(EngineError::NotFound(id));
                    }
                    let valid = validate_request(req)?;
                    check_no_conflict(&bookings, &valid.span, Some(id))?;
                    valid
                };

                let mut bookings = self.bookings.write().await;
                // Delete doesn't go through the serializer; the target may be gone.
                let slot = bookings
                    .iter_mut()
                    .find(|b| b.id == id)
                    .ok_or(EngineError::NotFound(id))?;
                slot.user_id = valid.user_id;
                slot.start_time = valid.start_time;
                slot.end_time = valid.end_time;
                slot.span = valid.span;
                info!("booking {id} updated");
                Ok::<_, EngineError>(slot.clone())
            })
            .await
            .inspect_err(|e| note_rejection("update", e))
    }

    /// Remove and return a booking. Not serialized with create/update.
    pub async fn delete_booking(&self, id: Ulid) -> Result<Booking, EngineError> {
        let mut bookings = self.bookings.write().await;
        let pos = bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or(EngineError::NotFound(id))?;
        let removed = bookings.remove(pos);
        self.record_active(bookings.len());
        info!("booking {id} deleted");
        Ok(removed)
    }
}

fn note_rejection(op: &str, err: &EngineError) {
    if let EngineError::Conflict(other) = err {
        metrics::counter!(crate::observability::CONFLICTS_TOTAL).increment(1);
        debug!("{op} rejected: overlaps booking {other}");
    } else {
        debug!("{op} rejected: {err}");
    }
}
