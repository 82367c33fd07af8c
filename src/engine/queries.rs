use ulid::Ulid;

use crate::model::*;

use super::{Engine, EngineError};

impl Engine {
    /// All bookings in insertion order.
    pub async fn list_bookings(&self) -> Vec<Booking> {
        self.bookings.read().await.clone()
    }

    pub async fn get_booking(&self, id: Ulid) -> Result<Booking, EngineError> {
        self.bookings
            .read()
            .await
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(EngineError::NotFound(id))
    }

    pub async fn booking_count(&self) -> usize {
        self.bookings.read().await.len()
    }
}
