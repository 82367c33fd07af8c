mod conflict;
mod error;
mod mutations;
mod queries;
mod serializer;

pub use error::EngineError;
pub use serializer::MutationSerializer;

use tokio::sync::RwLock;

use crate::limits::MAX_BOOKINGS;
use crate::model::*;

/// The booking store for one resource.
///
/// Holds the booking set in insertion order and guarantees that no two
/// bookings overlap. Create and update run inside the [`MutationSerializer`];
/// list, get and delete only take the set's own lock.
pub struct Engine {
    bookings: RwLock<Vec<Booking>>,
    serializer: MutationSerializer,
    max_bookings: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_max_bookings(MAX_BOOKINGS)
    }

    pub fn with_max_bookings(max_bookings: usize) -> Self {
        Self {
            bookings: RwLock::new(Vec::new()),
            serializer: MutationSerializer::new(),
            max_bookings,
        }
    }

    fn record_active(&self, count: usize) {
        metrics::gauge!(crate::observability::BOOKINGS_ACTIVE).set(count as f64);
    }
}
