use ulid::Ulid;

use crate::limits::*;
use crate::model::*;

use super::EngineError;

/// A create/update body that passed presence, parse and limit checks.
#[derive(Debug, Clone)]
pub(crate) struct ValidRequest {
    pub user_id: String,
    pub start_time: String,
    pub end_time: String,
    pub span: Span,
}

/// Presence → timestamp parse/order → limits. First failure wins.
pub(crate) fn validate_request(req: BookingRequest) -> Result<ValidRequest, EngineError> {
    let (user_id, start_time, end_time) = match (req.user_id, req.start_time, req.end_time) {
        (Some(u), Some(s), Some(e)) if !u.is_empty() && !s.is_empty() && !e.is_empty() => {
            (u, s, e)
        }
        _ => return Err(EngineError::InvalidInput),
    };

    let start = parse_timestamp(&start_time)?;
    let end = parse_timestamp(&end_time)?;
    if start >= end {
        return Err(EngineError::InvalidTimeRange);
    }
    let span = Span::new(start, end);

    if user_id.len() > MAX_USER_ID_LEN {
        return Err(EngineError::LimitExceeded("userId too long"));
    }

    Ok(ValidRequest {
        user_id,
        start_time,
        end_time,
        span,
    })
}

fn parse_timestamp(raw: &str) -> Result<Ms, EngineError> {
    // Nothing this long is a timestamp we accept. Anything chrono can
    // represent is in range, before 1970 included.
    if raw.len() > MAX_TIMESTAMP_LEN {
        return Err(EngineError::InvalidTimeRange);
    }
    parse_instant(raw).ok_or(EngineError::InvalidTimeRange)
}

/// Fails with the first booking whose span overlaps `span`, skipping `exclude`
/// (the booking being updated never conflicts with itself).
pub(crate) fn check_no_conflict(
    bookings: &[Booking],
    span: &Span,
    exclude: Option<Ulid>,
) -> Result<(), EngineError> {
    let hit = bookings
        .iter()
        .filter(|b| Some(b.id) != exclude)
        .find(|b| b.span.overlaps(span));
    match hit {
        Some(b) => Err(EngineError::Conflict(b.id)),
        None => Ok(()),
    }
}
