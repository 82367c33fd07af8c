use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unix milliseconds — the only time type.
pub type Ms = i64;

/// Offset-less layouts accepted after RFC 3339. Read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Ms,
    pub end: Ms,
}

impl Span {
    pub fn new(start: Ms, end: Ms) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A reservation of the resource. `start_time`/`end_time` are echoed back
/// exactly as the client sent them; `span` is what conflicts are checked on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Ulid,
    pub user_id: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip)]
    pub span: Span,
}

/// Body of a create or update. Every field is optional on the wire so that
/// absence surfaces as `InvalidInput` rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl BookingRequest {
    pub fn new(user_id: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
        }
    }
}

/// Parse a client timestamp into unix milliseconds.
///
/// Accepts RFC 3339 (`2024-01-01T10:00:00Z`, `2024-01-01T10:00:00+02:00`),
/// offset-less date-times (`2024-01-01T10:00`, `2024-01-01 10:00:00.250`)
/// and bare dates (`2024-01-01`). Anything without an offset is UTC.
pub fn parse_instant(raw: &str) -> Option<Ms> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(ndt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc().timestamp_millis())
}
