/// Default cap on live bookings held by one engine.
pub const MAX_BOOKINGS: usize = 100_000;

pub const MAX_USER_ID_LEN: usize = 256;

/// Raw timestamp strings longer than this are rejected before parsing.
pub const MAX_TIMESTAMP_LEN: usize = 64;

/// Serializer waits longer than this are logged as a warning.
pub const SLOW_SERIALIZER_WAIT_MS: u64 = 1_000;
