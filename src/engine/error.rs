use ulid::Ulid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A required field was absent or empty.
    InvalidInput,
    /// A timestamp failed to parse, or start was not before end.
    InvalidTimeRange,
    /// The proposed span overlaps the booking with this id.
    Conflict(Ulid),
    NotFound(Ulid),
    LimitExceeded(&'static str),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidInput => {
                write!(f, "userId, startTime and endTime are required")
            }
            EngineError::InvalidTimeRange => {
                write!(f, "Invalid startTime or endTime (check format or logical order)")
            }
            EngineError::Conflict(_) => write!(f, "Booking time conflicts with existing booking"),
            EngineError::NotFound(_) => write!(f, "Booking not found"),
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
