use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Availability slot not found")]
    SlotNotFound,

    #[error("Only the owning tutor can delete an availability slot")]
    NotSlotOwner,

    #[error("An already booked slot cannot be deleted")]
    AlreadyBooked,

    #[error("Start time must be on the hour or half hour")]
    InvalidStartTime,

    #[error("Start time is in the past")]
    StartTimePassed,

    #[error("The requested date is in the past")]
    DateInPast,

    #[error("No tutor is available for the requested time")]
    NoAvailableTutor,

    #[error("The time slot is already being booked by another request")]
    LockContended,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl BookingError {
    /// Stable machine-readable code surfaced alongside the HTTP status, so
    /// callers can branch on failure kind without parsing messages.
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::InvalidStartTime => "AVAILABILITY_001",
            BookingError::AlreadyBooked => "AVAILABILITY_002",
            BookingError::StartTimePassed => "AVAILABILITY_003",
            BookingError::SlotNotFound => "AVAILABILITY_004",
            BookingError::NotSlotOwner => "AVAILABILITY_005",
            BookingError::DateInPast => "DATE_001",
            BookingError::NoAvailableTutor => "TUTOR_001",
            BookingError::LockContended => "LOCK_001",
            BookingError::Validation(_) => "SYS_002",
            BookingError::Database(_) => "SYS_001",
        }
    }
}
