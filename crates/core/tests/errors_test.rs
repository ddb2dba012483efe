use tutorsync_core::errors::{BookingError, BookingResult};

#[test]
fn test_booking_error_display() {
    assert_eq!(
        BookingError::SlotNotFound.to_string(),
        "Availability slot not found"
    );
    assert_eq!(
        BookingError::NoAvailableTutor.to_string(),
        "No tutor is available for the requested time"
    );
    assert_eq!(
        BookingError::Validation("missing date".to_string()).to_string(),
        "Validation error: missing date"
    );
    assert!(
        BookingError::Database(eyre::eyre!("connection refused"))
            .to_string()
            .contains("Database error:")
    );
}

#[test]
fn test_error_codes_are_stable() {
    assert_eq!(BookingError::InvalidStartTime.code(), "AVAILABILITY_001");
    assert_eq!(BookingError::AlreadyBooked.code(), "AVAILABILITY_002");
    assert_eq!(BookingError::StartTimePassed.code(), "AVAILABILITY_003");
    assert_eq!(BookingError::SlotNotFound.code(), "AVAILABILITY_004");
    assert_eq!(BookingError::NotSlotOwner.code(), "AVAILABILITY_005");
    assert_eq!(BookingError::DateInPast.code(), "DATE_001");
    assert_eq!(BookingError::NoAvailableTutor.code(), "TUTOR_001");
    assert_eq!(BookingError::LockContended.code(), "LOCK_001");
}

#[test]
fn test_eyre_reports_convert_to_database_errors() {
    fn storage_failure() -> eyre::Result<()> {
        Err(eyre::eyre!("relation does not exist"))
    }

    fn through_engine() -> BookingResult<()> {
        storage_failure()?;
        Ok(())
    }

    let err = through_engine().expect_err("should propagate");
    assert!(matches!(err, BookingError::Database(_)));
    assert_eq!(err.code(), "SYS_001");
}
