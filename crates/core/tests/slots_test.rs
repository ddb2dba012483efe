use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tutorsync_core::clock::FixedClock;
use tutorsync_core::errors::BookingError;
use tutorsync_core::models::lesson::{DurationType, LessonStatus, NewLesson};
use tutorsync_core::slots::SlotService;
use tutorsync_core::store::memory::InMemorySlotStore;
use tutorsync_core::store::SlotStore;
use uuid::Uuid;

fn dt(h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 11, h, mi, 0).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 10, 9, 0, 0).unwrap()
}

fn service(store: Arc<InMemorySlotStore>) -> SlotService {
    SlotService::new(store, Arc::new(FixedClock::at(now())))
}

#[tokio::test]
async fn test_register_thirty_creates_one_slot() {
    let store = Arc::new(InMemorySlotStore::new());
    let service = service(Arc::clone(&store));
    let tutor = Uuid::new_v4();

    let created = service
        .register(tutor, dt(14, 0), DurationType::Thirty)
        .await
        .expect("registration should succeed");

    assert_eq!(created.len(), 1);
    assert_eq!(created[0].start_time, dt(14, 0));
    assert_eq!(created[0].end_time, dt(14, 30));
    assert!(!created[0].booked);
}

#[tokio::test]
async fn test_register_sixty_creates_consecutive_pair() {
    let store = Arc::new(InMemorySlotStore::new());
    let service = service(Arc::clone(&store));
    let tutor = Uuid::new_v4();

    let created = service
        .register(tutor, dt(14, 0), DurationType::Sixty)
        .await
        .expect("registration should succeed");

    assert_eq!(created.len(), 2);
    assert_eq!(created[0].start_time, dt(14, 0));
    assert_eq!(created[1].start_time, dt(14, 30));
    assert_eq!(created[1].end_time, dt(15, 0));
}

#[tokio::test]
async fn test_register_rejects_past_start() {
    let store = Arc::new(InMemorySlotStore::new());
    let service = service(Arc::clone(&store));

    let result = service
        .register(
            Uuid::new_v4(),
            Utc.with_ymd_and_hms(2030, 6, 9, 14, 0, 0).unwrap(),
            DurationType::Thirty,
        )
        .await;

    assert!(matches!(result, Err(BookingError::StartTimePassed)));
}

#[tokio::test]
async fn test_register_rejects_misaligned_start() {
    let store = Arc::new(InMemorySlotStore::new());
    let service = service(Arc::clone(&store));

    let result = service
        .register(Uuid::new_v4(), dt(14, 15), DurationType::Thirty)
        .await;

    assert!(matches!(result, Err(BookingError::InvalidStartTime)));
}

#[tokio::test]
async fn test_register_is_idempotent() {
    let store = Arc::new(InMemorySlotStore::new());
    let service = service(Arc::clone(&store));
    let tutor = Uuid::new_v4();

    let first = service
        .register(tutor, dt(14, 0), DurationType::Thirty)
        .await
        .expect("first registration should succeed");
    let second = service
        .register(tutor, dt(14, 0), DurationType::Thirty)
        .await
        .expect("duplicate registration should not fail");

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());

    let stored = service.slots_for_tutor(tutor).await.expect("listing");
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_register_sixty_skips_existing_unit() {
    let store = Arc::new(InMemorySlotStore::new());
    let service = service(Arc::clone(&store));
    let tutor = Uuid::new_v4();

    service
        .register(tutor, dt(14, 0), DurationType::Thirty)
        .await
        .expect("first registration should succeed");
    let created = service
        .register(tutor, dt(14, 0), DurationType::Sixty)
        .await
        .expect("overlapping registration should not fail");

    // Only the missing 14:30 unit is created.
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].start_time, dt(14, 30));

    let stored = service.slots_for_tutor(tutor).await.expect("listing");
    assert_eq!(stored.len(), 2);
}

#[tokio::test]
async fn test_delete_own_unbooked_slot() {
    let store = Arc::new(InMemorySlotStore::new());
    let service = service(Arc::clone(&store));
    let tutor = Uuid::new_v4();

    let created = service
        .register(tutor, dt(14, 0), DurationType::Thirty)
        .await
        .expect("registration should succeed");

    service
        .delete(created[0].id, tutor)
        .await
        .expect("deletion should succeed");

    let stored = service.slots_for_tutor(tutor).await.expect("listing");
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_delete_unknown_slot() {
    let store = Arc::new(InMemorySlotStore::new());
    let service = service(Arc::clone(&store));

    let result = service.delete(Uuid::new_v4(), Uuid::new_v4()).await;

    assert!(matches!(result, Err(BookingError::SlotNotFound)));
}

#[tokio::test]
async fn test_delete_requires_ownership() {
    let store = Arc::new(InMemorySlotStore::new());
    let service = service(Arc::clone(&store));
    let owner = Uuid::new_v4();

    let created = service
        .register(owner, dt(14, 0), DurationType::Thirty)
        .await
        .expect("registration should succeed");

    let result = service.delete(created[0].id, Uuid::new_v4()).await;

    assert!(matches!(result, Err(BookingError::NotSlotOwner)));
}

#[tokio::test]
async fn test_delete_rejects_booked_slot() {
    let store = Arc::new(InMemorySlotStore::new());
    let service = service(Arc::clone(&store));
    let tutor = Uuid::new_v4();

    let created = service
        .register(tutor, dt(14, 0), DurationType::Thirty)
        .await
        .expect("registration should succeed");

    let lesson = NewLesson {
        student_id: Uuid::new_v4(),
        tutor_id: tutor,
        start_time: created[0].start_time,
        end_time: created[0].end_time,
        duration: DurationType::Thirty,
        status: LessonStatus::Confirmed,
    };
    store
        .commit_booking(lesson, vec![created[0].id])
        .await
        .expect("commit booking");

    let result = service.delete(created[0].id, tutor).await;

    assert!(matches!(result, Err(BookingError::AlreadyBooked)));
}
