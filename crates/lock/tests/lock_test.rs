use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;
use tutorsync_lock::{InMemoryLockCoordinator, LockCoordinator, LockError};

#[tokio::test]
async fn test_acquire_and_release() {
    let locks = InMemoryLockCoordinator::new();

    let guard = locks
        .acquire("room:1", Duration::from_millis(100), Duration::from_secs(5))
        .await
        .expect("first acquisition should succeed");
    drop(guard);

    // Released, so the same key is immediately available again.
    let guard = locks
        .acquire("room:1", Duration::from_millis(100), Duration::from_secs(5))
        .await
        .expect("reacquisition after release should succeed");
    drop(guard);
}

#[tokio::test]
async fn test_contended_acquire_times_out() {
    let locks = InMemoryLockCoordinator::new();

    let _held = locks
        .acquire("room:1", Duration::from_millis(100), Duration::from_secs(5))
        .await
        .expect("first acquisition should succeed");

    let result = locks
        .acquire("room:1", Duration::from_millis(50), Duration::from_secs(5))
        .await;

    match result {
        Err(LockError::AcquisitionTimeout { key, .. }) => assert_eq!(key, "room:1"),
        Ok(_) => panic!("second acquisition must not succeed while held"),
    }
}

#[tokio::test]
async fn test_distinct_keys_do_not_contend() {
    let locks = InMemoryLockCoordinator::new();

    let _a = locks
        .acquire("room:1", Duration::from_millis(50), Duration::from_secs(5))
        .await
        .expect("first key");
    let _b = locks
        .acquire("room:2", Duration::from_millis(50), Duration::from_secs(5))
        .await
        .expect("unrelated key must be free");
}

#[tokio::test]
async fn test_lease_expiry_admits_successor() {
    let locks = InMemoryLockCoordinator::new();

    // Hold with a tiny lease and never release.
    let stale = locks
        .acquire("room:1", Duration::from_millis(50), Duration::from_millis(20))
        .await
        .expect("first acquisition should succeed");

    // The competitor waits past the lease deadline and claims the key.
    let successor = locks
        .acquire("room:1", Duration::from_millis(500), Duration::from_secs(5))
        .await
        .expect("lease expiry must free the key");

    // Dropping the stale guard must not evict the successor.
    drop(stale);
    let contender = locks
        .acquire("room:1", Duration::from_millis(50), Duration::from_secs(5))
        .await;
    assert!(
        contender.is_err(),
        "successor must still hold the lock after the stale release"
    );
    drop(successor);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_critical_sections_never_overlap() {
    let locks = Arc::new(InMemoryLockCoordinator::new());
    let in_section = Arc::new(AtomicBool::new(false));
    let overlaps = Arc::new(AtomicU32::new(0));
    let completed = Arc::new(AtomicU32::new(0));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let locks = Arc::clone(&locks);
        let in_section = Arc::clone(&in_section);
        let overlaps = Arc::clone(&overlaps);
        let completed = Arc::clone(&completed);

        handles.push(tokio::spawn(async move {
            let guard = locks
                .acquire("room:1", Duration::from_secs(3), Duration::from_secs(5))
                .await
                .expect("every task should eventually acquire");

            if in_section.swap(true, Ordering::SeqCst) {
                overlaps.fetch_add(1, Ordering::SeqCst);
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
            in_section.store(false, Ordering::SeqCst);
            completed.fetch_add(1, Ordering::SeqCst);

            drop(guard);
        }));
    }

    for handle in handles {
        handle.await.expect("task should not panic");
    }

    assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    assert_eq!(completed.load(Ordering::SeqCst), 8);
}
