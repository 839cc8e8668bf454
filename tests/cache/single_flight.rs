use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use sparkvibe_rs::RequestCache;

#[tokio::test(start_paused = true)]
async fn concurrent_gets_share_one_fetch() {
    let cache: RequestCache<u32, String> = RequestCache::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let make = |calls: Arc<AtomicUsize>| {
        move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok::<u32, String>(42)
        }
    };

    let (a, b, c) = tokio::join!(
        cache.get("/leaderboard", Duration::from_secs(30), make(calls.clone())),
        cache.get("/leaderboard", Duration::from_secs(30), make(calls.clone())),
        cache.get("/leaderboard", Duration::from_secs(30), make(calls.clone())),
    );

    assert_eq!((a, b, c), (Ok(42), Ok(42), Ok(42)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.pending().await, 0);
    assert!(cache.contains("/leaderboard").await);
}

#[tokio::test(start_paused = true)]
async fn joiners_see_the_same_error_and_nothing_is_cached() {
    let cache: RequestCache<u32, String> = RequestCache::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let failing = |calls: Arc<AtomicUsize>| {
        move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            Err::<u32, String>("boom".to_string())
        }
    };

    let (a, b) = tokio::join!(
        cache.get("k", Duration::from_secs(5), failing(calls.clone())),
        cache.get("k", Duration::from_secs(5), failing(calls.clone())),
    );
    assert_eq!(a, Err("boom".to_string()));
    assert_eq!(b, Err("boom".to_string()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!cache.contains("k").await);

    // The failure is not remembered: the next call fetches again.
    let ok = cache
        .get("k", Duration::from_secs(5), || async { Ok::<u32, String>(7) })
        .await;
    assert_eq!(ok, Ok(7));
}

#[tokio::test(start_paused = true)]
async fn different_keys_fetch_independently() {
    let cache: RequestCache<&'static str, String> = RequestCache::new();
    let a = cache
        .get("/a", Duration::from_secs(5), || async { Ok::<_, String>("a") })
        .await;
    let b = cache
        .get("/b", Duration::from_secs(5), || async { Ok::<_, String>("b") })
        .await;
    assert_eq!((a, b), (Ok("a"), Ok("b")));
    assert_eq!(cache.len().await, 2);
}

#[tokio::test(start_paused = true)]
async fn clear_discards_results_of_fetches_already_in_flight() {
    let cache: RequestCache<u32, String> = RequestCache::new();

    let slow = cache.get("/user/profile", Duration::from_secs(30), || async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok::<u32, String>(1)
    });
    let clear = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        cache.clear().await;
    };
    let (value, ()) = tokio::join!(slow, clear);

    assert_eq!(value, Ok(1));
    assert!(!cache.contains("/user/profile").await);
    assert!(cache.is_empty().await);
}
