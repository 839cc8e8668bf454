use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use sparkvibe_rs::RequestCache;

fn counting(calls: &Arc<AtomicUsize>) -> impl FnOnce() -> std::future::Ready<Result<usize, String>> {
    let calls = Arc::clone(calls);
    move || std::future::ready(Ok(calls.fetch_add(1, Ordering::SeqCst) + 1))
}

#[tokio::test(start_paused = true)]
async fn entry_is_served_until_ttl_elapses() {
    let cache: RequestCache<usize, String> = RequestCache::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let ttl = Duration::from_secs(30);

    assert_eq!(cache.get("/trending-adventures", ttl, counting(&calls)).await, Ok(1));
    tokio::time::advance(Duration::from_secs(29)).await;
    assert_eq!(cache.get("/trending-adventures", ttl, counting(&calls)).await, Ok(1));

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(!cache.contains("/trending-adventures").await);
    assert_eq!(cache.get("/trending-adventures", ttl, counting(&calls)).await, Ok(2));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn refresh_ignores_a_live_entry_and_replaces_it() {
    let cache: RequestCache<usize, String> = RequestCache::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let ttl = Duration::from_secs(60);

    assert_eq!(cache.get("/health", ttl, counting(&calls)).await, Ok(1));
    assert_eq!(cache.refresh("/health", ttl, counting(&calls)).await, Ok(2));
    assert_eq!(cache.get("/health", ttl, counting(&calls)).await, Ok(2));
}

#[tokio::test(start_paused = true)]
async fn delete_and_delete_route() {
    let cache: RequestCache<usize, String> = RequestCache::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let ttl = Duration::from_secs(60);

    cache.get("/leaderboard", ttl, counting(&calls)).await.unwrap();
    cache.get("/leaderboard?limit=5", ttl, counting(&calls)).await.unwrap();
    cache.get("/leaderboards", ttl, counting(&calls)).await.unwrap();
    cache.get("/notifications", ttl, counting(&calls)).await.unwrap();

    assert!(cache.delete("/notifications").await);
    assert!(!cache.delete("/notifications").await);

    assert_eq!(cache.delete_route("/leaderboard").await, 2);
    assert!(cache.contains("/leaderboards").await);
    assert_eq!(cache.len().await, 1);
}
