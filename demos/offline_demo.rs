//! Walks through the client against an unreachable backend.
//!
//! Run with: `cargo run --example offline_demo --features tracing-subscriber`
//! Point `SPARKVIBE_API_URL` at a live backend to see real answers instead.

use std::time::Duration;

use sparkvibe_rs::{CompletionRequest, Mood, SvClientBuilder, SvError, adventure, auth, mood, offline, social};

#[tokio::main]
async fn main() -> Result<(), SvError> {
    #[cfg(feature = "tracing-subscriber")]
    sparkvibe_rs::init_tracing();

    let client = SvClientBuilder::from_env()?
        .demo_mode(true)
        .timeout(Duration::from_secs(2))
        .build()?;

    let session = auth::sign_in(&client, "demo@sparkvibe.app", "demo").await?;
    println!("signed in as {} (offline: {})", session.user.name, session.fallback);

    let analysis = mood::analyze_mood(&client, "Feeling a bit tired but grateful").await?;
    println!("mood: {} ({:.0}%) - {}", analysis.mood, analysis.confidence * 100.0, analysis.insight);

    let kind = analysis.mood_kind().unwrap_or(Mood::Neutral);
    let capsule = adventure::CapsuleBuilder::new(&client, kind).interest("outdoors").fetch().await?;
    println!("adventure: {} - {}", capsule.title, capsule.description);
    for (i, step) in capsule.steps.iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }

    let done = adventure::complete_adventure(
        &client,
        &CompletionRequest {
            capsule_id: capsule.id.clone(),
            points: capsule.points,
            reflection: None,
        },
    )
    .await?;
    println!(
        "+{} points, total {}, streak {}, new: {:?}",
        done.points_earned, done.total_points, done.current_streak, done.new_achievements
    );

    let board = social::leaderboard(&client, Some(5)).await?;
    for e in &board.entries {
        println!("#{:<2} {:<14} {:>5}", e.rank, e.name, e.points);
    }

    let health = client.health().await;
    println!(
        "online: {}, pending writes: {}",
        health.is_online,
        offline::pending(&client)?.len()
    );

    let report = offline::sync_pending(&client).await?;
    println!("sync: {report:?}");

    client.shutdown().await;
    Ok(())
}
