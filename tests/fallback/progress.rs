use chrono::{Duration, TimeZone, Utc};
use sparkvibe_rs::User;
use sparkvibe_rs::fallback::progress::{DEFAULT_COMPLETION_POINTS, apply_completion, level_for, update_streak};

#[test]
fn first_completion_starts_a_streak() {
    let mut user = User::new("u", "U", "u@example.com");
    let now = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();

    let p = apply_completion(&mut user, 0, now);
    // Default points plus one day of streak bonus.
    assert_eq!(p.points_earned, DEFAULT_COMPLETION_POINTS + 2);
    assert_eq!(user.current_streak, 1);
    assert_eq!(user.longest_streak, 1);
    assert_eq!(user.total_points, 27);
    assert_eq!(p.new_achievements, vec!["first-spark".to_string()]);
}

#[test]
fn streak_rules() {
    let mut user = User::new("u", "U", "u@example.com");
    let day1 = Utc.with_ymd_and_hms(2026, 3, 10, 23, 0, 0).unwrap();

    update_streak(&mut user, day1);
    assert_eq!(user.current_streak, 1);

    update_streak(&mut user, day1 + Duration::hours(2));
    assert_eq!(user.current_streak, 2, "next calendar day extends");

    update_streak(&mut user, day1 + Duration::hours(3));
    assert_eq!(user.current_streak, 2, "same day keeps");

    update_streak(&mut user, day1 + Duration::days(3));
    assert_eq!(user.current_streak, 1, "a gap restarts");
    assert_eq!(user.longest_streak, 2);
}

#[test]
fn bonus_is_capped_and_achievements_unlock_once() {
    let mut user = User::new("u", "U", "u@example.com");
    user.current_streak = 9;
    user.longest_streak = 9;
    user.total_points = 480;
    user.achievements = vec!["first-spark".into(), "points-100".into(), "streak-3".into(), "streak-7".into()];
    let yesterday = Utc.with_ymd_and_hms(2026, 3, 9, 12, 0, 0).unwrap();
    user.last_activity = Some(yesterday);

    let p = apply_completion(&mut user, 30, yesterday + Duration::days(1));
    assert_eq!(user.current_streak, 10);
    assert_eq!(p.points_earned, 30 + 14);
    assert_eq!(user.total_points, 524);
    assert_eq!(user.level, level_for(524));
    assert_eq!(user.level, 6);
    assert_eq!(p.new_achievements, vec!["points-500".to_string()]);

    let again = apply_completion(&mut user, 30, yesterday + Duration::days(1));
    assert!(again.new_achievements.is_empty());
}

#[test]
fn huge_point_values_saturate() {
    let mut user = User::new("u", "U", "u@example.com");
    user.total_points = 500;
    let now = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();

    let p = apply_completion(&mut user, u32::MAX, now);
    assert_eq!(p.points_earned, u32::MAX);
    assert_eq!(user.total_points, u32::MAX);
    assert_eq!(user.level, level_for(u32::MAX));
}
