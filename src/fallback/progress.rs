//! Points, streak and achievement arithmetic for offline adventure completions.

use chrono::{DateTime, Utc};

use crate::core::User;

/// Points granted when the request does not name a value.
pub const DEFAULT_COMPLETION_POINTS: u32 = 25;
/// Streak bonus per day, counted for at most `MAX_BONUS_DAYS`.
const STREAK_BONUS_PER_DAY: u32 = 2;
const MAX_BONUS_DAYS: u32 = 7;
const POINTS_PER_LEVEL: u32 = 100;

enum Rule {
    Points(u32),
    Streak(u32),
}

const ACHIEVEMENTS: [(&str, Rule); 7] = [
    ("first-spark", Rule::Points(1)),
    ("points-100", Rule::Points(100)),
    ("points-500", Rule::Points(500)),
    ("points-1000", Rule::Points(1000)),
    ("streak-3", Rule::Streak(3)),
    ("streak-7", Rule::Streak(7)),
    ("streak-30", Rule::Streak(30)),
];

/// Outcome of [`apply_completion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub points_earned: u32,
    pub new_achievements: Vec<String>,
}

pub const fn level_for(points: u32) -> u32 {
    points / POINTS_PER_LEVEL + 1
}

/// Advances the streak for an activity at `now`.
///
/// Same day keeps the streak, the next day extends it, anything later restarts it at 1.
pub fn update_streak(user: &mut User, now: DateTime<Utc>) {
    let today = now.date_naive();
    user.current_streak = match user.last_activity.map(|t| t.date_naive()) {
        Some(last) if last == today => user.current_streak.max(1),
        Some(last) if last.succ_opt() == Some(today) => user.current_streak + 1,
        _ => 1,
    };
    user.longest_streak = user.longest_streak.max(user.current_streak);
    user.last_activity = Some(now);
}

/// Unlocks every achievement `user` now qualifies for and returns the new ones.
pub fn check_achievements(user: &mut User) -> Vec<String> {
    let mut unlocked = Vec::new();
    for (id, rule) in &ACHIEVEMENTS {
        let earned = match rule {
            Rule::Points(min) => user.total_points >= *min,
            Rule::Streak(min) => user.current_streak >= *min,
        };
        if earned && !user.achievements.iter().any(|a| a == id) {
            user.achievements.push((*id).to_string());
            unlocked.push((*id).to_string());
        }
    }
    unlocked
}

/// Records a completed adventure worth `points` (0 means the default) on `user`.
pub fn apply_completion(user: &mut User, points: u32, now: DateTime<Utc>) -> Progress {
    update_streak(user, now);

    let base = if points == 0 { DEFAULT_COMPLETION_POINTS } else { points };
    let bonus = user.current_streak.min(MAX_BONUS_DAYS) * STREAK_BONUS_PER_DAY;
    let earned = base.saturating_add(bonus);

    user.total_points = user.total_points.saturating_add(earned);
    user.level = level_for(user.total_points);

    Progress {
        points_earned: earned,
        new_achievements: check_achievements(user),
    }
}
