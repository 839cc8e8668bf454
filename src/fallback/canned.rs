//! Static stand-in data for read endpoints and capsule templates.

use chrono::{DateTime, Utc};

use crate::core::{Mood, User};
use crate::social::{LeaderboardEntry, TrendingAdventure};
use crate::user::Notification;

const LEADERS: [(&str, &str, u32, u32); 6] = [
    ("lb-aurora", "Aurora Chen", 2840, 21),
    ("lb-mateo", "Mateo Silva", 2515, 14),
    ("lb-priya", "Priya Nair", 2230, 12),
    ("lb-jonas", "Jonas Berg", 1980, 9),
    ("lb-amara", "Amara Okafor", 1745, 7),
    ("lb-leo", "Leo Martin", 1310, 4),
];

/// Canned leaderboard with `me` merged in and ranks recomputed.
pub(crate) fn leaderboard(me: Option<&User>, limit: Option<u32>) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = LEADERS
        .iter()
        .map(|(id, name, points, streak)| LeaderboardEntry {
            rank: 0,
            user_id: (*id).to_string(),
            name: (*name).to_string(),
            avatar: None,
            points: *points,
            streak: *streak,
        })
        .collect();

    if let Some(user) = me {
        entries.retain(|e| e.user_id != user.id);
        entries.push(LeaderboardEntry {
            rank: 0,
            user_id: user.id.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            points: user.total_points,
            streak: user.current_streak,
        });
    }

    entries.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.name.cmp(&b.name)));
    for (i, e) in entries.iter_mut().enumerate() {
        e.rank = u32::try_from(i + 1).unwrap_or(u32::MAX);
    }

    if let Some(limit) = limit {
        // Keep the local user visible even when they fall outside the limit.
        let keep = usize::try_from(limit).unwrap_or(usize::MAX);
        let my_id = me.map(|u| u.id.as_str());
        let mut kept = 0;
        entries.retain(|e| {
            kept += 1;
            kept <= keep || Some(e.user_id.as_str()) == my_id
        });
    }

    entries
}

pub(crate) fn trending() -> Vec<TrendingAdventure> {
    [
        ("trend-sunrise", "Catch the sunrise", "outdoors", "calm", 1240, 312),
        ("trend-compliment", "Compliment three strangers", "social", "happy", 980, 401),
        ("trend-sketch", "Ten-minute sketch challenge", "creativity", "neutral", 760, 188),
        ("trend-breathe", "Box breathing break", "mindfulness", "anxious", 655, 143),
        ("trend-dance", "Kitchen dance party", "fitness", "happy", 590, 226),
    ]
    .into_iter()
    .map(|(id, title, category, mood, participants, likes)| TrendingAdventure {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        mood: mood.to_string(),
        participants,
        likes,
    })
    .collect()
}

pub(crate) fn offline_notice(now: DateTime<Utc>) -> Notification {
    Notification {
        id: "offline-notice".to_string(),
        kind: "system".to_string(),
        title: "You're offline".to_string(),
        message: "Progress is saved on this device and will sync when you reconnect.".to_string(),
        read: false,
        created_at: now,
    }
}

pub(crate) struct CapsuleTemplate {
    pub(crate) title: &'static str,
    pub(crate) description: &'static str,
    pub(crate) steps: &'static [&'static str],
    pub(crate) category: &'static str,
    pub(crate) difficulty: &'static str,
    pub(crate) minutes: u32,
    pub(crate) points: u32,
}

const HAPPY: &[CapsuleTemplate] = &[
    CapsuleTemplate {
        title: "Spread the Spark",
        description: "Turn your good mood into someone else's good day.",
        steps: &[
            "Send a thank-you message to someone who helped you",
            "Give a genuine compliment to a stranger",
            "Share one thing you are excited about",
        ],
        category: "social",
        difficulty: "easy",
        minutes: 15,
        points: 30,
    },
    CapsuleTemplate {
        title: "Joy Snapshot",
        description: "Collect five photos of things that made you smile today.",
        steps: &[
            "Walk around with fresh eyes",
            "Photograph five small joys",
            "Pick your favorite and caption it",
        ],
        category: "creativity",
        difficulty: "easy",
        minutes: 20,
        points: 25,
    },
];

const SAD: &[CapsuleTemplate] = &[
    CapsuleTemplate {
        title: "Gentle Reset",
        description: "A slow, kind routine to soften a heavy day.",
        steps: &[
            "Make a warm drink and sit somewhere comfortable",
            "Write three things you did well recently",
            "Listen to one song that comforts you",
        ],
        category: "self-care",
        difficulty: "easy",
        minutes: 20,
        points: 25,
    },
    CapsuleTemplate {
        title: "Fresh Air Walk",
        description: "Ten minutes outside, no destination required.",
        steps: &[
            "Step outside and pick a direction",
            "Notice three colors around you",
            "Breathe deeply before heading back",
        ],
        category: "outdoors",
        difficulty: "easy",
        minutes: 15,
        points: 20,
    },
];

const ANXIOUS: &[CapsuleTemplate] = &[
    CapsuleTemplate {
        title: "Five Senses Grounding",
        description: "Bring your attention back to the present moment.",
        steps: &[
            "Name five things you can see",
            "Name four things you can touch",
            "Name three things you can hear",
            "Take three slow breaths",
        ],
        category: "mindfulness",
        difficulty: "easy",
        minutes: 10,
        points: 20,
    },
    CapsuleTemplate {
        title: "Worry Sorting",
        description: "Separate what you can act on from what you can let go.",
        steps: &[
            "Write every worry on paper",
            "Circle the ones you can act on today",
            "Pick one small action and do it",
        ],
        category: "mindfulness",
        difficulty: "medium",
        minutes: 20,
        points: 30,
    },
];

const ANGRY: &[CapsuleTemplate] = &[
    CapsuleTemplate {
        title: "Energy Burn",
        description: "Turn frustration into a quick, intense workout.",
        steps: &[
            "Do two minutes of jumping jacks",
            "Hold a plank for as long as you can",
            "Finish with a minute of stretching",
        ],
        category: "fitness",
        difficulty: "medium",
        minutes: 15,
        points: 35,
    },
    CapsuleTemplate {
        title: "Unsent Letter",
        description: "Say everything, send nothing.",
        steps: &[
            "Write an honest letter about what upset you",
            "Read it once out loud",
            "Tear it up and take a deep breath",
        ],
        category: "self-care",
        difficulty: "easy",
        minutes: 15,
        points: 25,
    },
];

const TIRED: &[CapsuleTemplate] = &[CapsuleTemplate {
    title: "Recharge Ritual",
    description: "A short routine to restore a little energy.",
    steps: &[
        "Drink a full glass of water",
        "Stretch your neck and shoulders",
        "Rest your eyes for five minutes",
    ],
    category: "rest",
    difficulty: "easy",
    minutes: 10,
    points: 15,
}];

const CALM: &[CapsuleTemplate] = &[
    CapsuleTemplate {
        title: "Slow Create",
        description: "Use this steady energy on a small creative project.",
        steps: &[
            "Pick a medium: pencil, words or sound",
            "Create something for fifteen minutes",
            "Give your creation a title",
        ],
        category: "creativity",
        difficulty: "medium",
        minutes: 25,
        points: 30,
    },
    CapsuleTemplate {
        title: "Mindful Photo Walk",
        description: "Look for patterns and textures you usually miss.",
        steps: &[
            "Walk slowly for ten minutes",
            "Photograph three interesting textures",
            "Share your favorite shot",
        ],
        category: "outdoors",
        difficulty: "easy",
        minutes: 20,
        points: 25,
    },
];

const NEUTRAL: &[CapsuleTemplate] = &[
    CapsuleTemplate {
        title: "Micro Adventure",
        description: "Find something new within ten minutes of home.",
        steps: &[
            "Pick a street or park you have never visited",
            "Find one detail nobody else would notice",
            "Tell someone about it",
        ],
        category: "exploration",
        difficulty: "easy",
        minutes: 30,
        points: 30,
    },
    CapsuleTemplate {
        title: "Curiosity Sprint",
        description: "Learn one surprising thing in fifteen minutes.",
        steps: &[
            "Pick a topic you know nothing about",
            "Spend ten minutes reading about it",
            "Summarize it in one sentence",
        ],
        category: "learning",
        difficulty: "easy",
        minutes: 15,
        points: 20,
    },
];

pub(crate) const fn capsule_templates(mood: Mood) -> &'static [CapsuleTemplate] {
    match mood {
        Mood::Happy => HAPPY,
        Mood::Sad => SAD,
        Mood::Anxious => ANXIOUS,
        Mood::Angry => ANGRY,
        Mood::Tired => TIRED,
        Mood::Calm => CALM,
        Mood::Neutral => NEUTRAL,
    }
}
