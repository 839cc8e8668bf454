//! Keyword-based mood detection used when the AI analysis is unavailable.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::core::Mood;
use crate::mood::MoodAnalysis;

/// Keyword lists in priority order; ties go to the earlier mood.
const KEYWORDS: &[(Mood, &[&str])] = &[
    (
        Mood::Happy,
        &[
            "happy", "great", "good", "amazing", "awesome", "excited", "joy", "joyful",
            "wonderful", "fantastic", "love", "glad", "grateful", "thrilled", "cheerful",
        ],
    ),
    (
        Mood::Sad,
        &[
            "sad", "down", "depressed", "lonely", "unhappy", "miserable", "crying", "upset",
            "heartbroken", "blue", "hopeless",
        ],
    ),
    (
        Mood::Anxious,
        &[
            "anxious", "nervous", "worried", "stress", "stressed", "overwhelmed", "panic",
            "scared", "afraid", "tense",
        ],
    ),
    (
        Mood::Angry,
        &["angry", "mad", "furious", "annoyed", "frustrated", "irritated", "rage"],
    ),
    (
        Mood::Tired,
        &["tired", "exhausted", "sleepy", "drained", "fatigued", "burnt", "burned"],
    ),
    (
        Mood::Calm,
        &["calm", "relaxed", "peaceful", "chill", "content", "serene", "rested"],
    ),
];

const NEGATIONS: &[&str] = &["not", "never", "no", "dont", "don't", "isnt", "isn't", "hardly"];

struct MoodProfile {
    energy: &'static str,
    category: &'static str,
    recommendations: [&'static str; 3],
    insights: [&'static str; 3],
}

const fn profile(mood: Mood) -> MoodProfile {
    match mood {
        Mood::Happy => MoodProfile {
            energy: "high",
            category: "social",
            recommendations: [
                "Share your good energy with a friend",
                "Try a new creative challenge",
                "Capture this moment in a vibe card",
            ],
            insights: [
                "Your positivity is contagious today.",
                "Great days are perfect for bold adventures.",
                "Ride this wave and try something new.",
            ],
        },
        Mood::Sad => MoodProfile {
            energy: "low",
            category: "self-care",
            recommendations: [
                "Take a gentle walk outside",
                "Write down three small wins from this week",
                "Reach out to someone you trust",
            ],
            insights: [
                "It is okay to slow down; small steps still count.",
                "Heavy days pass, and you do not have to rush them.",
                "Be as kind to yourself as you would be to a friend.",
            ],
        },
        Mood::Anxious => MoodProfile {
            energy: "medium",
            category: "mindfulness",
            recommendations: [
                "Try four minutes of box breathing",
                "List what you can and cannot control",
                "Step away from screens for a short break",
            ],
            insights: [
                "Grounding yourself in the present can quiet the noise.",
                "One thing at a time is enough.",
                "Your breath is an anchor you always carry.",
            ],
        },
        Mood::Angry => MoodProfile {
            energy: "high",
            category: "fitness",
            recommendations: [
                "Channel the energy into a quick workout",
                "Write the frustration out, then tear the page up",
                "Put on a loud playlist and move",
            ],
            insights: [
                "Strong feelings carry energy you can redirect.",
                "Movement turns tension into momentum.",
                "Pause before reacting; you set the pace.",
            ],
        },
        Mood::Tired => MoodProfile {
            energy: "low",
            category: "rest",
            recommendations: [
                "Take a twenty-minute power nap",
                "Drink a glass of water and stretch",
                "Plan an early night",
            ],
            insights: [
                "Rest is productive too.",
                "Recharging today fuels tomorrow's adventures.",
                "Listen to your body; it knows what it needs.",
            ],
        },
        Mood::Calm => MoodProfile {
            energy: "medium",
            category: "creativity",
            recommendations: [
                "Start a slow creative project",
                "Read a few pages of a good book",
                "Try a mindful photography walk",
            ],
            insights: [
                "Calm minds notice the small wonders.",
                "This steady energy is great for focus.",
                "Peaceful moments are worth savoring.",
            ],
        },
        Mood::Neutral => MoodProfile {
            energy: "medium",
            category: "exploration",
            recommendations: [
                "Explore somewhere new nearby",
                "Learn one surprising fact today",
                "Try a five-minute micro adventure",
            ],
            insights: [
                "A blank canvas day is full of possibilities.",
                "Small sparks can light up an ordinary day.",
                "Curiosity is a great place to start.",
            ],
        },
    }
}

fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Picks the mood whose keywords occur most often in `text`, skipping negated words.
///
/// Returns the mood and the matched keywords in order of appearance.
pub fn detect_mood(text: &str) -> (Mood, Vec<String>) {
    let words = tokens(text);
    let mut best: Option<(Mood, Vec<String>)> = None;

    for (mood, keywords) in KEYWORDS {
        let mut hits = Vec::new();
        for (i, word) in words.iter().enumerate() {
            let negated = i > 0 && NEGATIONS.contains(&words[i - 1].as_str());
            if !negated && keywords.contains(&word.as_str()) && !hits.contains(word) {
                hits.push(word.clone());
            }
        }
        let better = match &best {
            Some((_, b)) => hits.len() > b.len(),
            None => !hits.is_empty(),
        };
        if better {
            best = Some((*mood, hits));
        }
    }

    best.unwrap_or((Mood::Neutral, Vec::new()))
}

pub(crate) fn analyze(text: &str, rng: &mut impl Rng) -> MoodAnalysis {
    let (mood, emotions) = detect_mood(text);
    let p = profile(mood);
    let confidence = if emotions.is_empty() {
        0.5
    } else {
        (0.6 + 0.1 * (emotions.len() as f32 - 1.0)).min(0.95)
    };

    MoodAnalysis {
        mood: mood.as_str().to_string(),
        confidence,
        energy_level: p.energy.to_string(),
        emotions,
        recommendations: p.recommendations.iter().map(|s| (*s).to_string()).collect(),
        suggested_category: p.category.to_string(),
        insight: p
            .insights
            .choose(rng)
            .copied()
            .unwrap_or_default()
            .to_string(),
        fallback: true,
    }
}
