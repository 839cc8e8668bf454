//! Offline stand-ins for every known backend route.
//!
//! When a request cannot be answered by the network, [`Synthesizer::synthesize`] builds a
//! plausible, correctly-typed response for the [`Operation`]. Every synthesized body carries
//! `fallback: true`. Unknown routes never get an answer: [`Operation::resolve`] returns
//! `SvError::NoFallback` for them.

mod canned;
pub mod card;
mod endpoint;
mod mood;
pub mod progress;

pub use endpoint::{Endpoint, Operation};
pub use mood::detect_mood;

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::Value;

use crate::adventure::{AdventureCapsule, CompletionResult, VibeCard};
use crate::auth::AuthResponse;
use crate::core::{Mood, Session, SvError, User};
use crate::health::HealthStatus;
use crate::mood::MoodAnalysis;
use crate::social::{Leaderboard, TrendingFeed};
use crate::user::{Acknowledgement, NotificationFeed, UserProfile};

/// A synthesized response, typed by route.
#[derive(Debug, Clone, PartialEq)]
pub enum Synthesized {
    Health(HealthStatus),
    Leaderboard(Leaderboard),
    Trending(TrendingFeed),
    Profile(UserProfile),
    Notifications(NotificationFeed),
    Auth(AuthResponse),
    Mood(MoodAnalysis),
    Capsule(AdventureCapsule),
    VibeCard(VibeCard),
    Completion(CompletionResult),
    Ack(Acknowledgement),
}

impl Synthesized {
    /// The response as the JSON the backend would have sent.
    ///
    /// # Errors
    ///
    /// Returns `SvError::Json` if serialization fails.
    pub fn into_json(self) -> Result<Value, SvError> {
        let v = match self {
            Synthesized::Health(x) => serde_json::to_value(x),
            Synthesized::Leaderboard(x) => serde_json::to_value(x),
            Synthesized::Trending(x) => serde_json::to_value(x),
            Synthesized::Profile(x) => serde_json::to_value(x),
            Synthesized::Notifications(x) => serde_json::to_value(x),
            Synthesized::Auth(x) => serde_json::to_value(x),
            Synthesized::Mood(x) => serde_json::to_value(x),
            Synthesized::Capsule(x) => serde_json::to_value(x),
            Synthesized::VibeCard(x) => serde_json::to_value(x),
            Synthesized::Completion(x) => serde_json::to_value(x),
            Synthesized::Ack(x) => serde_json::to_value(x),
        };
        Ok(v?)
    }
}

/// Builds offline responses. Randomness only affects cosmetic choices (insight text, capsule
/// and template picks, ids), and can be seeded for reproducible output.
pub struct Synthesizer {
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for Synthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synthesizer").finish_non_exhaustive()
    }
}

impl Synthesizer {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut guard = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }

    /// Answers `op` without the network.
    ///
    /// Auth operations persist the demo session; completions update the stored user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read or written.
    pub fn synthesize(&self, op: &Operation, session: &Session) -> Result<Synthesized, SvError> {
        let now = Utc::now();
        Ok(match op {
            Operation::Health => Synthesized::Health(HealthStatus {
                status: "demo".to_string(),
                message: Some("Backend unreachable; serving offline data.".to_string()),
                timestamp: now,
                services: BTreeMap::from([("api".to_string(), "offline".to_string())]),
                fallback: true,
            }),
            Operation::Leaderboard { limit } => {
                let me = session.user()?;
                Synthesized::Leaderboard(Leaderboard {
                    entries: canned::leaderboard(me.as_ref(), *limit),
                    updated_at: now,
                    fallback: true,
                })
            }
            Operation::Trending => Synthesized::Trending(TrendingFeed {
                adventures: canned::trending(),
                fallback: true,
            }),
            Operation::Profile => {
                let user = session
                    .user()?
                    .unwrap_or_else(|| User::new("guest", "Guest", ""));
                Synthesized::Profile(UserProfile {
                    user,
                    fallback: true,
                })
            }
            Operation::Notifications => Synthesized::Notifications(NotificationFeed {
                notifications: vec![canned::offline_notice(now)],
                unread_count: 1,
                fallback: true,
            }),
            Operation::SignIn(req) => {
                let user = demo_user(session, &req.email, None)?;
                Synthesized::Auth(self.demo_session(session, user, "Signed in offline (demo mode).")?)
            }
            Operation::SignUp(req) => {
                let user = demo_user(session, &req.email, Some(&req.name))?;
                Synthesized::Auth(self.demo_session(session, user, "Account created offline (demo mode).")?)
            }
            Operation::AnalyzeMood(req) => {
                Synthesized::Mood(self.with_rng(|rng| mood::analyze(&req.text_input, rng)))
            }
            Operation::GenerateCapsule(req) => {
                let mood = req.mood.parse().unwrap_or(Mood::Neutral);
                Synthesized::Capsule(self.with_rng(|rng| capsule(mood, &req.interests, rng)))
            }
            Operation::GenerateVibeCard(req) => {
                let mood = req.mood.parse().unwrap_or(Mood::Neutral);
                let template = match req.template.as_deref() {
                    Some(t) if card::TEMPLATES.contains(&t) => t.to_string(),
                    _ => self.with_rng(|rng| {
                        card::TEMPLATES.choose(rng).copied().unwrap_or("minimal").to_string()
                    }),
                };
                let user_name = req.user_name.as_deref().filter(|n| !n.trim().is_empty());
                let id = self.with_rng(|rng| format!("card-{}-{:04x}", now.timestamp_millis(), rng.random::<u16>()));
                Synthesized::VibeCard(VibeCard {
                    id,
                    mood: mood.as_str().to_string(),
                    title: req.title.clone(),
                    svg: card::render_svg(&template, mood, &req.title, user_name, req.points),
                    template,
                    image_url: None,
                    viral_score: card::viral_score(mood, &req.title, req.points, user_name.is_some()),
                    share_text: format!("I just completed \"{}\" feeling {mood}! #SparkVibe", req.title),
                    fallback: true,
                })
            }
            Operation::CompleteAdventure(req) => {
                let stored = session.user()?;
                let mut user = stored
                    .clone()
                    .unwrap_or_else(|| User::new("guest", "Guest", ""));
                let progress = progress::apply_completion(&mut user, req.points, now);
                if stored.is_some() {
                    session.update_user(&user)?;
                }
                Synthesized::Completion(CompletionResult {
                    success: true,
                    points_earned: progress.points_earned,
                    total_points: user.total_points,
                    current_streak: user.current_streak,
                    longest_streak: user.longest_streak,
                    level: user.level,
                    new_achievements: progress.new_achievements,
                    fallback: true,
                })
            }
            Operation::MarkNotificationsRead(_) => Synthesized::Ack(Acknowledgement {
                success: true,
                message: Some("Saved offline; will sync when back online.".to_string()),
                fallback: true,
            }),
        })
    }

    fn demo_session(
        &self,
        session: &Session,
        user: User,
        message: &str,
    ) -> Result<AuthResponse, SvError> {
        let token = format!("demo-token-{}", Utc::now().timestamp_millis());
        session.save(&token, &user)?;
        Ok(AuthResponse {
            success: true,
            token,
            user,
            message: Some(message.to_string()),
            fallback: true,
        })
    }
}

/// The stored user when the email matches, otherwise a fresh `demo-...` account.
fn demo_user(session: &Session, email: &str, name: Option<&str>) -> Result<User, SvError> {
    let email = email.trim();
    if let Some(existing) = session.user()?
        && existing.email.eq_ignore_ascii_case(email)
    {
        return Ok(existing);
    }

    let local = email.split('@').next().unwrap_or_default();
    let slug: String = local
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = if slug.trim_matches('-').is_empty() { "user".to_string() } else { slug };

    let display = match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => n.to_string(),
        None => capitalize(local.split(['.', '_', '-', '+']).next().unwrap_or("Explorer")),
    };
    Ok(User::new(format!("demo-{slug}"), display, email))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Explorer".to_string(),
    }
}

fn capsule(mood: Mood, interests: &[String], rng: &mut impl Rng) -> AdventureCapsule {
    let templates = canned::capsule_templates(mood);
    // Prefer a template whose category the user listed as an interest.
    let preferred: Vec<_> = templates
        .iter()
        .filter(|t| interests.iter().any(|i| i.eq_ignore_ascii_case(t.category)))
        .collect();
    let pool: Vec<_> = if preferred.is_empty() { templates.iter().collect() } else { preferred };

    let Some(t) = pool.choose(rng) else {
        return AdventureCapsule {
            id: format!("capsule-{:08x}", rng.random::<u32>()),
            mood: mood.as_str().to_string(),
            title: "Micro Adventure".to_string(),
            description: "Do one small thing you have never done before.".to_string(),
            steps: vec!["Pick something new".to_string(), "Do it".to_string()],
            category: "exploration".to_string(),
            difficulty: "easy".to_string(),
            estimated_minutes: 15,
            points: progress::DEFAULT_COMPLETION_POINTS,
            fallback: true,
        };
    };

    AdventureCapsule {
        id: format!("capsule-{:08x}", rng.random::<u32>()),
        mood: mood.as_str().to_string(),
        title: t.title.to_string(),
        description: t.description.to_string(),
        steps: t.steps.iter().map(|s| (*s).to_string()).collect(),
        category: t.category.to_string(),
        difficulty: t.difficulty.to_string(),
        estimated_minutes: t.minutes,
        points: t.points,
        fallback: true,
    }
}
