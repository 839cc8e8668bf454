use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::adventure::{CapsuleRequest, CompletionRequest, VibeCardRequest};
use crate::auth::{SignInRequest, SignUpRequest};
use crate::core::SvError;
use crate::mood::MoodRequest;
use crate::user::MarkReadRequest;

/// Every backend route this crate knows how to stand in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Health,
    Leaderboard,
    Trending,
    Profile,
    Notifications,
    SignIn,
    SignUp,
    AnalyzeMood,
    GenerateCapsule,
    GenerateVibeCard,
    CompleteAdventure,
    MarkNotificationsRead,
}

impl Endpoint {
    pub const ALL: [Endpoint; 12] = [
        Endpoint::Health,
        Endpoint::Leaderboard,
        Endpoint::Trending,
        Endpoint::Profile,
        Endpoint::Notifications,
        Endpoint::SignIn,
        Endpoint::SignUp,
        Endpoint::AnalyzeMood,
        Endpoint::GenerateCapsule,
        Endpoint::GenerateVibeCard,
        Endpoint::CompleteAdventure,
        Endpoint::MarkNotificationsRead,
    ];

    /// Route path relative to the API base.
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::Health => "/health",
            Endpoint::Leaderboard => "/leaderboard",
            Endpoint::Trending => "/trending-adventures",
            Endpoint::Profile => "/user/profile",
            Endpoint::Notifications => "/notifications",
            Endpoint::SignIn => "/auth/signin",
            Endpoint::SignUp => "/auth/signup",
            Endpoint::AnalyzeMood => "/analyze-mood",
            Endpoint::GenerateCapsule => "/generate-capsule",
            Endpoint::GenerateVibeCard => "/generate-vibe-card",
            Endpoint::CompleteAdventure => "/complete-adventure",
            Endpoint::MarkNotificationsRead => "/notifications/mark-read",
        }
    }

    pub const fn is_write(self) -> bool {
        !matches!(
            self,
            Endpoint::Health
                | Endpoint::Leaderboard
                | Endpoint::Trending
                | Endpoint::Profile
                | Endpoint::Notifications
        )
    }

    pub fn method(self) -> Method {
        if self.is_write() { Method::POST } else { Method::GET }
    }

    /// Sign-in and sign-up: client errors are final and offline answers need demo mode.
    pub const fn is_auth(self) -> bool {
        matches!(self, Endpoint::SignIn | Endpoint::SignUp)
    }

    /// Writes whose side effects must reach the backend eventually.
    pub const fn replays_offline(self) -> bool {
        matches!(
            self,
            Endpoint::CompleteAdventure | Endpoint::MarkNotificationsRead
        )
    }

    /// How long a GET answer stays fresh in the response cache.
    pub const fn default_ttl(self) -> Option<Duration> {
        match self {
            Endpoint::Health => Some(Duration::from_secs(10)),
            Endpoint::Leaderboard | Endpoint::Profile => Some(Duration::from_secs(30)),
            Endpoint::Trending => Some(Duration::from_secs(60)),
            Endpoint::Notifications => Some(Duration::from_secs(15)),
            _ => None,
        }
    }

    /// Finds the route for `method` + `endpoint`. Query strings and surrounding slashes are
    /// ignored.
    pub fn lookup(method: &Method, endpoint: &str) -> Option<Endpoint> {
        let path = route_path(endpoint);
        Endpoint::ALL
            .into_iter()
            .find(|e| e.method() == *method && e.path().trim_start_matches('/') == path)
    }
}

fn route_path(endpoint: &str) -> &str {
    let path = endpoint.split(['?', '#']).next().unwrap_or_default();
    path.trim_matches('/')
}

fn query_u32(endpoint: &str, name: &str) -> Option<u32> {
    let (_, query) = endpoint.split_once('?')?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == name)
        .and_then(|(_, v)| v.parse().ok())
}

/// A request the synthesizer can answer, with its typed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Health,
    Leaderboard { limit: Option<u32> },
    Trending,
    Profile,
    Notifications,
    SignIn(SignInRequest),
    SignUp(SignUpRequest),
    AnalyzeMood(MoodRequest),
    GenerateCapsule(CapsuleRequest),
    GenerateVibeCard(VibeCardRequest),
    CompleteAdventure(CompletionRequest),
    MarkNotificationsRead(MarkReadRequest),
}

impl Operation {
    /// Maps an untyped request onto an operation.
    ///
    /// # Errors
    ///
    /// Returns `SvError::NoFallback` for an unregistered endpoint and `SvError::Data` when the
    /// body does not match the endpoint's request shape.
    pub fn resolve(method: &Method, endpoint: &str, body: Option<&Value>) -> Result<Self, SvError> {
        let known = Endpoint::lookup(method, endpoint).ok_or_else(|| SvError::NoFallback {
            endpoint: format!("{method} {endpoint}"),
        })?;

        Ok(match known {
            Endpoint::Health => Operation::Health,
            Endpoint::Leaderboard => Operation::Leaderboard {
                limit: query_u32(endpoint, "limit"),
            },
            Endpoint::Trending => Operation::Trending,
            Endpoint::Profile => Operation::Profile,
            Endpoint::Notifications => Operation::Notifications,
            Endpoint::SignIn => Operation::SignIn(payload(known, body)?),
            Endpoint::SignUp => Operation::SignUp(payload(known, body)?),
            Endpoint::AnalyzeMood => Operation::AnalyzeMood(payload(known, body)?),
            Endpoint::GenerateCapsule => Operation::GenerateCapsule(payload(known, body)?),
            Endpoint::GenerateVibeCard => Operation::GenerateVibeCard(payload(known, body)?),
            Endpoint::CompleteAdventure => Operation::CompleteAdventure(payload(known, body)?),
            Endpoint::MarkNotificationsRead => match body {
                None | Some(Value::Null) => Operation::MarkNotificationsRead(MarkReadRequest::default()),
                Some(_) => Operation::MarkNotificationsRead(payload(known, body)?),
            },
        })
    }

    pub const fn endpoint(&self) -> Endpoint {
        match self {
            Operation::Health => Endpoint::Health,
            Operation::Leaderboard { .. } => Endpoint::Leaderboard,
            Operation::Trending => Endpoint::Trending,
            Operation::Profile => Endpoint::Profile,
            Operation::Notifications => Endpoint::Notifications,
            Operation::SignIn(_) => Endpoint::SignIn,
            Operation::SignUp(_) => Endpoint::SignUp,
            Operation::AnalyzeMood(_) => Endpoint::AnalyzeMood,
            Operation::GenerateCapsule(_) => Endpoint::GenerateCapsule,
            Operation::GenerateVibeCard(_) => Endpoint::GenerateVibeCard,
            Operation::CompleteAdventure(_) => Endpoint::CompleteAdventure,
            Operation::MarkNotificationsRead(_) => Endpoint::MarkNotificationsRead,
        }
    }
}

fn payload<T: DeserializeOwned>(endpoint: Endpoint, body: Option<&Value>) -> Result<T, SvError> {
    let body =
        body.ok_or_else(|| SvError::Data(format!("{} needs a request body", endpoint.path())))?;
    T::deserialize(body).map_err(|e| SvError::Data(format!("{} payload: {e}", endpoint.path())))
}
