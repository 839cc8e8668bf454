use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Answer of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `ok`, `degraded`, or `demo` when synthesized.
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Per-dependency status (`database`, `ai`, `cache`, ...).
    #[serde(default)]
    pub services: BTreeMap<String, String>,
    #[serde(default)]
    pub fallback: bool,
}

impl HealthStatus {
    /// Whether the backend reports itself fully operational.
    pub fn is_ok(&self) -> bool {
        !self.fallback && self.status.eq_ignore_ascii_case("ok")
    }
}
