use super::{Chirp, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The whole persisted state, stored as one JSON file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub chirps: Vec<Chirp>,
    #[serde(default)]
    pub users: Vec<User>,
    /// Revoked token strings. Membership is what matters; the timestamp is
    /// only a record of when it happened.
    #[serde(default)]
    pub revokes: BTreeMap<String, DateTime<Utc>>,
}
