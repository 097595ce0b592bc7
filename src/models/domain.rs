use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Profile shown on a swipe card
///
/// Owned by the profile directory; the swipe core only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub age: u8,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(rename = "distanceInMiles", default)]
    pub distance_in_miles: Option<f64>,
}

/// Chat message as produced by the chat subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    #[serde(rename = "senderId")]
    pub sender_id: String,
    pub text: String,
    #[serde(rename = "sentAt")]
    pub sent_at: DateTime<Utc>,
}

/// A mutual match created by an accepted like
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub profile: Profile,
    #[serde(rename = "matchedAt")]
    pub matched_at: DateTime<Utc>,
    pub compatibility: u8,
    #[serde(rename = "lastMessage", default)]
    pub last_message: Option<ChatMessage>,
}

impl Match {
    pub fn new(profile: Profile, matched_at: DateTime<Utc>, compatibility: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile,
            matched_at,
            compatibility,
            last_message: None,
        }
    }
}

/// Conversation opened alongside a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatThread {
    #[serde(rename = "matchId")]
    pub match_id: Uuid,
    pub messages: Vec<ChatMessage>,
}

impl ChatThread {
    pub fn empty(match_id: Uuid) -> Self {
        Self {
            match_id,
            messages: Vec::new(),
        }
    }
}

/// Terminal state of a swiped profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Liked,
    Passed,
    Matched,
}

/// Which profiles the viewer has already acted on
///
/// Every id lives in at most one of the three sets and never leaves it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeRecord {
    #[serde(default)]
    liked: BTreeSet<String>,
    #[serde(default)]
    passed: BTreeSet<String>,
    #[serde(default)]
    matched: BTreeSet<String>,
}

impl SwipeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn liked(&self) -> &BTreeSet<String> {
        &self.liked
    }

    pub fn passed(&self) -> &BTreeSet<String> {
        &self.passed
    }

    pub fn matched(&self) -> &BTreeSet<String> {
        &self.matched
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.liked.contains(id) || self.passed.contains(id) || self.matched.contains(id)
    }

    pub fn decision_for(&self, id: &str) -> Option<Decision> {
        if self.liked.contains(id) {
            Some(Decision::Liked)
        } else if self.passed.contains(id) {
            Some(Decision::Passed)
        } else if self.matched.contains(id) {
            Some(Decision::Matched)
        } else {
            None
        }
    }

    /// Record a decision. Returns `false` and leaves the record untouched
    /// when the id already has one.
    pub fn record(&mut self, id: &str, decision: Decision) -> bool {
        if self.contains(id) {
            return false;
        }

        let set = match decision {
            Decision::Liked => &mut self.liked,
            Decision::Passed => &mut self.passed,
            Decision::Matched => &mut self.matched,
        };
        set.insert(id.to_string())
    }

    /// First id found in more than one set, if any
    pub fn overlapping_id(&self) -> Option<&str> {
        self.liked
            .iter()
            .find(|id| self.passed.contains(*id) || self.matched.contains(*id))
            .or_else(|| self.passed.iter().find(|id| self.matched.contains(*id)))
            .map(String::as_str)
    }

    pub fn is_disjoint(&self) -> bool {
        self.overlapping_id().is_none()
    }

    pub fn len(&self) -> usize {
        self.liked.len() + self.passed.len() + self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single swipe gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "candidateId", rename_all = "lowercase")]
pub enum SwipeEvent {
    Like(String),
    Pass(String),
}

impl SwipeEvent {
    pub fn candidate_id(&self) -> &str {
        match self {
            SwipeEvent::Like(id) | SwipeEvent::Pass(id) => id,
        }
    }
}

/// Result of applying a swipe
///
/// Rejections are ordinary values here: callers inspect the outcome
/// before committing any optimistic UI state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SwipeOutcome {
    Matched(Match),
    Liked,
    Passed,
    QuotaExceeded,
    Unknown,
}

impl SwipeOutcome {
    pub fn created_match(&self) -> Option<&Match> {
        match self {
            SwipeOutcome::Matched(m) => Some(m),
            _ => None,
        }
    }
}

/// Outcome plus the quota figure the UI displays next to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwipeReport {
    #[serde(flatten)]
    pub outcome: SwipeOutcome,
    #[serde(rename = "likesRemaining")]
    pub likes_remaining: Option<u32>,
}
