use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;
use crate::core::pool::{self, DistanceFilter};
use crate::core::quota::DailyQuota;
use crate::core::vip::{VipState, VipSubscription};
use crate::models::{ChatThread, Decision, Match, Profile, ProfileDirectory, SwipePolicy, SwipeRecord, VipPolicy};

/// Stored session state failed validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Profile {0} is recorded under more than one decision")]
    OverlappingDecision(String),

    #[error("Match for profile {0} is missing from the matched set")]
    UnrecordedMatch(String),
}

/// Serialisable copy of a session, handed to whatever storage the host uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(rename = "viewerId")]
    pub viewer_id: String,
    pub record: SwipeRecord,
    pub quota: DailyQuota,
    #[serde(rename = "vipSubscription", default)]
    pub vip_subscription: Option<VipSubscription>,
    #[serde(rename = "maxDistance", default)]
    pub max_distance: Option<u32>,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub chats: Vec<ChatThread>,
}

/// Everything one viewer's swiping touches
///
/// The engine mutates this through crate-private methods only, so the
/// record, quota and match list always move together.
#[derive(Debug, Clone)]
pub struct SwipeSession {
    viewer_id: String,
    directory: Arc<ProfileDirectory>,
    record: SwipeRecord,
    quota: DailyQuota,
    vip: VipState,
    matches: Vec<Match>,
    chats: Vec<ChatThread>,
}

impl SwipeSession {
    pub fn new(
        viewer_id: impl Into<String>,
        directory: Arc<ProfileDirectory>,
        policy: &SwipePolicy,
        vip_policy: VipPolicy,
        today: NaiveDate,
    ) -> Self {
        Self {
            viewer_id: viewer_id.into(),
            directory,
            record: SwipeRecord::new(),
            quota: DailyQuota::new(policy.daily_like_limit, policy.enforce_daily_limit, today),
            vip: VipState::new(vip_policy),
            matches: Vec::new(),
            chats: Vec::new(),
        }
    }

    /// Seed matches that existed before this session
    ///
    /// Their profiles join the matched set and each gets a chat thread.
    /// A match whose profile already carries a decision is skipped.
    pub fn with_matches(mut self, matches: Vec<Match>) -> Self {
        for m in matches {
            if self.record.record(&m.profile.id, Decision::Matched) {
                self.push_match(m);
            } else {
                tracing::warn!("Skipping seeded match for already decided profile {}", m.profile.id);
            }
        }
        self
    }

    pub fn restore(
        snapshot: SessionSnapshot,
        directory: Arc<ProfileDirectory>,
        vip_policy: VipPolicy,
    ) -> Result<Self, SnapshotError> {
        if let Some(id) = snapshot.record.overlapping_id() {
            return Err(SnapshotError::OverlappingDecision(id.to_string()));
        }

        if let Some(m) = snapshot
            .matches
            .iter()
            .find(|m| !snapshot.record.matched().contains(&m.profile.id))
        {
            return Err(SnapshotError::UnrecordedMatch(m.profile.id.clone()));
        }

        let mut session = Self {
            viewer_id: snapshot.viewer_id,
            directory,
            record: snapshot.record,
            quota: snapshot.quota,
            vip: VipState::restore(vip_policy, snapshot.vip_subscription, snapshot.max_distance),
            matches: snapshot.matches,
            chats: snapshot.chats,
        };

        // Threads may have been dropped by an older writer
        let missing: Vec<Uuid> = session
            .matches
            .iter()
            .map(|m| m.id)
            .filter(|id| session.chat(*id).is_none())
            .collect();
        session.chats.extend(missing.into_iter().map(ChatThread::empty));

        Ok(session)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            viewer_id: self.viewer_id.clone(),
            record: self.record.clone(),
            quota: self.quota.clone(),
            vip_subscription: self.vip.subscription().cloned(),
            max_distance: self.vip.max_distance(),
            matches: self.matches.clone(),
            chats: self.chats.clone(),
        }
    }

    /// Bring time-dependent state up to `now`
    ///
    /// Drops an expired VIP subscription and refills the quota on a later
    /// day. Readers call this before looking at the pool or the quota so
    /// they see the same state the next swipe would.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        self.vip.refresh(now);
        if self.quota.roll_over(now.date_naive()) {
            tracing::debug!("Refilled likes for {} on {}", self.viewer_id, self.quota.day());
        }
    }

    pub fn viewer_id(&self) -> &str {
        &self.viewer_id
    }

    pub fn directory(&self) -> &ProfileDirectory {
        &self.directory
    }

    pub fn record(&self) -> &SwipeRecord {
        &self.record
    }

    pub fn quota(&self) -> &DailyQuota {
        &self.quota
    }

    pub fn likes_remaining(&self) -> Option<u32> {
        self.quota.displayed()
    }

    pub fn vip(&self) -> &VipState {
        &self.vip
    }

    pub fn vip_mut(&mut self) -> &mut VipState {
        &mut self.vip
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn chats(&self) -> &[ChatThread] {
        &self.chats
    }

    pub fn chat(&self, match_id: Uuid) -> Option<&ChatThread> {
        self.chats.iter().find(|c| c.match_id == match_id)
    }

    pub fn distance_filter(&self) -> DistanceFilter {
        self.vip.distance_filter()
    }

    /// Current candidate pool in directory order
    pub fn pool(&self) -> Vec<&Profile> {
        pool::candidate_pool(self.directory.profiles(), &self.record, &self.distance_filter())
    }

    pub fn next_candidate(&self) -> Option<&Profile> {
        pool::next_candidate(self.directory.profiles(), &self.record, &self.distance_filter())
    }

    /// Look up a candidate that is still in the pool
    pub fn presentable(&self, candidate_id: &str) -> Option<&Profile> {
        let filter = self.distance_filter();
        self.directory
            .get(candidate_id)
            .filter(|profile| pool::is_presentable(profile, &self.record, &filter))
    }

    pub(crate) fn quota_mut(&mut self) -> &mut DailyQuota {
        &mut self.quota
    }

    pub(crate) fn record_decision(&mut self, candidate_id: &str, decision: Decision) -> bool {
        self.record.record(candidate_id, decision)
    }

    /// Commit a new match with its empty chat thread
    pub(crate) fn commit_match(&mut self, m: Match) -> bool {
        if !self.record.record(&m.profile.id, Decision::Matched) {
            return false;
        }
        self.push_match(m);
        true
    }

    fn push_match(&mut self, m: Match) {
        if self.chat(m.id).is_none() {
            self.chats.push(ChatThread::empty(m.id));
        }
        self.matches.push(m);
    }
}
