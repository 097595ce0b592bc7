use chrono::{DateTime, Utc};
use crate::core::draw::{DrawSource, RngDraw};
use crate::core::session::SwipeSession;
use crate::models::{Decision, Match, SwipeEvent, SwipeOutcome, SwipePolicy, SwipeReport};

/// Turns swipe gestures into committed session changes
///
/// # Decision flow
/// 1. Unknown, already decided or filtered-out candidates are a no-op
/// 2. Passes are recorded unconditionally
/// 3. Likes are checked against the daily quota, then charged
/// 4. A draw decides whether the like becomes a match
///
/// Each call either applies all of its changes or none of them.
pub struct SwipeEngine {
    policy: SwipePolicy,
    draw: Box<dyn DrawSource>,
}

impl SwipeEngine {
    pub fn new(policy: SwipePolicy, draw: Box<dyn DrawSource>) -> Self {
        Self { policy, draw }
    }

    /// Engine with a `StdRng`, seeded when the policy pins a seed
    pub fn from_policy(policy: SwipePolicy) -> Self {
        let draw: Box<dyn DrawSource> = match policy.rng_seed {
            Some(seed) => Box::new(RngDraw::seeded(seed)),
            None => Box::new(RngDraw::from_os_rng()),
        };
        Self::new(policy, draw)
    }

    pub fn policy(&self) -> &SwipePolicy {
        &self.policy
    }

    pub fn like(&mut self, session: &mut SwipeSession, candidate_id: &str) -> SwipeOutcome {
        self.apply(session, SwipeEvent::Like(candidate_id.to_string()))
    }

    pub fn pass(&mut self, session: &mut SwipeSession, candidate_id: &str) -> SwipeOutcome {
        self.apply(session, SwipeEvent::Pass(candidate_id.to_string()))
    }

    pub fn apply(&mut self, session: &mut SwipeSession, event: SwipeEvent) -> SwipeOutcome {
        self.apply_at(session, event, Utc::now())
    }

    /// Apply and pair the outcome with the quota left afterwards
    pub fn report(&mut self, session: &mut SwipeSession, event: SwipeEvent) -> SwipeReport {
        let outcome = self.apply(session, event);
        SwipeReport {
            outcome,
            likes_remaining: session.likes_remaining(),
        }
    }

    /// Apply a swipe as of `now`
    ///
    /// The session is first brought up to `now` with
    /// [`SwipeSession::refresh`]. That clock step is not part of the swipe:
    /// an `Unknown` outcome leaves the session exactly as a plain refresh
    /// would.
    pub fn apply_at(
        &mut self,
        session: &mut SwipeSession,
        event: SwipeEvent,
        now: DateTime<Utc>,
    ) -> SwipeOutcome {
        session.refresh(now);

        let candidate_id = event.candidate_id();
        let Some(profile) = session.presentable(candidate_id).cloned() else {
            tracing::debug!(
                "Ignoring {:?} from {}: candidate not in pool",
                event,
                session.viewer_id()
            );
            return SwipeOutcome::Unknown;
        };

        match event {
            SwipeEvent::Pass(_) => {
                session.record_decision(&profile.id, Decision::Passed);
                tracing::debug!("{} passed on {}", session.viewer_id(), profile.id);
                SwipeOutcome::Passed
            }
            SwipeEvent::Like(_) => {
                if session.quota().is_exhausted() {
                    tracing::warn!(
                        "{} is out of likes for {}",
                        session.viewer_id(),
                        session.quota().day()
                    );
                    return SwipeOutcome::QuotaExceeded;
                }

                session.quota_mut().consume();

                if self.is_match() {
                    let compatibility = self.compatibility();
                    let m = Match::new(profile, now, compatibility);
                    session.commit_match(m.clone());
                    tracing::info!(
                        "{} matched with {} (compatibility {})",
                        session.viewer_id(),
                        m.profile.id,
                        compatibility
                    );
                    SwipeOutcome::Matched(m)
                } else {
                    session.record_decision(&profile.id, Decision::Liked);
                    tracing::debug!("{} liked {}", session.viewer_id(), profile.id);
                    SwipeOutcome::Liked
                }
            }
        }
    }

    /// A draw above `1 - match_probability` is a match
    fn is_match(&mut self) -> bool {
        let p = self.policy.match_probability;
        if p >= 1.0 {
            return true;
        }
        self.draw.draw() > 1.0 - p
    }

    /// Integer score in `[compatibility_min, compatibility_max)`
    fn compatibility(&mut self) -> u8 {
        let min = self.policy.compatibility_min;
        let max = self.policy.compatibility_max.max(min.saturating_add(1));
        let span = f64::from(max - min);

        let draw = self.draw.draw().clamp(0.0, 1.0);
        let offset = (draw * span).floor() as u8;

        min.saturating_add(offset).min(max - 1)
    }
}

impl std::fmt::Debug for SwipeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeEngine")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::draw::{FixedDraw, SequenceDraw};
    use crate::models::{Profile, ProfileDirectory, VipPolicy};
    use chrono::TimeZone;
    use std::sync::Arc;

    fn create_profile(id: &str) -> Profile {
        Profile {
            id: id.to_string(),
            name: format!("User {}", id),
            age: 28,
            bio: String::new(),
            photos: vec![],
            interests: vec![],
            location: String::new(),
            verified: true,
            occupation: None,
            education: None,
            distance_in_miles: Some(12.0),
        }
    }

    fn create_session(policy: &SwipePolicy) -> SwipeSession {
        let directory = ProfileDirectory::from_profiles(
            (1..=5).map(|i| create_profile(&i.to_string())).collect(),
        )
        .unwrap();

        SwipeSession::new(
            "viewer",
            Arc::new(directory),
            policy,
            VipPolicy::default(),
            Utc::now().date_naive(),
        )
    }

    fn engine(policy: &SwipePolicy, draw: impl DrawSource + 'static) -> SwipeEngine {
        SwipeEngine::new(policy.clone(), Box::new(draw))
    }

    #[test]
    fn test_pass_is_recorded_without_quota() {
        let policy = SwipePolicy::default();
        let mut session = create_session(&policy);
        let mut engine = engine(&policy, FixedDraw(0.9));

        assert_eq!(engine.pass(&mut session, "1"), SwipeOutcome::Passed);
        assert_eq!(session.likes_remaining(), Some(20));
        assert!(session.record().passed().contains("1"));
    }

    #[test]
    fn test_like_without_match_goes_to_liked() {
        let policy = SwipePolicy::default();
        let mut session = create_session(&policy);
        let mut engine = engine(&policy, FixedDraw(0.5));

        assert_eq!(engine.like(&mut session, "1"), SwipeOutcome::Liked);
        assert!(session.record().liked().contains("1"));
        assert!(session.matches().is_empty());
        assert_eq!(session.likes_remaining(), Some(19));
    }

    #[test]
    fn test_match_creates_thread_and_moves_to_matched() {
        let policy = SwipePolicy::default();
        let mut session = create_session(&policy);
        let mut engine = engine(&policy, SequenceDraw::new(vec![0.75, 0.4]));

        let outcome = engine.like(&mut session, "2");
        let m = outcome.created_match().cloned().unwrap();

        assert_eq!(m.profile.id, "2");
        assert_eq!(m.compatibility, 86);
        assert!(session.record().matched().contains("2"));
        assert!(!session.record().liked().contains("2"));
        assert!(session.chat(m.id).unwrap().messages.is_empty());
    }

    #[test]
    fn test_exhausted_quota_rejects_without_mutation() {
        let policy = SwipePolicy {
            daily_like_limit: 0,
            ..SwipePolicy::default()
        };
        let mut session = create_session(&policy);
        let mut engine = engine(&policy, FixedDraw(0.9));

        assert_eq!(engine.like(&mut session, "1"), SwipeOutcome::QuotaExceeded);
        assert!(session.record().is_empty());
        assert_eq!(session.pool().len(), 5);
    }

    #[test]
    fn test_unenforced_quota_allows_unlimited_likes() {
        let policy = SwipePolicy {
            daily_like_limit: 0,
            enforce_daily_limit: false,
            ..SwipePolicy::default()
        };
        let mut session = create_session(&policy);
        let mut engine = engine(&policy, FixedDraw(0.0));

        for i in 1..=5 {
            assert_eq!(engine.like(&mut session, &i.to_string()), SwipeOutcome::Liked);
        }
        assert_eq!(session.likes_remaining(), None);
    }

    #[test]
    fn test_repeat_swipes_are_noops() {
        let policy = SwipePolicy::default();
        let mut session = create_session(&policy);
        let mut engine = engine(&policy, FixedDraw(0.99));

        assert!(matches!(engine.like(&mut session, "1"), SwipeOutcome::Matched(_)));
        assert_eq!(engine.like(&mut session, "1"), SwipeOutcome::Unknown);
        assert_eq!(engine.pass(&mut session, "1"), SwipeOutcome::Unknown);

        assert_eq!(session.matches().len(), 1);
        assert_eq!(session.likes_remaining(), Some(19));
    }

    #[test]
    fn test_unknown_candidate_is_noop() {
        let policy = SwipePolicy::default();
        let mut session = create_session(&policy);
        let mut engine = engine(&policy, FixedDraw(0.99));

        assert_eq!(engine.like(&mut session, "missing"), SwipeOutcome::Unknown);
        assert_eq!(engine.pass(&mut session, "missing"), SwipeOutcome::Unknown);
        assert!(session.record().is_empty());
        assert_eq!(session.likes_remaining(), Some(20));
    }

    #[test]
    fn test_quota_refills_on_next_day() {
        let policy = SwipePolicy {
            daily_like_limit: 1,
            ..SwipePolicy::default()
        };
        let day_one = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        let day_two = Utc.with_ymd_and_hms(2026, 5, 2, 9, 0, 0).unwrap();

        let directory = ProfileDirectory::from_profiles(vec![create_profile("a"), create_profile("b")]).unwrap();
        let mut session = SwipeSession::new("viewer", Arc::new(directory), &policy, VipPolicy::default(), day_one.date_naive());
        let mut engine = engine(&policy, FixedDraw(0.1));

        assert_eq!(engine.apply_at(&mut session, SwipeEvent::Like("a".into()), day_one), SwipeOutcome::Liked);
        assert_eq!(engine.apply_at(&mut session, SwipeEvent::Like("b".into()), day_one), SwipeOutcome::QuotaExceeded);
        assert_eq!(engine.apply_at(&mut session, SwipeEvent::Like("b".into()), day_two), SwipeOutcome::Liked);
    }

    #[test]
    fn test_unknown_swipe_changes_nothing_beyond_refresh() {
        let policy = SwipePolicy {
            daily_like_limit: 1,
            ..SwipePolicy::default()
        };
        let day_one = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        let day_two = Utc.with_ymd_and_hms(2026, 5, 2, 9, 0, 0).unwrap();

        let directory = ProfileDirectory::from_profiles(vec![create_profile("a")]).unwrap();
        let mut session = SwipeSession::new("viewer", Arc::new(directory), &policy, VipPolicy::default(), day_one.date_naive());
        let mut engine = engine(&policy, FixedDraw(0.1));
        assert_eq!(engine.apply_at(&mut session, SwipeEvent::Like("a".into()), day_one), SwipeOutcome::Liked);

        let mut refreshed = session.clone();
        refreshed.refresh(day_two);

        assert_eq!(engine.apply_at(&mut session, SwipeEvent::Like("a".into()), day_two), SwipeOutcome::Unknown);
        assert_eq!(session.snapshot(), refreshed.snapshot());
    }

    #[test]
    fn test_probability_knob_extremes() {
        let never = SwipePolicy {
            match_probability: 0.0,
            ..SwipePolicy::default()
        };
        let mut session = create_session(&never);
        let mut e = engine(&never, FixedDraw(0.999));
        assert_eq!(e.like(&mut session, "1"), SwipeOutcome::Liked);

        let always = SwipePolicy {
            match_probability: 1.0,
            ..SwipePolicy::default()
        };
        let mut session = create_session(&always);
        let mut e = engine(&always, FixedDraw(0.0));
        assert!(matches!(e.like(&mut session, "1"), SwipeOutcome::Matched(_)));
    }

    #[test]
    fn test_compatibility_stays_below_max_for_edge_draws() {
        let policy = SwipePolicy::default();
        let mut e = engine(&policy, FixedDraw(1.0));
        assert_eq!(e.compatibility(), 94);

        let mut e = engine(&policy, FixedDraw(0.0));
        assert_eq!(e.compatibility(), 80);
    }

    #[test]
    fn test_report_carries_remaining_likes() {
        let policy = SwipePolicy::default();
        let mut session = create_session(&policy);
        let mut engine = engine(&policy, FixedDraw(0.2));

        let report = engine.report(&mut session, SwipeEvent::Like("3".into()));
        assert_eq!(report.outcome, SwipeOutcome::Liked);
        assert_eq!(report.likes_remaining, Some(19));
    }
}
