use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use crate::core::{SwipeEngine, SwipeSession};
use crate::models::{Match, Profile, ProfileDirectory, SwipeEvent, SwipeReport, VipPolicy};

/// In-memory sessions for every viewer, sharing one engine
///
/// All swipes go through a single lock, so each one runs to completion
/// before the next starts.
pub struct SessionRegistry {
    directory: Arc<ProfileDirectory>,
    vip_policy: VipPolicy,
    inner: Mutex<RegistryInner>,
}

struct RegistryInner {
    engine: SwipeEngine,
    sessions: HashMap<String, SwipeSession>,
}

impl RegistryInner {
    fn session(
        &mut self,
        viewer_id: &str,
        directory: &Arc<ProfileDirectory>,
        vip_policy: &VipPolicy,
    ) -> (&mut SwipeEngine, &mut SwipeSession) {
        let RegistryInner { engine, sessions } = self;
        let session = sessions.entry(viewer_id.to_string()).or_insert_with(|| {
            tracing::info!("Creating swipe session for {}", viewer_id);
            SwipeSession::new(
                viewer_id,
                Arc::clone(directory),
                engine.policy(),
                vip_policy.clone(),
                Utc::now().date_naive(),
            )
        });
        (engine, session)
    }
}

impl SessionRegistry {
    pub fn new(directory: Arc<ProfileDirectory>, engine: SwipeEngine, vip_policy: VipPolicy) -> Self {
        Self {
            directory,
            vip_policy,
            inner: Mutex::new(RegistryInner {
                engine,
                sessions: HashMap::new(),
            }),
        }
    }

    pub fn directory(&self) -> &ProfileDirectory {
        &self.directory
    }

    /// Install a session built elsewhere, e.g. restored from a snapshot
    pub async fn insert(&self, session: SwipeSession) {
        let mut inner = self.inner.lock().await;
        inner.sessions.insert(session.viewer_id().to_string(), session);
    }

    pub async fn session_count(&self) -> usize {
        self.inner.lock().await.sessions.len()
    }

    /// Run `f` against the viewer's session, creating it on first use
    ///
    /// The session is refreshed to the current time before `f` sees it.
    pub async fn with_session<T, F>(&self, viewer_id: &str, f: F) -> T
    where
        F: FnOnce(&mut SwipeSession) -> T,
    {
        let mut inner = self.inner.lock().await;
        let (_, session) = inner.session(viewer_id, &self.directory, &self.vip_policy);
        session.refresh(Utc::now());
        f(session)
    }

    /// Read the viewer's session without registering one
    ///
    /// Viewers that never wrote anything get a fresh session that is
    /// dropped afterwards.
    pub async fn read_session<T, F>(&self, viewer_id: &str, f: F) -> T
    where
        F: FnOnce(&SwipeSession) -> T,
    {
        let now = Utc::now();
        let mut inner = self.inner.lock().await;
        let RegistryInner { engine, sessions } = &mut *inner;

        match sessions.get_mut(viewer_id) {
            Some(session) => {
                session.refresh(now);
                f(session)
            }
            None => f(&SwipeSession::new(
                viewer_id,
                Arc::clone(&self.directory),
                engine.policy(),
                self.vip_policy.clone(),
                now.date_naive(),
            )),
        }
    }

    pub async fn swipe(&self, viewer_id: &str, event: SwipeEvent) -> SwipeReport {
        let mut inner = self.inner.lock().await;
        let (engine, session) = inner.session(viewer_id, &self.directory, &self.vip_policy);
        engine.report(session, event)
    }

    /// Up to `limit` candidates plus the full pool size
    pub async fn pool(&self, viewer_id: &str, limit: usize) -> (Vec<Profile>, usize, Option<u32>) {
        self.read_session(viewer_id, |session| {
            let pool = session.pool();
            let total = pool.len();
            let page: Vec<Profile> = pool.into_iter().take(limit).cloned().collect();
            (page, total, session.likes_remaining())
        })
        .await
    }

    /// The single candidate the viewer should act on now
    pub async fn next_candidate(&self, viewer_id: &str) -> (Option<Profile>, Option<u32>) {
        self.read_session(viewer_id, |session| {
            (session.next_candidate().cloned(), session.likes_remaining())
        })
        .await
    }

    pub async fn matches(&self, viewer_id: &str) -> Vec<Match> {
        self.read_session(viewer_id, |session| session.matches().to_vec())
            .await
    }
}
