//! # Session State
//!
//! Mirror of the externally managed auth session.
//!
//! ## Mirroring Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Mirror Flow                                  │
//! │                                                                         │
//! │  ┌────────────────┐      ┌─────────────────┐     ┌─────────────────┐   │
//! │  │  SessionState  │      │  AuthBackend    │     │ Hosted identity │   │
//! │  │  (mirror)      │      │  (trait object) │     │ service         │   │
//! │  └───────┬────────┘      └────────┬────────┘     └────────┬────────┘   │
//! │          │  1. subscribe()        │                       │            │
//! │          │───────────────────────►│                       │            │
//! │          │  2. current_session()  │                       │            │
//! │          │───────────────────────►│──────────────────────►│            │
//! │          │◄───────────────────────│◄──────────────────────│            │
//! │          │  loading = false       │                       │            │
//! │          │                        │                       │            │
//! │          │  [user taps sign out]  │                       │            │
//! │          │  3. sign_out()         │                       │            │
//! │          │───────────────────────►│──────────────────────►│            │
//! │          │                        │   change notification │            │
//! │          │◄───────────────────────│◄──────────────────────│            │
//! │          │  4. mirror cleared     │                       │            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Step 4 is the only path that updates the mirror after the initial load:
//! `sign_out` never clears local state optimistically, it waits for the
//! backend's own notification. Readers must tolerate the session changing
//! between reads.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::events::{EventBus, StoreEvent};

// =============================================================================
// Session
// =============================================================================

/// The narrow, locally defined session shape.
///
/// The hosted identity SDK defines its own session type; adapters map it to
/// this at the boundary so nothing else depends on the SDK's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Session {
    /// Stable user identifier from the identity service.
    pub user_id: String,

    /// Email the account was registered with.
    pub email: String,

    /// Optional display name from the identity provider profile.
    pub display_name: Option<String>,
}

// =============================================================================
// Auth Error
// =============================================================================

/// Failures surfaced by the auth backend boundary.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend reported an error (invalid credentials, network, ...).
    #[error("Auth backend error: {0}")]
    Backend(String),

    /// No backend endpoint is configured for this build.
    #[error("Auth backend is not configured")]
    NotConfigured,
}

// =============================================================================
// Auth Backend Boundary
// =============================================================================

/// The slice of the hosted identity service this app consumes.
///
/// Sign-in, sign-up, and the OAuth redirect exchange happen on the backend's
/// side of this boundary; the store only ever observes the resulting session
/// through `current_session` and the change stream.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// The session as the backend currently knows it.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Ends the session on the backend.
    ///
    /// Implementations must emit a change notification once the session is
    /// actually gone; the mirror relies on it.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Subscribes to session changes. Drop the receiver to unsubscribe.
    fn subscribe(&self) -> broadcast::Receiver<Option<Session>>;
}

// =============================================================================
// Session State
// =============================================================================

#[derive(Debug, Default)]
struct SessionMirror {
    session: Option<Session>,
    loading: bool,
}

/// Mirrors the backend session for synchronous reads.
pub struct SessionState {
    backend: Arc<dyn AuthBackend>,
    mirror: Arc<Mutex<SessionMirror>>,
    listener: JoinHandle<()>,
}

impl SessionState {
    /// Creates the mirror and starts listening.
    ///
    /// Subscribes to the change stream **before** the initial session fetch
    /// so a change racing the fetch is never lost. `loading` stays true
    /// until the first fetch resolves. Must be called from within a tokio
    /// runtime.
    pub fn new(backend: Arc<dyn AuthBackend>, events: EventBus) -> Self {
        let mirror = Arc::new(Mutex::new(SessionMirror {
            session: None,
            loading: true,
        }));

        let mut changes = backend.subscribe();
        let task_backend = Arc::clone(&backend);
        let task_mirror = Arc::clone(&mirror);
        let listener = tokio::spawn(async move {
            // Initial load: seed the mirror, then hand updates over to the
            // change stream for the rest of the process lifetime.
            let initial = match task_backend.current_session().await {
                Ok(session) => session,
                Err(error) => {
                    warn!(%error, "initial session check failed");
                    None
                }
            };
            let signed_in = initial.is_some();
            {
                let mut mirror = task_mirror.lock().expect("session mutex poisoned");
                mirror.session = initial;
                mirror.loading = false;
            }
            events.publish(StoreEvent::SessionChanged { signed_in });

            loop {
                match changes.recv().await {
                    Ok(next) => {
                        let signed_in = next.is_some();
                        debug!(signed_in, "session change received");
                        task_mirror
                            .lock()
                            .expect("session mutex poisoned")
                            .session = next;
                        events.publish(StoreEvent::SessionChanged { signed_in });
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        // Dropped notifications are recoverable: the next
                        // received value is the current truth.
                        warn!(missed, "session change stream lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        SessionState {
            backend,
            mirror,
            listener,
        }
    }

    /// The mirrored session, if signed in.
    pub fn current_session(&self) -> Option<Session> {
        self.mirror
            .lock()
            .expect("session mutex poisoned")
            .session
            .clone()
    }

    /// The signed-in user's id, if any.
    pub fn current_user_id(&self) -> Option<String> {
        self.current_session().map(|s| s.user_id)
    }

    /// True until the first backend session check resolves.
    pub fn is_loading(&self) -> bool {
        self.mirror.lock().expect("session mutex poisoned").loading
    }

    /// Signs out on the backend.
    ///
    /// Does not touch the mirror: the cleared session arrives through the
    /// backend's change notification like any other update.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        debug!("sign_out");
        self.backend.sign_out().await
    }
}

impl Drop for SessionState {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("loading", &self.is_loading())
            .field("signed_in", &self.current_session().is_some())
            .finish()
    }
}

// =============================================================================
// Static Backend (tests + local development)
// =============================================================================

/// An in-process [`AuthBackend`] whose sessions are scripted by the caller.
///
/// Used by tests and by local builds running without a configured identity
/// service. `push_session` plays the role of the hosted service's own state
/// transitions (sign-in completing, token refresh, remote sign-out).
#[derive(Debug)]
pub struct StaticAuthBackend {
    session: Mutex<Option<Session>>,
    changes: broadcast::Sender<Option<Session>>,
}

impl StaticAuthBackend {
    /// Creates a backend with no active session.
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(16);
        StaticAuthBackend {
            session: Mutex::new(None),
            changes,
        }
    }

    /// Creates a backend already signed in as `session`.
    pub fn signed_in(session: Session) -> Self {
        let backend = Self::new();
        *backend.session.lock().expect("session mutex poisoned") = Some(session);
        backend
    }

    /// Replaces the current session and notifies subscribers.
    pub fn push_session(&self, session: Option<Session>) {
        *self.session.lock().expect("session mutex poisoned") = session.clone();
        let _ = self.changes.send(session);
    }
}

impl Default for StaticAuthBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthBackend for StaticAuthBackend {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.session.lock().expect("session mutex poisoned").clone())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.push_session(None);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<Option<Session>> {
        self.changes.subscribe()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
