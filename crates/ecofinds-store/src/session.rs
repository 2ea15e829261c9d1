//! # Session Store
//!
//! Holds the signed-in user, if any.
//!
//! ## State Machine
//! ```text
//!                 login ok / register
//!   ┌───────────┐ ─────────────────────► ┌───────────┐
//!   │ LoggedOut │                        │ LoggedIn  │ ◄──┐ update_profile
//!   └───────────┘ ◄───────────────────── └───────────┘ ───┘
//!         ▲              logout
//!         └── login failed (state untouched)
//! ```
//!
//! `is_loading` is true exactly while a login or register call is waiting
//! on the [`Authenticator`]. It is cleared by a guard, so a caller that
//! drops the future mid-flight does not leave the flag stuck.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use ecofinds_core::validation::validate_profile_update;
use ecofinds_core::{ProfileUpdate, UserProfile};

use crate::auth::Authenticator;
use crate::error::{StoreError, StoreResult};

/// Snapshot published to session observers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub is_loading: bool,
}

/// Shared handle to the session. Clones see the same user.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<watch::Sender<SessionState>>,
    auth: Arc<dyn Authenticator>,
}

/// Clears `is_loading` when dropped.
struct LoadingGuard {
    state: Arc<watch::Sender<SessionState>>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            let was_loading = state.is_loading;
            state.is_loading = false;
            was_loading
        });
    }
}

impl SessionStore {
    /// Creates a logged-out session backed by `auth`.
    pub fn new(auth: Arc<dyn Authenticator>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        SessionStore {
            state: Arc::new(state),
            auth,
        }
    }

    fn begin_loading(&self) -> LoadingGuard {
        self.state.send_if_modified(|state| {
            let was_idle = !state.is_loading;
            state.is_loading = true;
            was_idle
        });
        LoadingGuard {
            state: Arc::clone(&self.state),
        }
    }

    /// Stores `user` and clears the busy flag in one notification.
    fn sign_in(&self, user: &UserProfile) {
        self.state.send_modify(|state| {
            state.user = Some(user.clone());
            state.is_loading = false;
        });
    }

    /// Signs in through the authenticator.
    ///
    /// On failure the previous state, logged in or not, is kept.
    pub async fn login(&self, email: &str, password: &str) -> StoreResult<UserProfile> {
        debug!(email, "Login requested");
        let _loading = self.begin_loading();

        match self.auth.login(email, password).await {
            Ok(user) => {
                self.sign_in(&user);
                info!(user_id = %user.id, username = %user.username, "Signed in");
                Ok(user)
            }
            Err(e) => {
                warn!(email, error = %e, "Login failed");
                Err(e)
            }
        }
    }

    /// Creates an account and signs it in.
    ///
    /// Input is handed to the authenticator as-is; form checks belong to
    /// the caller.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> StoreResult<UserProfile> {
        debug!(email, username, "Registration requested");
        let _loading = self.begin_loading();

        let user = self.auth.register(email, password, username).await?;
        self.sign_in(&user);
        info!(user_id = %user.id, username = %user.username, "Registered");
        Ok(user)
    }

    pub fn logout(&self) {
        let mut signed_out = None;
        self.state.send_if_modified(|state| {
            signed_out = state.user.take();
            signed_out.is_some()
        });

        if let Some(user) = signed_out {
            info!(user_id = %user.id, "Signed out");
        }
    }

    /// Merges `update` into the current profile.
    pub fn update_profile(&self, update: ProfileUpdate) -> StoreResult<UserProfile> {
        validate_profile_update(&update)?;

        let mut outcome = Err(StoreError::NotAuthenticated);
        self.state.send_if_modified(|state| match state.user.as_mut() {
            Some(user) => {
                user.apply(update);
                outcome = Ok(user.clone());
                true
            }
            None => false,
        });

        if let Ok(user) = &outcome {
            debug!(user_id = %user.id, "Profile updated");
        }
        outcome
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.borrow().user.clone()
    }

    /// Id of the signed-in user.
    pub fn user_id(&self) -> Option<String> {
        self.state.borrow().user.as_ref().map(|u| u.id.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Observer channel; fires on sign-in, sign-out, profile edits and
    /// busy-flag changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
