//! # Authentication
//!
//! The session store never checks credentials itself; it asks an
//! [`Authenticator`]. The only implementation shipped here is
//! [`DemoAuthenticator`], which knows a single account and never looks at
//! the password.
//!
//! ```text
//! SessionStore::login ──► Authenticator::login ──► Ok(UserProfile)
//!        │                       │                  Err(AuthFailed)
//!        │                 (simulated latency)
//!        └── is_loading = true for the whole await
//! ```

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use ecofinds_core::UserProfile;

use crate::config::MarketplaceConfig;
use crate::error::{StoreError, StoreResult};
use crate::seed;

/// Credential check behind login and registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolves credentials to a profile, or fails with
    /// [`StoreError::AuthFailed`].
    async fn login(&self, email: &str, password: &str) -> StoreResult<UserProfile>;

    /// Creates an account and returns its profile.
    async fn register(&self, email: &str, password: &str, username: &str)
        -> StoreResult<UserProfile>;
}

// =============================================================================
// Demo Authenticator
// =============================================================================

/// Stand-in authenticator with one hard-wired account.
///
/// Does not verify passwords and does not remember registrations.
#[derive(Debug, Clone)]
pub struct DemoAuthenticator {
    account: UserProfile,
    latency: Duration,
}

impl DemoAuthenticator {
    pub fn new(account: UserProfile, latency: Duration) -> Self {
        DemoAuthenticator { account, latency }
    }

    /// Builds the demo account from configuration.
    pub fn from_config(config: &MarketplaceConfig) -> Self {
        Self::new(
            seed::demo_user(&config.demo_account_email),
            config.auth_latency(),
        )
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl Authenticator for DemoAuthenticator {
    async fn login(&self, email: &str, _password: &str) -> StoreResult<UserProfile> {
        self.round_trip().await;

        if email == self.account.email {
            Ok(self.account.clone())
        } else {
            debug!(email, "No demo account for email");
            Err(StoreError::AuthFailed)
        }
    }

    async fn register(
        &self,
        email: &str,
        _password: &str,
        username: &str,
    ) -> StoreResult<UserProfile> {
        self.round_trip().await;

        Ok(UserProfile::new(
            Uuid::new_v4().to_string(),
            email.to_string(),
            username.to_string(),
            Utc::now().date_naive(),
        ))
    }
}
