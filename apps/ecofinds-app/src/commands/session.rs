//! # Session Commands
//!
//! Sign-in, sign-up and the profile screen.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ecofinds_core::validation::{validate_email, validate_username};
use ecofinds_core::{ProfileUpdate, UserProfile};
use ecofinds_store::{SessionState, SessionStore};

use super::CommandResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

/// Current user and busy flag, for the splash and profile screens.
pub fn get_session(session: &SessionStore) -> SessionState {
    session.snapshot()
}

/// Signs in. Bad credentials come back as `UNAUTHORIZED`.
pub async fn login(session: &SessionStore, req: LoginRequest) -> CommandResult<UserProfile> {
    debug!(email = %req.email, "login command");
    Ok(session.login(req.email.trim(), &req.password).await?)
}

/// Creates an account and signs it in.
///
/// ## Form Checks
/// - email: `local@domain`, trimmed
/// - username: required, at most 50 characters, trimmed
///
/// A rejected form never reaches the authenticator.
pub async fn register(session: &SessionStore, req: RegisterRequest) -> CommandResult<UserProfile> {
    debug!(email = %req.email, "register command");
    let email = req.email.trim();
    let username = req.username.trim();
    validate_email(email)?;
    validate_username(username)?;

    Ok(session.register(email, &req.password, username).await?)
}

pub fn logout(session: &SessionStore) -> SessionState {
    session.logout();
    session.snapshot()
}

/// Saves the profile form. Requires a session.
pub fn update_profile(session: &SessionStore, update: ProfileUpdate) -> CommandResult<UserProfile> {
    Ok(session.update_profile(update)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use ecofinds_store::{Marketplace, MarketplaceConfig};

    fn session() -> SessionStore {
        Marketplace::init(&MarketplaceConfig {
            auth_latency_ms: 0,
            ..Default::default()
        })
        .session
    }

    fn demo_login() -> LoginRequest {
        LoginRequest {
            email: " demo@ecofinds.com ".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let session = session();
        assert_eq!(get_session(&session), SessionState::default());

        let user = login(&session, demo_login()).await.unwrap();
        assert_eq!(user.username, "ecouser");
        assert_eq!(get_session(&session).user, Some(user));

        let state = logout(&session);
        assert!(state.user.is_none());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_bad_login_is_unauthorized() {
        let session = session();
        let err = login(
            &session,
            LoginRequest {
                email: "unknown@x.com".to_string(),
                password: "pw".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert!(get_session(&session).user.is_none());
    }

    #[tokio::test]
    async fn test_register() {
        let session = session();
        let user = register(
            &session,
            RegisterRequest {
                email: "new@ecofinds.com".to_string(),
                password: "pw".to_string(),
                username: " newbie ".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(user.username, "newbie");

        let err = register(
            &session,
            RegisterRequest {
                email: "nope".to_string(),
                password: "pw".to_string(),
                username: "x".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = register(
            &session,
            RegisterRequest {
                email: "new@ecofinds.com".to_string(),
                password: "pw".to_string(),
                username: "   ".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_session(&session).user.unwrap().username, "newbie");
    }

    #[tokio::test]
    async fn test_update_profile() {
        let session = session();
        let err = update_profile(&session, ProfileUpdate::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        login(&session, demo_login()).await.unwrap();
        let user = update_profile(
            &session,
            ProfileUpdate {
                address: Some("1 Leaf Lane".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(user.address.as_deref(), Some("1 Leaf Lane"));
    }

    #[test]
    fn test_login_request_from_json() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"demo@ecofinds.com","password":"x"}"#).unwrap();
        assert_eq!(req.email, "demo@ecofinds.com");
    }
}
