//! # Session Commands
//!
//! Sign-in, sign-up, sign-out and the theme toggle.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  login(email, password)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  users().find_credentials(email)   (trimmed, case-insensitive)          │
//! │       │                                                                 │
//! │       ├── none ──────────────────────────────► AUTH_FAILED              │
//! │       ▼                                                                 │
//! │  verify_password(password, hash)                                        │
//! │       ├── mismatch ──────────────────────────► AUTH_FAILED              │
//! │       ▼                                                                 │
//! │  session.set_current_user(user)  ──► "currentUser" key                  │
//! │       ▼                                                                 │
//! │  SignedIn { user, redirect: "/dashboard" }                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both failure cases return the same message so the screen does not
//! reveal which emails have accounts.

use serde::Serialize;
use stockroom_core::validation::validate_registration;
use stockroom_core::{Role, Theme, User};
use tracing::{debug, info, warn};

use crate::auth::{hash_password, verify_password};
use crate::error::{ApiError, ApiResult};
use crate::navigation::{guard, Route};
use crate::state::{DbState, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedIn {
    pub user: User,
    pub redirect: String,
}

impl SignedIn {
    fn new(user: User) -> Self {
        let redirect = guard(Route::Login, Some(&user)).path();
        SignedIn { user, redirect }
    }
}

pub async fn login(
    db: &DbState,
    session: &SessionState,
    email: &str,
    password: &str,
) -> ApiResult<SignedIn> {
    debug!(email = %email, "login command");

    let record = db.inner().users().find_credentials(email).await?;
    let user = match record {
        Some(record) if verify_password(password, &record.password_hash) => record.user,
        _ => {
            warn!(email = %email, "Login failed");
            return Err(ApiError::auth_failed());
        }
    };

    session.set_current_user(&user)?;
    info!(id = %user.id, role = ?user.role, "User signed in");
    Ok(SignedIn::new(user))
}

/// Creates a viewer account and signs it in.
pub async fn register(
    db: &DbState,
    session: &SessionState,
    name: &str,
    email: &str,
    password: &str,
) -> ApiResult<SignedIn> {
    debug!(email = %email, "register command");
    validate_registration(name, email, password).into_result()?;

    let hash = hash_password(password)?;
    let user = db
        .inner()
        .users()
        .create(name, email, Role::Viewer, hash)
        .await?;

    session.set_current_user(&user)?;
    Ok(SignedIn::new(user))
}

/// Clears the signed-in user and returns the login path.
pub fn logout(session: &SessionState) -> ApiResult<String> {
    session.clear_current_user()?;
    info!("User signed out");
    Ok(Route::Login.path())
}

/// The signed-in user, if any.
pub fn current_user(session: &SessionState) -> ApiResult<Option<User>> {
    Ok(session.current_user()?)
}

/// The signed-in user, or `UNAUTHENTICATED`.
pub fn require_user(session: &SessionState) -> ApiResult<User> {
    session
        .current_user()?
        .ok_or_else(ApiError::unauthenticated)
}

pub fn theme(session: &SessionState) -> ApiResult<Theme> {
    Ok(session.theme()?)
}

pub fn set_theme(session: &SessionState, theme: Theme) -> ApiResult<Theme> {
    session.set_theme(theme)?;
    Ok(theme)
}

/// Switches light ↔ dark and stores the new choice.
pub fn toggle_theme(session: &SessionState) -> ApiResult<Theme> {
    let next = session.theme()?.toggled();
    session.set_theme(next)?;
    debug!(theme = %next, "Theme toggled");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use stockroom_core::ErrorKind;
    use stockroom_store::{Database, StoreConfig};

    async fn db_with_admin() -> DbState {
        let db = Database::new(StoreConfig::instant());
        db.users()
            .create(
                "Admin User",
                "admin@example.com",
                Role::Admin,
                hash_password("admin123").unwrap(),
            )
            .await
            .unwrap();
        DbState::new(db)
    }

    #[tokio::test]
    async fn test_login_sets_session() {
        let db = db_with_admin().await;
        let session = SessionState::in_memory();

        let signed_in = login(&db, &session, "Admin@Example.com", "admin123")
            .await
            .unwrap();
        assert_eq!(signed_in.user.role, Role::Admin);
        assert_eq!(signed_in.redirect, "/dashboard");
        assert_eq!(require_user(&session).unwrap(), signed_in.user);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let db = db_with_admin().await;
        let session = SessionState::in_memory();

        let wrong = login(&db, &session, "admin@example.com", "nope")
            .await
            .unwrap_err();
        let unknown = login(&db, &session, "ghost@example.com", "admin123")
            .await
            .unwrap_err();

        assert_eq!(wrong.code, ErrorCode::AuthFailed);
        assert_eq!(wrong, unknown);
        assert_eq!(current_user(&session).unwrap(), None);
    }

    #[tokio::test]
    async fn test_register_creates_viewer() {
        let db = db_with_admin().await;
        let session = SessionState::in_memory();

        let signed_in = register(&db, &session, "Ann Lee", "ann@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(signed_in.user.role, Role::Viewer);

        logout(&session).unwrap();
        let again = login(&db, &session, "ann@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(again.user.id, signed_in.user.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_and_invalid() {
        let db = db_with_admin().await;
        let session = SessionState::in_memory();

        let err = register(&db, &session, "Other", "admin@example.com", "secret1")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateUser);

        let err = register(&db, &session, "", "bad-email", "123")
            .await
            .unwrap_err();
        let fields = err.field_errors.unwrap();
        assert_eq!(fields.kind_of("email"), Some(ErrorKind::Invalid));
        assert_eq!(fields.kind_of("password"), Some(ErrorKind::TooShort));
        assert_eq!(current_user(&session).unwrap(), None);
    }

    #[test]
    fn test_logout_and_require_user() {
        let session = SessionState::in_memory();
        assert_eq!(logout(&session).unwrap(), "/login");
        assert_eq!(
            require_user(&session).unwrap_err().code,
            ErrorCode::Unauthenticated
        );
    }

    #[test]
    fn test_toggle_theme_persists() {
        let session = SessionState::in_memory();
        assert_eq!(theme(&session).unwrap(), Theme::Light);
        assert_eq!(toggle_theme(&session).unwrap(), Theme::Dark);
        assert_eq!(theme(&session).unwrap(), Theme::Dark);
        assert_eq!(toggle_theme(&session).unwrap(), Theme::Light);

        set_theme(&session, Theme::Dark).unwrap();
        assert_eq!(theme(&session).unwrap(), Theme::Dark);
    }
}
