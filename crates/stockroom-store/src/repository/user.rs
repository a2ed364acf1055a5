//! # User Repository
//!
//! Accounts for the login screen. Passwords arrive here already hashed;
//! the only method that returns a hash is [`UserRepository::find_credentials`].

use stockroom_core::{new_id, Role, User};
use tracing::{debug, info};

use crate::database::{Database, UserRecord};
use crate::error::{StoreError, StoreResult};

/// Emails are compared trimmed and case-insensitively.
fn same_email(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[derive(Debug, Clone)]
pub struct UserRepository {
    db: Database,
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        UserRepository { db }
    }

    pub async fn list(&self) -> StoreResult<Vec<User>> {
        let data = self.db.read().await;
        Ok(data.users.iter().map(|r| r.user.clone()).collect())
    }

    pub async fn get(&self, id: &str) -> StoreResult<User> {
        let data = self.db.read().await;
        data.users
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.user.clone())
            .ok_or_else(|| StoreError::not_found("User", id))
    }

    /// The stored record for `email`, hash included, for password checks.
    pub async fn find_credentials(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        debug!(email = %email, "Looking up credentials");
        let data = self.db.read().await;
        Ok(data
            .users
            .iter()
            .find(|r| same_email(&r.user.email, email))
            .cloned())
    }

    /// Adds an account.
    ///
    /// ## Errors
    /// `DuplicateUser` if the email is already registered.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        role: Role,
        password_hash: String,
    ) -> StoreResult<User> {
        let mut data = self.db.write().await;
        if data.users.iter().any(|r| same_email(&r.user.email, email)) {
            return Err(StoreError::DuplicateUser {
                email: email.trim().to_string(),
            });
        }

        let user = User {
            id: new_id(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            role,
        };
        data.users.push(UserRecord {
            user: user.clone(),
            password_hash,
        });

        info!(id = %user.id, email = %user.email, role = ?user.role, "User created");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::StoreConfig;

    #[tokio::test]
    async fn test_create_and_find() {
        let db = Database::new(StoreConfig::instant());
        let user = db
            .users()
            .create("Ann", "ann@example.com", Role::Viewer, "hash".into())
            .await
            .unwrap();

        let record = db
            .users()
            .find_credentials(" ANN@example.com ")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.user, user);
        assert_eq!(record.password_hash, "hash");
        assert_eq!(db.users().get(&user.id).await.unwrap().name, "Ann");
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let db = Database::new(StoreConfig::instant());
        let users = db.users();
        users
            .create("Ann", "ann@example.com", Role::Viewer, "h".into())
            .await
            .unwrap();
        let err = users
            .create("Other Ann", "Ann@Example.com", Role::Viewer, "h".into())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUser { .. }));
        assert_eq!(users.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let db = Database::new(StoreConfig::instant());
        assert!(db
            .users()
            .find_credentials("nobody@example.com")
            .await
            .unwrap()
            .is_none());
    }
}
