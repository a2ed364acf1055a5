//! # Password Hashing
//!
//! Argon2 PHC strings for stored credentials, plus the startup step that
//! loads the demo accounts into the store.
//!
//! ```text
//! register("Ann", "ann@example.com", "secret")
//!      │
//!      ▼
//! hash_password ──► "$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>"
//!      │
//!      ▼
//! UserRepository::create(.., password_hash)
//!
//! login("ann@example.com", "secret")
//!      │
//!      ▼
//! find_credentials ──► verify_password(password, stored hash) ──► bool
//! ```

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use stockroom_store::seed::DEMO_USERS;
use stockroom_store::{Database, StoreError};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};

/// Hashes a password with a fresh random salt.
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Checks a password against a stored PHC string. A malformed hash never
/// verifies.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Adds the demo admin, manager and viewer accounts.
///
/// Accounts whose email is already registered are left alone, so calling
/// this twice is harmless.
///
/// ## Returns
/// The number of accounts created.
pub async fn seed_demo_users(db: &Database) -> ApiResult<usize> {
    let mut created = 0;
    for demo in DEMO_USERS {
        let hash = hash_password(demo.password)?;
        match db.users().create(demo.name, demo.email, demo.role, hash).await {
            Ok(_) => created += 1,
            Err(StoreError::DuplicateUser { email }) => {
                debug!(email = %email, "Demo user already present");
            }
            Err(e) => return Err(e.into()),
        }
    }
    info!(created = created, "Demo users seeded");
    Ok(created)
}
