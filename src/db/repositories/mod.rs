//! Storage seams used by the auth service.
//!
//! The Postgres implementations live next to the traits; the in-memory
//! implementation used by tests lives in `crate::testing`.

pub mod session_repository;
pub mod user_repository;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::error::RepositoryError;
use crate::db::models::auth_session::{AuthSession, NewAuthSession};
use crate::db::models::user::{NewUser, User};

pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;

pub trait UserStore: Send + Sync {
    fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, RepositoryError>;

    fn create(&self, new_user: &NewUser) -> Result<User, RepositoryError>;

    fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), RepositoryError>;
}

pub trait SessionStore: Send + Sync {
    fn create(&self, new_session: &NewAuthSession) -> Result<AuthSession, RepositoryError>;

    /// Owner of the session with this hash, if it is neither revoked nor
    /// expired at `now`.
    fn find_active_user(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, RepositoryError>;

    fn touch(&self, token_hash: &str, at: DateTime<Utc>) -> Result<(), RepositoryError>;

    /// Sets the revocation flag; returns the number of rows affected.
    fn revoke(&self, token_hash: &str) -> Result<usize, RepositoryError>;
}
