use crate::db::DbPool;
use crate::db::connection::get_connection;
use crate::db::error::RepositoryError;
use crate::db::models::auth_session::{AuthSession, NewAuthSession};
use crate::db::models::user::User;
use crate::db::repositories::SessionStore;
use crate::db::schema::{auth_sessions, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Clone)]
pub struct SessionRepository {
    pool: DbPool,
}

impl SessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl SessionStore for SessionRepository {
    fn create(&self, new_session: &NewAuthSession) -> Result<AuthSession, RepositoryError> {
        let mut conn = get_connection(&self.pool)?;

        diesel::insert_into(auth_sessions::table)
            .values(new_session)
            .returning(AuthSession::as_returning())
            .get_result::<AuthSession>(&mut conn)
            .map_err(Into::into)
    }

    fn find_active_user(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, RepositoryError> {
        let mut conn = get_connection(&self.pool)?;

        auth_sessions::table
            .inner_join(users::table)
            .filter(auth_sessions::token_hash.eq(token_hash))
            .filter(auth_sessions::is_revoked.eq(false))
            .filter(auth_sessions::expires_at.gt(now))
            .select(User::as_select())
            .first::<User>(&mut conn)
            .optional()
            .map_err(Into::into)
    }

    fn touch(&self, token_hash: &str, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        let mut conn = get_connection(&self.pool)?;

        diesel::update(auth_sessions::table.filter(auth_sessions::token_hash.eq(token_hash)))
            .set(auth_sessions::last_activity.eq(at))
            .execute(&mut conn)?;

        Ok(())
    }

    fn revoke(&self, token_hash: &str) -> Result<usize, RepositoryError> {
        let mut conn = get_connection(&self.pool)?;

        diesel::update(auth_sessions::table.filter(auth_sessions::token_hash.eq(token_hash)))
            .set(auth_sessions::is_revoked.eq(true))
            .execute(&mut conn)
            .map_err(Into::into)
    }
}
