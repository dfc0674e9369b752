use crate::db::DbPool;
use crate::db::connection::get_connection;
use crate::db::error::RepositoryError;
use crate::db::models::user::{NewUser, User};
use crate::db::repositories::UserStore;
use crate::db::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserStore for UserRepository {
    fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, RepositoryError> {
        let mut conn = get_connection(&self.pool)?;

        users::table
            .filter(users::google_id.eq(google_id))
            .select(User::as_select())
            .first::<User>(&mut conn)
            .optional()
            .map_err(Into::into)
    }

    fn create(&self, new_user: &NewUser) -> Result<User, RepositoryError> {
        let mut conn = get_connection(&self.pool)?;

        diesel::insert_into(users::table)
            .values(new_user)
            .returning(User::as_returning())
            .get_result::<User>(&mut conn)
            .map_err(Into::into)
    }

    fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        let mut conn = get_connection(&self.pool)?;

        diesel::update(users::table.filter(users::id.eq(id)))
            .set(users::last_login_at.eq(Some(at)))
            .execute(&mut conn)?;

        Ok(())
    }
}
