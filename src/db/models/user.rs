use crate::db::schema::users;
use auth_svc_api::UserResponse;
use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use uuid::Uuid;

/// Role given to accounts created through Google sign-in.
pub const DEFAULT_ROLE: &str = "registered";

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub email: String,
    pub google_id: Option<String>,
    pub full_name: Option<String>,
    pub picture_url: Option<String>,
    pub role: String,
    pub last_login_at: Option<DateTime<Utc>>,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub google_id: Option<String>,
    pub full_name: Option<String>,
    pub picture_url: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            google_id: user.google_id,
            full_name: user.full_name,
            picture_url: user.picture_url,
            role: user.role,
            created_at: user.created_at,
        }
    }
}
