// Mirrors the tables created by data-svc's migrations.

diesel::table! {
    auth_sessions (id) {
        id -> Uuid,
        user_id -> Uuid,
        #[max_length = 128]
        token_hash -> Varchar,
        expires_at -> Timestamptz,
        is_revoked -> Bool,
        last_activity -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    users (id) {
        id -> Uuid,
        #[max_length = 255]
        email -> Varchar,
        #[max_length = 255]
        google_id -> Nullable<Varchar>,
        full_name -> Nullable<Text>,
        picture_url -> Nullable<Text>,
        #[max_length = 32]
        role -> Varchar,
        created_at -> Timestamptz,
        last_login_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(auth_sessions -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(auth_sessions, users);
