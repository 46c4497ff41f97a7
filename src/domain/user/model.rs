use chrono::{DateTime, Utc};

/// Registered account. The email doubles as the login name.
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub email_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Data required to create a user record
#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub email_confirmed: bool,
}

/// Stored email verification token. Only the SHA-256 of the token is kept.
#[derive(Clone, Debug)]
pub struct VerificationToken {
    pub user_id: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

impl VerificationToken {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
