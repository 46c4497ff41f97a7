use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{NewUser, User, VerificationToken};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, user: NewUser) -> DomainResult<User>;

    async fn count_users(&self) -> DomainResult<u64>;
    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    async fn confirm_email(&self, id: &str) -> DomainResult<()>;
    async fn record_login(&self, id: &str) -> DomainResult<()>;

    async fn store_verification_token(
        &self,
        user_id: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<()>;

    /// Removes and returns the matching token, so it can be used only once.
    async fn take_verification_token(
        &self,
        user_id: &str,
        token_hash: &str,
    ) -> DomainResult<Option<VerificationToken>>;
}
