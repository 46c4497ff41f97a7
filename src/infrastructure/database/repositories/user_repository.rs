//! SeaORM implementation of UserRepositoryInterface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use super::db_err;
use crate::domain::{
    DomainError, DomainResult, NewUser, User, UserRepositoryInterface, VerificationToken,
};
use crate::infrastructure::database::entities::{email_verification_token, user};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        email_confirmed: model.email_confirmed,
        created_at: model.created_at,
        updated_at: model.updated_at,
        last_login_at: model.last_login_at,
    }
}

fn token_model_to_domain(model: email_verification_token::Model) -> VerificationToken {
    VerificationToken {
        user_id: model.user_id,
        token_hash: model.token_hash,
        expires_at: model.expires_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn create_user(&self, new_user: NewUser) -> DomainResult<User> {
        debug!("Creating user: {}", new_user.email);

        let now = Utc::now();
        let model = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            email_confirmed: Set(new_user.email_confirmed),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
        };

        let stored = model.insert(&self.db).await.map_err(|e| match db_err(e) {
            DomainError::Conflict(_) => DomainError::Conflict("Email is already registered".into()),
            other => other,
        })?;
        Ok(user_model_to_domain(stored))
    }

    async fn count_users(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn confirm_email(&self, id: &str) -> DomainResult<()> {
        let model = user::ActiveModel {
            id: Set(id.to_string()),
            email_confirmed: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn record_login(&self, id: &str) -> DomainResult<()> {
        let now = Utc::now();
        let model = user::ActiveModel {
            id: Set(id.to_string()),
            last_login_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn store_verification_token(
        &self,
        user_id: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let model = email_verification_token::ActiveModel {
            user_id: Set(user_id.to_string()),
            token_hash: Set(token_hash.to_string()),
            expires_at: Set(expires_at),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn take_verification_token(
        &self,
        user_id: &str,
        token_hash: &str,
    ) -> DomainResult<Option<VerificationToken>> {
        let Some(found) = email_verification_token::Entity::find()
            .filter(email_verification_token::Column::UserId.eq(user_id))
            .filter(email_verification_token::Column::TokenHash.eq(token_hash))
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let res = email_verification_token::Entity::delete_by_id(found.id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        // A concurrent verification already consumed it.
        if res.rows_affected == 0 {
            return Ok(None);
        }
        Ok(Some(token_model_to_domain(found)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_database;
    use chrono::Duration;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            email_confirmed: false,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = SeaOrmUserRepository::new(test_database().await);
        repo.create_user(new_user("a@example.com")).await.unwrap();

        let err = repo.create_user(new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn confirm_email_sets_flag() {
        let repo = SeaOrmUserRepository::new(test_database().await);
        let user = repo.create_user(new_user("b@example.com")).await.unwrap();
        assert!(!user.email_confirmed);

        repo.confirm_email(&user.id).await.unwrap();
        let reloaded = repo.get_user_by_email("b@example.com").await.unwrap().unwrap();
        assert!(reloaded.email_confirmed);
    }

    #[tokio::test]
    async fn verification_token_is_single_use() {
        let repo = SeaOrmUserRepository::new(test_database().await);
        let user = repo.create_user(new_user("c@example.com")).await.unwrap();
        repo.store_verification_token(&user.id, "h1", Utc::now() + Duration::hours(1))
            .await
            .unwrap();

        assert!(repo.take_verification_token(&user.id, "other").await.unwrap().is_none());
        assert!(repo.take_verification_token(&user.id, "h1").await.unwrap().is_some());
        assert!(repo.take_verification_token(&user.id, "h1").await.unwrap().is_none());
    }
}
