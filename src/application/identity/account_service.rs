//! Account service: registration, email verification and login
//!
//! HTTP handlers are thin wrappers around this service.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::{
    DomainError, DomainResult, NewUser, RoleRepositoryInterface, User, UserRepositoryInterface,
};
use crate::infrastructure::crypto::{
    create_token, generate_verification_token, hash_password, hash_verification_token,
    verify_password, JwtConfig,
};
use crate::infrastructure::mail::{EmailMessage, SharedEmailSender};
use crate::shared::is_password_valid;

/// Hours a verification link stays valid
pub const VERIFICATION_TOKEN_TTL_HOURS: i64 = 24;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
    pub roles: Vec<String>,
}

/// Account flow settings taken from configuration
#[derive(Debug, Clone)]
pub struct AccountSettings {
    pub require_confirmed_email: bool,
    /// Base of the verification link, without a trailing slash
    pub public_base_url: String,
    pub mail_from: String,
}

impl From<&AppConfig> for AccountSettings {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            require_confirmed_email: cfg.security.require_confirmed_email,
            public_base_url: cfg.email.public_base_url.trim_end_matches('/').to_string(),
            mail_from: cfg.email.from.clone(),
        }
    }
}

pub struct AccountService<U: UserRepositoryInterface, R: RoleRepositoryInterface> {
    users: Arc<U>,
    roles: Arc<R>,
    mailer: SharedEmailSender,
    jwt_config: JwtConfig,
    settings: AccountSettings,
}

impl<U: UserRepositoryInterface, R: RoleRepositoryInterface> AccountService<U, R> {
    pub fn new(
        users: Arc<U>,
        roles: Arc<R>,
        mailer: SharedEmailSender,
        jwt_config: JwtConfig,
        settings: AccountSettings,
    ) -> Self {
        Self {
            users,
            roles,
            mailer,
            jwt_config,
            settings,
        }
    }

    // ── Registration ────────────────────────────────────────────

    /// Create an unverified account and mail a verification link.
    ///
    /// A mail delivery failure is logged; the account still exists and the
    /// call succeeds.
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<User> {
        let email = email.trim();
        if !is_password_valid(password) {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters and contain an uppercase letter, \
                 a lowercase letter, a digit and a special character"
                    .into(),
            ));
        }
        if self.users.get_user_by_email(email).await?.is_some() {
            return Err(DomainError::Conflict("Email is already registered".into()));
        }

        let password_hash = hash_password(password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {e}")))?;
        let user = self
            .users
            .create_user(NewUser {
                email: email.to_string(),
                password_hash,
                email_confirmed: false,
            })
            .await?;

        let (token, token_hash) = generate_verification_token();
        let expires_at = Utc::now() + Duration::hours(VERIFICATION_TOKEN_TTL_HOURS);
        self.users
            .store_verification_token(&user.id, &token_hash, expires_at)
            .await?;

        let message = self.verification_message(&user, &token);
        if let Err(e) = self.mailer.send(message).await {
            warn!(user_id = %user.id, error = %e, "Failed to send verification email");
        }

        info!(user_id = %user.id, email = %user.email, "New user registered");
        Ok(user)
    }

    fn verification_message(&self, user: &User, token: &str) -> EmailMessage {
        let link = format!(
            "{}/api/Account/verify-email?userId={}&token={}",
            self.settings.public_base_url, user.id, token
        );
        EmailMessage {
            from: self.settings.mail_from.clone(),
            to: user.email.clone(),
            subject: "Confirm your email".to_string(),
            body: format!("Please confirm your account by opening this link: {link}"),
        }
    }

    // ── Email verification ──────────────────────────────────────

    pub async fn verify_email(&self, user_id: &str, token: &str) -> DomainResult<()> {
        let user = self
            .users
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))?;

        let stored = self
            .users
            .take_verification_token(&user.id, &hash_verification_token(token))
            .await?
            .ok_or_else(|| DomainError::Validation("Invalid verification token".into()))?;
        if stored.is_expired() {
            return Err(DomainError::Validation("Verification token has expired".into()));
        }

        self.users.confirm_email(&user.id).await?;
        info!(user_id = %user.id, "Email confirmed");
        Ok(())
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check credentials and issue a signed token carrying the user's roles.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(user) = self.users.get_user_by_email(email.trim()).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }
        if self.settings.require_confirmed_email && !user.email_confirmed {
            return Err(DomainError::Unauthorized("Email is not confirmed".into()));
        }

        let roles = self.roles.role_names_for_user(&user.id).await?;
        let token = create_token(&user.id, &user.email, &roles, &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {e}")))?;
        self.users.record_login(&user.id).await?;

        info!(user_id = %user.id, "User logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
            roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::verify_token;
    use crate::infrastructure::database::repositories::{
        SeaOrmRoleRepository, SeaOrmUserRepository,
    };
    use crate::infrastructure::database::test_database;
    use crate::infrastructure::mail::MemoryMailer;

    struct Fixture {
        service: AccountService<SeaOrmUserRepository, SeaOrmRoleRepository>,
        mailer: Arc<MemoryMailer>,
        roles: Arc<SeaOrmRoleRepository>,
    }

    async fn fixture(require_confirmed_email: bool) -> Fixture {
        let db = test_database().await;
        let mailer = Arc::new(MemoryMailer::new());
        let roles = Arc::new(SeaOrmRoleRepository::new(db.clone()));
        let service = AccountService::new(
            Arc::new(SeaOrmUserRepository::new(db)),
            roles.clone(),
            mailer.clone(),
            JwtConfig::default(),
            AccountSettings {
                require_confirmed_email,
                public_base_url: "http://test".into(),
                mail_from: "noreply@test".into(),
            },
        );
        Fixture {
            service,
            mailer,
            roles,
        }
    }

    fn token_from_link(body: &str) -> String {
        body.split("token=").nth(1).unwrap().trim().to_string()
    }

    #[tokio::test]
    async fn register_sends_verification_link() {
        let f = fixture(true).await;
        let user = f.service.register("a@example.com", "Abc12345!").await.unwrap();

        let mail = f.mailer.last_to("a@example.com").unwrap();
        assert!(mail
            .body
            .contains(&format!("http://test/api/Account/verify-email?userId={}", user.id)));
        assert!(!user.email_confirmed);
    }

    #[tokio::test]
    async fn weak_password_is_rejected() {
        let f = fixture(true).await;
        let err = f.service.register("a@example.com", "abc12345").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(f.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn duplicate_registration_is_a_conflict() {
        let f = fixture(true).await;
        f.service.register("a@example.com", "Abc12345!").await.unwrap();
        let err = f.service.register("a@example.com", "Abc12345!").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn unverified_login_is_rejected_until_verified() {
        let f = fixture(true).await;
        let user = f.service.register("a@example.com", "Abc12345!").await.unwrap();

        let err = f.service.login("a@example.com", "Abc12345!").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        let token = token_from_link(&f.mailer.last_to("a@example.com").unwrap().body);
        f.service.verify_email(&user.id, &token).await.unwrap();

        // single use
        let err = f.service.verify_email(&user.id, &token).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        assert!(f.service.login("a@example.com", "Abc12345!").await.is_ok());
    }

    #[tokio::test]
    async fn verify_unknown_user_is_not_found() {
        let f = fixture(true).await;
        let err = f.service.verify_email("nobody", "token").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn login_token_carries_email_and_roles() {
        let f = fixture(false).await;
        let user = f.service.register("a@example.com", "Abc12345!").await.unwrap();
        let role = f.roles.create_role("Customer").await.unwrap();
        f.roles.assign_role(&user.id, &role.id).await.unwrap();

        let auth = f.service.login("a@example.com", "Abc12345!").await.unwrap();
        let claims = verify_token(&auth.token, &JwtConfig::default()).unwrap();

        assert_eq!(claims.sub, "a@example.com");
        assert_eq!(claims.uid, user.id);
        assert_eq!(claims.roles, vec!["Customer".to_string()]);
        assert_eq!(auth.expires_in, 24 * 3600);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let f = fixture(false).await;
        f.service.register("a@example.com", "Abc12345!").await.unwrap();

        let err = f.service.login("a@example.com", "Wrong123!").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }
}
