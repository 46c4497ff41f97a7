//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

/// JWT configuration
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
    /// Audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::from(&SecurityConfig::default())
    }
}

impl From<&SecurityConfig> for JwtConfig {
    fn from(s: &SecurityConfig) -> Self {
        Self {
            secret: s.jwt_secret.clone(),
            expiration_hours: s.jwt_expiration_hours,
            issuer: s.jwt_issuer.clone(),
            audience: s.jwt_audience.clone(),
        }
    }
}

/// Claims embedded in every issued token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user email)
    pub sub: String,
    /// Unique token id
    pub jti: String,
    /// User id
    pub uid: String,
    /// Role names assigned to the user at login time
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

impl TokenClaims {
    pub fn new(user_id: &str, email: &str, roles: &[String], config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: email.to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
            uid: user_id.to_string(),
            roles: roles.to_vec(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
        }
    }
}

/// Create a signed token for a user
pub fn create_token(
    user_id: &str,
    email: &str,
    roles: &[String],
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = TokenClaims::new(user_id, email, roles, config);

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, issuer, audience and expiry, then decode the claims
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);
    validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
    validation.leeway = 0;

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> Vec<String> {
        vec!["Admin".to_string(), "Customer".to_string()]
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = JwtConfig::default();
        let token = create_token("user-123", "jane@example.com", &roles(), &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "jane@example.com");
        assert_eq!(claims.uid, "user-123");
        assert_eq!(claims.roles, roles());
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn token_ids_are_unique() {
        let config = JwtConfig::default();
        let a = TokenClaims::new("u", "a@example.com", &[], &config);
        let b = TokenClaims::new("u", "a@example.com", &[], &config);
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_invalid_token() {
        let config = JwtConfig::default();
        assert!(verify_token("invalid-token", &config).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = JwtConfig {
            expiration_hours: -1,
            ..JwtConfig::default()
        };
        let token = create_token("u", "a@example.com", &[], &config).unwrap();
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn wrong_audience_or_issuer_is_rejected() {
        let config = JwtConfig::default();
        let token = create_token("u", "a@example.com", &[], &config).unwrap();

        let other_audience = JwtConfig {
            audience: "someone-else".into(),
            ..config.clone()
        };
        assert!(verify_token(&token, &other_audience).is_err());

        let other_issuer = JwtConfig {
            issuer: "someone-else".into(),
            ..config
        };
        assert!(verify_token(&token, &other_issuer).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = JwtConfig::default();
        let token = create_token("u", "a@example.com", &[], &config).unwrap();
        let other = JwtConfig {
            secret: "another-secret".into(),
            ..config
        };
        assert!(verify_token(&token, &other).is_err());
    }
}
