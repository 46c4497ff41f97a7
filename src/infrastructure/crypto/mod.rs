//! Cryptographic helpers: token signing, password hashing and
//! single-use verification tokens.

pub mod jwt;
pub mod password;
pub mod verification_token;

pub use jwt::{create_token, verify_token, JwtConfig, TokenClaims};
pub use password::{hash_password, verify_password};
pub use verification_token::{generate_verification_token, hash_verification_token};
