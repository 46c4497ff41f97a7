//! Email verification token generation

use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a random verification token (32 bytes, hex encoded).
///
/// Returns `(token, token_hash)`. The token goes into the email, the hash
/// into the database.
pub fn generate_verification_token() -> (String, String) {
    let mut rng = rand::thread_rng();
    let random_bytes: [u8; 32] = rng.gen();
    let token = hex::encode(random_bytes);
    let token_hash = hash_verification_token(&token);
    (token, token_hash)
}

/// SHA-256 of a verification token, hex encoded
pub fn hash_verification_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_hash_matches_token() {
        let (token, hash) = generate_verification_token();
        assert_eq!(token.len(), 64);
        assert_eq!(hash_verification_token(&token), hash);
        assert_ne!(token, hash);
    }

    #[test]
    fn tokens_are_unique() {
        let (a, _) = generate_verification_token();
        let (b, _) = generate_verification_token();
        assert_ne!(a, b);
    }
}
