use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha512};

/// Entropy of a session token, before encoding.
pub const SESSION_TOKEN_BYTES: usize = 64;

/// Entropy of an OAuth `state` nonce; encodes to exactly 32 characters.
pub const OAUTH_STATE_BYTES: usize = 24;

fn random_url_safe(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Fresh opaque session token. Only its hash is ever persisted.
pub fn generate_session_token() -> String {
    random_url_safe(SESSION_TOKEN_BYTES)
}

pub fn generate_oauth_state() -> String {
    random_url_safe(OAUTH_STATE_BYTES)
}

/// Hex SHA-512 digest of a session token, as stored in `auth_sessions.token_hash`.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_is_url_safe_and_long_enough() {
        let token = generate_session_token();
        // 64 bytes → 86 base64 characters without padding
        assert_eq!(token.len(), 86);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn session_tokens_are_unique() {
        assert_ne!(generate_session_token(), generate_session_token());
    }

    #[test]
    fn oauth_state_is_32_chars() {
        assert_eq!(generate_oauth_state().len(), 32);
    }

    #[test]
    fn hash_is_deterministic() {
        let token = generate_session_token();
        assert_eq!(hash_token(&token), hash_token(&token));
    }

    #[test]
    fn hash_is_hex_sha512_and_differs_from_token() {
        let token = generate_session_token();
        let hash = hash_token(&token);
        assert_eq!(hash.len(), 128);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash, token);
    }

    #[test]
    fn hash_matches_known_vector() {
        assert_eq!(
            hash_token("abc"),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }
}
