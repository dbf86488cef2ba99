//! Salted SHA-256 credential hashing.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::RngCore;
use sha2::{Digest, Sha256};

use rostra_core::identity::CredentialHasher;

const SALT_LEN: usize = 16;

/// One-way salted hashing of sign-in secrets.
///
/// Stored form is `base64(salt)$base64(sha256(salt || secret))`. A fresh
/// salt is drawn per call, so equal secrets hash to distinct values.
pub struct Sha256CredentialHasher;

impl Sha256CredentialHasher {
    fn digest(salt: &[u8], secret: &str) -> [u8; 32] {
        Sha256::new()
            .chain_update(salt)
            .chain_update(secret.as_bytes())
            .finalize()
            .into()
    }
}

impl CredentialHasher for Sha256CredentialHasher {
    fn hash(&self, secret: &str) -> String {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let digest = Self::digest(&salt, secret);
        format!("{}${}", STANDARD.encode(salt), STANDARD.encode(digest))
    }

    fn verify(&self, secret: &str, stored: &str) -> bool {
        let Some((salt, digest)) = stored.split_once('$') else {
            return false;
        };
        let Ok(salt) = STANDARD.decode(salt) else {
            return false;
        };
        let Ok(expected) = STANDARD.decode(digest) else {
            return false;
        };
        Self::digest(&salt, secret).as_slice() == expected.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verifies_and_rejects() {
        let hasher = Sha256CredentialHasher;
        let stored = hasher.hash("correct horse");

        assert!(hasher.verify("correct horse", &stored));
        assert!(!hasher.verify("wrong horse", &stored));
    }

    #[test]
    fn test_equal_secrets_hash_differently() {
        let hasher = Sha256CredentialHasher;
        assert_ne!(hasher.hash("secret"), hasher.hash("secret"));
    }

    #[test]
    fn test_stored_form_is_not_the_secret() {
        let hasher = Sha256CredentialHasher;
        let stored = hasher.hash("secret");
        assert!(!stored.contains("secret"));
    }

    #[test]
    fn test_malformed_stored_value_never_verifies() {
        let hasher = Sha256CredentialHasher;
        assert!(!hasher.verify("secret", "no-separator"));
        assert!(!hasher.verify("secret", "!!$!!"));
    }
}
