//! Credential hashing capability.

/// One-way, salted hashing of sign-in secrets.
///
/// Sign-in compares hashes, never raw secrets; implementations must salt
/// per call so equal secrets produce distinct stored values.
pub trait CredentialHasher: Send + Sync {
    /// Derives the stored form of a secret.
    fn hash(&self, secret: &str) -> String;

    /// Checks a presented secret against a stored hash.
    fn verify(&self, secret: &str, stored: &str) -> bool;
}
