//! Port deciding how passwords are stored and checked.
//!
//! Account and directory services only ever go through this trait, so a
//! hashing scheme can replace plaintext storage without touching callers.

use crate::domain::Password;

/// Seals new passwords for storage and checks presented ones.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialVerifier: Send + Sync {
    /// Turn a caller-supplied password into stored material.
    fn seal(&self, presented: &str) -> Password;

    /// Whether `presented` matches the stored material.
    fn verify(&self, stored: &Password, presented: &str) -> bool;
}

/// Stores passwords as given and compares them for equality.
///
/// # Examples
/// ```
/// use attendance::domain::ports::{CredentialVerifier, PlaintextCredentialVerifier};
///
/// let verifier = PlaintextCredentialVerifier;
/// let stored = verifier.seal("100-S");
/// assert!(verifier.verify(&stored, "100-S"));
/// assert!(!verifier.verify(&stored, "100-s"));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextCredentialVerifier;

impl CredentialVerifier for PlaintextCredentialVerifier {
    fn seal(&self, presented: &str) -> Password {
        Password::new(presented)
    }

    fn verify(&self, stored: &Password, presented: &str) -> bool {
        stored.expose() == presented
    }
}
