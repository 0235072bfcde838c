//! Signing and verifying of raw bytes with symmetric secrets.
//!
//! Session tokens are authenticated with a server-held secret. This crate keeps
//! the MAC primitives apart from the token format so the format layer only sees
//! the [`Signer`] trait.

use thiserror::Error;

pub mod imp;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum SignerError {
    #[error("Could not sign: `{0}`")]
    CouldNotSign(String),
    #[error("Could not verify: `{0}`")]
    CouldNotVerify(String),
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Missing key")]
    MissingKey,
}

/// Direct signing and verification with a shared secret.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Signer: Send + Sync {
    /// Algorithm identifier as used in a JOSE `alg` header.
    fn algorithm(&self) -> &'static str;

    /// Direct signing.
    fn sign(&self, input: &[u8], secret: &[u8]) -> Result<Vec<u8>, SignerError>;

    /// Direct signature verification.
    fn verify(&self, input: &[u8], signature: &[u8], secret: &[u8]) -> Result<(), SignerError>;
}
