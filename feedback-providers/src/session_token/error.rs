//! Enumerates errors for session token providers.

use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum SessionTokenError {
    #[error("Could not sign: `{0}`")]
    CouldNotSign(String),
    #[error("Could not format: `{0}`")]
    CouldNotFormat(String),
    #[error("Malformed token: `{0}`")]
    Malformed(String),
    #[error("Token not yet or no longer valid: `{0}`")]
    NotYetOrNoLongerValid(String),
    #[error("Could not verify: `{0}`")]
    Unverifiable(String),
}
