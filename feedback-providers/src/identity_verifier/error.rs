//! Enumerates errors for identity verifiers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityVerifierError {
    #[error("Could not build verification request: `{0}`")]
    CouldNotBuildRequest(String),
    #[error("Verifier unreachable: `{0}`")]
    Unreachable(String),
    #[error("Invalid verifier response: `{0}`")]
    InvalidResponse(String),
}
