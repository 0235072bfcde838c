use feedback_providers::{
    credential_extractor::CredentialError, feedback_storage::error::FeedbackStorageError,
    identity_verifier::error::IdentityVerifierError, session_token::error::SessionTokenError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Malformed credential: `{0}`")]
    MalformedCredential(#[from] CredentialError),
    #[error("User not valid")]
    UserNotValid,
    #[error("Identity verifier unreachable: `{0}`")]
    VerifierUnreachable(String),
    #[error("Identity verifier response invalid: `{0}`")]
    VerifierResponseInvalid(String),
    #[error("Could not issue session token: `{0}`")]
    TokenIssuance(String),
    #[error("Session token malformed: `{0}`")]
    TokenMalformed(String),
    #[error("Session token not yet or no longer valid: `{0}`")]
    TokenNotYetOrNoLongerValid(String),
    #[error("Session token unverifiable: `{0}`")]
    TokenUnverifiable(String),
    #[error("Invalid feedback: `{0}`")]
    InvalidFeedback(String),
    #[error("Persistence failure: `{0}`")]
    PersistenceFailure(String),
}

impl ServiceError {
    /// HTTP status a caller should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MalformedCredential(_) | Self::InvalidFeedback(_) => 400,
            Self::UserNotValid
            | Self::TokenMalformed(_)
            | Self::TokenNotYetOrNoLongerValid(_)
            | Self::TokenUnverifiable(_) => 401,
            Self::VerifierUnreachable(_) | Self::VerifierResponseInvalid(_) => 502,
            Self::TokenIssuance(_) | Self::PersistenceFailure(_) => 500,
        }
    }
}

impl From<IdentityVerifierError> for ServiceError {
    fn from(value: IdentityVerifierError) -> Self {
        match value {
            IdentityVerifierError::CouldNotBuildRequest(e)
            | IdentityVerifierError::Unreachable(e) => Self::VerifierUnreachable(e),
            IdentityVerifierError::InvalidResponse(e) => Self::VerifierResponseInvalid(e),
        }
    }
}

impl From<SessionTokenError> for ServiceError {
    fn from(value: SessionTokenError) -> Self {
        match value {
            SessionTokenError::Malformed(e) => Self::TokenMalformed(e),
            SessionTokenError::NotYetOrNoLongerValid(e) => Self::TokenNotYetOrNoLongerValid(e),
            SessionTokenError::Unverifiable(e) => Self::TokenUnverifiable(e),
            SessionTokenError::CouldNotSign(e) | SessionTokenError::CouldNotFormat(e) => {
                Self::TokenIssuance(e)
            }
        }
    }
}

impl From<FeedbackStorageError> for ServiceError {
    fn from(value: FeedbackStorageError) -> Self {
        Self::PersistenceFailure(value.to_string())
    }
}
