//! Issuing and verifying locally signed session tokens.
//!
//! A session token is handed out after the external identity verifier has
//! vouched for a user. It is later presented as the credential for feedback
//! submission and doubles as the natural key of the submitted record.

use time::OffsetDateTime;

use crate::{common_models::session::SessionToken, session_token::error::SessionTokenError};

pub mod error;
pub mod imp;
pub mod model;

/// Claims recovered from a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: Option<String>,
    pub invalid_before: Option<OffsetDateTime>,
    pub expires_at: Option<OffsetDateTime>,
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait SessionTokenProvider: Send + Sync {
    /// Mints a token for a verified user, valid from now on.
    fn issue(&self, user_id: &str) -> Result<SessionToken, SessionTokenError>;

    /// Checks signature and temporal validity of a token.
    ///
    /// Every failure is classified as exactly one of
    /// [`SessionTokenError::Malformed`], [`SessionTokenError::NotYetOrNoLongerValid`]
    /// or [`SessionTokenError::Unverifiable`].
    fn verify(&self, token: &str) -> Result<SessionClaims, SessionTokenError>;
}
