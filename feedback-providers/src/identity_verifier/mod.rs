//! Verification of third-party bearer credentials.
//!
//! An identity verifier asks an external service whether a bearer credential
//! belongs to a known user. The verdict is only trusted when it carries a
//! user identifier.

use async_trait::async_trait;

use crate::{
    common_models::session::BearerCredential, identity_verifier::error::IdentityVerifierError,
};

pub mod error;
pub mod imp;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityVerdict {
    pub is_user: bool,
    pub user_id: Option<String>,
}

impl IdentityVerdict {
    /// Returns the user identifier if the verdict identifies a valid user.
    ///
    /// A positive verdict without a non-empty user identifier is not a valid user.
    pub fn verified_user_id(&self) -> Option<&str> {
        if !self.is_user {
            return None;
        }

        self.user_id.as_deref().filter(|user_id| !user_id.is_empty())
    }
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Asks the external service about a credential. One outbound call, no retries.
    async fn verify(
        &self,
        credential: &BearerCredential,
    ) -> Result<IdentityVerdict, IdentityVerifierError>;
}
