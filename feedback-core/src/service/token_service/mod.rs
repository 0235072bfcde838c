//! Exchange of external identity credentials for session tokens and the
//! authorization check performed on those session tokens.

use std::sync::Arc;

use feedback_providers::{
    common_models::session::SessionToken, credential_extractor::extract_bearer_credential,
    identity_verifier::IdentityVerifier, session_token::SessionTokenProvider,
};
use tracing::{debug, warn};

use super::error::ServiceError;


pub struct TokenService {
    identity_verifier: Arc<dyn IdentityVerifier>,
    session_token_provider: Arc<dyn SessionTokenProvider>,
}

impl TokenService {
    pub fn new(
        identity_verifier: Arc<dyn IdentityVerifier>,
        session_token_provider: Arc<dyn SessionTokenProvider>,
    ) -> Self {
        Self {
            identity_verifier,
            session_token_provider,
        }
    }

    /// Exchanges the bearer credential of an `Authorization` header value for a session token.
    ///
    /// Makes exactly one call to the identity verifier and mutates no local state.
    pub async fn exchange(&self, authorization: &str) -> Result<SessionToken, ServiceError> {
        let credential = extract_bearer_credential(authorization)?;

        let verdict = self
            .identity_verifier
            .verify(&credential)
            .await
            .inspect_err(|e| warn!("Identity verification failed: {e}"))?;

        let Some(user_id) = verdict.verified_user_id() else {
            debug!("Identity verifier rejected credential");
            return Err(ServiceError::UserNotValid);
        };

        let session_token = self.session_token_provider.issue(user_id)?;
        debug!(user_id, "Issued session token");

        Ok(session_token)
    }

    /// Extracts the session token from an `Authorization` header value and checks it.
    ///
    /// Returns the token with wrapping quotes removed, the form under which
    /// feedback is stored.
    pub fn authorize(&self, authorization: &str) -> Result<SessionToken, ServiceError> {
        let credential = extract_bearer_credential(authorization)?;
        let session_token = strip_quotes(credential.as_str());

        self.is_authorized(session_token)?;

        Ok(SessionToken::from(session_token))
    }

    pub fn is_authorized(&self, session_token: &str) -> Result<bool, ServiceError> {
        self.session_token_provider
            .verify(strip_quotes(session_token))
            .map_err(|e| {
                debug!("Session token rejected: {e}");
                ServiceError::from(e)
            })?;

        Ok(true)
    }
}

fn strip_quotes(token: &str) -> &str {
    token.trim_matches('"')
}
