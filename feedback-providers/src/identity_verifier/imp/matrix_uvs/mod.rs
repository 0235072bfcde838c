//! Identity verification against a Matrix user verification service.
//!
//! The service receives the OpenID token a Matrix client obtained from its
//! homeserver together with the homeserver name, and answers whether the token
//! belongs to a user of that homeserver.

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;
use zeroize::Zeroizing;

use self::dto::{VerifyUserRequestDTO, VerifyUserResponseDTO};
use crate::{
    common_models::session::BearerCredential,
    http_client::{self, HttpClient},
    identity_verifier::{error::IdentityVerifierError, IdentityVerdict, IdentityVerifier},
};

#[cfg(test)]
mod test;

mod dto;

#[derive(Clone)]
pub struct Params {
    /// Full URL of the verification endpoint.
    pub url: Url,
    /// Homeserver name sent along with every credential.
    pub server_name: String,
    /// Optional bearer token authenticating this service to the verifier.
    pub auth_token: Option<Zeroizing<String>>,
}

pub struct MatrixUserVerificationService {
    client: Arc<dyn HttpClient>,
    params: Params,
}

impl MatrixUserVerificationService {
    pub fn new(client: Arc<dyn HttpClient>, params: Params) -> Self {
        Self { client, params }
    }
}

#[async_trait]
impl IdentityVerifier for MatrixUserVerificationService {
    async fn verify(
        &self,
        credential: &BearerCredential,
    ) -> Result<IdentityVerdict, IdentityVerifierError> {
        let mut request = self
            .client
            .post(self.params.url.as_str())
            .json(VerifyUserRequestDTO {
                matrix_server_name: &self.params.server_name,
                token: credential.as_str(),
            })
            .map_err(|e| IdentityVerifierError::CouldNotBuildRequest(e.to_string()))?;

        if let Some(auth_token) = &self.params.auth_token {
            request = request.bearer_auth(auth_token);
        }

        let response = request
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| IdentityVerifierError::Unreachable(e.to_string()))?;

        let response: VerifyUserResponseDTO = response.json().map_err(|e| match e {
            http_client::Error::JsonError(e) => IdentityVerifierError::InvalidResponse(e.to_string()),
            other => IdentityVerifierError::Unreachable(other.to_string()),
        })?;

        tracing::debug!(
            is_user = response.results.user,
            user_id = response.user_id.as_deref(),
            "identity verifier verdict"
        );

        Ok(IdentityVerdict {
            is_user: response.results.user,
            user_id: response.user_id,
        })
    }
}
