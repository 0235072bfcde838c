//! Session tokens as compact JWTs authenticated with a shared secret.
//!
//! Tokens carry the verified user identifier as the `userId` claim and a
//! not-before (`nbf`) time equal to the issuance time. No expiry is set on
//! issuance; an `exp` claim is still honored when present.

use std::sync::Arc;

use feedback_crypto::{Signer, SignerError};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use zeroize::Zeroizing;

use crate::{
    common_models::session::SessionToken,
    session_token::{
        error::SessionTokenError,
        imp::jwt::{model::JWTPayload, Jwt},
        model::{SignatureProvider, TokenVerifier},
        SessionClaims, SessionTokenProvider,
    },
};


const TOKEN_TYPE: &str = "JWT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    /// Allowed clock skew in seconds when checking `nbf` and `exp`.
    pub leeway: u64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionPayload {
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
}

pub struct HmacJwtProvider {
    signer: Arc<dyn Signer>,
    secret: Zeroizing<Vec<u8>>,
    params: Params,
}

impl HmacJwtProvider {
    pub fn new(signer: Arc<dyn Signer>, secret: Zeroizing<Vec<u8>>, params: Params) -> Self {
        Self {
            signer,
            secret,
            params,
        }
    }

    fn secret_key(&self) -> SecretKeyAuth<'_> {
        SecretKeyAuth {
            signer: self.signer.as_ref(),
            secret: self.secret.as_slice(),
        }
    }

    fn check_validity_period(
        &self,
        payload: &JWTPayload<SessionPayload>,
        now: OffsetDateTime,
    ) -> Result<(), SessionTokenError> {
        let leeway = i64::try_from(self.params.leeway)
            .map(Duration::seconds)
            .unwrap_or(Duration::MAX);

        if let Some(invalid_before) = payload.invalid_before {
            let not_yet_valid = now
                .checked_add(leeway)
                .is_some_and(|latest| invalid_before > latest);

            if not_yet_valid {
                return Err(SessionTokenError::NotYetOrNoLongerValid(format!(
                    "token not valid before {invalid_before}"
                )));
            }
        }

        if let Some(expires_at) = payload.expires_at {
            let expired = now
                .checked_sub(leeway)
                .is_some_and(|earliest| expires_at <= earliest);

            if expired {
                return Err(SessionTokenError::NotYetOrNoLongerValid(format!(
                    "token expired at {expires_at}"
                )));
            }
        }

        Ok(())
    }
}

impl SessionTokenProvider for HmacJwtProvider {
    fn issue(&self, user_id: &str) -> Result<SessionToken, SessionTokenError> {
        let payload = JWTPayload {
            issued_at: None,
            expires_at: None,
            invalid_before: Some(OffsetDateTime::now_utc()),
            custom: SessionPayload {
                user_id: Some(user_id.to_owned()),
            },
        };

        let jwt = Jwt::new(
            TOKEN_TYPE.to_owned(),
            self.signer.algorithm().to_owned(),
            payload,
        );

        jwt.tokenize(&self.secret_key()).map(SessionToken::from)
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, SessionTokenError> {
        let jwt: Jwt<SessionPayload> = Jwt::build_from_token(token, Some(&self.secret_key()))?;

        self.check_validity_period(&jwt.payload, OffsetDateTime::now_utc())?;

        Ok(SessionClaims {
            user_id: jwt.payload.custom.user_id,
            invalid_before: jwt.payload.invalid_before,
            expires_at: jwt.payload.expires_at,
        })
    }
}

struct SecretKeyAuth<'a> {
    signer: &'a dyn Signer,
    secret: &'a [u8],
}

impl SignatureProvider for SecretKeyAuth<'_> {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        self.signer.sign(message, self.secret)
    }
}

impl TokenVerifier for SecretKeyAuth<'_> {
    fn verify(&self, algorithm: &str, token: &[u8], signature: &[u8]) -> Result<(), SignerError> {
        if algorithm != self.signer.algorithm() {
            return Err(SignerError::CouldNotVerify(format!(
                "unsupported algorithm `{algorithm}`"
            )));
        }

        self.signer.verify(token, signature, self.secret)
    }
}
