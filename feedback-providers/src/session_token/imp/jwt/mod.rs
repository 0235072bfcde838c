use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

use self::{
    mapper::{b64url_to_bin, bin_to_b64url_string, string_to_b64url_string},
    model::{DecomposedToken, JWTHeader, JWTPayload},
};
use crate::session_token::{
    error::SessionTokenError,
    model::{SignatureProvider, TokenVerifier},
};


pub mod mapper;
pub mod model;

#[derive(Debug)]
pub struct Jwt<Payload: Serialize + DeserializeOwned + Debug> {
    pub header: JWTHeader,
    pub payload: JWTPayload<Payload>,
}

impl<Payload: Serialize + DeserializeOwned + Debug> Jwt<Payload> {
    pub fn new(
        signature_type: String,
        algorithm: String,
        payload: JWTPayload<Payload>,
    ) -> Jwt<Payload> {
        let header = JWTHeader {
            signature_type: Some(signature_type),
            algorithm,
        };

        Jwt { header, payload }
    }

    /// Parses a compact token and, if a verifier is given, checks its signature.
    ///
    /// Structural problems in the header or payload are reported as
    /// [`SessionTokenError::Malformed`]. Anything wrong with the signature
    /// segment, including an undecodable one, is [`SessionTokenError::Unverifiable`].
    pub fn build_from_token(
        token: &str,
        verification: Option<&dyn TokenVerifier>,
    ) -> Result<Jwt<Payload>, SessionTokenError> {
        let DecomposedToken {
            header,
            payload,
            signing_input,
            signature,
        } = Self::decompose_token(token)?;

        if let Some(verification) = verification {
            let signature = b64url_to_bin(&signature)
                .map_err(|e| SessionTokenError::Unverifiable(e.to_string()))?;

            verification
                .verify(&header.algorithm, signing_input.as_bytes(), &signature)
                .map_err(|e| SessionTokenError::Unverifiable(e.to_string()))?;
        }

        Ok(Jwt { header, payload })
    }

    pub fn tokenize(&self, auth_fn: &dyn SignatureProvider) -> Result<String, SessionTokenError> {
        let jwt_header_json = serde_json::to_string(&self.header)
            .map_err(|e| SessionTokenError::CouldNotFormat(e.to_string()))?;
        let payload_json = serde_json::to_string(&self.payload)
            .map_err(|e| SessionTokenError::CouldNotFormat(e.to_string()))?;
        let mut token = format!(
            "{}.{}",
            string_to_b64url_string(&jwt_header_json)?,
            string_to_b64url_string(&payload_json)?,
        );

        let signature = auth_fn
            .sign(token.as_bytes())
            .map_err(|e| SessionTokenError::CouldNotSign(e.to_string()))?;

        token.push('.');
        token.push_str(&bin_to_b64url_string(&signature)?);

        Ok(token)
    }

    /// Splits a token into exactly three `.`-separated parts and decodes the
    /// header and payload. The signature segment is returned still encoded and
    /// may be empty.
    pub fn decompose_token(token: &str) -> Result<DecomposedToken<Payload>, SessionTokenError> {
        let jwt_parts: Vec<&str> = token.split('.').collect();

        let [header, payload, signature] = jwt_parts[..] else {
            return Err(SessionTokenError::Malformed(format!(
                "expected 3 token parts, found {}",
                jwt_parts.len()
            )));
        };

        if header.is_empty() || payload.is_empty() {
            return Err(SessionTokenError::Malformed("Missing token part".to_owned()));
        }

        let signing_input = format!("{header}.{payload}");

        let header: JWTHeader = serde_json::from_slice(&b64url_to_bin(header)?)
            .map_err(|e| SessionTokenError::Malformed(e.to_string()))?;

        let payload: JWTPayload<Payload> = serde_json::from_slice(&b64url_to_bin(payload)?)
            .map_err(|e| SessionTokenError::Malformed(e.to_string()))?;

        Ok(DecomposedToken {
            header,
            payload,
            signing_input,
            signature: signature.to_owned(),
        })
    }
}
