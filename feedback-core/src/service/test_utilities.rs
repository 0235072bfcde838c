use std::sync::Arc;

use feedback_crypto::{imp::signer::hs256::HS256Signer, Signer, SignerError};
use feedback_providers::session_token::{
    imp::{
        hmac_jwt::{HmacJwtProvider, Params},
        jwt::{model::JWTPayload, Jwt},
    },
    model::SignatureProvider,
    SessionTokenProvider,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use zeroize::Zeroizing;

pub const SECRET: &[u8] = b"test-signing-secret";

pub fn session_token_provider() -> Arc<dyn SessionTokenProvider> {
    Arc::new(HmacJwtProvider::new(
        Arc::new(HS256Signer {}),
        Zeroizing::new(SECRET.to_vec()),
        Params::default(),
    ))
}

struct SecretKey;

impl SignatureProvider for SecretKey {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        HS256Signer {}.sign(message, SECRET)
    }
}

#[derive(Serialize, Deserialize, Debug)]
struct UserClaim {
    #[serde(rename = "userId")]
    user_id: String,
}

/// Session token for `user_id` signed with [`SECRET`], valid from `invalid_before`.
pub fn token_valid_from(user_id: &str, invalid_before: OffsetDateTime) -> String {
    let payload = JWTPayload {
        issued_at: None,
        expires_at: None,
        invalid_before: Some(invalid_before),
        custom: UserClaim {
            user_id: user_id.to_owned(),
        },
    };

    Jwt::new("JWT".to_owned(), "HS256".to_owned(), payload)
        .tokenize(&SecretKey)
        .unwrap()
}

pub fn flip_signature_char(token: &str) -> String {
    let (signing_input, signature) = token.rsplit_once('.').unwrap();
    let mut signature = signature.to_owned();
    let replacement = if signature.starts_with('A') { "B" } else { "A" };
    signature.replace_range(..1, replacement);

    format!("{signing_input}.{signature}")
}
