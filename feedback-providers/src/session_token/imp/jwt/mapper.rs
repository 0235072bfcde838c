use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};

use crate::session_token::error::SessionTokenError;

pub fn bin_to_b64url_string(bin: &[u8]) -> Result<String, SessionTokenError> {
    Base64UrlSafeNoPadding::encode_to_string(bin)
        .map_err(|e| SessionTokenError::CouldNotFormat(e.to_string()))
}

pub fn string_to_b64url_string(string: &str) -> Result<String, SessionTokenError> {
    Base64UrlSafeNoPadding::encode_to_string(string)
        .map_err(|e| SessionTokenError::CouldNotFormat(e.to_string()))
}

pub fn b64url_to_bin(part: &str) -> Result<Vec<u8>, SessionTokenError> {
    Base64UrlSafeNoPadding::decode_to_vec(part, None)
        .map_err(|e| SessionTokenError::Malformed(e.to_string()))
}
