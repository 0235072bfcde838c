//! Parsing of `Authorization` header values.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::common_models::session::BearerCredential;


static BEARER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^Bearer\s+(\S+)$").unwrap()
});

#[derive(Debug, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("Authorization header is missing")]
    MissingHeader,
    #[error("Authorization header is not of the form `Bearer <token>`")]
    MalformedHeader,
}

/// Extracts the bearer credential from a raw `Authorization` header value.
///
/// The scheme is matched case-sensitively and exactly one non-whitespace token
/// must follow it.
pub fn extract_bearer_credential(header: &str) -> Result<BearerCredential, CredentialError> {
    if header.is_empty() {
        return Err(CredentialError::MissingHeader);
    }

    BEARER_PATTERN
        .captures(header)
        .and_then(|captures| captures.get(1))
        .map(|token| BearerCredential::from(token.as_str().to_owned()))
        .ok_or(CredentialError::MalformedHeader)
}
