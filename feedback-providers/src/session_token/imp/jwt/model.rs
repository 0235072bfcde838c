use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JWTHeader {
    #[serde(rename = "alg")]
    pub algorithm: String,

    #[serde(rename = "typ", default, skip_serializing_if = "Option::is_none")]
    pub signature_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JWTPayload<CustomPayload> {
    #[serde(
        rename = "iat",
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub issued_at: Option<OffsetDateTime>,

    #[serde(
        rename = "exp",
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub expires_at: Option<OffsetDateTime>,

    #[serde(
        rename = "nbf",
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub invalid_before: Option<OffsetDateTime>,

    #[serde(flatten)]
    pub custom: CustomPayload,
}

#[derive(Debug)]
pub struct DecomposedToken<Payload> {
    pub header: JWTHeader,
    pub payload: JWTPayload<Payload>,
    pub signing_input: String,
    pub signature: String,
}
