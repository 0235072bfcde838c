//! Provider traits and implementations behind the feedback token exchange.

pub mod common_models;
pub mod credential_extractor;
pub mod feedback_storage;
pub mod http_client;
pub mod identity_verifier;
pub mod session_token;
