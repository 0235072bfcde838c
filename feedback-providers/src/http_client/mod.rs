//! Outbound JSON calls made by providers.
//!
//! Providers depend on [`HttpClient`] rather than on `reqwest` directly, so the
//! transport can be replaced or mocked in tests.

pub mod imp;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::sync::Arc;
use thiserror::Error;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    fn post(&self, url: &str) -> RequestBuilder;

    async fn send(&self, request: Request) -> Result<Response, Error>;
}

/// A prepared `POST` request.
#[derive(Debug, Default)]
pub struct Request {
    pub url: String,
    pub bearer_token: Option<String>,
    pub json_body: Option<Vec<u8>>,
}

#[derive(Debug)]
pub struct StatusCode(pub u16);

#[derive(Debug)]
pub struct Response {
    pub body: Vec<u8>,
    pub status: StatusCode,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Other HTTP client error: {0}")]
    Other(String),
    #[error("HTTP status code is error: {0}")]
    StatusCodeIsError(StatusCode),
}

impl Response {
    pub fn error_for_status(self) -> Result<Self, Error> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(Error::StatusCodeIsError(self.status))
        }
    }

    pub fn json<T: DeserializeOwned>(self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(Error::JsonError)
    }
}

impl StatusCode {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct RequestBuilder {
    client: Arc<dyn HttpClient>,
    request: Request,
}

impl RequestBuilder {
    pub fn new(client: Arc<dyn HttpClient>, url: &str) -> Self {
        Self {
            client,
            request: Request {
                url: url.to_owned(),
                ..Default::default()
            },
        }
    }

    pub fn bearer_auth(mut self, token: &str) -> Self {
        self.request.bearer_token = Some(token.to_owned());
        self
    }

    pub fn json<T: Serialize>(mut self, value: T) -> Result<Self, Error> {
        self.request.json_body = Some(serde_json::to_vec(&value)?);
        Ok(self)
    }

    pub async fn send(self) -> Result<Response, Error> {
        self.client.send(self.request).await
    }
}
