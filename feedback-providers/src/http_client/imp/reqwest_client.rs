use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::http_client::{Error, HttpClient, Request, RequestBuilder, Response, StatusCode};

#[derive(Clone)]
pub struct ReqwestClient {
    pub client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Client with a bounded request timeout, covering connect, send and body read.
    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self::new(client))
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new(Default::default())
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    fn post(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(Arc::new(self.clone()), url)
    }

    async fn send(&self, request: Request) -> Result<Response, Error> {
        let mut builder = self.client.post(&request.url);

        if let Some(token) = request.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.json_body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::HttpError(e.to_string()))?;

        let status = StatusCode(response.status().as_u16());
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::HttpError(e.to_string()))?;

        Ok(Response {
            body: body.to_vec(),
            status,
        })
    }
}
