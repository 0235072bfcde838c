//! Service layer of the feedback token exchange.
//!
//! A client first trades the credential it received from its Matrix homeserver
//! for a locally signed session token. That session token then authorizes
//! feedback submission and is the natural key of the stored feedback: one
//! record per token, updated in place on resubmission.
//!
//! ## Repository structure
//!
//! * **Crypto**: the HMAC-SHA256 signer behind the `Signer` trait
//! * **Providers**
//!   * HTTP client
//!   * Credential extractor
//!   * Identity verifier
//!   * Session token provider
//!   * Feedback storage
//! * **Core**
//!   * Configuration
//!   * Services
//!
//! ## Getting started
//!
//! ```ignore rust
//! let config = FeedbackConfig::from_env()?;
//! let core = FeedbackCore::new(&config).await?;
//!
//! let session_token = core.token_service.exchange("Bearer <homeserver token>").await?;
//! ```

use std::sync::Arc;

use feedback_crypto::imp::signer::hs256::HS256Signer;
use feedback_providers::{
    feedback_storage::{
        error::FeedbackStorageError,
        imp::{in_memory::InMemoryFeedbackStorage, sqlite::SqliteFeedbackStorage},
        FeedbackStorage,
    },
    http_client::{self, imp::reqwest_client::ReqwestClient, HttpClient},
    identity_verifier::{
        imp::matrix_uvs::{MatrixUserVerificationService, Params as MatrixUvsParams},
        IdentityVerifier,
    },
    session_token::{
        imp::hmac_jwt::{HmacJwtProvider, Params as HmacJwtParams},
        SessionTokenProvider,
    },
};
use thiserror::Error;
use tracing::info;

use config::FeedbackConfig;
use model::StorageType;
use service::{feedback_service::FeedbackService, token_service::TokenService};

pub mod config;
pub mod model;
pub mod service;

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("HTTP client error: `{0}`")]
    HttpClient(#[from] http_client::Error),
    #[error("Feedback storage error: `{0}`")]
    FeedbackStorage(#[from] FeedbackStorageError),
}

pub struct FeedbackCore {
    pub token_service: Arc<TokenService>,
    pub feedback_service: FeedbackService,
}

impl FeedbackCore {
    /// Builds all providers from `config`, connecting to the configured storage.
    pub async fn new(config: &FeedbackConfig) -> Result<Self, InitializationError> {
        // initialize identity verifier
        let client: Arc<dyn HttpClient> =
            Arc::new(ReqwestClient::with_timeout(config.verifier.timeout)?);
        let identity_verifier = Arc::new(MatrixUserVerificationService::new(
            client,
            MatrixUvsParams {
                url: config.verifier.url.clone(),
                server_name: config.verifier.server_name.clone(),
                auth_token: config.verifier.auth_token.clone(),
            },
        ));

        // initialize feedback storage
        let feedback_storage: Arc<dyn FeedbackStorage> = match config.storage.storage_type {
            StorageType::Sqlite => Arc::new(
                SqliteFeedbackStorage::connect(
                    &config.storage.database_url,
                    config.storage.max_connections,
                )
                .await?,
            ),
            StorageType::Memory => Arc::new(InMemoryFeedbackStorage::default()),
        };
        info!(storage = %config.storage.storage_type, "Feedback storage ready");

        Ok(Self::with_providers(
            config,
            identity_verifier,
            feedback_storage,
        ))
    }

    /// Builds the services around externally constructed providers.
    pub fn with_providers(
        config: &FeedbackConfig,
        identity_verifier: Arc<dyn IdentityVerifier>,
        feedback_storage: Arc<dyn FeedbackStorage>,
    ) -> Self {
        let session_token_provider: Arc<dyn SessionTokenProvider> =
            Arc::new(HmacJwtProvider::new(
                Arc::new(HS256Signer {}),
                config.session.signing_secret.clone(),
                HmacJwtParams {
                    leeway: config.session.leeway,
                },
            ));

        let token_service = Arc::new(TokenService::new(
            identity_verifier,
            session_token_provider,
        ));

        let feedback_service = FeedbackService::new(
            token_service.clone(),
            feedback_storage,
            config.storage.timeout,
        );

        Self {
            token_service,
            feedback_service,
        }
    }
}
