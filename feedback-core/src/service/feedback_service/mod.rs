use std::sync::Arc;
use std::time::Duration;

use feedback_providers::{
    common_models::{
        feedback::{Feedback, FeedbackContent},
        session::SessionToken,
    },
    feedback_storage::FeedbackStorage,
};
use tracing::{debug, error};

use super::{error::ServiceError, token_service::TokenService};


pub struct FeedbackService {
    token_service: Arc<TokenService>,
    feedback_storage: Arc<dyn FeedbackStorage>,
    store_timeout: Duration,
}

impl FeedbackService {
    pub fn new(
        token_service: Arc<TokenService>,
        feedback_storage: Arc<dyn FeedbackStorage>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            token_service,
            feedback_storage,
            store_timeout,
        }
    }

    /// Stores feedback under the session token presented in `authorization`.
    ///
    /// A second submission under the same token replaces rating, comment and
    /// metadata of the existing record.
    pub async fn submit(
        &self,
        authorization: &str,
        content: FeedbackContent,
    ) -> Result<Feedback, ServiceError> {
        let session_token = self.token_service.authorize(authorization)?;

        self.store(session_token, content).await
    }

    /// Like [`Self::submit`], taking the raw JSON body.
    ///
    /// The token is checked before the body is parsed.
    pub async fn submit_json(
        &self,
        authorization: &str,
        body: &[u8],
    ) -> Result<Feedback, ServiceError> {
        let session_token = self.token_service.authorize(authorization)?;

        let content: FeedbackContent = serde_json::from_slice(body).map_err(|e| {
            debug!("Invalid feedback body: {e}");
            ServiceError::InvalidFeedback(e.to_string())
        })?;

        self.store(session_token, content).await
    }

    async fn store(
        &self,
        session_token: SessionToken,
        content: FeedbackContent,
    ) -> Result<Feedback, ServiceError> {
        let result = match tokio::time::timeout(
            self.store_timeout,
            self.feedback_storage.upsert(&session_token, content),
        )
        .await
        {
            Ok(result) => result.map_err(ServiceError::from),
            Err(_) => Err(ServiceError::PersistenceFailure(
                "store timeout elapsed".to_owned(),
            )),
        };

        let feedback = result.inspect_err(|e| error!("Could not store feedback: {e}"))?;

        debug!(id = %feedback.id, rating = feedback.content.rating, "Stored feedback");

        Ok(feedback)
    }
}
