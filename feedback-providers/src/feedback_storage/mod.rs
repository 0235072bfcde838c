//! Persistence of feedback records keyed by session token.
//!
//! At most one record exists per exact token value. Resubmitting under the
//! same token replaces the user content of that record in a single atomic
//! store operation; identifier, creation date and token never change.

use crate::common_models::{
    feedback::{Feedback, FeedbackContent},
    session::SessionToken,
};
use crate::feedback_storage::error::FeedbackStorageError;

pub mod error;
pub mod imp;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait FeedbackStorage: Send + Sync {
    /// Creates the record for `session_token` or replaces its content.
    async fn upsert(
        &self,
        session_token: &SessionToken,
        content: FeedbackContent,
    ) -> Result<Feedback, FeedbackStorageError>;

    async fn get_by_token(
        &self,
        session_token: &SessionToken,
    ) -> Result<Option<Feedback>, FeedbackStorageError>;

    async fn count(&self) -> Result<u64, FeedbackStorageError>;
}
