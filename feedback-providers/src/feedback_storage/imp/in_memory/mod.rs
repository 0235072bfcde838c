use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::common_models::{
    feedback::{Feedback, FeedbackContent, FeedbackId},
    session::SessionToken,
};
use crate::feedback_storage::{error::FeedbackStorageError, FeedbackStorage};


#[derive(Default)]
pub struct InMemoryFeedbackStorage {
    storage: Arc<Mutex<HashMap<SessionToken, Feedback>>>,
}

#[async_trait]
impl FeedbackStorage for InMemoryFeedbackStorage {
    async fn upsert(
        &self,
        session_token: &SessionToken,
        content: FeedbackContent,
    ) -> Result<Feedback, FeedbackStorageError> {
        let mut hash_map_handle = self.storage.lock().await;

        let feedback = hash_map_handle
            .entry(session_token.to_owned())
            .and_modify(|existing| existing.content = content.clone())
            .or_insert_with(|| Feedback {
                id: FeedbackId::new_v4(),
                created_date: OffsetDateTime::now_utc(),
                session_token: session_token.to_owned(),
                content,
            });

        Ok(feedback.to_owned())
    }

    async fn get_by_token(
        &self,
        session_token: &SessionToken,
    ) -> Result<Option<Feedback>, FeedbackStorageError> {
        let hash_map_handle = self.storage.lock().await;

        Ok(hash_map_handle.get(session_token).map(|v| v.to_owned()))
    }

    async fn count(&self) -> Result<u64, FeedbackStorageError> {
        let hash_map_handle = self.storage.lock().await;

        Ok(hash_map_handle.len() as u64)
    }
}
