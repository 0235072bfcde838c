use std::collections::HashMap;

use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::common_models::feedback::{Feedback, FeedbackContent};
use crate::feedback_storage::error::FeedbackStorageError;

#[derive(Debug, FromRow)]
pub(super) struct FeedbackRow {
    pub id: String,
    pub created_date: OffsetDateTime,
    pub session_token: String,
    pub rating: i32,
    pub rating_comment: String,
    pub metadata: String,
}

impl TryFrom<FeedbackRow> for Feedback {
    type Error = FeedbackStorageError;

    fn try_from(value: FeedbackRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&value.id)
            .map_err(|e| FeedbackStorageError::MappingError(e.to_string()))?;
        let metadata: HashMap<String, serde_json::Value> = serde_json::from_str(&value.metadata)
            .map_err(|e| FeedbackStorageError::MappingError(e.to_string()))?;

        Ok(Feedback {
            id: id.into(),
            created_date: value.created_date,
            session_token: value.session_token.into(),
            content: FeedbackContent {
                rating: value.rating,
                rating_comment: value.rating_comment,
                metadata,
            },
        })
    }
}
