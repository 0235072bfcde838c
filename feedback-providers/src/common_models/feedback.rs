use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::common_models::{
    macros::{impl_display, impl_from, impl_into},
    session::SessionToken,
};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackId(Uuid);
impl_display!(FeedbackId);
impl_from!(FeedbackId; Uuid);
impl_into!(FeedbackId; Uuid);

impl FeedbackId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

/// User-provided part of a feedback record, replaced as a whole on resubmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackContent {
    pub rating: i32,
    pub rating_comment: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Stored feedback. `session_token` is the unique natural key.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub id: FeedbackId,
    pub created_date: OffsetDateTime,
    pub session_token: SessionToken,
    pub content: FeedbackContent,
}
