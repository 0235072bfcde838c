use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum FeedbackStorageError {
    #[error("Connection error: `{0}`")]
    Connection(String),
    #[error("Migration error: `{0}`")]
    Migration(String),
    #[error("Upsert error: `{0}`")]
    Upsert(String),
    #[error("Get by token error: `{0}`")]
    GetByToken(String),
    #[error("Count error: `{0}`")]
    Count(String),
    #[error("Mapping error: `{0}`")]
    MappingError(String),
}
