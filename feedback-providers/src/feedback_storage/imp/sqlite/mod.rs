//! SQLite-backed feedback storage.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use time::OffsetDateTime;
use tracing::{debug, info};

use self::model::FeedbackRow;
use crate::common_models::{
    feedback::{Feedback, FeedbackContent, FeedbackId},
    session::SessionToken,
};
use crate::feedback_storage::{error::FeedbackStorageError, FeedbackStorage};

mod model;


#[derive(Debug, Clone)]
pub struct SqliteFeedbackStorage {
    pool: SqlitePool,
}

impl SqliteFeedbackStorage {
    /// Opens (or creates) the database at `database_url` and applies pending migrations.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, FeedbackStorageError> {
        info!("Opening feedback database: {database_url}");

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| FeedbackStorageError::Connection(e.to_string()))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .pragma("synchronous", "NORMAL");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| FeedbackStorageError::Connection(e.to_string()))?;

        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Opens a private in-memory database.
    pub async fn open_in_memory() -> Result<Self, FeedbackStorageError> {
        let options = SqliteConnectOptions::new().filename(":memory:");

        // every connection to :memory: is a separate database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| FeedbackStorageError::Connection(e.to_string()))?;

        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<(), FeedbackStorageError> {
        debug!("Running feedback database migrations");

        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| FeedbackStorageError::Migration(e.to_string()))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl FeedbackStorage for SqliteFeedbackStorage {
    async fn upsert(
        &self,
        session_token: &SessionToken,
        content: FeedbackContent,
    ) -> Result<Feedback, FeedbackStorageError> {
        let metadata = serde_json::to_string(&content.metadata)
            .map_err(|e| FeedbackStorageError::MappingError(e.to_string()))?;

        let row: FeedbackRow = sqlx::query_as(
            r#"
            INSERT INTO feedbacks (id, created_date, session_token, rating, rating_comment, metadata)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(session_token) DO UPDATE SET
                rating = excluded.rating,
                rating_comment = excluded.rating_comment,
                metadata = excluded.metadata
            RETURNING id, created_date, session_token, rating, rating_comment, metadata
            "#,
        )
        .bind(FeedbackId::new_v4().to_string())
        .bind(OffsetDateTime::now_utc())
        .bind(session_token.as_str())
        .bind(content.rating)
        .bind(content.rating_comment)
        .bind(metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| FeedbackStorageError::Upsert(e.to_string()))?;

        row.try_into()
    }

    async fn get_by_token(
        &self,
        session_token: &SessionToken,
    ) -> Result<Option<Feedback>, FeedbackStorageError> {
        let row: Option<FeedbackRow> = sqlx::query_as(
            r#"
            SELECT id, created_date, session_token, rating, rating_comment, metadata
            FROM feedbacks WHERE session_token = ?
            "#,
        )
        .bind(session_token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FeedbackStorageError::GetByToken(e.to_string()))?;

        row.map(Feedback::try_from).transpose()
    }

    async fn count(&self) -> Result<u64, FeedbackStorageError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM feedbacks")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| FeedbackStorageError::Count(e.to_string()))?;

        Ok(count as u64)
    }
}
