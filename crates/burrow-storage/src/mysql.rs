use async_trait::async_trait;
use burrow_core::repository::{ReadRepository, Repository, Result};
use burrow_core::{RecordId, StorageError, UrlRecord};
use jiff::Timestamp;
use sqlx::mysql::{MySqlPoolOptions, MySqlRow};
use sqlx::{MySqlPool, Row};
use std::time::Duration;
use tracing::info;
use typed_builder::TypedBuilder;

/// Connection pool settings for [`MySqlRepository::connect`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct MySqlSettings {
    #[builder(default = 10)]
    max_connections: u32,
    /// How long a request may wait for a free connection.
    #[builder(default = Duration::from_secs(5))]
    acquire_timeout: Duration,
}

/// MySQL implementation of the repository contract.
///
/// Record ids are assigned by the database through the `id` column default,
/// never by this process. Inserts read the new row back through
/// `LAST_INSERT_ID()` to learn the assigned id.
///
/// `original_url` is indexed but deliberately not unique: two concurrent
/// creates for the same URL may both insert.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str, settings: MySqlSettings) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Applies the bundled schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::Operation(format!("migration failed: {e}")))?;
        info!("mysql schema is up to date");
        Ok(())
    }
}

fn now_unix_seconds() -> i64 {
    Timestamp::now().as_second()
}

fn row_to_record(row: &MySqlRow) -> Result<UrlRecord> {
    let id: String = row.try_get("id").map_err(map_sqlx_error)?;
    let original_url: String = row.try_get("original_url").map_err(map_sqlx_error)?;
    let id = RecordId::parse(id).map_err(|e| StorageError::InvalidData(e.to_string()))?;

    Ok(UrlRecord { id, original_url })
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn find_by_id(&self, id: &RecordId) -> Result<Option<UrlRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, original_url
            FROM short_urls
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<UrlRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, original_url
            FROM short_urls
            WHERE original_url = ?
            ORDER BY seq
            LIMIT 1
            "#,
        )
        .bind(original_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_record).transpose()
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, original_url: &str) -> Result<UrlRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO short_urls (original_url, created_at)
            VALUES (?, ?)
            "#,
        )
        .bind(original_url)
        .bind(now_unix_seconds())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let seq = result.last_insert_id();

        let row = sqlx::query(
            r#"
            SELECT id, original_url
            FROM short_urls
            WHERE seq = ?
            "#,
        )
        .bind(seq)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        match row {
            Some(row) => row_to_record(&row),
            None => Err(StorageError::InvalidData(format!(
                "inserted row {} could not be read back",
                seq
            ))),
        }
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
