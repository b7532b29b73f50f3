//! Postgres-backed feedback repository.
//!
//! Maps the `feedbacks` table (see `migrations/`) to [`FeedbackEntity`].
//! Every read filters `is_deleted = FALSE`; soft-delete is an ordinary
//! `UPDATE` through [`Repository::save`].
//!
//! ## Error Mapping
//!
//! | SQLx Error | RepositoryError |
//! |------------|-----------------|
//! | `Database` (any code) | `Query` |
//! | `PoolClosed`, `PoolTimedOut`, `Io`, `Tls` | `Connection` |
//! | `ColumnDecode`, `Decode`, `ColumnNotFound` | `Decode` |
//! | anything else | `Query` |

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use feedback_core::{EntityMeta, FeedbackId};
use feedback_domain::{
    FeedbackEntity, FeedbackRepository, FeedbackStatus, Repository, RepositoryError,
};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        customer_name,
        email,
        phone_number,
        rating,
        comments,
        category,
        status,
        submitted_at,
        created_at,
        updated_at,
        is_deleted
    FROM feedbacks
"#;

/// Postgres-backed repository for [`FeedbackEntity`].
///
/// Uses the SQLx connection pool (thread-safe, shared across requests). Each
/// method is a single round trip; no transaction spans multiple records.
#[derive(Debug, Clone)]
pub struct PostgresFeedbackRepository {
    pool: Arc<PgPool>,
}

impl PostgresFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    async fn fetch_live(
        &self,
        operation: &str,
        filter_and_order: &str,
        bind: QueryArg<'_>,
    ) -> Result<Vec<FeedbackEntity>, RepositoryError> {
        let sql = format!("{SELECT_COLUMNS} WHERE is_deleted = FALSE {filter_and_order}");
        let query = sqlx::query(&sql);
        let query = match bind {
            QueryArg::None => query,
            QueryArg::Int(v) => query.bind(v),
            QueryArg::SmallInt(v) => query.bind(v),
            QueryArg::BigInt(v) => query.bind(v),
            QueryArg::Text(v) => query.bind(v),
        };

        let rows = query
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;

        rows.iter()
            .map(|row| {
                let row = FeedbackRow::from_row(row).map_err(|e| map_sqlx_error(operation, e))?;
                FeedbackEntity::try_from(row)
            })
            .collect()
    }
}

/// Single bind parameter for the filtered list queries.
enum QueryArg<'a> {
    None,
    Int(i32),
    SmallInt(i16),
    BigInt(i64),
    Text(&'a str),
}

#[async_trait]
impl Repository<FeedbackEntity> for PostgresFeedbackRepository {
    #[instrument(skip(self), fields(feedback_id = %id), err)]
    async fn get_by_id(&self, id: FeedbackId) -> Result<Option<FeedbackEntity>, RepositoryError> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = $1 AND is_deleted = FALSE");
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_by_id", e))?;

        match row {
            Some(row) => {
                let row = FeedbackRow::from_row(&row).map_err(|e| map_sqlx_error("get_by_id", e))?;
                Ok(Some(row.try_into()?))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self), err)]
    async fn get_all(&self) -> Result<Vec<FeedbackEntity>, RepositoryError> {
        self.fetch_live("get_all", "", QueryArg::None).await
    }

    #[instrument(skip(self), fields(feedback_id = %id), err)]
    async fn exists(&self, id: FeedbackId) -> Result<bool, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM feedbacks WHERE id = $1 AND is_deleted = FALSE
            ) AS present
            "#,
        )
        .bind(id.as_uuid())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("exists", e))?;

        row.try_get::<bool, _>("present")
            .map_err(|e| map_sqlx_error("exists", e))
    }

    #[instrument(skip(self, entity), fields(feedback_id = %entity.id), err)]
    async fn insert(&self, entity: FeedbackEntity) -> Result<FeedbackEntity, RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO feedbacks (
                id,
                customer_name,
                email,
                phone_number,
                rating,
                comments,
                category,
                status,
                submitted_at,
                created_at,
                updated_at,
                is_deleted
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(entity.id.as_uuid())
        .bind(&entity.customer_name)
        .bind(&entity.email)
        .bind(&entity.phone_number)
        .bind(entity.rating)
        .bind(&entity.comments)
        .bind(&entity.category)
        .bind(entity.status.as_i16())
        .bind(entity.submitted_at)
        .bind(entity.meta.created_at)
        .bind(entity.meta.updated_at)
        .bind(entity.meta.is_deleted)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(entity)
    }

    #[instrument(skip(self, entity), fields(feedback_id = %entity.id), err)]
    async fn save(&self, entity: &FeedbackEntity) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE feedbacks SET
                customer_name = $2,
                email = $3,
                phone_number = $4,
                rating = $5,
                comments = $6,
                category = $7,
                status = $8,
                submitted_at = $9,
                updated_at = $10,
                is_deleted = $11
            WHERE id = $1
            "#,
        )
        .bind(entity.id.as_uuid())
        .bind(&entity.customer_name)
        .bind(&entity.email)
        .bind(&entity.phone_number)
        .bind(entity.rating)
        .bind(&entity.comments)
        .bind(&entity.category)
        .bind(entity.status.as_i16())
        .bind(entity.submitted_at)
        .bind(entity.meta.updated_at)
        .bind(entity.meta.is_deleted)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("save", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Query(format!(
                "no stored record with id {}",
                entity.id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl FeedbackRepository for PostgresFeedbackRepository {
    #[instrument(skip(self), err)]
    async fn get_by_status(
        &self,
        status: FeedbackStatus,
    ) -> Result<Vec<FeedbackEntity>, RepositoryError> {
        self.fetch_live(
            "get_by_status",
            "AND status = $1 ORDER BY submitted_at DESC",
            QueryArg::SmallInt(status.as_i16()),
        )
        .await
    }

    #[instrument(skip(self), err)]
    async fn get_by_rating(&self, rating: i32) -> Result<Vec<FeedbackEntity>, RepositoryError> {
        self.fetch_live(
            "get_by_rating",
            "AND rating = $1 ORDER BY submitted_at DESC",
            QueryArg::Int(rating),
        )
        .await
    }

    #[instrument(skip(self), err)]
    async fn get_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<FeedbackEntity>, RepositoryError> {
        self.fetch_live(
            "get_by_category",
            "AND category = $1 ORDER BY submitted_at DESC",
            QueryArg::Text(category),
        )
        .await
    }

    #[instrument(skip(self), err)]
    async fn get_recent_feedback(
        &self,
        count: usize,
    ) -> Result<Vec<FeedbackEntity>, RepositoryError> {
        let limit = i64::try_from(count).unwrap_or(i64::MAX);
        self.fetch_live(
            "get_recent_feedback",
            "ORDER BY submitted_at DESC LIMIT $1",
            QueryArg::BigInt(limit),
        )
        .await
    }
}

/// Raw `feedbacks` row.
#[derive(Debug)]
struct FeedbackRow {
    id: Uuid,
    customer_name: String,
    email: Option<String>,
    phone_number: Option<String>,
    rating: i32,
    comments: Option<String>,
    category: Option<String>,
    status: i16,
    submitted_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    is_deleted: bool,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for FeedbackRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(FeedbackRow {
            id: row.try_get("id")?,
            customer_name: row.try_get("customer_name")?,
            email: row.try_get("email")?,
            phone_number: row.try_get("phone_number")?,
            rating: row.try_get("rating")?,
            comments: row.try_get("comments")?,
            category: row.try_get("category")?,
            status: row.try_get("status")?,
            submitted_at: row.try_get("submitted_at")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            is_deleted: row.try_get("is_deleted")?,
        })
    }
}

impl TryFrom<FeedbackRow> for FeedbackEntity {
    type Error = RepositoryError;

    fn try_from(row: FeedbackRow) -> Result<Self, Self::Error> {
        let status = FeedbackStatus::try_from(row.status)
            .map_err(|e| RepositoryError::Decode(format!("feedback {}: {e}", row.id)))?;

        Ok(FeedbackEntity {
            id: FeedbackId::from_uuid(row.id),
            customer_name: row.customer_name,
            email: row.email,
            phone_number: row.phone_number,
            rating: row.rating,
            comments: row.comments,
            category: row.category,
            status,
            submitted_at: row.submitted_at,
            meta: EntityMeta {
                created_at: row.created_at,
                updated_at: row.updated_at,
                is_deleted: row.is_deleted,
            },
        })
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => RepositoryError::Query(format!(
            "database error in {}: {}",
            operation,
            db_err.message()
        )),
        sqlx::Error::PoolClosed => {
            RepositoryError::Connection(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            RepositoryError::Connection(format!("timed out acquiring connection in {operation}"))
        }
        sqlx::Error::Io(e) => RepositoryError::Connection(format!("io error in {operation}: {e}")),
        sqlx::Error::Tls(e) => {
            RepositoryError::Connection(format!("tls error in {operation}: {e}"))
        }
        e @ (sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_)) => {
            RepositoryError::Decode(format!("failed to read row in {operation}: {e}"))
        }
        other => RepositoryError::Query(format!("sqlx error in {operation}: {other}")),
    }
}
