//! Storage ports.
//!
//! [`Repository`] is the capability set every stored entity gets (read, add,
//! update, soft-delete, exists). Backends implement the small set of required
//! primitives; timestamp stamping and soft-delete are provided here so every
//! backend behaves the same. [`FeedbackRepository`] adds the feedback-specific
//! filtered queries.
//!
//! No optimistic concurrency: concurrent writes to one id are last-writer-wins.

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

use feedback_core::BaseEntity;

use crate::feedback::{FeedbackEntity, FeedbackStatus};

/// Repository operation error (infrastructure faults only; "not found" is `None`/`false`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The store could not be reached (pool closed, lock poisoned, network).
    #[error("storage unavailable: {0}")]
    Connection(String),

    /// A query or mutation failed while executing.
    #[error("query failed: {0}")]
    Query(String),

    /// A stored row could not be turned back into an entity.
    #[error("invalid stored record: {0}")]
    Decode(String),
}

/// Generic persistence capability set for a [`BaseEntity`].
///
/// Every read excludes soft-deleted records.
#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: BaseEntity + Clone + Send + Sync + 'static,
{
    /// Live entity with this id, if any.
    async fn get_by_id(&self, id: E::Id) -> Result<Option<E>, RepositoryError>;

    /// All live entities, in store-default order.
    async fn get_all(&self) -> Result<Vec<E>, RepositoryError>;

    /// Whether a live entity with this id is stored.
    async fn exists(&self, id: E::Id) -> Result<bool, RepositoryError>;

    /// Backend primitive: store a new record exactly as given.
    async fn insert(&self, entity: E) -> Result<E, RepositoryError>;

    /// Backend primitive: overwrite the full stored state of an existing record.
    async fn save(&self, entity: &E) -> Result<(), RepositoryError>;

    /// Stamp `created_at` and persist a new entity.
    async fn add(&self, entity: E) -> Result<E, RepositoryError> {
        let mut entity = entity;
        entity.meta_mut().created_at = Utc::now();
        self.insert(entity).await
    }

    /// Stamp `updated_at` and persist the entity's full state.
    async fn update(&self, entity: &mut E) -> Result<(), RepositoryError> {
        entity.meta_mut().touch(Utc::now());
        self.save(entity).await
    }

    /// Soft delete. Absent (or already deleted) ids are a no-op.
    async fn delete(&self, id: E::Id) -> Result<(), RepositoryError> {
        let Some(mut entity) = self.get_by_id(id).await? else {
            return Ok(());
        };
        entity.meta_mut().mark_deleted(Utc::now());
        self.update(&mut entity).await
    }
}

/// Feedback-specific queries. All exclude soft-deleted rows and return the
/// most recently submitted feedback first.
#[async_trait]
pub trait FeedbackRepository: Repository<FeedbackEntity> {
    async fn get_by_status(
        &self,
        status: FeedbackStatus,
    ) -> Result<Vec<FeedbackEntity>, RepositoryError>;

    async fn get_by_rating(&self, rating: i32) -> Result<Vec<FeedbackEntity>, RepositoryError>;

    /// Exact category match.
    async fn get_by_category(&self, category: &str)
    -> Result<Vec<FeedbackEntity>, RepositoryError>;

    /// The `count` most recently submitted records.
    async fn get_recent_feedback(
        &self,
        count: usize,
    ) -> Result<Vec<FeedbackEntity>, RepositoryError>;
}
