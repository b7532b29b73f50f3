use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use feedback_core::BaseEntity;
use feedback_domain::{
    FeedbackEntity, FeedbackRepository, FeedbackStatus, Repository, RepositoryError,
};

/// In-memory store for tests/dev.
///
/// Soft-deleted records stay in the map (flagged) exactly as they would in a
/// table; `get_all` returns live records in insertion order.
#[derive(Debug)]
pub struct InMemoryRepository<E: BaseEntity> {
    inner: RwLock<Rows<E>>,
}

#[derive(Debug)]
struct Rows<E: BaseEntity> {
    by_id: HashMap<E::Id, E>,
    order: Vec<E::Id>,
}

impl<E: BaseEntity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Rows {
                by_id: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Rows<E>>, RepositoryError> {
        self.inner
            .read()
            .map_err(|_| RepositoryError::Connection("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Rows<E>>, RepositoryError> {
        self.inner
            .write()
            .map_err(|_| RepositoryError::Connection("in-memory store lock poisoned".to_string()))
    }
}

impl<E: BaseEntity + Clone> InMemoryRepository<E> {
    /// Stored record regardless of its soft-delete flag.
    pub fn get_including_deleted(&self, id: &E::Id) -> Option<E> {
        self.inner.read().ok()?.by_id.get(id).cloned()
    }

    /// Live records matching `keep`, in insertion order.
    fn live_where(&self, keep: impl Fn(&E) -> bool) -> Result<Vec<E>, RepositoryError> {
        let rows = self.read()?;
        Ok(rows
            .order
            .iter()
            .filter_map(|id| rows.by_id.get(id))
            .filter(|e| !e.is_deleted() && keep(e))
            .cloned()
            .collect())
    }
}

impl<E: BaseEntity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E> Repository<E> for InMemoryRepository<E>
where
    E: BaseEntity + Clone + Send + Sync + 'static,
{
    async fn get_by_id(&self, id: E::Id) -> Result<Option<E>, RepositoryError> {
        let rows = self.read()?;
        Ok(rows.by_id.get(&id).filter(|e| !e.is_deleted()).cloned())
    }

    async fn get_all(&self) -> Result<Vec<E>, RepositoryError> {
        self.live_where(|_| true)
    }

    async fn exists(&self, id: E::Id) -> Result<bool, RepositoryError> {
        let rows = self.read()?;
        Ok(rows.by_id.get(&id).is_some_and(|e| !e.is_deleted()))
    }

    async fn insert(&self, entity: E) -> Result<E, RepositoryError> {
        let mut rows = self.write()?;
        let id = *entity.id();
        if rows.by_id.contains_key(&id) {
            return Err(RepositoryError::Query(format!("duplicate id {id}")));
        }
        rows.order.push(id);
        rows.by_id.insert(id, entity.clone());
        Ok(entity)
    }

    async fn save(&self, entity: &E) -> Result<(), RepositoryError> {
        let mut rows = self.write()?;
        match rows.by_id.get_mut(entity.id()) {
            Some(stored) => {
                *stored = entity.clone();
                Ok(())
            }
            None => Err(RepositoryError::Query(format!(
                "no stored record with id {}",
                entity.id()
            ))),
        }
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryRepository<FeedbackEntity> {
    async fn get_by_status(
        &self,
        status: FeedbackStatus,
    ) -> Result<Vec<FeedbackEntity>, RepositoryError> {
        self.live_where(|f| f.status == status).map(newest_first)
    }

    async fn get_by_rating(&self, rating: i32) -> Result<Vec<FeedbackEntity>, RepositoryError> {
        self.live_where(|f| f.rating == rating).map(newest_first)
    }

    async fn get_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<FeedbackEntity>, RepositoryError> {
        self.live_where(|f| f.category.as_deref() == Some(category))
            .map(newest_first)
    }

    async fn get_recent_feedback(
        &self,
        count: usize,
    ) -> Result<Vec<FeedbackEntity>, RepositoryError> {
        let mut all = newest_first(self.live_where(|_| true)?);
        all.truncate(count);
        Ok(all)
    }
}

fn newest_first(mut rows: Vec<FeedbackEntity>) -> Vec<FeedbackEntity> {
    rows.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use feedback_core::{EntityMeta, FeedbackId};

    fn feedback(rating: i32, category: &str, submitted_at: DateTime<Utc>) -> FeedbackEntity {
        FeedbackEntity {
            id: FeedbackId::new(),
            customer_name: "Test Customer".to_string(),
            email: None,
            phone_number: None,
            rating,
            comments: None,
            category: Some(category.to_string()),
            status: FeedbackStatus::Pending,
            submitted_at,
            meta: EntityMeta::new(submitted_at),
        }
    }

    #[tokio::test]
    async fn add_stamps_created_at_and_stores() {
        let repo = InMemoryRepository::new();
        let long_ago = Utc::now() - Duration::days(30);
        let entity = feedback(4, "Service", long_ago);

        let stored = repo.add(entity.clone()).await.unwrap();

        assert!(stored.meta.created_at > long_ago);
        assert_eq!(repo.get_by_id(entity.id).await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn update_stamps_updated_at() {
        let repo = InMemoryRepository::new();
        let mut stored = repo.add(feedback(3, "Product", Utc::now())).await.unwrap();
        assert_eq!(stored.meta.updated_at, None);

        stored.comments = Some("changed".to_string());
        repo.update(&mut stored).await.unwrap();

        let reloaded = repo.get_by_id(stored.id).await.unwrap().unwrap();
        assert!(reloaded.meta.updated_at.is_some());
        assert_eq!(reloaded.comments.as_deref(), Some("changed"));
    }

    #[tokio::test]
    async fn soft_delete_hides_but_keeps_the_row() {
        let repo = InMemoryRepository::new();
        let stored = repo.add(feedback(5, "Support", Utc::now())).await.unwrap();

        repo.delete(stored.id).await.unwrap();

        assert_eq!(repo.get_by_id(stored.id).await.unwrap(), None);
        assert!(!repo.exists(stored.id).await.unwrap());
        assert!(repo.get_all().await.unwrap().is_empty());
        assert!(repo.get_by_rating(5).await.unwrap().is_empty());

        let raw = repo.get_including_deleted(&stored.id).unwrap();
        assert!(raw.meta.is_deleted);
        assert!(raw.meta.updated_at.is_some());
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_a_noop() {
        let repo: InMemoryRepository<FeedbackEntity> = InMemoryRepository::new();
        repo.delete(FeedbackId::new()).await.unwrap();
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_of_unknown_record_fails() {
        let repo = InMemoryRepository::new();
        let err = repo.save(&feedback(2, "Service", Utc::now())).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));
    }

    #[tokio::test]
    async fn get_all_keeps_insertion_order() {
        let repo = InMemoryRepository::new();
        let now = Utc::now();
        let first = repo.add(feedback(1, "A", now)).await.unwrap();
        let second = repo.add(feedback(2, "B", now - Duration::hours(1))).await.unwrap();

        let ids: Vec<_> = repo.get_all().await.unwrap().into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn filtered_queries_are_newest_first() {
        let repo = InMemoryRepository::new();
        let now = Utc::now();
        let old = repo.add(feedback(4, "Service", now - Duration::hours(2))).await.unwrap();
        let new = repo.add(feedback(4, "Service", now)).await.unwrap();
        repo.add(feedback(2, "Product", now - Duration::hours(1))).await.unwrap();

        let by_rating: Vec<_> =
            repo.get_by_rating(4).await.unwrap().into_iter().map(|f| f.id).collect();
        assert_eq!(by_rating, vec![new.id, old.id]);

        let by_category = repo.get_by_category("Service").await.unwrap();
        assert_eq!(by_category.len(), 2);
        assert_eq!(by_category[0].id, new.id);

        assert!(repo.get_by_category("service").await.unwrap().is_empty());
        assert_eq!(repo.get_by_status(FeedbackStatus::Pending).await.unwrap().len(), 3);
        assert!(repo.get_by_status(FeedbackStatus::Closed).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recent_takes_the_newest_n() {
        let repo = InMemoryRepository::new();
        let now = Utc::now();
        for hours in [5, 1, 3, 2, 4] {
            repo.add(feedback(3, "Service", now - Duration::hours(hours))).await.unwrap();
        }

        let recent = repo.get_recent_feedback(3).await.unwrap();
        let ages: Vec<_> = recent.iter().map(|f| (now - f.submitted_at).num_hours()).collect();
        assert_eq!(ages, vec![1, 2, 3]);

        assert!(repo.get_recent_feedback(0).await.unwrap().is_empty());
        assert_eq!(repo.get_recent_feedback(100).await.unwrap().len(), 5);
    }
}
