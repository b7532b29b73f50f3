//! Infrastructure layer: storage backends, database wiring, runtime configuration.

pub mod config;
pub mod db;
pub mod repository;


use std::sync::Arc;

use feedback_domain::{FeedbackRepository, RepositoryError};

use crate::config::StorageConfig;
use crate::repository::{InMemoryRepository, PostgresFeedbackRepository};

/// Build the feedback repository selected by configuration.
///
/// For Postgres this connects the pool and applies pending migrations first.
pub async fn build_feedback_repository(
    storage: &StorageConfig,
) -> Result<Arc<dyn FeedbackRepository>, RepositoryError> {
    match storage {
        StorageConfig::InMemory => {
            tracing::info!("using in-memory feedback store");
            Ok(Arc::new(InMemoryRepository::new()))
        }
        StorageConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = db::connect(database_url, *max_connections).await?;
            db::migrate(&pool).await?;
            tracing::info!("using postgres feedback store");
            Ok(Arc::new(PostgresFeedbackRepository::new(pool)))
        }
    }
}
