//! Entity traits: identity + the audit/soft-delete metadata every stored record carries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display + Send + Sync;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Bookkeeping shared by every persisted entity.
///
/// `created_at` is stamped once when the repository first stores the record,
/// `updated_at` on every later write (soft-delete included). A record with
/// `is_deleted` set stays in storage but is invisible to all reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMeta {
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

impl EntityMeta {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            updated_at: None,
            is_deleted: false,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }

    pub fn mark_deleted(&mut self, now: DateTime<Utc>) {
        self.is_deleted = true;
        self.updated_at = Some(now);
    }
}

/// An entity the generic repository can store: identity plus [`EntityMeta`].
pub trait BaseEntity: Entity {
    fn meta(&self) -> &EntityMeta;

    fn meta_mut(&mut self) -> &mut EntityMeta;

    fn is_deleted(&self) -> bool {
        self.meta().is_deleted
    }
}
