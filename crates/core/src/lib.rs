//! `feedback-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the entity traits shared by every persisted record, and the
//! domain error model.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{BaseEntity, Entity, EntityMeta};
pub use error::{DomainError, DomainResult};
pub use id::FeedbackId;
