//! `feedback-domain`: customer feedback records and the business rules around them.
//!
//! - `feedback.rs`: the persisted entity and its status enum
//! - `dto.rs`: wire shapes accepted and returned by the service
//! - `result.rs`: the success/failure envelope every service call returns
//! - `repository.rs`: storage ports (generic + feedback-specific queries)
//! - `service.rs`: validation, mapping and orchestration

pub mod dto;
pub mod feedback;
pub mod repository;
pub mod result;
pub mod service;

pub use dto::{CreateFeedbackDto, FeedbackDto, UpdateFeedbackDto};
pub use feedback::{
    CATEGORY_MAX_LEN, COMMENTS_MAX_LEN, CUSTOMER_NAME_MAX_LEN, EMAIL_MAX_LEN, FeedbackEntity,
    FeedbackStatus, PHONE_NUMBER_MAX_LEN, RATING_RANGE, validate_rating,
};
pub use repository::{FeedbackRepository, Repository, RepositoryError};
pub use result::{Failure, FailureKind, ServiceResult};
pub use service::{FeedbackService, MAX_RECENT_FEEDBACK};
