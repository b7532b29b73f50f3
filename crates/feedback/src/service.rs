//! Feedback service: the business-rule boundary.
//!
//! Validates input, maps DTOs to entities and back, and turns every repository
//! fault into a [`Failure`] so callers only ever see a [`ServiceResult`].

use std::sync::Arc;

use chrono::Utc;

use feedback_core::{EntityMeta, FeedbackId};

use crate::dto::{CreateFeedbackDto, FeedbackDto, UpdateFeedbackDto};
use crate::feedback::{
    CATEGORY_MAX_LEN, COMMENTS_MAX_LEN, CUSTOMER_NAME_MAX_LEN, EMAIL_MAX_LEN, FeedbackEntity,
    FeedbackStatus, PHONE_NUMBER_MAX_LEN, RATING_OUT_OF_RANGE, RATING_RANGE, too_long,
    validate_rating,
};
use crate::repository::{FeedbackRepository, RepositoryError};
use crate::result::{Failure, FailureKind, ServiceResult};

/// Upper bound applied to `get_recent_feedback` counts.
pub const MAX_RECENT_FEEDBACK: i64 = 1000;

pub const CUSTOMER_NAME_REQUIRED: &str = "Customer name is required";
pub const CATEGORY_REQUIRED: &str = "Category is required";

#[derive(Clone)]
pub struct FeedbackService {
    repo: Arc<dyn FeedbackRepository>,
}

impl FeedbackService {
    pub fn new(repo: Arc<dyn FeedbackRepository>) -> Self {
        Self { repo }
    }

    /// Validate and store a new submission. Status starts as `Pending`.
    pub async fn create(&self, dto: CreateFeedbackDto) -> ServiceResult<FeedbackDto> {
        validate_submission(&dto)?;

        let now = Utc::now();
        let entity = FeedbackEntity {
            id: FeedbackId::new(),
            customer_name: dto.customer_name,
            email: dto.email,
            phone_number: dto.phone_number,
            rating: dto.rating,
            comments: dto.comments,
            category: dto.category,
            status: FeedbackStatus::Pending,
            submitted_at: now,
            meta: EntityMeta::new(now),
        };

        let created = self
            .repo
            .add(entity)
            .await
            .map_err(|e| persistence_failure("creating", e))?;

        tracing::debug!(feedback_id = %created.id, "feedback created");
        Ok(created.into())
    }

    pub async fn get_by_id(&self, id: FeedbackId) -> ServiceResult<FeedbackDto> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| persistence_failure("retrieving", e))?
            .map(FeedbackDto::from)
            .ok_or_else(Failure::not_found)
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<FeedbackDto>> {
        let entities = self
            .repo
            .get_all()
            .await
            .map_err(|e| persistence_failure("retrieving", e))?;
        Ok(to_dtos(entities))
    }

    /// Apply the fields present in `dto`. Status is never changed here.
    pub async fn update(&self, dto: UpdateFeedbackDto) -> ServiceResult<FeedbackDto> {
        let mut entity = self
            .repo
            .get_by_id(dto.id)
            .await
            .map_err(|e| persistence_failure("updating", e))?
            .ok_or_else(Failure::not_found)?;

        validate_update(&dto)?;

        if let Some(comments) = dto.comments {
            entity.comments = Some(comments);
        }

        if let Some(rating) = dto.rating {
            entity.rating = rating;
        }

        if let Some(category) = dto.category {
            entity.category = Some(category);
        }

        self.repo
            .update(&mut entity)
            .await
            .map_err(|e| persistence_failure("updating", e))?;

        Ok(entity.into())
    }

    /// Soft-delete. Fails with `NotFound` unless a live record exists.
    pub async fn delete(&self, id: FeedbackId) -> ServiceResult<bool> {
        let exists = self
            .repo
            .exists(id)
            .await
            .map_err(|e| persistence_failure("deleting", e))?;

        if !exists {
            return Err(Failure::not_found());
        }

        self.repo
            .delete(id)
            .await
            .map_err(|e| persistence_failure("deleting", e))?;

        Ok(true)
    }

    pub async fn get_by_rating(&self, rating: i32) -> ServiceResult<Vec<FeedbackDto>> {
        let rating = validate_rating(rating)?;
        let entities = self
            .repo
            .get_by_rating(rating)
            .await
            .map_err(|e| persistence_failure("retrieving", e))?;
        Ok(to_dtos(entities))
    }

    /// Most recent feedback first. `count` is clamped into
    /// `0..=MAX_RECENT_FEEDBACK`; zero or negative counts give an empty list.
    pub async fn get_recent_feedback(&self, count: i64) -> ServiceResult<Vec<FeedbackDto>> {
        let count = clamp_recent_count(count);
        let entities = self
            .repo
            .get_recent_feedback(count)
            .await
            .map_err(|e| persistence_failure("retrieving", e))?;
        Ok(to_dtos(entities))
    }

    pub async fn get_by_status(&self, status: FeedbackStatus) -> ServiceResult<Vec<FeedbackDto>> {
        let entities = self
            .repo
            .get_by_status(status)
            .await
            .map_err(|e| persistence_failure("retrieving", e))?;
        Ok(to_dtos(entities))
    }

    pub async fn get_by_category(&self, category: &str) -> ServiceResult<Vec<FeedbackDto>> {
        if category.trim().is_empty() {
            return Err(Failure::validation(CATEGORY_REQUIRED));
        }
        let entities = self
            .repo
            .get_by_category(category)
            .await
            .map_err(|e| persistence_failure("retrieving", e))?;
        Ok(to_dtos(entities))
    }
}

/// Collects every problem with a submission, in field order.
fn validate_submission(dto: &CreateFeedbackDto) -> ServiceResult<()> {
    let mut errors = Vec::new();

    if dto.customer_name.trim().is_empty() {
        errors.push(CUSTOMER_NAME_REQUIRED.to_string());
    }

    errors.extend(too_long("Customer name", &dto.customer_name, CUSTOMER_NAME_MAX_LEN));
    errors.extend(optional_too_long("Email", &dto.email, EMAIL_MAX_LEN));
    errors.extend(optional_too_long("Phone number", &dto.phone_number, PHONE_NUMBER_MAX_LEN));

    if !RATING_RANGE.contains(&dto.rating) {
        errors.push(RATING_OUT_OF_RANGE.to_string());
    }

    errors.extend(optional_too_long("Comments", &dto.comments, COMMENTS_MAX_LEN));
    errors.extend(optional_too_long("Category", &dto.category, CATEGORY_MAX_LEN));

    into_validation(errors)
}

/// Same rules as a submission, for the fields an update carries.
fn validate_update(dto: &UpdateFeedbackDto) -> ServiceResult<()> {
    let mut errors = Vec::new();

    errors.extend(optional_too_long("Comments", &dto.comments, COMMENTS_MAX_LEN));

    if dto.rating.is_some_and(|r| !RATING_RANGE.contains(&r)) {
        errors.push(RATING_OUT_OF_RANGE.to_string());
    }

    errors.extend(optional_too_long("Category", &dto.category, CATEGORY_MAX_LEN));

    into_validation(errors)
}

fn optional_too_long(label: &str, value: &Option<String>, max: usize) -> Option<String> {
    value.as_deref().and_then(|v| too_long(label, v, max))
}

fn into_validation(errors: Vec<String>) -> ServiceResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Failure::from_errors(FailureKind::Validation, errors))
    }
}

fn clamp_recent_count(count: i64) -> usize {
    usize::try_from(count.clamp(0, MAX_RECENT_FEEDBACK)).unwrap_or(0)
}

fn to_dtos(entities: Vec<FeedbackEntity>) -> Vec<FeedbackDto> {
    entities.into_iter().map(FeedbackDto::from).collect()
}

fn persistence_failure(verb: &str, err: RepositoryError) -> Failure {
    tracing::warn!(operation = verb, error = %err, "feedback repository call failed");
    Failure::persistence(format!("Error {verb} feedback: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn submission(name: &str, rating: i32) -> CreateFeedbackDto {
        CreateFeedbackDto {
            customer_name: name.to_string(),
            rating,
            ..Default::default()
        }
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = validate_submission(&submission("   ", 3)).unwrap_err();
        assert_eq!(err.kind, FailureKind::Validation);
        assert_eq!(err.message, CUSTOMER_NAME_REQUIRED);
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let err = validate_submission(&submission("Bob", 7)).unwrap_err();
        assert_eq!(err.message, RATING_OUT_OF_RANGE);
    }

    #[test]
    fn all_problems_are_reported_together() {
        let err = validate_submission(&submission("", 0)).unwrap_err();
        assert_eq!(
            err.errors,
            vec![CUSTOMER_NAME_REQUIRED.to_string(), RATING_OUT_OF_RANGE.to_string()]
        );
    }

    #[test]
    fn overlong_submission_fields_are_rejected() {
        let dto = CreateFeedbackDto {
            customer_name: "x".repeat(CUSTOMER_NAME_MAX_LEN + 1),
            phone_number: Some("5".repeat(PHONE_NUMBER_MAX_LEN + 1)),
            comments: Some("m".repeat(COMMENTS_MAX_LEN)),
            category: Some("c".repeat(CATEGORY_MAX_LEN + 1)),
            rating: 3,
            ..Default::default()
        };
        let err = validate_submission(&dto).unwrap_err();
        assert_eq!(err.kind, FailureKind::Validation);
        assert_eq!(
            err.errors,
            vec![
                "Customer name must be at most 200 characters".to_string(),
                "Phone number must be at most 20 characters".to_string(),
                "Category must be at most 50 characters".to_string(),
            ]
        );
    }

    #[test]
    fn update_checks_only_supplied_fields() {
        let mut dto = UpdateFeedbackDto::new(FeedbackId::new());
        assert!(validate_update(&dto).is_ok());

        dto.comments = Some("m".repeat(COMMENTS_MAX_LEN + 1));
        dto.rating = Some(0);
        let err = validate_update(&dto).unwrap_err();
        assert_eq!(
            err.errors,
            vec![
                "Comments must be at most 1000 characters".to_string(),
                RATING_OUT_OF_RANGE.to_string(),
            ]
        );
    }

    #[test]
    fn recent_count_is_clamped() {
        assert_eq!(clamp_recent_count(-5), 0);
        assert_eq!(clamp_recent_count(0), 0);
        assert_eq!(clamp_recent_count(10), 10);
        assert_eq!(clamp_recent_count(i64::MAX), MAX_RECENT_FEEDBACK as usize);
    }

    #[test]
    fn persistence_failure_names_the_operation() {
        let f = persistence_failure("creating", RepositoryError::Query("boom".into()));
        assert_eq!(f.kind, FailureKind::Persistence);
        assert_eq!(f.message, "Error creating feedback: query failed: boom");
    }

    proptest! {
        /// Property: a submission with a non-blank name validates iff 1 <= rating <= 5.
        #[test]
        fn submission_valid_iff_rating_in_range(rating in -100i32..100i32) {
            let res = validate_submission(&submission("Alice", rating));
            prop_assert_eq!(res.is_ok(), (1..=5).contains(&rating));
        }
    }
}
