use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use feedback_core::FeedbackId;

use crate::feedback::{FeedbackEntity, FeedbackStatus};

/// Payload for submitting new feedback.
///
/// Missing `customerName`/`rating` deserialize to their empty values so the
/// service reports them as validation failures instead of a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackDto {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Partial update: only fields that are present are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeedbackDto {
    pub id: FeedbackId,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
}

impl UpdateFeedbackDto {
    pub fn new(id: FeedbackId) -> Self {
        Self {
            id,
            comments: None,
            rating: None,
            category: None,
        }
    }
}

/// Feedback as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDto {
    pub id: FeedbackId,
    pub customer_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub rating: i32,
    pub comments: Option<String>,
    pub category: Option<String>,
    pub status: FeedbackStatus,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<FeedbackEntity> for FeedbackDto {
    fn from(entity: FeedbackEntity) -> Self {
        Self {
            id: entity.id,
            customer_name: entity.customer_name,
            email: entity.email,
            phone_number: entity.phone_number,
            rating: entity.rating,
            comments: entity.comments,
            category: entity.category,
            status: entity.status,
            submitted_at: entity.submitted_at,
            created_at: entity.meta.created_at,
            updated_at: entity.meta.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_core::EntityMeta;

    #[test]
    fn create_dto_tolerates_missing_required_fields() {
        let dto: CreateFeedbackDto = serde_json::from_str(r#"{"comments":"hi"}"#).unwrap();
        assert_eq!(dto.customer_name, "");
        assert_eq!(dto.rating, 0);
        assert_eq!(dto.comments.as_deref(), Some("hi"));
    }

    #[test]
    fn create_dto_reads_camel_case() {
        let dto: CreateFeedbackDto = serde_json::from_str(
            r#"{"customerName":"Alice","phoneNumber":"555","rating":5,"category":"Service"}"#,
        )
        .unwrap();
        assert_eq!(dto.customer_name, "Alice");
        assert_eq!(dto.phone_number.as_deref(), Some("555"));
        assert_eq!(dto.rating, 5);
    }

    #[test]
    fn update_dto_requires_id() {
        let res = serde_json::from_str::<UpdateFeedbackDto>(r#"{"rating":3}"#);
        assert!(res.is_err());
    }

    #[test]
    fn entity_projects_field_for_field() {
        let now = Utc::now();
        let mut meta = EntityMeta::new(now);
        meta.touch(now);
        let entity = FeedbackEntity {
            id: FeedbackId::new(),
            customer_name: "Alice".to_string(),
            email: Some("alice@example.com".to_string()),
            phone_number: None,
            rating: 4,
            comments: Some("Quick service".to_string()),
            category: Some("Service".to_string()),
            status: FeedbackStatus::Resolved,
            submitted_at: now,
            meta,
        };

        let dto = FeedbackDto::from(entity.clone());

        assert_eq!(dto.id, entity.id);
        assert_eq!(dto.customer_name, "Alice");
        assert_eq!(dto.email, entity.email);
        assert_eq!(dto.rating, 4);
        assert_eq!(dto.status, FeedbackStatus::Resolved);
        assert_eq!(dto.created_at, now);
        assert_eq!(dto.updated_at, Some(now));
    }

    #[test]
    fn feedback_dto_serializes_camel_case_keys() {
        let now = Utc::now();
        let dto = FeedbackDto {
            id: FeedbackId::new(),
            customer_name: "Bob".to_string(),
            email: None,
            phone_number: None,
            rating: 2,
            comments: None,
            category: None,
            status: FeedbackStatus::Pending,
            submitted_at: now,
            created_at: now,
            updated_at: None,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["customerName"], "Bob");
        assert_eq!(json["status"], "Pending");
        assert!(json.get("submittedAt").is_some());
        assert!(json["updatedAt"].is_null());
    }
}
