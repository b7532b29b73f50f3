use core::ops::RangeInclusive;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use feedback_core::{BaseEntity, DomainError, DomainResult, Entity, EntityMeta, FeedbackId};

/// Accepted star ratings.
pub const RATING_RANGE: RangeInclusive<i32> = 1..=5;

pub const RATING_OUT_OF_RANGE: &str = "Rating must be between 1 and 5";

/// Check that a rating lies within [`RATING_RANGE`].
pub fn validate_rating(rating: i32) -> DomainResult<i32> {
    if RATING_RANGE.contains(&rating) {
        Ok(rating)
    } else {
        Err(DomainError::validation(RATING_OUT_OF_RANGE))
    }
}

/// Column widths of the `feedbacks` table, in characters.
pub const CUSTOMER_NAME_MAX_LEN: usize = 200;
pub const EMAIL_MAX_LEN: usize = 100;
pub const PHONE_NUMBER_MAX_LEN: usize = 20;
pub const COMMENTS_MAX_LEN: usize = 1000;
pub const CATEGORY_MAX_LEN: usize = 50;

/// Message for a text field longer than `max` characters, if it is.
pub fn too_long(label: &str, value: &str, max: usize) -> Option<String> {
    (value.chars().count() > max).then(|| format!("{label} must be at most {max} characters"))
}

/// Review status of a feedback record.
///
/// New feedback always starts as `Pending`. Stored as a small integer
/// (`Pending = 0` .. `Closed = 3`); on the wire it travels as the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FeedbackStatus {
    #[default]
    Pending,
    UnderReview,
    Resolved,
    Closed,
}

impl FeedbackStatus {
    pub const ALL: [FeedbackStatus; 4] = [
        FeedbackStatus::Pending,
        FeedbackStatus::UnderReview,
        FeedbackStatus::Resolved,
        FeedbackStatus::Closed,
    ];

    pub fn as_i16(self) -> i16 {
        match self {
            FeedbackStatus::Pending => 0,
            FeedbackStatus::UnderReview => 1,
            FeedbackStatus::Resolved => 2,
            FeedbackStatus::Closed => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackStatus::Pending => "Pending",
            FeedbackStatus::UnderReview => "UnderReview",
            FeedbackStatus::Resolved => "Resolved",
            FeedbackStatus::Closed => "Closed",
        }
    }
}

impl core::fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i16> for FeedbackStatus {
    type Error = DomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        FeedbackStatus::ALL
            .into_iter()
            .find(|s| s.as_i16() == value)
            .ok_or_else(|| {
                DomainError::validation(format!("unknown feedback status code: {value}"))
            })
    }
}

/// Parses the variant name (case-insensitive, `_`/`-` ignored) or the numeric code.
impl FromStr for FeedbackStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.trim().parse::<i16>() {
            return FeedbackStatus::try_from(code);
        }

        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();

        FeedbackStatus::ALL
            .into_iter()
            .find(|status| status.as_str().to_lowercase() == normalized)
            .ok_or_else(|| {
                DomainError::validation(
                    "Status must be one of: Pending, UnderReview, Resolved, Closed",
                )
            })
    }
}

/// A single piece of customer feedback as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEntity {
    pub id: FeedbackId,
    pub customer_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    /// 1-5 stars.
    pub rating: i32,
    pub comments: Option<String>,
    /// e.g. Service, Product, Support.
    pub category: Option<String>,
    pub status: FeedbackStatus,
    pub submitted_at: DateTime<Utc>,
    pub meta: EntityMeta,
}

impl Entity for FeedbackEntity {
    type Id = FeedbackId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl BaseEntity for FeedbackEntity {
    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }
}
