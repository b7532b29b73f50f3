use serde::Deserialize;

use feedback_domain::CreateFeedbackDto;

pub const ANONYMOUS_CUSTOMER: &str = "Anonymous";
pub const GENERAL_CATEGORY: &str = "General";

/// Body posted by the survey page. Everything is optional; blanks get defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    #[serde(default)]
    pub customer_name: Option<String>,
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

impl From<SurveySubmission> for CreateFeedbackDto {
    fn from(s: SurveySubmission) -> Self {
        Self {
            customer_name: non_empty(s.customer_name)
                .unwrap_or_else(|| ANONYMOUS_CUSTOMER.to_string()),
            email: s.email,
            phone_number: s.phone_number,
            rating: s.rating,
            comments: s.comments,
            category: Some(non_empty(s.category).unwrap_or_else(|| GENERAL_CATEGORY.to_string())),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
