use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::model::legacy::LegacySubmission;

/// Accepts `"2500"`, `2500` or `2500.5` for free-form numeric inputs.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) if s.trim().is_empty() => None,
        Some(Raw::Text(s)) => Some(s),
        Some(Raw::Number(n)) => Some(n.to_string()),
        None => None,
    })
}

/// Raw quote form payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateSubmissionRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub phone_number: Option<String>,

    pub timeframe: Option<String>,
    pub demolition_type: Option<String>,
    pub demolition_type_other: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub square_footage: Option<String>,
    pub project_description: Option<String>,
    pub files: Vec<String>,

    #[serde(alias = "estimate")]
    pub ai_estimate: Option<String>,
    pub status: Option<String>,
    pub wants_cash_offer: Option<bool>,
}

/// Fields a CRM operator may change on an existing submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacted_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wants_cash_offer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_estimate: Option<String>,
}

impl SubmissionChanges {
    pub fn is_empty(&self) -> bool {
        *self == SubmissionChanges::default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSubmissionRequest {
    #[validate(required(message = "Submission ID is required"), length(min = 1, message = "Submission ID is required"))]
    #[serde(default)]
    pub id: Option<String>,

    #[serde(flatten)]
    pub changes: SubmissionChanges,
}

/// Project attributes fed to the estimate prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateRequest {
    pub demolition_type: Option<String>,
    pub demolition_type_other: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub square_footage: Option<String>,
    pub timeframe: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub project_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub text: String,
}

/// One uploaded file as read from the multipart body.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

// --- Response envelopes ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionListResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub submissions: Vec<LegacySubmission>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub submission: LegacySubmission,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub urls: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub success: bool,
    pub estimate: String,
}
