//! Mapping between the stored [`Submission`] and the label-keyed record the
//! dashboard and the old form-export tooling consume.
//!
//! The legacy layout only knows the form questions. Workflow fields live in
//! [`PreservedFields`], which is flattened into the same JSON object so a
//! legacy record still carries them.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::model::submission::Submission;

/// Keys carried through the transform untouched.
pub const PRESERVED_FIELDS: [&str; 6] = [
    "id",
    "status",
    "notes",
    "contacted_at",
    "contacted_by",
    "wants_cash_offer",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreservedFields {
    pub id: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub contacted_at: Option<String>,
    pub contacted_by: Option<String>,
    pub wants_cash_offer: Option<bool>,
}

/// Submission in the legacy form-export shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacySubmission {
    #[serde(rename = "Submitted at")]
    pub submitted_at: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "First Name")]
    pub first_name: String,
    #[serde(rename = "Last Name")]
    pub last_name: String,
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
    #[serde(rename = "Timeframe")]
    pub timeframe: String,
    #[serde(rename = "Type of Demolition")]
    pub demolition_type: String,
    #[serde(rename = "Other Demolition Type")]
    pub demolition_type_other: String,
    #[serde(rename = "Street Address")]
    pub street_address: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Zip Code")]
    pub zip_code: String,
    #[serde(rename = "Project Address")]
    pub full_address: String,
    #[serde(rename = "Square Footage")]
    pub square_footage: String,
    #[serde(rename = "Project Description")]
    pub project_description: String,
    #[serde(rename = "Upload Files")]
    pub files: Vec<String>,
    #[serde(rename = "AI Estimate")]
    pub ai_estimate: String,

    #[serde(flatten)]
    pub preserved: PreservedFields,
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Storage record to legacy shape. Unset fields become empty values.
pub fn to_legacy(submission: &Submission) -> LegacySubmission {
    LegacySubmission {
        submitted_at: text(&submission.created_at),
        email: text(&submission.email),
        first_name: text(&submission.first_name),
        last_name: text(&submission.last_name),
        company_name: text(&submission.company_name),
        phone_number: text(&submission.phone_number),
        timeframe: text(&submission.timeframe),
        demolition_type: text(&submission.demolition_type),
        demolition_type_other: text(&submission.demolition_type_other),
        street_address: text(&submission.street_address),
        city: text(&submission.city),
        state: text(&submission.state),
        zip_code: text(&submission.zip_code),
        full_address: text(&submission.full_address),
        square_footage: text(&submission.square_footage),
        project_description: text(&submission.project_description),
        files: submission.files.clone(),
        ai_estimate: text(&submission.ai_estimate),
        preserved: PreservedFields {
            id: submission.id.map(|id| id.to_hex()),
            status: submission.status.clone(),
            notes: submission.notes.clone(),
            contacted_at: submission.contacted_at.clone(),
            contacted_by: submission.contacted_by.clone(),
            wants_cash_offer: submission.wants_cash_offer,
        },
    }
}

/// Legacy shape back to a storage record. Empty values become absent fields;
/// an id that is not a valid ObjectId is dropped.
pub fn from_legacy(legacy: &LegacySubmission) -> Submission {
    Submission {
        id: legacy
            .preserved
            .id
            .as_deref()
            .and_then(|id| ObjectId::parse_str(id).ok()),
        created_at: optional(&legacy.submitted_at),
        email: optional(&legacy.email),
        first_name: optional(&legacy.first_name),
        last_name: optional(&legacy.last_name),
        company_name: optional(&legacy.company_name),
        phone_number: optional(&legacy.phone_number),
        timeframe: optional(&legacy.timeframe),
        demolition_type: optional(&legacy.demolition_type),
        demolition_type_other: optional(&legacy.demolition_type_other),
        street_address: optional(&legacy.street_address),
        city: optional(&legacy.city),
        state: optional(&legacy.state),
        zip_code: optional(&legacy.zip_code),
        full_address: optional(&legacy.full_address),
        square_footage: optional(&legacy.square_footage),
        project_description: optional(&legacy.project_description),
        files: legacy.files.clone(),
        ai_estimate: optional(&legacy.ai_estimate),
        status: legacy.preserved.status.clone(),
        notes: legacy.preserved.notes.clone(),
        contacted_at: legacy.preserved.contacted_at.clone(),
        contacted_by: legacy.preserved.contacted_by.clone(),
        wants_cash_offer: legacy.preserved.wants_cash_offer,
    }
}
