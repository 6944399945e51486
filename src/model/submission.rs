use bson::oid::ObjectId;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const STATUS_NEW: &str = "new";
pub const STATUS_CONTACTED: &str = "contacted";

/// Fields the datastore refuses to store without.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "email",
    "first_name",
    "last_name",
    "phone_number",
    "street_address",
    "city",
    "state",
    "zip_code",
];

/// A lead / quote request as stored in the datastore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Submission {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub created_at: Option<String>,

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
    pub full_address: Option<String>,
    pub square_footage: Option<String>,
    pub project_description: Option<String>,
    pub files: Vec<String>,

    pub ai_estimate: Option<String>,

    pub status: Option<String>,
    pub notes: Option<String>,
    pub contacted_at: Option<String>,
    pub contacted_by: Option<String>,
    pub wants_cash_offer: Option<bool>,
}

impl Submission {
    /// Names of required fields that are absent or blank.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let values = [
            &self.email,
            &self.first_name,
            &self.last_name,
            &self.phone_number,
            &self.street_address,
            &self.city,
            &self.state,
            &self.zip_code,
        ];
        REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect()
    }
}

/// `"{street}, {city}, {state} {zip}"`, absent parts rendered empty.
pub fn compose_full_address(
    street: Option<&str>,
    city: Option<&str>,
    state: Option<&str>,
    zip: Option<&str>,
) -> String {
    format!(
        "{}, {}, {} {}",
        street.unwrap_or_default(),
        city.unwrap_or_default(),
        state.unwrap_or_default(),
        zip.unwrap_or_default()
    )
}

/// Current time in the fixed-width RFC3339 form stored on records, so that
/// lexical order matches chronological order.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_full_address() {
        let full = compose_full_address(Some("12 Elm St"), Some("Austin"), Some("TX"), Some("78701"));
        assert_eq!(full, "12 Elm St, Austin, TX 78701");
    }

    #[test]
    fn test_compose_full_address_with_gaps() {
        let full = compose_full_address(Some("12 Elm St"), None, Some("TX"), None);
        assert_eq!(full, "12 Elm St, , TX ");
    }

    #[test]
    fn test_missing_required_fields() {
        let submission = Submission {
            email: Some("a@b.com".to_string()),
            first_name: Some("Ann".to_string()),
            last_name: Some(" ".to_string()),
            phone_number: Some("555".to_string()),
            street_address: Some("1 Main".to_string()),
            city: Some("Dallas".to_string()),
            state: Some("TX".to_string()),
            ..Default::default()
        };
        assert_eq!(submission.missing_required_fields(), vec!["last_name", "zip_code"]);
    }

    #[test]
    fn test_timestamp_now_is_fixed_width_utc() {
        let ts = timestamp_now();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2024-01-01T00:00:00.000Z".len());
    }

    #[test]
    fn test_deserialize_tolerates_missing_fields() {
        let submission: Submission = serde_json::from_str(r#"{"email":"x@y.z"}"#).unwrap();
        assert_eq!(submission.email.as_deref(), Some("x@y.z"));
        assert!(submission.files.is_empty());
        assert!(submission.status.is_none());
    }
}
