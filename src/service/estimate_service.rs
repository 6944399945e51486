use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::{info, instrument, warn};

use crate::dto::submission_dto::{EstimateRequest, EstimateResponse};
use crate::util::gemini::TextGenerator;

pub const FALLBACK_ESTIMATE: &str = "Contact for estimate";
pub const NOT_PROVIDED: &str = "Not provided";

const PRICING_GUIDE: &str = "\
Pricing guidelines (typical US contractor rates, labor + disposal):
- Interior / selective demolition: $2 - $7 per square foot
- Full residential structure demolition: $4 - $17 per square foot
- Commercial demolition: $4 - $8 per square foot, lower per foot on large sites
- Concrete, driveway or slab removal: $2 - $6 per square foot
- Swimming pool removal: $3,000 - $15,000
- Garage, shed or outbuilding removal: $1,000 - $8,000
- Minimum job charge: $1,500
- Add 10% - 20% for ASAP or rush timeframes
- Hazardous material abatement (asbestos, lead) is quoted separately";

const ANSWER_RULES: &str = "\
Respond with ONLY a dollar price range in the form $X,XXX - $Y,YYY.
Do not include any other words, explanations, or disclaimers.";

/// Result of an estimate request. A fallback is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimateOutcome {
    Generated(String),
    Fallback,
}

impl EstimateOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, EstimateOutcome::Generated(_))
    }

    pub fn estimate(&self) -> &str {
        match self {
            EstimateOutcome::Generated(range) => range,
            EstimateOutcome::Fallback => FALLBACK_ESTIMATE,
        }
    }
}

impl From<EstimateOutcome> for EstimateResponse {
    fn from(outcome: EstimateOutcome) -> Self {
        EstimateResponse {
            success: outcome.is_success(),
            estimate: outcome.estimate().to_string(),
        }
    }
}

fn or_not_provided(value: &Option<String>) -> &str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_PROVIDED)
}

fn demolition_type_line(request: &EstimateRequest) -> String {
    let kind = or_not_provided(&request.demolition_type);
    match request.demolition_type_other.as_deref().map(str::trim) {
        Some(other) if !other.is_empty() && kind.eq_ignore_ascii_case("other") => format!("Other ({})", other),
        _ => kind.to_string(),
    }
}

/// Prompt for a demolition cost range. Same input, same prompt.
pub fn build_prompt(request: &EstimateRequest) -> String {
    let square_footage = match or_not_provided(&request.square_footage) {
        NOT_PROVIDED => NOT_PROVIDED.to_string(),
        sq => format!("{} sq ft", sq),
    };

    format!(
        "You are an experienced demolition contractor estimating a job.\n\
         \n\
         Project details:\n\
         - Type of demolition: {}\n\
         - Square footage: {}\n\
         - Timeframe: {}\n\
         - Street address: {}\n\
         - City: {}\n\
         - State: {}\n\
         - Zip code: {}\n\
         - Project description: {}\n\
         \n\
         {}\n\
         \n\
         {}",
        demolition_type_line(request),
        square_footage,
        or_not_provided(&request.timeframe),
        or_not_provided(&request.street_address),
        or_not_provided(&request.city),
        or_not_provided(&request.state),
        or_not_provided(&request.zip_code),
        or_not_provided(&request.project_description),
        PRICING_GUIDE,
        ANSWER_RULES,
    )
}

fn price_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let amount = r"\$\s?\d[\d,]*(?:\.\d+)?(?:\s?[kK])?";
        Regex::new(&format!(r"{amount}(?:\s*(?:-|–|—|to)\s*{amount})?")).expect("price pattern is valid")
    })
}

/// First dollar amount or range in the provider's answer.
pub fn extract_price_range(text: &str) -> Option<String> {
    price_pattern()
        .find(text)
        .map(|m| m.as_str().trim().trim_end_matches(',').to_string())
}

pub struct EstimateServiceImpl {
    pub generator: Arc<dyn TextGenerator>,
}

impl EstimateServiceImpl {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        EstimateServiceImpl { generator }
    }

    /// One provider call; every failure collapses into [`EstimateOutcome::Fallback`].
    #[instrument(skip(self, request), fields(demolition_type = ?request.demolition_type))]
    pub async fn estimate(&self, request: &EstimateRequest) -> EstimateOutcome {
        let prompt = build_prompt(request);
        match self.generator.generate(&prompt).await {
            Ok(text) => match extract_price_range(&text) {
                Some(range) => {
                    info!(estimate = %range, "Estimate generated");
                    EstimateOutcome::Generated(range)
                }
                None => {
                    warn!("Estimate response had no price range: {:?}", text);
                    EstimateOutcome::Fallback
                }
            },
            Err(e) => {
                warn!("Estimate generation failed, using fallback: {e}");
                EstimateOutcome::Fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_substitutes_missing_values() {
        let prompt = build_prompt(&EstimateRequest {
            demolition_type: Some("Interior".to_string()),
            city: Some("Houston".to_string()),
            ..Default::default()
        });
        assert!(prompt.contains("- Type of demolition: Interior"));
        assert!(prompt.contains("- City: Houston"));
        assert!(prompt.contains("- Square footage: Not provided"));
        assert!(prompt.contains("- Project description: Not provided"));
        assert!(prompt.contains("Respond with ONLY a dollar price range"));
        assert!(prompt.contains("Pricing guidelines"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let request = EstimateRequest {
            square_footage: Some("1800".to_string()),
            ..Default::default()
        };
        assert_eq!(build_prompt(&request), build_prompt(&request));
        assert!(build_prompt(&request).contains("- Square footage: 1800 sq ft"));
    }

    #[test]
    fn test_prompt_uses_other_qualifier() {
        let prompt = build_prompt(&EstimateRequest {
            demolition_type: Some("other".to_string()),
            demolition_type_other: Some("Grain silo".to_string()),
            ..Default::default()
        });
        assert!(prompt.contains("- Type of demolition: Other (Grain silo)"));
    }

    #[test]
    fn test_extract_price_range() {
        assert_eq!(extract_price_range("$8,000 - $12,500").as_deref(), Some("$8,000 - $12,500"));
        assert_eq!(
            extract_price_range("Estimated cost: $3,500 to $5,000 depending on access").as_deref(),
            Some("$3,500 to $5,000")
        );
        assert_eq!(extract_price_range("About $15k").as_deref(), Some("$15k"));
        assert_eq!(extract_price_range("I cannot estimate this."), None);
    }

    #[test]
    fn test_outcome_rendering() {
        let response: EstimateResponse = EstimateOutcome::Fallback.into();
        assert!(!response.success);
        assert_eq!(response.estimate, FALLBACK_ESTIMATE);

        let response: EstimateResponse = EstimateOutcome::Generated("$1,000 - $2,000".to_string()).into();
        assert!(response.success);
        assert_eq!(response.estimate, "$1,000 - $2,000");
    }
}
