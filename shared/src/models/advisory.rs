//! Crop advisory models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Provenance of a crop suggestion response.
///
/// Callers must use this tag, never the recommendation list, to tell a
/// model-derived answer from a rule-based fallback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryMethod {
    /// Suggestions produced by the generative model
    #[default]
    Gemini,
    /// Rule-based suggestions because no model credential is configured
    Heuristic,
    /// Rule-based suggestions because the model call failed
    GeminiErrorFallback,
}

impl AdvisoryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryMethod::Gemini => "gemini",
            AdvisoryMethod::Heuristic => "heuristic",
            AdvisoryMethod::GeminiErrorFallback => "gemini_error_fallback",
        }
    }
}

/// One suggested crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropRecommendation {
    pub crop: String,
    /// Desirability score, fractional scale in [0, 1]
    pub score: Decimal,
    pub reasoning: String,
    #[serde(
        rename = "plantingWindow",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub planting_window: Option<String>,
}

/// Response of the crop advisory endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CropSuggestionResponse {
    #[serde(default)]
    pub recommendations: Vec<CropRecommendation>,
    #[serde(default)]
    pub method: AdvisoryMethod,
    /// Unparsed model output, present only when JSON parsing failed
    #[serde(rename = "rawText", default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_tags_are_closed_snake_case() {
        assert_eq!(
            serde_json::to_value(AdvisoryMethod::GeminiErrorFallback).unwrap(),
            "gemini_error_fallback"
        );
        assert_eq!(serde_json::to_value(AdvisoryMethod::Heuristic).unwrap(), "heuristic");
        let parsed: AdvisoryMethod = serde_json::from_str("\"gemini\"").unwrap();
        assert_eq!(parsed, AdvisoryMethod::Gemini);
        assert_eq!(parsed.as_str(), "gemini");
    }

    #[test]
    fn planting_window_is_omitted_when_absent() {
        let rec = CropRecommendation {
            crop: "Nendran banana".to_string(),
            score: Decimal::new(82, 2),
            reasoning: "moderate rain".to_string(),
            planting_window: None,
        };
        let value = serde_json::to_value(&rec).unwrap();
        assert!(value.get("plantingWindow").is_none());
        assert_eq!(value["score"].as_f64(), Some(0.82));
    }

    #[test]
    fn model_reply_without_method_defaults_to_gemini() {
        let json = r#"{
            "recommendations": [
                {"crop": "Ginger", "score": 0.9, "reasoning": "humid", "plantingWindow": "June"}
            ]
        }"#;
        let parsed: CropSuggestionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.method, AdvisoryMethod::Gemini);
        assert_eq!(parsed.recommendations.len(), 1);
        assert_eq!(
            parsed.recommendations[0].planting_window.as_deref(),
            Some("June")
        );
        assert!(parsed.raw_text.is_none());
    }
}
