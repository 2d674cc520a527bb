//! Crop advisory service
//!
//! Builds a prompt from the district and its weather snapshot, asks the
//! generative model for suggestions, and degrades to a deterministic
//! threshold-rule generator when the model is unconfigured or
//! unreachable. Scores are fractional desirability values in [0, 1].

use reqwest::Client;
use rust_decimal::Decimal;

use shared::{
    AdvisoryMethod, CropRecommendation, CropSuggestionResponse, CurrentConditions,
    GpsCoordinates, WeatherSnapshot,
};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::GeminiClient;

/// Crop advisory service
#[derive(Clone)]
pub struct AdvisoryService {
    gemini: Option<GeminiClient>,
}

impl AdvisoryService {
    /// Create a new AdvisoryService
    pub fn new(gemini: Option<GeminiClient>) -> Self {
        Self { gemini }
    }

    /// Build the service from configuration; an unset or empty model key
    /// routes every request through the rule-based generator.
    pub fn from_config(http: Client, config: &Config) -> Self {
        let gemini = config.gemini_key().map(|key| {
            GeminiClient::with_base_url(
                http,
                key.to_string(),
                config.gemini.base_url.clone(),
                config.gemini.model.clone(),
            )
        });
        Self::new(gemini)
    }

    /// Suggest crops for a district given its current weather.
    ///
    /// A transport-level model failure falls back to the rule-based
    /// generator (`gemini_error_fallback`); a reply that does not parse
    /// as the contracted JSON yields an empty list plus the raw text
    /// under the `gemini` tag. The two failure modes are deliberately
    /// not symmetric.
    pub async fn suggest_crops(
        &self,
        district: &str,
        coords: &GpsCoordinates,
        weather: &WeatherSnapshot,
    ) -> AppResult<CropSuggestionResponse> {
        tracing::debug!(
            district,
            lat = %coords.latitude,
            lon = %coords.longitude,
            "crop suggestions requested"
        );

        let Some(client) = &self.gemini else {
            return Ok(heuristic_response(
                &weather.current,
                AdvisoryMethod::Heuristic,
            ));
        };

        let prompt = build_prompt(district, weather)?;
        let text = match client.generate_content(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(
                    district,
                    error = %err,
                    "model call failed, using rule-based suggestions"
                );
                return Ok(heuristic_response(
                    &weather.current,
                    AdvisoryMethod::GeminiErrorFallback,
                ));
            }
        };

        match parse_model_reply(&text) {
            Ok(parsed) => Ok(parsed),
            Err(err) => {
                tracing::warn!(
                    district,
                    error = %err,
                    "model reply did not parse as suggestion JSON"
                );
                Ok(CropSuggestionResponse {
                    recommendations: Vec::new(),
                    method: AdvisoryMethod::Gemini,
                    raw_text: Some(text),
                })
            }
        }
    }
}

/// Prompt sent to the generative model
fn build_prompt(district: &str, weather: &WeatherSnapshot) -> AppResult<String> {
    let weather_json = serde_json::to_string_pretty(weather)
        .map_err(|e| AppError::Internal(format!("failed to serialize weather: {}", e)))?;

    Ok(format!(
        r#"You are an agronomist advising Kerala farmers in {district}.
Here is the current weather JSON:
{weather_json}

Suggest 3-5 suitable crops to grow NOW that can give high profit.
Output JSON in this format only:
{{
  "recommendations": [
    {{ "crop": "Crop name", "score": 0.9, "reasoning": "why suitable", "plantingWindow": "when to plant" }}
  ],
  "method": "gemini"
}}
"#
    ))
}

/// Remove a Markdown code fence (with optional language hint) wrapping
/// the model reply, leaving the payload ready for JSON parsing
pub fn strip_code_fence(text: &str) -> &str {
    let mut clean = text.trim();
    if let Some(rest) = clean.strip_prefix("```") {
        let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
        let rest = rest.strip_prefix('\n').unwrap_or(rest);
        clean = rest.strip_suffix("```").unwrap_or(rest).trim();
    }
    clean
}

/// Parse a model reply into the contracted suggestion shape
pub fn parse_model_reply(text: &str) -> Result<CropSuggestionResponse, serde_json::Error> {
    serde_json::from_str(strip_code_fence(text))
}

/// Threshold-rule crop generator.
///
/// A pure function of temperature (°C) and precipitation (mm); null
/// readings fall back to 28 and 2. Rules are evaluated in a fixed order
/// and each appends independently, so scores descend by construction and
/// ties resolve by rule position.
pub fn heuristic_recommendations(current: &CurrentConditions) -> Vec<CropRecommendation> {
    let temperature = current.temperature_2m.unwrap_or_else(|| Decimal::from(28));
    let precipitation = current.precipitation.unwrap_or_else(|| Decimal::from(2));

    let mut recommendations = Vec::new();

    if temperature >= Decimal::from(24)
        && temperature <= Decimal::from(34)
        && precipitation >= Decimal::ONE
    {
        recommendations.push(CropRecommendation {
            crop: "Short-duration rice (Uma)".to_string(),
            score: Decimal::new(88, 2),
            reasoning: "Warm, wet conditions suit a quick paddy cycle".to_string(),
            planting_window: Some("Within the next two weeks".to_string()),
        });
    }

    if temperature >= Decimal::from(22)
        && temperature <= Decimal::from(32)
        && precipitation <= Decimal::from(3)
    {
        recommendations.push(CropRecommendation {
            crop: "Nendran banana".to_string(),
            score: Decimal::new(82, 2),
            reasoning: "Mild heat with limited rain favours new banana pits".to_string(),
            planting_window: Some("Start of the next dry spell".to_string()),
        });
    }

    if temperature >= Decimal::from(20) && temperature <= Decimal::from(30) {
        recommendations.push(CropRecommendation {
            crop: "Quick-rotation vegetables (amaranthus, okra)".to_string(),
            score: Decimal::new(76, 2),
            reasoning: "Temperatures allow a fast vegetable rotation".to_string(),
            planting_window: Some("Any time this month".to_string()),
        });
    }

    if precipitation >= Decimal::from(3) {
        recommendations.push(CropRecommendation {
            crop: "Taro (chembu)".to_string(),
            score: Decimal::new(70, 2),
            reasoning: "Standing moisture suits waterlogging-tolerant tubers".to_string(),
            planting_window: Some("With the ongoing rains".to_string()),
        });
    }

    // unconditional backstop so the caller never sees an empty list
    if recommendations.len() < 3 {
        recommendations.push(CropRecommendation {
            crop: "Coconut-based perennial intercropping".to_string(),
            score: Decimal::new(65, 2),
            reasoning: "Low-risk default for the current readings".to_string(),
            planting_window: None,
        });
    }

    recommendations.truncate(5);
    recommendations
}

fn heuristic_response(current: &CurrentConditions, method: AdvisoryMethod) -> CropSuggestionResponse {
    CropSuggestionResponse {
        recommendations: heuristic_recommendations(current),
        method,
        raw_text: None,
    }
}
