//! Gemini generateContent client
//!
//! Client for the Google generative-language API used by the crop advisory
//! and expert query services.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

/// Request body for generateContent
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// Response envelope of generateContent
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a new GeminiClient
    pub fn new(client: Client, api_key: String, model: String) -> Self {
        Self::with_base_url(
            client,
            api_key,
            "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model,
        )
    }

    /// Create a new GeminiClient with custom base URL (for testing)
    pub fn with_base_url(client: Client, api_key: String, base_url: String, model: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
            model,
        }
    }

    /// Send a prompt and return the first candidate's text.
    ///
    /// An empty string is returned when the model produced no candidate
    /// text; transport failures and non-success statuses are errors.
    pub async fn generate_content(&self, prompt: &str) -> AppResult<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| AppError::ModelTransport(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ModelTransport(format!(
                "API returned {}",
                response.status()
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::ModelTransport(format!("invalid response envelope: {}", e)))?;

        Ok(extract_text(&body))
    }
}

/// Pull the first candidate's first text part out of a response envelope
fn extract_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.clone())
        .unwrap_or_default()
}
