//! Expert query service
//!
//! Answers free-text farmer questions through the generative model, in
//! English or Malayalam. Unlike the crop advisory pipeline there is no
//! rule-based degrade path here; model failures surface to the caller.

use reqwest::Client;
use serde::Deserialize;

use shared::{validate_email, validate_question, Language, QueryAnswer};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::GeminiClient;

/// Input for a free-text expert question
#[derive(Debug, Deserialize)]
pub struct AskQueryInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub question: Option<String>,
    pub language: Option<Language>,
}

/// Expert query service
#[derive(Clone)]
pub struct ExpertService {
    gemini: Option<GeminiClient>,
}

impl ExpertService {
    /// Create a new ExpertService
    pub fn new(gemini: Option<GeminiClient>) -> Self {
        Self { gemini }
    }

    /// Build the service from configuration
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

    /// Answer a farmer's question in the requested language
    pub async fn answer(&self, input: AskQueryInput) -> AppResult<QueryAnswer> {
        let name = input
            .name
            .filter(|v| !v.trim().is_empty())
            .ok_or(AppError::MissingField("name"))?;
        let email = input
            .email
            .filter(|v| !v.trim().is_empty())
            .ok_or(AppError::MissingField("email"))?;
        let question = input
            .question
            .filter(|v| !v.trim().is_empty())
            .ok_or(AppError::MissingField("question"))?;
        let language = input.language.ok_or(AppError::MissingField("language"))?;

        validate_email(&email).map_err(|msg| AppError::Validation {
            field: "email",
            message: msg.to_string(),
            message_ml: "ഇമെയിൽ വിലാസം അസാധുവാണ്".to_string(),
        })?;

        let question = question.trim().to_string();
        validate_question(&question).map_err(|msg| AppError::Validation {
            field: "question",
            message: msg.to_string(),
            message_ml: "ചോദ്യം അസാധുവാണ്".to_string(),
        })?;

        let client = self.gemini.as_ref().ok_or_else(|| {
            AppError::Configuration("Gemini API key not configured".to_string())
        })?;

        tracing::debug!(farmer = %name, language = language.code(), "expert query received");

        let text = client
            .generate_content(&build_prompt(&question, language))
            .await?;

        Ok(QueryAnswer {
            success: true,
            answer: text.trim().to_string(),
        })
    }
}

/// Prompt instructing the model to answer only in the requested language
fn build_prompt(question: &str, language: Language) -> String {
    format!(
        "You are an agricultural expert. A farmer has asked:\n\n\"{}\"\n\nRespond ONLY in {}.\n",
        question,
        language.display_name()
    )
}
