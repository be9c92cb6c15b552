/// Gemini client — the single point of entry for all Gemini API calls in
/// Glossa.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All model interactions MUST go through this module.
///
/// The client owns the primary/fallback model pair. `invoke` makes at most
/// two sequential upstream calls: one to the primary model, plus one to the
/// fallback when (and only when) the primary failure is a capacity error.
/// Every failure class becomes renderable text — callers always get a string
/// to display, never a hard error.
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub mod normalize;
pub mod types;

use crate::llm_client::normalize::{normalize, FALLBACK_NOTE};
use crate::llm_client::types::{
    Content, GeminiError, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    ListModelsResponse, ModelInfo,
};

const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Markers that classify an upstream failure as a capacity (quota/rate)
/// problem, matched case-insensitively against the error text. Substring
/// matching is the weak point of this client — the HTTP layer surfaces no
/// structured error class — so the whole heuristic lives here and nowhere
/// else.
const CAPACITY_ERROR_MARKERS: &[&str] = &["429", "quota", "rate", "too many requests"];

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Outcome of one assistant invocation. `display_text` is always renderable;
/// failures are encoded into it, with `error` set so callers can style them.
#[derive(Debug, Clone)]
pub struct InvocationOutcome {
    pub display_text: String,
    pub used_fallback: bool,
    pub error: Option<String>,
}

/// The single Gemini client used by all handlers.
/// Wraps the `generateContent` REST API with primary/fallback selection and
/// response normalization.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    primary_model: String,
    fallback_model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, primary_model: String, fallback_model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: GEMINI_API_BASE_URL.to_string(),
            primary_model,
            fallback_model,
        }
    }

    /// Overrides the API base URL. Tests point this at a local mock server.
    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sends one composed prompt through the primary/fallback model pair.
    ///
    /// The fallback is tried exactly once, and only when the primary failure
    /// is a capacity error; malformed-request and policy errors would fail
    /// identically on any model, so they are reported immediately.
    pub async fn invoke(
        &self,
        system_prompt: &str,
        user_input: &str,
        temperature: f32,
        max_output_tokens: u32,
    ) -> InvocationOutcome {
        let prompt = compose_prompt(system_prompt, user_input);
        let config = GenerationConfig {
            temperature,
            max_output_tokens,
        };

        let primary_error = match self.generate(&self.primary_model, &prompt, &config).await {
            Ok(response) => {
                return InvocationOutcome {
                    display_text: normalize(&response),
                    used_fallback: false,
                    error: None,
                }
            }
            Err(e) => e.to_string(),
        };

        if !is_capacity_error(&primary_error) {
            warn!(
                "Model {} failed (no fallback for this class): {}",
                self.primary_model, primary_error
            );
            return InvocationOutcome {
                display_text: format!("Error calling the Gemini API: {primary_error}"),
                used_fallback: false,
                error: Some(primary_error),
            };
        }

        warn!(
            "Model {} hit a capacity limit, retrying once on {}: {}",
            self.primary_model, self.fallback_model, primary_error
        );

        match self.generate(&self.fallback_model, &prompt, &config).await {
            Ok(response) => InvocationOutcome {
                display_text: format!("{}{}", normalize(&response), FALLBACK_NOTE),
                used_fallback: true,
                error: None,
            },
            Err(e) => {
                let fallback_error = e.to_string();
                warn!(
                    "Fallback model {} also failed: {}",
                    self.fallback_model, fallback_error
                );
                let combined =
                    format!("Primary failed: {primary_error}\nFallback failed: {fallback_error}");
                InvocationOutcome {
                    display_text: combined.clone(),
                    used_fallback: true,
                    error: Some(combined),
                }
            }
        }
    }

    /// Makes one raw `generateContent` call against the given model.
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerateContentResponse, LlmError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let request_body = GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            generation_config: Some(config.clone()),
        };

        debug!(
            "Calling {}: {} prompt chars, temperature={}, max_output_tokens={}",
            model,
            prompt.len(),
            config.temperature,
            config.max_output_tokens
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the error message out of the envelope
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        debug!("{} returned {} candidate(s)", model, parsed.candidates.len());
        Ok(parsed)
    }

    /// Lists upstream models visible to this API key. Diagnostic use only.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, LlmError> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ListModelsResponse = response.json().await?;
        Ok(parsed.models)
    }
}

/// Composes the full prompt: system template, fixed separator, then the user
/// input verbatim. The input is untrusted free text and passes through
/// unchanged.
fn compose_prompt(system_prompt: &str, user_input: &str) -> String {
    format!("{system_prompt}\n\nUser Input:\n{user_input}")
}

/// Classifies an error description as a capacity (quota/rate-limit) failure.
/// Only this class earns a fallback-model retry.
pub fn is_capacity_error(message: &str) -> bool {
    let lowered = message.to_lowercase();
    CAPACITY_ERROR_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}
