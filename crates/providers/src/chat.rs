//! OpenAI-compatible chat-completions oracle.
//!
//! Works with Mistral (the default), OpenAI, OpenRouter, Ollama and any other
//! endpoint exposing `POST /chat/completions`. One client serves both the
//! text model (outfits, swaps) and the vision model (photo classification).
//!
//! Transport failures become [`OracleError`]s. Payloads that arrive but don't
//! parse degrade to fallbacks in [`crate::parse`].

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use fitify_config::AppConfig;
use fitify_core::error::OracleError;
use fitify_core::oracle::{
    ClassifiedItem, ImageUpload, OutfitOracle, OutfitProposal, OutfitRequest, SlotAlternatives,
    SlotRequest, VisionOracle,
};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{parse, prompts};

pub struct ChatOracle {
    name: String,
    base_url: String,
    api_key: String,
    text_model: String,
    vision_model: String,
    temperature: f32,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl ChatOracle {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| OracleError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            text_model: "mistral-large-latest".into(),
            vision_model: "pixtral-12b-2409".into(),
            temperature: 0.7,
            timeout_secs,
            client,
        })
    }

    /// Mistral's hosted API (convenience constructor).
    pub fn mistral(api_key: impl Into<String>) -> Result<Self, OracleError> {
        Self::new("mistral", "https://api.mistral.ai/v1", api_key, 60)
    }

    /// Build from configuration. A missing API key is not an error here;
    /// calls fail with [`OracleError::NotConfigured`] instead.
    pub fn from_config(config: &AppConfig) -> Result<Self, OracleError> {
        let oracle = Self::new(
            &config.oracle.provider,
            &config.oracle.api_url,
            config.api_key.clone().unwrap_or_default(),
            config.oracle.timeout_secs,
        )?;
        Ok(oracle
            .with_models(&config.oracle.text_model, &config.oracle.vision_model)
            .with_temperature(config.oracle.temperature))
    }

    pub fn with_models(mut self, text: impl Into<String>, vision: impl Into<String>) -> Self {
        self.text_model = text.into();
        self.vision_model = vision.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    pub fn vision_model(&self) -> &str {
        &self.vision_model
    }

    /// Send one chat completion and return the assistant's text.
    async fn complete(
        &self,
        model: &str,
        system: Option<&str>,
        content: serde_json::Value,
    ) -> Result<String, OracleError> {
        if self.api_key.is_empty() {
            return Err(OracleError::NotConfigured(format!(
                "no API key for '{}' (set FITIFY_API_KEY or api_key in config.toml)",
                self.name
            )));
        }

        let mut messages = Vec::new();
        if let Some(system) = system {
            messages.push(serde_json::json!({ "role": "system", "content": system }));
        }
        messages.push(serde_json::json!({ "role": "user", "content": content }));

        let body = serde_json::json!({
            "model": model,
            "messages": messages,
            "temperature": self.temperature,
            "stream": false,
        });

        let url = format!("{}/chat/completions", self.base_url);
        debug!(oracle = %self.name, model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OracleError::Timeout {
                        timeout_secs: self.timeout_secs,
                    }
                } else {
                    OracleError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(5);
            return Err(OracleError::RateLimited { retry_after_secs });
        }

        if status == 401 || status == 403 {
            return Err(OracleError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Oracle returned error");
            return Err(OracleError::Api {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| OracleError::Api {
            status_code: 200,
            message: format!("Failed to parse response: {e}"),
        })?;

        api_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| OracleError::Api {
                status_code: 200,
                message: "No choices in response".into(),
            })
    }
}

#[async_trait]
impl OutfitOracle for ChatOracle {
    fn name(&self) -> &str {
        &self.name
    }

    async fn suggest_outfits(&self, request: &OutfitRequest) -> Result<OutfitProposal, OracleError> {
        let prompt = prompts::outfit_prompt(request);
        let text = self
            .complete(
                &self.text_model,
                Some(prompts::STYLIST_SYSTEM),
                serde_json::Value::String(prompt),
            )
            .await?;
        Ok(parse::outfit_proposal(&text))
    }

    async fn suggest_alternatives(
        &self,
        request: &SlotRequest,
    ) -> Result<SlotAlternatives, OracleError> {
        let prompt = prompts::slot_prompt(request);
        let text = self
            .complete(
                &self.text_model,
                Some(prompts::STYLIST_SYSTEM),
                serde_json::Value::String(prompt),
            )
            .await?;
        Ok(parse::slot_alternatives(&text, request.slot))
    }
}

#[async_trait]
impl VisionOracle for ChatOracle {
    fn name(&self) -> &str {
        &self.name
    }

    async fn classify(
        &self,
        image: &ImageUpload,
        avoid_ids: &[String],
    ) -> Result<ClassifiedItem, OracleError> {
        let data_url = format!(
            "data:{};base64,{}",
            image.mime_type(),
            STANDARD.encode(&image.bytes)
        );
        let content = serde_json::json!([
            { "type": "text", "text": prompts::vision_prompt(avoid_ids) },
            { "type": "image_url", "image_url": { "url": data_url } },
        ]);

        let text = self.complete(&self.vision_model, None, content).await?;
        Ok(parse::classified_item(&text))
    }
}

// --- API response types ---

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Deserialize)]
struct ApiMessage {
    content: Option<String>,
}
