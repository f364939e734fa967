use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;
use wellness_domain::dass::Dass21Scores;
use wellness_domain::plan::PlanGenerator;
use wellness_domain::shared::{DateKey, DomainError};

use super::prompt::{build_user_prompt, SYSTEM_PROMPT};
use crate::config::{LlmConfig, TimeoutConfig};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Plan generator backed by an OpenAI-compatible chat completions endpoint.
pub struct OpenAiPlanGenerator {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiPlanGenerator {
    pub fn new(config: &LlmConfig, timeouts: &TimeoutConfig) -> Result<Self, DomainError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            DomainError::Validation(
                "OPENAI_API_KEY is not set. Set it in the environment to generate plans."
                    .to_string(),
            )
        })?;

        let endpoint = config
            .base_url
            .join("chat/completions")
            .map_err(|e| DomainError::Validation(format!("Invalid OpenAI endpoint: {}", e)))?;

        let client = Client::builder()
            .timeout(timeouts.llm_request)
            .connect_timeout(timeouts.connect)
            .build()
            .map_err(|e| {
                DomainError::Infrastructure(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    async fn complete(&self, user_prompt: &str) -> Result<String, DomainError> {
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::ExternalService(format!("Plan request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "[plan] generator returned an error status");
            return Err(DomainError::ExternalService(format!(
                "Plan generator returned {}: {}",
                status,
                body.chars().take(300).collect::<String>()
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            DomainError::ExternalService(format!("Malformed plan generator response: {}", e))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                DomainError::ExternalService("Plan generator returned no content".to_string())
            })
    }
}

/// The model is asked for JSON; anything else is kept as plain text so the
/// plan is still stored and shown, just without completion overlay.
fn parse_plan_content(text: String) -> Value {
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "[plan] generator output is not JSON, keeping text");
            Value::String(text)
        }
    }
}

#[async_trait]
impl PlanGenerator for OpenAiPlanGenerator {
    async fn generate(&self, scores: &Dass21Scores) -> Result<Value, DomainError> {
        let prompt = build_user_prompt(scores, DateKey::today_utc());
        info!(
            model = %self.model,
            verified = scores.is_verified(),
            "[plan] requesting 7-day plan"
        );

        let text = self.complete(&prompt).await?;
        Ok(parse_plan_content(text))
    }
}
