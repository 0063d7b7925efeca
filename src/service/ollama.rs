/*!
 * Ollama provider: batch translation through a local Ollama server.
 */

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{prompt, BatchRequest, TranslateProvider};
use crate::errors::ProviderError;

/// Default request timeout. Local models can be slow to load on first call.
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Generate request for the Ollama API.
#[derive(Debug, Serialize)]
struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// Whether to stream the response
    stream: bool,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
}

/// Generation options for the Ollama API.
#[derive(Debug, Serialize)]
struct GenerationOptions {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Generation response from the Ollama API.
#[derive(Debug, Deserialize)]
struct GenerationResponse {
    /// Generated text
    response: String,
}

/// Ollama client implementing the translation provider contract.
pub struct OllamaProvider {
    /// Base URL of the Ollama API
    base_url: String,
    /// Model name
    model: String,
    /// HTTP client for making requests
    client: Client,
    /// Sampling temperature, if overridden
    temperature: Option<f32>,
}

impl OllamaProvider {
    /// Create a provider against the given Ollama endpoint and model.
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            temperature: None,
        }
    }

    /// Override the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    async fn generate(&self, prompt: String) -> Result<String, ProviderError> {
        let request = GenerationRequest {
            model: self.model.clone(),
            prompt,
            stream: false,
            options: self
                .temperature
                .map(|temperature| GenerationOptions {
                    temperature: Some(temperature),
                }),
        };

        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: GenerationResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(body.response)
    }
}

#[async_trait]
impl TranslateProvider for OllamaProvider {
    async fn translate_batch(
        &self,
        request: &BatchRequest<'_>,
    ) -> Result<Vec<Option<String>>, ProviderError> {
        if request.lines.is_empty() {
            return Ok(Vec::new());
        }

        let batch_prompt = prompt::build_batch_prompt(request);
        debug!(
            "Sending {} cues to Ollama model {} ({} prompt chars)",
            request.lines.len(),
            self.model,
            batch_prompt.len()
        );

        let response = self.generate(batch_prompt).await?;
        Ok(prompt::parse_batch_response(&response, request.lines.len()))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let url = format!("{}/api/version", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::ApiError {
                status_code: response.status().as_u16(),
                message: "version endpoint returned an error".to_string(),
            });
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
