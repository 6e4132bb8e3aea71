//! OpenAI image generation provider.
//!
//! Calls the images API with `response_format: b64_json` and decodes the
//! returned PNG. Transport failures, rate limiting and 5xx responses are
//! retried with exponential backoff; other client errors are returned as is.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Duration};

use craiyon_core::domain::entities::image::Resolution;
use craiyon_core::services::ImageGenerator;
use craiyon_shared::ImageConfig;

use crate::InfrastructureError;

const MAX_RETRY_ATTEMPTS: u32 = 3;
const DEFAULT_BACKOFF: Duration = Duration::from_secs(2);
const PROVIDER_MODEL: &str = "dall-e-2";

#[derive(Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    response_format: &'a str,
}

#[derive(Deserialize)]
struct GenerationResponse {
    data: Vec<GeneratedData>,
}

#[derive(Deserialize)]
struct GeneratedData {
    b64_json: Option<String>,
}

/// Image generator backed by the OpenAI images API
#[derive(Clone)]
pub struct OpenAiImageGenerator {
    client: Client,
    api_key: String,
    api_url: String,
    max_attempts: u32,
    backoff: Duration,
}

impl OpenAiImageGenerator {
    pub fn new(config: &ImageConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            max_attempts: MAX_RETRY_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
        })
    }

    /// Override the retry policy
    pub fn with_retry(mut self, max_attempts: u32, backoff: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.backoff = backoff;
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn is_retryable(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }

    fn decode_image(response: GenerationResponse) -> Result<Vec<u8>, String> {
        let encoded = response
            .data
            .into_iter()
            .next()
            .and_then(|d| d.b64_json)
            .ok_or_else(|| "Image provider returned no image data".to_string())?;

        STANDARD
            .decode(encoded)
            .map_err(|e| format!("Image provider returned invalid base64: {}", e))
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageGenerator {
    async fn generate(&self, prompt: &str, resolution: Resolution) -> Result<Vec<u8>, String> {
        if !self.is_configured() {
            return Err("OPENAI_API_KEY is not configured".to_string());
        }

        let mut last_error = None;

        for attempt in 0..self.max_attempts {
            let result = self
                .client
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&GenerationRequest {
                    model: PROVIDER_MODEL,
                    prompt,
                    n: 1,
                    size: resolution.as_str(),
                    response_format: "b64_json",
                })
                .send()
                .await;

            match result {
                Ok(resp) if resp.status().is_success() => {
                    let body: GenerationResponse = resp
                        .json()
                        .await
                        .map_err(|e| format!("Image provider response parse error: {}", e))?;
                    return Self::decode_image(body);
                }
                Ok(resp) => {
                    let status = resp.status();
                    let body = resp
                        .text()
                        .await
                        .unwrap_or_else(|_| "<no body>".to_string());
                    let message = format!("Image generation failed: {} {}", status, body);

                    if !Self::is_retryable(status) {
                        return Err(message);
                    }
                    tracing::warn!(
                        "Attempt {} of image generation failed: {}",
                        attempt + 1,
                        message
                    );
                    last_error = Some(message);
                }
                Err(e) => {
                    tracing::warn!("Attempt {} of image generation failed: {}", attempt + 1, e);
                    last_error = Some(format!("Image provider request failed: {}", e));
                }
            }

            if attempt + 1 < self.max_attempts {
                sleep(self.backoff * 2u32.pow(attempt)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            format!("Image generation failed after {} attempts", self.max_attempts)
        }))
    }
}
