use super::client::GeminiHttpClient;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use crate::ai::ClassificationService;
use crate::encoder::EncodedImage;
use crate::models::{ApiKey, Config};
use crate::{prompts, Error, Result};
use async_trait::async_trait;

/// Corn leaf classifier backed by Gemini structured output.
pub struct GeminiDiagnosisClient {
    http: GeminiHttpClient,
}

impl GeminiDiagnosisClient {
    pub fn new(api_key: ApiKey, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: ApiKey, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, client),
        }
    }

    /// Build from configuration, failing with [`Error::Configuration`] when no
    /// credential is configured. No request is made either way.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?;
        let mut client = Self::new(api_key, config.model.clone());
        if let Some(base_url) = &config.base_url {
            client = client.with_base_url(base_url.clone());
        }
        Ok(client)
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    fn build_request(image: &EncodedImage) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::from(image),
                    Part::Text {
                        text: prompts::DIAGNOSIS.to_string(),
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(prompts::diagnosis_schema()),
            }),
        }
    }
}

#[async_trait]
impl ClassificationService for GeminiDiagnosisClient {
    async fn classify(&self, image: &EncodedImage) -> Result<String> {
        tracing::debug!(
            "Requesting diagnosis for {} image ({} bytes) via Gemini {}",
            image.mime_type,
            image.decoded_len(),
            self.model()
        );

        let request = Self::build_request(image);
        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        response.text().ok_or_else(|| {
            let reason = response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone())
                .unwrap_or_else(|| "no candidates".to_string());
            tracing::error!("Gemini returned no diagnosis text (reason: {})", reason);
            Error::Transport(format!("No text in Gemini diagnosis response ({})", reason))
        })
    }
}
