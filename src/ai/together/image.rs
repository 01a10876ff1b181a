use super::client::TogetherHttpClient;
use super::types::{ImageGenerationRequest, ImageGenerationResponse};
use crate::ai::ImageGenerationService;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;

pub struct TogetherImageClient {
    http: TogetherHttpClient,
    model: String,
}

impl TogetherImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: Client) -> Self {
        Self {
            http: TogetherHttpClient::new_with_client(api_key, client),
            model,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl ImageGenerationService for TogetherImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        tracing::debug!("Requesting image generation");

        let request = ImageGenerationRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            n: 1,
        };

        let response: ImageGenerationResponse =
            self.http.post("/images/generations", &request).await?;

        let url = response
            .data
            .first()
            .and_then(|item| item.url.clone())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::AiProvider("No image URL in Together response".to_string()))?;

        Ok(url)
    }
}
