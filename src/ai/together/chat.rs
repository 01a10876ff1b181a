use super::client::TogetherHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage};
use crate::ai::ChatService;
use crate::models::StoryOutline;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use reqwest::Client;

pub struct TogetherChatClient {
    http: TogetherHttpClient,
    model: String,
}

impl TogetherChatClient {
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

    async fn complete(&self, content: String) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(content),
            }],
            max_tokens: 1024,
        };

        let response = self.http.chat_completion(request).await?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| Error::AiProvider("No response from Together chat API".to_string()))
    }
}

#[async_trait]
impl ChatService for TogetherChatClient {
    async fn generate_outline(&self, topic: &str) -> Result<StoryOutline> {
        tracing::debug!("Requesting story outline for topic: {}", topic);

        let content = prompts::render(prompts::OUTLINE_USER, &[("topic", topic)]);
        let raw = self.complete(content).await?;
        StoryOutline::parse(&raw)
    }

    async fn generate_story(&self, outline: &StoryOutline) -> Result<String> {
        tracing::debug!("Requesting story for line: {}", outline.story_line);

        let content = prompts::render(
            prompts::STORY_USER,
            &[
                ("image_prompt", outline.image_prompt.as_str()),
                ("story_line", outline.story_line.as_str()),
            ],
        );
        self.complete(content).await
    }
}
