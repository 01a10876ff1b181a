//! Application orchestration: topic in, illustrated story out.

use crate::ai::{ChatService, ImageGenerationService, TogetherChatClient, TogetherImageClient};
use crate::display::{DisplayService, TerminalDisplay};
use crate::models::{Config, Story};
use crate::retry::RetryPolicy;
use crate::{Error, Result};
use std::fmt;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

/// Pipeline stages, in execution order. A failure in any stage halts the
/// pipeline and surfaces the stage name in the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Outline,
    Image,
    Story,
}

impl Stage {
    fn as_str(&self) -> &'static str {
        match self {
            Stage::Outline => "outline generation",
            Stage::Image => "image generation",
            Stage::Story => "story generation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinates outline, image, and story generation for one topic.
pub struct App {
    chat: Box<dyn ChatService>,
    image_gen: Box<dyn ImageGenerationService>,
    display: Box<dyn DisplayService>,
    retry: RetryPolicy,
    settle_delay: Duration,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub chat: Box<dyn ChatService>,
    pub image_gen: Box<dyn ImageGenerationService>,
    pub display: Box<dyn DisplayService>,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices, retry: RetryPolicy, settle_delay: Duration) -> Self {
        Self {
            chat: services.chat,
            image_gen: services.image_gen,
            display: services.display,
            retry,
            settle_delay,
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;

        // Reuse one HTTP connection pool across both generation clients.
        let http_client = reqwest::Client::new();

        let chat = Box::new(
            TogetherChatClient::new_with_client(
                config.api_key.clone(),
                config.chat_model.clone(),
                http_client.clone(),
            )
            .with_base_url(config.base_url.clone()),
        );
        info!("Chat model: {}", config.chat_model);

        let image_gen = Box::new(
            TogetherImageClient::new_with_client(
                config.api_key.clone(),
                config.image_model.clone(),
                http_client,
            )
            .with_base_url(config.base_url.clone()),
        );
        info!("Image model: {}", config.image_model);

        Ok(Self::with_services(
            AppServices {
                chat,
                image_gen,
                display: Box::new(TerminalDisplay::new()),
            },
            RetryPolicy::new(config.max_attempts, config.retry_base_delay),
            config.settle_delay,
        ))
    }

    /// Generate a story for a topic and present it.
    ///
    /// Presentation failures are logged but do not fail the run; the story
    /// was already produced.
    pub async fn run(&self, topic: &str) -> Result<Story> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(Error::Generic("Topic must not be empty".to_string()));
        }

        let story = self.generate(topic).await?;

        if let Err(e) = self.display.present(&story).await {
            warn!("Failed to present story: {}", e);
        }

        Ok(story)
    }

    /// Run the generation pipeline: outline, then image, then story.
    ///
    /// Stages are strictly sequential; the story prompt depends on the
    /// outline produced alongside the image prompt, and the image must exist
    /// before the story references it.
    pub async fn generate(&self, topic: &str) -> Result<Story> {
        let run_id = Uuid::new_v4();
        info!("[{}] Generating story for topic: {}", run_id, topic);

        info!("[{}] Stage: {}", run_id, Stage::Outline);
        let outline = self
            .retry
            .run(|| self.chat.generate_outline(topic))
            .await
            .map_err(|e| Error::stage(Stage::Outline.as_str(), e))?;
        info!(
            "[{}] Outline: {} / {}",
            run_id, outline.story_line, outline.image_prompt
        );

        info!("[{}] Stage: {}", run_id, Stage::Image);
        let image_url = self
            .retry
            .run(|| self.image_gen.generate_image(&outline.image_prompt))
            .await
            .map_err(|e| Error::stage(Stage::Image.as_str(), e))?;
        info!("[{}] Image hosted at: {}", run_id, image_url);

        // The hosted image is processed asynchronously server-side; give it a
        // moment to settle before the story stage references it.
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }

        info!("[{}] Stage: {}", run_id, Stage::Story);
        let story_text = match &outline.story {
            Some(text) => {
                info!("[{}] Outline already carries a story, skipping call", run_id);
                text.clone()
            }
            None => self
                .retry
                .run(|| self.chat.generate_story(&outline))
                .await
                .map_err(|e| Error::stage(Stage::Story.as_str(), e))?,
        };

        info!("[{}] Generation done", run_id);

        Ok(Story {
            topic: topic.to_string(),
            story_line: outline.story_line,
            image_prompt: outline.image_prompt,
            image_url,
            story: story_text,
        })
    }
}
