//! AI service integration for outline, story, and image generation
//!
//! Provides trait seams for the hosted chat and image endpoints plus the
//! Together AI provider implementation and scriptable mocks.

pub mod mock;
pub mod together;

pub use mock::{MockChatClient, MockImageClient};
pub use together::{TogetherChatClient, TogetherHttpClient, TogetherImageClient};

use crate::models::StoryOutline;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Produce a story line and image prompt for a topic.
    async fn generate_outline(&self, topic: &str) -> Result<StoryOutline>;

    /// Write the short story for an already-generated outline.
    async fn generate_story(&self, outline: &StoryOutline) -> Result<String>;
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Render an image for a prompt, returning the hosted image URL.
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}
