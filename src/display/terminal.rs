use super::DisplayService;
use crate::models::Story;
use crate::Result;
use async_trait::async_trait;
use image::GenericImageView;
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Renders a story to the terminal.
///
/// The generated image lives at a remote URL; it is re-fetched and decoded
/// here only to confirm it is displayable. Fetch or decode failures fall back
/// to printing the raw URL so the story text always reaches the user.
pub struct TerminalDisplay {
    client: Client,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    pub(crate) async fn fetch_image_dimensions(&self, url: &str) -> Result<(u32, u32)> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let img = image::load_from_memory(&bytes)?;
        Ok(img.dimensions())
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DisplayService for TerminalDisplay {
    async fn present(&self, story: &Story) -> Result<()> {
        println!();
        println!("Topic: {}", story.topic);
        println!("{}", "-".repeat(60));

        match self.fetch_image_dimensions(&story.image_url).await {
            Ok((width, height)) => {
                println!("Generated image ({}x{}): {}", width, height, story.image_url);
            }
            Err(e) => {
                warn!("Unable to display image: {}", e);
                println!("Image URL: {}", story.image_url);
            }
        }

        println!();
        println!("Story line:");
        println!("  {}", story.story_line);
        println!();
        println!("Story:");
        println!("  {}", story.story);

        Ok(())
    }
}
