//! Data models and configuration
//!
//! Defines the story domain types, the structured outline payload returned by
//! the chat endpoint, and environment-backed configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Terminal output of a successful generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub topic: String,
    pub story_line: String,
    pub image_prompt: String,
    /// URL of the remotely hosted generated image. Ephemeral; fetched on
    /// demand for display, never cached locally.
    pub image_url: String,
    pub story: String,
}

/// Structured payload the chat model is instructed to return for a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryOutline {
    pub story_line: String,
    pub image_prompt: String,
    /// Some model variants return the finished story alongside the outline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
}

impl StoryOutline {
    /// Parse the model's response text as an outline.
    ///
    /// Chat models routinely wrap JSON answers in Markdown code fences even
    /// when told not to, so fences are stripped before decoding.
    pub fn parse(raw: &str) -> Result<Self> {
        let body = strip_code_fences(raw);
        serde_json::from_str(body)
            .map_err(|e| Error::MalformedResponse(format!("outline is not valid JSON: {}", e)))
    }
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Runtime configuration, sourced from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub image_model: String,
    pub max_attempts: usize,
    pub retry_base_delay: Duration,
    /// Pause between the image and story stages, giving the hosted image
    /// artifact time to settle before the story references it.
    pub settle_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_key: std::env::var("TOGETHER_API_KEY")
                .map_err(|_| Error::Generic("TOGETHER_API_KEY not set".to_string()))?,
            base_url: std::env::var("TOGETHER_BASE_URL")
                .unwrap_or_else(|_| "https://api.together.xyz/v1".to_string()),
            chat_model: std::env::var("CHAT_MODEL")
                .unwrap_or_else(|_| "meta-llama/Llama-Vision-Free".to_string()),
            image_model: std::env::var("IMAGE_MODEL")
                .unwrap_or_else(|_| "black-forest-labs/FLUX.1-schnell-Free".to_string()),
            max_attempts: env_parsed("MAX_RETRIES", 3),
            retry_base_delay: Duration::from_secs(env_parsed("RETRY_BASE_DELAY_SECS", 2)),
            settle_delay: Duration::from_secs(env_parsed("STAGE_SETTLE_SECS", 2)),
        })
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
