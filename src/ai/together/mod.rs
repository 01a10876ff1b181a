//! Together AI provider (OpenAI-compatible wire format).

pub mod chat;
pub mod client;
pub mod image;
pub mod types;

pub use chat::TogetherChatClient;
pub use client::TogetherHttpClient;
pub use image::TogetherImageClient;
