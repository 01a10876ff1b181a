//! Presentation of generated stories
//!
//! The generation pipeline is fire-and-forget toward presentation: it hands
//! over a finished [`Story`] and nothing flows back. Display failures must
//! never invalidate an already-produced story.

pub mod mock;
pub mod terminal;

pub use mock::MockDisplay;
pub use terminal::TerminalDisplay;

use crate::models::Story;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DisplayService: Send + Sync {
    async fn present(&self, story: &Story) -> Result<()>;
}
