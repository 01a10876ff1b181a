use super::DisplayService;
use crate::models::Story;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Recording display mock; can be scripted to fail.
#[derive(Clone)]
pub struct MockDisplay {
    presented: Arc<Mutex<Vec<Story>>>,
    fail: bool,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            presented: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn get_presented(&self) -> Vec<Story> {
        self.presented.lock().unwrap().clone()
    }
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DisplayService for MockDisplay {
    async fn present(&self, story: &Story) -> Result<()> {
        if self.fail {
            return Err(Error::Generic("display unavailable".to_string()));
        }
        self.presented.lock().unwrap().push(story.clone());
        Ok(())
    }
}
