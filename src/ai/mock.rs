use super::{ChatService, ImageGenerationService};
use crate::models::StoryOutline;
use crate::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scriptable chat mock. Responses are consumed in order; once the queue is
/// empty a default success is returned.
#[derive(Clone)]
pub struct MockChatClient {
    outline_responses: Arc<Mutex<VecDeque<Result<StoryOutline>>>>,
    story_responses: Arc<Mutex<VecDeque<Result<String>>>>,
    outline_calls: Arc<Mutex<usize>>,
    story_calls: Arc<Mutex<usize>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            outline_responses: Arc::new(Mutex::new(VecDeque::new())),
            story_responses: Arc::new(Mutex::new(VecDeque::new())),
            outline_calls: Arc::new(Mutex::new(0)),
            story_calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_outline_response(self, response: Result<StoryOutline>) -> Self {
        self.outline_responses.lock().unwrap().push_back(response);
        self
    }

    pub fn with_story_response(self, response: Result<String>) -> Self {
        self.story_responses.lock().unwrap().push_back(response);
        self
    }

    pub fn get_outline_call_count(&self) -> usize {
        *self.outline_calls.lock().unwrap()
    }

    pub fn get_story_call_count(&self) -> usize {
        *self.story_calls.lock().unwrap()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn generate_outline(&self, topic: &str) -> Result<StoryOutline> {
        *self.outline_calls.lock().unwrap() += 1;

        match self.outline_responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(StoryOutline {
                story_line: format!("A story about {}", topic),
                image_prompt: format!("An illustration of {}", topic),
                story: None,
            }),
        }
    }

    async fn generate_story(&self, outline: &StoryOutline) -> Result<String> {
        *self.story_calls.lock().unwrap() += 1;

        match self.story_responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(format!("Once upon a time, {}.", outline.story_line)),
        }
    }
}

/// Scriptable image generation mock.
#[derive(Clone)]
pub struct MockImageClient {
    responses: Arc<Mutex<VecDeque<Result<String>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(self, response: Result<String>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate_image(&self, _prompt: &str) -> Result<String> {
        *self.call_count.lock().unwrap() += 1;

        match self.responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok("https://images.test/mock.png".to_string()),
        }
    }
}
