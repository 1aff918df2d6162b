//! Scripted `TextGenerator` for tests: replays queued responses in order and
//! records every prompt it receives.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::llm_client::{LlmError, TextGenerator};

pub enum Scripted {
    Text(String),
    RateLimited,
    Fail(String),
}

#[derive(Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Scripted>>,
    prompts: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let generator = Self::new();
        generator.push(Scripted::Text(text.into()));
        generator
    }

    /// Sleeps before answering, so concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push(&self, response: Scripted) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Text(text)) => Ok(text),
            Some(Scripted::RateLimited) => Err(LlmError::RateLimited("quota exceeded".to_string())),
            Some(Scripted::Fail(message)) => Err(LlmError::Api {
                status: 500,
                message,
            }),
            None => Err(LlmError::MalformedResponse("no scripted response left".to_string())),
        }
    }
}
