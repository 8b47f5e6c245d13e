pub mod openai;

pub use openai::OpenAiChatClient;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// A single prompt-completion call against a generative model.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Text of the first completion choice, `None` when the model sent none.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>>;
}
