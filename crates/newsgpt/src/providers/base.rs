use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::message::Message;
use crate::models::tool::Tool;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// Whether the model may answer with a function call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionCallPolicy {
    /// The model decides between a text reply and a function call
    Auto,
    /// The model must reply with text
    None,
}

impl FunctionCallPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionCallPolicy::Auto => "auto",
            FunctionCallPolicy::None => "none",
        }
    }
}

/// Base trait for chat completion providers
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate the next assistant message for the transcript
    ///
    /// The transcript is borrowed immutably; providers cannot reorder it.
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[Tool],
        function_call: FunctionCallPolicy,
    ) -> Result<(Message, Usage)>;
}
