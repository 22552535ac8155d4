use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;

use crate::models::message::Message;
use crate::models::tool::Tool;
use crate::providers::base::{FunctionCallPolicy, Provider, Usage};

/// What the mock provider saw on one call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub messages: Vec<Message>,
    pub tools: Vec<Tool>,
    pub function_call: FunctionCallPolicy,
}

/// A mock provider that returns pre-configured responses for testing
///
/// Clones share their scripted responses and call log.
#[derive(Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<Result<Message>>>>,
    /// When set, answers every call with this message after the scripted ones run out
    repeat: Option<Message>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<Message>) -> Self {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    /// Create a mock provider whose responses may be failures
    pub fn with_results(responses: Vec<Result<Message>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            repeat: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock provider answering `auto` calls with `message` and `none` calls with text
    pub fn always(message: Message) -> Self {
        Self {
            repeat: Some(message),
            ..Self::new(vec![])
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[Tool],
        function_call: FunctionCallPolicy,
    ) -> Result<(Message, Usage)> {
        self.calls.lock().unwrap().push(RecordedCall {
            messages: messages.to_vec(),
            tools: tools.to_vec(),
            function_call,
        });

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            return responses.remove(0).map(|m| (m, Usage::default()));
        }
        match (&self.repeat, function_call) {
            (Some(message), FunctionCallPolicy::Auto) => Ok((message.clone(), Usage::default())),
            (Some(_), FunctionCallPolicy::None) => Ok((
                Message::assistant().with_text("Here is what I found."),
                Usage::default(),
            )),
            (None, _) => Err(anyhow!("MockProvider ran out of responses")),
        }
    }
}
