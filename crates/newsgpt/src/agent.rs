use crate::errors::{AgentError, AgentResult};
use crate::headlines::{headlines_tool, HeadlineQuery};
use crate::models::message::Message;
use crate::models::role::Role;
use crate::models::tool::Tool;
use crate::newsapi::HeadlineSource;
use crate::providers::base::{FunctionCallPolicy, Provider};
use crate::token_counter::TokenCounter;
use crate::truncate::trim_messages;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a assistant that provides news and headlines to user requests. Always try to get the lastest breaking stories using the available function calls.";
pub const DEFAULT_CONTEXT_LIMIT: usize = 15500;
pub const DEFAULT_FUNCTION_CALL_LIMIT: usize = 3;
pub const DEFAULT_TOKENIZER_MODEL: &str = "gpt-3.5-turbo-0613";

/// Knobs for one agent, fixed for the life of the process
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Appended before every completion and removed right after
    pub system_prompt: String,
    /// The transcript sent to the provider is trimmed to strictly below this estimate
    pub context_limit: usize,
    /// Maximum completions per user turn; the last one may not call functions
    pub function_call_limit: usize,
    /// The model whose tokenizer is used for estimates
    pub tokenizer_model: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            context_limit: DEFAULT_CONTEXT_LIMIT,
            function_call_limit: DEFAULT_FUNCTION_CALL_LIMIT,
            tokenizer_model: DEFAULT_TOKENIZER_MODEL.to_string(),
        }
    }
}

/// Agent integrates a chat model with the headlines source it may call
pub struct Agent {
    provider: Box<dyn Provider>,
    news: Box<dyn HeadlineSource>,
    tools: Vec<Tool>,
    token_counter: TokenCounter,
    config: AgentConfig,
}

impl Agent {
    pub fn new(
        provider: Box<dyn Provider>,
        news: Box<dyn HeadlineSource>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            news,
            tools: vec![headlines_tool()],
            token_counter: TokenCounter::new(&config.tokenizer_model),
            config,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Run one completion cycle against the transcript
    ///
    /// The system prompt is appended, the transcript trimmed to the context limit, and the
    /// model's reply appended once the prompt is removed again. A requested headlines call
    /// is executed and its result appended as a function message.
    pub async fn complete(
        &self,
        messages: &mut Vec<Message>,
        function_call: FunctionCallPolicy,
    ) -> AgentResult<()> {
        let directive = Message::system().with_text(&self.config.system_prompt);
        messages.push(directive.clone());

        trim_messages(messages, &self.token_counter, self.config.context_limit);
        if messages.last() != Some(&directive) {
            // Only the prompt itself is left and it does not fit
            messages.clear();
            return Err(AgentError::ContextLimit {
                limit: self.config.context_limit,
            });
        }

        tracing::debug!(
            messages = messages.len(),
            estimate = self.token_counter.count_chat_tokens(messages),
            function_call = function_call.as_str(),
            "requesting completion"
        );
        let result = self
            .provider
            .complete(messages, &self.tools, function_call)
            .await;

        // The prompt must still be the tail, whatever the outcome of the call
        match messages.pop() {
            Some(last) if last == directive => {}
            Some(last) => {
                messages.push(last);
                return Err(AgentError::ProtocolViolation(
                    "system prompt was not the last message after completion".to_string(),
                ));
            }
            None => {
                return Err(AgentError::ProtocolViolation(
                    "transcript was emptied during completion".to_string(),
                ))
            }
        }

        let (response, usage) = result.map_err(AgentError::CompletionFailed)?;
        tracing::debug!(
            input_tokens = ?usage.input_tokens,
            output_tokens = ?usage.output_tokens,
            total_tokens = ?usage.total_tokens,
            "completion usage"
        );

        let call = response.function_call.clone();
        messages.push(response);

        let Some(call) = call else {
            return Ok(());
        };

        if function_call == FunctionCallPolicy::None {
            tracing::warn!(
                function = %call.name,
                "model requested a function call while calls were disabled, ignoring it"
            );
            return Ok(());
        }

        let Some(tool) = self.tools.iter().find(|tool| tool.name == call.name) else {
            let error = AgentError::ToolNotFound(call.name.clone());
            tracing::warn!("{}", error);
            let available: Vec<&str> = self.tools.iter().map(|t| t.name.as_str()).collect();
            messages.push(Message::function(&call.name).with_text(format!(
                "Error: {}. Available functions: {}",
                error,
                available.join(", ")
            )));
            return Ok(());
        };

        let query = HeadlineQuery::from_arguments(&call.arguments);
        tracing::debug!(?query, "fetching top headlines");
        let headlines = self
            .news
            .top_headlines(&query)
            .await
            .map_err(AgentError::ExecutionError)?;

        messages.push(Message::function(&tool.name).with_text(headlines));
        Ok(())
    }

    /// Answer the latest user message, chaining function calls up to the configured limit
    ///
    /// Returns the final message of the turn, which is the assistant's reply.
    pub async fn reply<'a>(&self, messages: &'a mut Vec<Message>) -> AgentResult<&'a Message> {
        let limit = self.config.function_call_limit.max(1);
        let mut calls = 0;

        loop {
            calls += 1;
            let policy = if calls >= limit {
                FunctionCallPolicy::None
            } else {
                FunctionCallPolicy::Auto
            };
            self.complete(messages, policy).await?;

            let chained = messages
                .last()
                .is_some_and(|message| message.role == Role::Function);
            if !chained || policy == FunctionCallPolicy::None {
                break;
            }
        }

        messages.last().ok_or_else(|| {
            AgentError::ProtocolViolation("transcript is empty after reply".to_string())
        })
    }
}
