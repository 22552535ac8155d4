use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Tool execution failed: {0}")]
    ExecutionError(#[source] anyhow::Error),

    #[error("Completion failed: {0}")]
    CompletionFailed(#[source] anyhow::Error),

    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("Context limit of {limit} tokens is too small for the system prompt")]
    ContextLimit { limit: usize },
}

pub type AgentResult<T> = Result<T, AgentError>;
