use anyhow::{anyhow, Result};
use regex::Regex;
use serde_json::{json, Value};

use crate::models::message::{FunctionCall, Message};
use crate::models::tool::Tool;

/// Convert internal Message format to OpenAI's API message specification
///
/// Assistant messages that only carry a function call are sent with an explicit null
/// content, which the function calling API expects.
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            let mut converted = json!({
                "role": message.role,
                "content": message.content,
            });

            if let Some(name) = &message.name {
                converted["name"] = json!(sanitize_function_name(name));
            }

            if let Some(call) = &message.function_call {
                converted["function_call"] = json!({
                    "name": sanitize_function_name(&call.name),
                    "arguments": call.arguments,
                });
            }

            converted
        })
        .collect()
}

/// Convert internal Tool format to OpenAI's function declarations
pub fn tools_to_openai_spec(tools: &[Tool]) -> Result<Vec<Value>> {
    let mut tool_names = std::collections::HashSet::new();
    let mut result = Vec::new();

    for tool in tools {
        if !tool_names.insert(&tool.name) {
            return Err(anyhow!("Duplicate tool name: {}", tool.name));
        }

        result.push(json!({
            "name": tool.name,
            "description": tool.description,
            "parameters": tool.input_schema(),
        }));
    }

    Ok(result)
}

/// Convert OpenAI's API response to internal Message format
///
/// Accepts both the `function_call` field and the newer `tool_calls` array; only the first
/// tool call is kept since the transcript holds one request per message.
pub fn openai_response_to_message(response: Value) -> Result<Message> {
    let original = response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .ok_or_else(|| anyhow!("No message in response: {}", response))?;

    let mut message = Message::assistant();

    if let Some(text) = original.get("content").and_then(Value::as_str) {
        message.content = Some(text.to_string());
    }

    let function = original.get("function_call").or_else(|| {
        original
            .get("tool_calls")
            .and_then(|calls| calls.get(0))
            .and_then(|call| call.get("function"))
    });

    if let Some(function) = function.filter(|f| !f.is_null()) {
        let name = function["name"].as_str().unwrap_or_default();
        let arguments = match &function["arguments"] {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        message.function_call = Some(FunctionCall::new(name, arguments));
    }

    Ok(message)
}

fn sanitize_function_name(name: &str) -> String {
    let re = Regex::new(r"[^a-zA-Z0-9_-]").unwrap();
    re.replace_all(name, "_").to_string()
}

#[derive(Debug, thiserror::Error)]
#[error("Context length exceeded. Message: {0}")]
pub struct ContextLengthExceededError(String);

pub fn check_openai_context_length_error(error: &Value) -> Option<ContextLengthExceededError> {
    let code = error.get("code")?.as_str()?;
    if code == "context_length_exceeded" || code == "string_above_max_length" {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error")
            .to_string();
        Some(ContextLengthExceededError(message))
    } else {
        None
    }
}
