use super::role::Role;
use serde::{Deserialize, Serialize};

/// A request from the model to invoke a function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// The arguments exactly as the model produced them, usually a JSON object
    pub arguments: String,
}

impl FunctionCall {
    pub fn new<N: Into<String>, A: Into<String>>(name: N, arguments: A) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A message to or from an LLM
pub struct Message {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Only set on function messages, names the function that produced the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

impl Message {
    fn new(role: Role) -> Self {
        Message {
            role,
            content: None,
            name: None,
            function_call: None,
        }
    }

    /// Create a new user message
    pub fn user() -> Self {
        Self::new(Role::User)
    }

    /// Create a new assistant message
    pub fn assistant() -> Self {
        Self::new(Role::Assistant)
    }

    /// Create a new system message
    pub fn system() -> Self {
        Self::new(Role::System)
    }

    /// Create a new function result message for the named function
    pub fn function<S: Into<String>>(name: S) -> Self {
        Message {
            name: Some(name.into()),
            ..Self::new(Role::Function)
        }
    }

    /// Set the text content of the message
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.content = Some(text.into());
        self
    }

    /// Attach a function call request to the message
    pub fn with_function_call<N: Into<String>, A: Into<String>>(
        mut self,
        name: N,
        arguments: A,
    ) -> Self {
        self.function_call = Some(FunctionCall::new(name, arguments));
        self
    }

    /// Get the text content, if any
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn has_function_call(&self) -> bool {
        self.function_call.is_some()
    }

    /// The string value of every field present on the message, in wire order
    ///
    /// Used for token estimation. The function call is rendered as its JSON object.
    pub fn field_values(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("role", self.role.to_string())];
        if let Some(content) = &self.content {
            fields.push(("content", content.clone()));
        }
        if let Some(name) = &self.name {
            fields.push(("name", name.clone()));
        }
        if let Some(call) = &self.function_call {
            let rendered = serde_json::to_string(call)
                .unwrap_or_else(|_| format!("{} {}", call.name, call.arguments));
            fields.push(("function_call", rendered));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_function_message_carries_name() {
        let message = Message::function("get_top_headlines").with_text("[]");
        assert_eq!(message.role, Role::Function);
        assert_eq!(message.name.as_deref(), Some("get_top_headlines"));
        assert_eq!(message.text(), Some("[]"));
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let message = Message::user().with_text("Hello");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value, json!({"role": "user", "content": "Hello"}));

        let call = Message::assistant().with_function_call("lookup", "{}");
        let value = serde_json::to_value(&call).unwrap();
        assert_eq!(
            value,
            json!({"role": "assistant", "function_call": {"name": "lookup", "arguments": "{}"}})
        );
    }

    #[test]
    fn test_field_values_order() {
        let message = Message::function("get_top_headlines").with_text("No articles found");
        let keys: Vec<_> = message.field_values().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["role", "content", "name"]);

        let call = Message::assistant().with_function_call("lookup", "{\"q\":1}");
        let fields = call.field_values();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].0, "function_call");
        assert!(fields[1].1.contains("lookup"));
    }
}
