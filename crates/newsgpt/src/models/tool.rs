use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// The JSON type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Integer,
    Number,
    Boolean,
}

/// A single named parameter a tool accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParameterType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When set, the only values the parameter may take
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

impl ToolParameter {
    pub fn new<S: Into<String>>(name: S, kind: ParameterType) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            allowed_values: None,
        }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// A tool that can be used by a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// The name of the tool
    pub name: String,
    /// A description of what the tool does
    pub description: String,
    /// Parameters that the tool accepts, in declaration order
    pub parameters: Vec<ToolParameter>,
    /// Names of the parameters the model must always provide
    pub required: Vec<String>,
}

impl Tool {
    /// Create a new tool with the given name and description
    pub fn new<N, D>(name: N, description: D) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Tool {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            required: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ToolParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_required<S: Into<String>>(mut self, name: S) -> Self {
        self.required.push(name.into());
        self
    }

    /// Render the parameters as a JSON schema object
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for parameter in &self.parameters {
            let mut property = json!({ "type": parameter.kind });
            if let Some(description) = &parameter.description {
                property["description"] = json!(description);
            }
            if let Some(values) = &parameter.allowed_values {
                property["enum"] = json!(values);
            }
            properties.insert(parameter.name.clone(), property);
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": self.required,
        })
    }
}
