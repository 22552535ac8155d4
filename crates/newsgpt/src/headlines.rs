//! The `get_top_headlines` tool: its declaration and how its arguments are read
use serde_json::Value;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::models::tool::{ParameterType, Tool, ToolParameter};

pub const TOOL_NAME: &str = "get_top_headlines";

/// News categories the headlines endpoint understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    Business,
    Entertainment,
    General,
    Health,
    Science,
    Sports,
    Technology,
}

/// Filters for a top headlines lookup, all optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlineQuery {
    pub query: Option<String>,
    pub country: Option<String>,
    pub category: Option<Category>,
}

impl HeadlineQuery {
    /// Read the filters from the arguments the model produced
    ///
    /// Anything missing, of the wrong type or outside the category list is treated as not
    /// provided; this never fails.
    pub fn from_arguments(arguments: &str) -> Self {
        let value: Value = match serde_json::from_str(arguments) {
            Ok(value) => value,
            Err(e) => {
                if !arguments.trim().is_empty() {
                    tracing::warn!("could not parse {} arguments: {}", TOOL_NAME, e);
                }
                return Self::default();
            }
        };

        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        let category = text("category").and_then(|raw| match raw.parse::<Category>() {
            Ok(category) => Some(category),
            Err(_) => {
                tracing::warn!(category = %raw, "ignoring unknown news category");
                None
            }
        });

        Self {
            query: text("query"),
            country: text("country"),
            category,
        }
    }
}

/// The declaration of the headlines tool handed to the model
pub fn headlines_tool() -> Tool {
    Tool::new(
        TOOL_NAME,
        "Get top news headlines by country and/or category",
    )
    .with_parameter(
        ToolParameter::new("query", ParameterType::String)
            .with_description("Freeform keywords or a phrase to search for."),
    )
    .with_parameter(
        ToolParameter::new("country", ParameterType::String).with_description(
            "The 2-letter ISO 3166-1 code of the country you want to get headlines for",
        ),
    )
    .with_parameter(
        ToolParameter::new("category", ParameterType::String)
            .with_description("The category you want to get headlines for")
            .with_allowed_values(Category::iter().map(|c| c.to_string())),
    )
}
