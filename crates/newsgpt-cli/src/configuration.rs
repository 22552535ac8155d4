use crate::error::{to_env_var, ConfigError};
use config::{Config, Environment, File};
use newsgpt::agent::{
    AgentConfig, DEFAULT_CONTEXT_LIMIT, DEFAULT_FUNCTION_CALL_LIMIT, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_TOKENIZER_MODEL,
};
use newsgpt::newsapi::{NewsApiConfig, NEWSAPI_HOST};
use newsgpt::providers::configs::{OpenAiProviderConfig, OPENAI_HOST, OPENAI_MODEL};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const NEWS_API_KEY_VAR: &str = "NEWS_API_KEY";

#[derive(Debug, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_openai_host")]
    pub host: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<i32>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            host: default_openai_host(),
            api_key: None,
            model: default_model(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl ProviderSettings {
    pub fn into_config(self) -> Result<OpenAiProviderConfig, ConfigError> {
        let api_key = self.api_key.ok_or_else(|| ConfigError::MissingEnvVar {
            env_var: OPENAI_API_KEY_VAR.to_string(),
        })?;
        Ok(OpenAiProviderConfig {
            host: self.host,
            api_key,
            model: self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct NewsSettings {
    #[serde(default = "default_news_host")]
    pub host: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            host: default_news_host(),
            api_key: None,
        }
    }
}

impl NewsSettings {
    pub fn into_config(self) -> Result<NewsApiConfig, ConfigError> {
        let api_key = self.api_key.ok_or_else(|| ConfigError::MissingEnvVar {
            env_var: NEWS_API_KEY_VAR.to_string(),
        })?;
        Ok(NewsApiConfig {
            host: self.host,
            api_key,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    pub context_limit: usize,
    pub function_call_limit: usize,
    pub tokenizer_model: String,
    pub system_prompt: String,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            context_limit: DEFAULT_CONTEXT_LIMIT,
            function_call_limit: DEFAULT_FUNCTION_CALL_LIMIT,
            tokenizer_model: DEFAULT_TOKENIZER_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl AgentSettings {
    pub fn into_config(self) -> AgentConfig {
        AgentConfig {
            system_prompt: self.system_prompt,
            context_limit: self.context_limit,
            function_call_limit: self.function_call_limit,
            tokenizer_model: self.tokenizer_model,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub news: NewsSettings,
    #[serde(default)]
    pub agent: AgentSettings,
}

impl Settings {
    /// Load settings from the given file, or the default config file when it exists
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => match default_config_file() {
                Some(path) => File::from(path).required(false),
                None => return Self::load_and_validate(None),
            },
        };
        Self::load_and_validate(Some(file))
    }

    fn load_and_validate(
        file: Option<File<config::FileSourceFile, config::FileFormat>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file);
        }

        let config = builder
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix("NEWSGPT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Credentials under their well-known names win over everything else
            .set_override_option("provider.api_key", env::var(OPENAI_API_KEY_VAR).ok())?
            .set_override_option("news.api_key", env::var(NEWS_API_KEY_VAR).ok())?
            .build()?;

        let settings: Self = config.try_deserialize().map_err(|err| {
            tracing::debug!("Configuration error: {:?}", &err);
            ConfigError::Other(err)
        })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.function_call_limit == 0 {
            return Err(ConfigError::Invalid(format!(
                "function_call_limit must be at least 1 (set {})",
                to_env_var("agent.function_call_limit")
            )));
        }
        if self.agent.context_limit == 0 {
            return Err(ConfigError::Invalid(format!(
                "context_limit must be at least 1 (set {})",
                to_env_var("agent.context_limit")
            )));
        }
        Ok(())
    }
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("newsgpt").join("config.toml"))
}

fn default_model() -> String {
    OPENAI_MODEL.to_string()
}

fn default_openai_host() -> String {
    OPENAI_HOST.to_string()
}

fn default_news_host() -> String {
    NEWSAPI_HOST.to_string()
}
