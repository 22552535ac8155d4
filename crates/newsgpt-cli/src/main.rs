use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use newsgpt::agent::Agent;
use newsgpt::newsapi::NewsApiClient;
use newsgpt::providers::openai::OpenAiProvider;

mod configuration;
mod error;
mod prompt;
mod session;

use configuration::Settings;
use prompt::rustyline::RustylinePrompt;
use session::Session;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to <config dir>/newsgpt/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the conversation
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    let provider = OpenAiProvider::new(settings.provider.into_config()?)?;
    let news = NewsApiClient::new(settings.news.into_config()?)?;
    let agent = Agent::new(
        Box::new(provider),
        Box::new(news),
        settings.agent.into_config(),
    );

    let prompt = RustylinePrompt::new()?;
    let mut session = Session::new(agent, Box::new(prompt));
    session.start().await
}
