use std::io::{self, Write};

use anyhow::Result;
use bat::WrappingMode;
use cliclack::spinner;
use console::style;
use newsgpt::models::message::Message;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::{Input, Prompt};

const PROMPT: &str = "What would you like to know? => ";
const NO_REPLY_TEXT: &str = "(The assistant did not return any text.)";

pub struct RustylinePrompt {
    editor: DefaultEditor,
    spinner: cliclack::ProgressBar,
}

impl RustylinePrompt {
    pub fn new() -> Result<Self> {
        Ok(RustylinePrompt {
            editor: DefaultEditor::new()?,
            spinner: spinner(),
        })
    }
}

/// The text shown for the final message of a turn, trimmed of surrounding whitespace
pub fn reply_text(message: &Message) -> &str {
    message
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(NO_REPLY_TEXT)
}

/// Interpret a line typed by the user
pub fn parse_input(line: &str) -> Input {
    let message_text = line.trim();

    if message_text.is_empty() {
        Input::ask_again()
    } else if ["exit", "quit", "/exit", "/quit"]
        .iter()
        .any(|command| message_text.eq_ignore_ascii_case(command))
    {
        Input::exit()
    } else {
        Input::message(message_text)
    }
}

fn print_markdown(content: &str) {
    let printed = bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme("zenburn")
        .language("Markdown")
        .wrapping_mode(WrappingMode::Character)
        .print();
    if printed.is_err() {
        println!("{}", content);
    }
}

impl Prompt for RustylinePrompt {
    fn render(&mut self, message: &Message) {
        println!("\n\n{}\n", style("==Response==").bold());
        print_markdown(reply_text(message));
        println!("\n{}", style("==End of response==").bold());
        let _ = io::stdout().flush();
    }

    fn render_error(&mut self, error: &str) {
        eprintln!("{} {}", style("Error:").red().bold(), error);
    }

    fn show_busy(&mut self) {
        self.spinner = spinner();
        self.spinner.start("Working...");
    }

    fn hide_busy(&self) {
        self.spinner.stop("");
    }

    fn get_input(&mut self) -> Result<Input> {
        println!();
        match self.editor.readline(PROMPT) {
            Ok(line) => {
                let _ = self.editor.add_history_entry(line.as_str());
                Ok(parse_input(&line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(Input::exit()),
            Err(e) => {
                eprintln!("Input error: {}", e);
                Ok(Input::exit())
            }
        }
    }

    fn close(&self) {
        println!("Goodbye!");
    }
}
