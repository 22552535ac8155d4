use anyhow::Result;
use newsgpt::models::message::Message;

pub mod rustyline;

pub trait Prompt {
    fn render(&mut self, message: &Message);
    fn render_error(&mut self, error: &str);
    fn get_input(&mut self) -> Result<Input>;
    fn show_busy(&mut self);
    fn hide_busy(&self);
    fn close(&self);
    fn greet(&self) {
        println!(
            "\nHi, I'm a NewsGPT a breaking news AI assistant. I can give you news for most countries over a wide range of categories."
        );
        println!("Here are some example prompts:\n - Tell me about the recent science discoveries\n - What are the lastest news in the US?\n - What has Elon Musk been up to recently?");
    }
}

pub struct Input {
    pub input_type: InputType,
    pub content: Option<String>, // Optional content as sometimes the user may be issuing a command eg. (Exit)
}

impl Input {
    pub fn message<S: Into<String>>(content: S) -> Self {
        Input {
            input_type: InputType::Message,
            content: Some(content.into()),
        }
    }

    pub fn exit() -> Self {
        Input {
            input_type: InputType::Exit,
            content: None,
        }
    }

    pub fn ask_again() -> Self {
        Input {
            input_type: InputType::AskAgain,
            content: None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum InputType {
    AskAgain, // Ask the user for input again. Control flow command.
    Message,  // User sent a message
    Exit,     // User wants to exit the session
}
