use newsgpt::agent::Agent;
use newsgpt::models::message::Message;

use crate::prompt::{InputType, Prompt};

pub struct Session<'a> {
    agent: Agent,
    prompt: Box<dyn Prompt + 'a>,
    messages: Vec<Message>,
}

impl<'a> Session<'a> {
    pub fn new(agent: Agent, prompt: Box<dyn Prompt + 'a>) -> Self {
        Session {
            agent,
            prompt,
            messages: Vec::new(),
        }
    }

    /// Read and answer user messages until the user leaves
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.prompt.greet();

        loop {
            let input = self.prompt.get_input()?;
            match input.input_type {
                InputType::Message => {
                    if let Some(content) = input.content {
                        self.messages.push(Message::user().with_text(content));
                    }
                }
                InputType::Exit => break,
                InputType::AskAgain => continue,
            }

            self.prompt.show_busy();
            let result = self.agent.reply(&mut self.messages).await;
            self.prompt.hide_busy();

            // A failed turn is reported and the conversation goes on
            match result {
                Ok(reply) => self.prompt.render(reply),
                Err(e) => {
                    tracing::error!("turn failed: {}", e);
                    self.prompt.render_error(&e.to_string());
                }
            }
        }

        tracing::debug!(messages = self.messages.len(), "session closed");
        self.prompt.close();
        Ok(())
    }
}
