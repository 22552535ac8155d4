use tiktoken_rs::CoreBPE;

use crate::models::message::Message;

/// Tokens spent on framing each message (role and field separators)
const TOKENS_PER_MESSAGE: usize = 4;
/// The provider merges the name into the role, saving one token
const TOKENS_PER_NAME: isize = -1;
/// Every reply is primed with `<|start|>assistant<|message|>`
const TOKENS_REPLY_PRIMING: usize = 2;

/// The encoding used when the model has no known tokenizer
pub const FALLBACK_ENCODING: &str = "cl100k_base";

enum Encoding {
    Bpe(CoreBPE),
    /// Used only if no BPE ranks could be loaded
    Heuristic,
}

/// Estimates how many tokens a provider will bill for a transcript
pub struct TokenCounter {
    encoding: Encoding,
}

impl TokenCounter {
    /// Build a counter for the model, falling back to `cl100k_base` for unknown models
    pub fn new(model_name: &str) -> Self {
        let encoding = match tiktoken_rs::get_bpe_from_model(model_name) {
            Ok(bpe) => Encoding::Bpe(bpe),
            Err(_) => {
                tracing::debug!(
                    model = model_name,
                    "no tokenizer for model, using {}",
                    FALLBACK_ENCODING
                );
                match tiktoken_rs::cl100k_base() {
                    Ok(bpe) => Encoding::Bpe(bpe),
                    Err(e) => {
                        tracing::warn!("failed to load {}: {}", FALLBACK_ENCODING, e);
                        Encoding::Heuristic
                    }
                }
            }
        };
        Self { encoding }
    }

    pub fn count_tokens(&self, text: &str) -> usize {
        match &self.encoding {
            Encoding::Bpe(bpe) => bpe.encode_with_special_tokens(text).len(),
            Encoding::Heuristic if text.is_empty() => 0,
            Encoding::Heuristic => text.len().div_ceil(4),
        }
    }

    /// Estimate the tokens used by a list of messages, including reply priming
    pub fn count_chat_tokens(&self, messages: &[Message]) -> usize {
        let mut num_tokens = 0;
        for message in messages {
            let mut message_tokens = TOKENS_PER_MESSAGE as isize;
            for (key, value) in message.field_values() {
                message_tokens += self.count_tokens(&value) as isize;
                if key == "name" {
                    message_tokens += TOKENS_PER_NAME;
                }
            }
            num_tokens += message_tokens.max(0) as usize;
        }
        num_tokens + TOKENS_REPLY_PRIMING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_tokens_cl100k() {
        let counter = TokenCounter::new("gpt-3.5-turbo-0613");
        assert_eq!(counter.count_tokens("Hello world"), 2);
        assert_eq!(counter.count_tokens(""), 0);
    }

    #[test]
    fn test_unknown_model_falls_back() {
        let known = TokenCounter::new("gpt-3.5-turbo-0613");
        let unknown = TokenCounter::new("definitely-not-a-model");
        let text = "What's happening in tech?";
        assert_eq!(known.count_tokens(text), unknown.count_tokens(text));
    }

    #[test]
    fn test_empty_transcript_is_reply_priming() {
        let counter = TokenCounter::new("gpt-3.5-turbo-0613");
        assert_eq!(counter.count_chat_tokens(&[]), TOKENS_REPLY_PRIMING);
    }

    #[test]
    fn test_single_message_overhead() {
        let counter = TokenCounter::new("gpt-3.5-turbo-0613");
        let message = Message::user().with_text("Hello world");
        // 4 framing + "user" + "Hello world" + 2 priming
        let expected = 4 + counter.count_tokens("user") + 2 + 2;
        assert_eq!(counter.count_chat_tokens(&[message]), expected);
    }

    #[test]
    fn test_name_field_discount() {
        let counter = TokenCounter::new("gpt-3.5-turbo-0613");
        let message = Message::function("get_top_headlines").with_text("[]");
        let expected = 4
            + counter.count_tokens("function")
            + counter.count_tokens("[]")
            + counter.count_tokens("get_top_headlines")
            - 1
            + 2;
        assert_eq!(counter.count_chat_tokens(&[message]), expected);
    }

    #[test]
    fn test_estimate_grows_with_each_message() {
        let counter = TokenCounter::new("gpt-3.5-turbo-0613");
        let mut messages = Vec::new();
        let mut previous = counter.count_chat_tokens(&messages);
        let samples = [
            Message::user().with_text("What's happening in tech?"),
            Message::assistant().with_function_call("get_top_headlines", "{}"),
            Message::function("get_top_headlines").with_text(""),
            Message::assistant().with_text(""),
            Message::system().with_text("Be brief."),
        ];
        for message in samples {
            messages.push(message);
            let current = counter.count_chat_tokens(&messages);
            assert!(current >= previous, "{} < {}", current, previous);
            previous = current;
        }
    }
}
