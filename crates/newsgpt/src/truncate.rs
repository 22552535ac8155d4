use crate::models::message::Message;
use crate::token_counter::TokenCounter;

/// Drop the oldest messages until the transcript estimate is strictly below `limit`
///
/// The transcript may end up empty. Returns the number of messages removed.
pub fn trim_messages(messages: &mut Vec<Message>, counter: &TokenCounter, limit: usize) -> usize {
    let mut estimate = counter.count_chat_tokens(messages);
    let mut removed = 0;
    while estimate >= limit && !messages.is_empty() {
        messages.remove(0);
        removed += 1;
        estimate = counter.count_chat_tokens(messages);
    }

    if removed > 0 {
        tracing::debug!(
            removed,
            remaining = messages.len(),
            estimate,
            limit,
            "trimmed transcript to fit context limit"
        );
    }
    removed
}
