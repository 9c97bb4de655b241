// Deterministic stand-in for the hosted model behind the real backend.
use crate::message::{ChatMessage, MessageRole};

#[derive(Debug, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Question,
    Thanks,
    Unknown,
}

pub fn detect_intent(msg: &str) -> Intent {
    let msg_lower = msg.to_lowercase();
    let first_word = msg_lower
        .split(|c: char| !c.is_alphanumeric())
        .find(|w| !w.is_empty())
        .unwrap_or_default();

    if matches!(first_word, "hello" | "hi" | "hey") {
        Intent::Greeting
    } else if msg_lower.contains("thank") {
        Intent::Thanks
    } else if msg_lower.trim_end().ends_with('?') {
        Intent::Question
    } else {
        Intent::Unknown
    }
}

/// Builds the assistant reply. `history` holds the recent context including
/// the user message being answered.
pub fn generate_reply(history: &[ChatMessage], user_msg: &str) -> String {
    use Intent::*;

    let earlier_turns = history
        .iter()
        .filter(|m| m.role == MessageRole::User)
        .count()
        .saturating_sub(1);

    match detect_intent(user_msg) {
        Greeting => {
            if earlier_turns == 0 {
                "Hello! How can I help you today?".to_string()
            } else {
                "Hi again, what else can I do for you?".to_string()
            }
        }
        Thanks => "You're welcome!".to_string(),
        Question => format!("Good question. You asked: {}", user_msg.trim()),
        Unknown => {
            if earlier_turns == 0 {
                format!("You said: {}", user_msg.trim())
            } else {
                format!(
                    "You said: {} ({} earlier messages in this conversation)",
                    user_msg.trim(),
                    earlier_turns
                )
            }
        }
    }
}
