//! Context window construction for completion calls.
//!
//! `build_context` turns a chat's persisted history into the bounded,
//! ordered message list submitted to the completion service, prepending a
//! system preamble while the conversation has no assistant turn yet.

use nexify_types::chat::ChatMessage;
use nexify_types::config::{ContextAnchor, ContextWindow};
use nexify_types::llm::{Message, MessageRole};

/// System preamble injected until the conversation has an assistant turn.
pub const SYSTEM_PREAMBLE: &str = "You are a helpful assistant.";

/// Build the message list for a completion call.
///
/// `messages` must be the chat's history ordered ascending by `created_at`.
/// The window selects the first `size` messages (`Oldest`, the stock
/// policy) or the last `size` (`Newest`); roles and content are carried
/// over verbatim. If no selected message has the assistant role, the
/// [`SYSTEM_PREAMBLE`] is prepended, so the result never exceeds
/// `size + 1` entries.
pub fn build_context(messages: &[ChatMessage], window: &ContextWindow) -> Vec<Message> {
    let selected = match window.anchor {
        ContextAnchor::Oldest => &messages[..messages.len().min(window.size)],
        ContextAnchor::Newest => &messages[messages.len().saturating_sub(window.size)..],
    };

    let mut context: Vec<Message> = selected
        .iter()
        .map(|m| Message::new(m.role.clone(), m.content.clone()))
        .collect();

    if !context.iter().any(|m| m.role == MessageRole::Assistant) {
        context.insert(0, Message::new(MessageRole::System, SYSTEM_PREAMBLE));
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexify_types::chat::ChatId;

    fn history(roles: &[MessageRole]) -> Vec<ChatMessage> {
        roles
            .iter()
            .enumerate()
            .map(|(i, role)| match role {
                MessageRole::User => ChatMessage::user(ChatId::new("c1"), format!("u{i}")),
                MessageRole::Assistant => {
                    ChatMessage::assistant(ChatId::new("c1"), format!("a{i}"))
                }
                MessageRole::System => {
                    let mut m = ChatMessage::user(ChatId::new("c1"), format!("s{i}"));
                    m.role = MessageRole::System;
                    m
                }
            })
            .collect()
    }

    #[test]
    fn test_preamble_injected_without_assistant_turn() {
        let msgs = history(&[MessageRole::User]);
        let context = build_context(&msgs, &ContextWindow::default());
        assert_eq!(context.len(), 2);
        assert_eq!(context[0].role, MessageRole::System);
        assert_eq!(context[0].content, SYSTEM_PREAMBLE);
        assert_eq!(context[1].role, MessageRole::User);
    }

    #[test]
    fn test_no_preamble_once_assistant_present() {
        let msgs = history(&[MessageRole::User, MessageRole::Assistant, MessageRole::User]);
        let context = build_context(&msgs, &ContextWindow::default());
        assert_eq!(context.len(), 3);
        assert!(context.iter().all(|m| m.role != MessageRole::System));
    }

    #[test]
    fn test_oldest_anchor_keeps_first_window() {
        // 12 user turns; the default window keeps the earliest 10.
        let msgs = history(&vec![MessageRole::User; 12]);
        let context = build_context(&msgs, &ContextWindow::default());
        // 10 selected + preamble (no assistant among them).
        assert_eq!(context.len(), 11);
        assert_eq!(context[1].content, "u0");
        assert_eq!(context[10].content, "u9");
    }

    #[test]
    fn test_newest_anchor_keeps_last_window() {
        let msgs = history(&vec![MessageRole::User; 12]);
        let window = ContextWindow {
            size: 10,
            anchor: ContextAnchor::Newest,
        };
        let context = build_context(&msgs, &window);
        assert_eq!(context.len(), 11);
        assert_eq!(context[1].content, "u2");
        assert_eq!(context[10].content, "u11");
    }

    #[test]
    fn test_window_never_exceeds_size_plus_preamble() {
        let msgs = history(&vec![MessageRole::User; 50]);
        let context = build_context(&msgs, &ContextWindow::default());
        assert!(context.len() <= 11);
    }

    #[test]
    fn test_assistant_outside_window_still_gets_preamble() {
        // Assistant turn exists at position 10 but the oldest-10 window
        // does not select it, so the preamble is injected.
        let mut roles = vec![MessageRole::User; 10];
        roles.push(MessageRole::Assistant);
        let msgs = history(&roles);
        let context = build_context(&msgs, &ContextWindow::default());
        assert_eq!(context[0].role, MessageRole::System);
    }

    #[test]
    fn test_short_history_passes_through() {
        let msgs = history(&[MessageRole::User, MessageRole::Assistant]);
        let context = build_context(&msgs, &ContextWindow::default());
        assert_eq!(context.len(), 2);
        assert_eq!(context[0].content, "u0");
        assert_eq!(context[1].content, "a1");
    }

    #[test]
    fn test_empty_history_yields_preamble_only() {
        let context = build_context(&[], &ContextWindow::default());
        assert_eq!(context.len(), 1);
        assert_eq!(context[0].role, MessageRole::System);
    }

    #[test]
    fn test_stored_system_role_carried_verbatim() {
        let msgs = history(&[MessageRole::System, MessageRole::Assistant]);
        let context = build_context(&msgs, &ContextWindow::default());
        // Assistant present, so no injected preamble; the stored system
        // message passes through untouched.
        assert_eq!(context.len(), 2);
        assert_eq!(context[0].role, MessageRole::System);
        assert_eq!(context[0].content, "s0");
    }
}
