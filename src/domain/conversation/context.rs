//! Rendering a conversation prefix for prompting.

use super::message::ContextMessage;

/// Rendered in place of an empty history.
pub const EMPTY_HISTORY_PLACEHOLDER: &str = "No previous conversation history.";

/// Renders each context message as `"Client: <text>"` or
/// `"Consultant: <text>"`, one per line, in original order.
pub fn format_context(context: &[ContextMessage]) -> String {
    if context.is_empty() {
        return EMPTY_HISTORY_PLACEHOLDER.to_string();
    }

    context
        .iter()
        .map(|msg| format!("{}: {}", msg.direction.speaker(), msg.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Direction;

    #[test]
    fn empty_context_renders_placeholder() {
        assert_eq!(format_context(&[]), EMPTY_HISTORY_PLACEHOLDER);
    }

    #[test]
    fn renders_speakers_in_order() {
        let context = vec![
            ContextMessage::new(Direction::Outbound, "Welcome"),
            ContextMessage::new(Direction::Inbound, "Hello"),
        ];
        assert_eq!(format_context(&context), "Consultant: Welcome\nClient: Hello");
    }

    #[test]
    fn non_empty_context_never_renders_placeholder() {
        let context = vec![ContextMessage::new(Direction::Inbound, "")];
        let rendered = format_context(&context);
        assert_ne!(rendered, EMPTY_HISTORY_PLACEHOLDER);
        assert_eq!(rendered, "Client: ");
    }

    #[test]
    fn unrecognized_direction_renders_as_consultant() {
        let context = vec![ContextMessage::new("note", "internal memo")];
        assert_eq!(format_context(&context), "Consultant: internal memo");
    }
}
