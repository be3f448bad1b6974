//! Context builder for assembling prompts

use vacay_providers::Message;

use crate::booking::BookingState;

/// Builds the message list sent to the model on every call
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder;

impl ContextBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the system prompt, embedding the booking state
    pub fn build_system_prompt(&self, booking: &BookingState) -> String {
        let today = chrono::Local::now().format("%Y-%m-%d (%A)");

        let mut prompt = format!(
            r#"You are a vacation assistant helping a customer book a vacation package.

## Today
{today}

## How to guide the booking
1. Confirm the destination offered by the package (get_package_summary), or help the customer explore alternatives.
2. Ask for the customer's zip code and check it with verify_zip_code before continuing.
3. Ask how many guests are travelling and which dates suit them, then call get_availability.
4. Help them choose a check-in date and length of stay, then call get_accommodation_details.
5. Once they confirm a tour date and time, accommodation and room type, call record_booking_selection.

Only offer dates, tours and rooms returned by the tools. Dates use YYYY-MM-DD.
Ask one question at a time and keep replies short and friendly."#
        );

        prompt.push_str("\n\n## Booking so far\n");
        prompt.push_str(&booking.summary());

        let missing = booking.missing();
        if !missing.is_empty() {
            prompt.push_str("\n\nStill needed: ");
            prompt.push_str(&missing.join(", "));
        }

        prompt
    }

    /// Build the complete message list for a model call from the last
    /// `history_limit` transcript messages.
    pub fn build_messages(
        &self,
        transcript: &[Message],
        history_limit: usize,
        booking: &BookingState,
    ) -> Vec<Message> {
        let start = transcript.len().saturating_sub(history_limit);
        // A tool result without its assistant call is rejected by the API.
        let history = transcript[start..]
            .iter()
            .skip_while(|m| m.is_role("tool"));

        let mut messages = vec![Message::system(self.build_system_prompt(booking))];
        messages.extend(history.cloned());
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_embeds_booking_state() {
        let booking = BookingState {
            destination: Some("Orlando".to_string()),
            ..Default::default()
        };
        let prompt = ContextBuilder::new().build_system_prompt(&booking);
        assert!(prompt.contains("- Destination: Orlando"));
        assert!(prompt.contains("Still needed: Verified zip code"));
    }

    #[test]
    fn test_build_messages_limits_history() {
        let transcript: Vec<Message> = (0..10)
            .map(|i| Message::user(format!("message {i}")))
            .collect();
        let messages = ContextBuilder::new().build_messages(&transcript, 3, &BookingState::default());

        assert_eq!(messages.len(), 4); // system + 3
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].content, "message 7");
        assert_eq!(messages[3].content, "message 9");
    }

    #[test]
    fn test_build_messages_drops_orphaned_tool_results() {
        let transcript = vec![
            Message::user("hi"),
            Message::assistant_with_tools(None, vec![]),
            Message::tool("{}", "call_1"),
            Message::tool("{}", "call_2"),
            Message::assistant("Here you go"),
        ];
        let messages = ContextBuilder::new().build_messages(&transcript, 3, &BookingState::default());

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, "Here you go");
    }
}
