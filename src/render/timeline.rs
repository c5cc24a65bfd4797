//! Timeline rendering
//!
//! Every message renders to a self-contained block that ends in a newline,
//! preceded by its round separator when one is due. Separators are derived
//! from the whole timeline, so rendering a tail with [`render_from`] yields
//! exactly the text the same messages have in a full render.

use chrono::Local;
use colored::Colorize;

use super::palette::{avatar, Role};
use super::RenderOptions;
use crate::conversation::{round_label_before, Message, Sender};

/// Hint shown while the timeline is empty
pub const EMPTY_TIMELINE_HINT: &str = "Send a message to start chatting with the agents.";

const CONTENT_INDENT: &str = "    ";

/// Render the whole timeline, or the empty-state hint
pub fn render_timeline(messages: &[Message], options: &RenderOptions) -> String {
    if messages.is_empty() {
        return format!("{}\n", EMPTY_TIMELINE_HINT.dimmed());
    }
    render_from(messages, 0, options)
}

/// Render `messages[start..]`, using earlier messages for separator placement
pub fn render_from(messages: &[Message], start: usize, options: &RenderOptions) -> String {
    let mut out = String::new();
    for index in start..messages.len() {
        if let Some(round) = round_label_before(messages, index) {
            out.push_str(&round_separator(round));
        }
        out.push_str(&render_message(&messages[index], options));
    }
    out
}

fn round_separator(round: u32) -> String {
    format!(
        "\n{}\n",
        format!("──────── Round {} ────────", round).bright_black().bold()
    )
}

/// Render one message block
pub fn render_message(message: &Message, options: &RenderOptions) -> String {
    if message.sender == Sender::System {
        return render_notice(message, options);
    }

    let role = Role::of(&message.sender);
    let name = match &message.sender {
        Sender::User => "You",
        other => other.as_str(),
    };

    let mut header = format!(
        "{} {}",
        format!("[{}]", avatar(&message.sender)).color(role.color()),
        name.color(role.color()).bold()
    );
    if options.show_timestamps {
        header.push_str(&format!("  {}", timestamp(message).dimmed()));
    }
    if message.is_summary() {
        header.push_str(&format!("  {}", "[summary]".yellow().bold()));
    }

    let mut out = header;
    out.push('\n');
    for line in message.content.lines() {
        out.push_str(CONTENT_INDENT);
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn render_notice(message: &Message, options: &RenderOptions) -> String {
    let text = if message.is_discussion_start() {
        format!("» {}", message.content).italic()
    } else {
        format!("! {}", message.content).normal()
    };

    if options.show_timestamps {
        format!(
            "{}  {}\n",
            text.color(Role::System.color()),
            timestamp(message).dimmed()
        )
    } else {
        format!("{}\n", text.color(Role::System.color()))
    }
}

fn timestamp(message: &Message) -> String {
    message
        .timestamp
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{normalize, ConversationState, DISCUSSION_START_NOTICE};
    use crate::test_utils::{discussion_payload, flat_payload, StepClock};

    fn discussion_timeline() -> Vec<Message> {
        let clock = StepClock::default();
        let mut state = ConversationState::new();
        state.append_user_message("Should we work remotely?", &clock);
        let batch = normalize(discussion_payload(), &clock, state.ids_mut());
        state.append_batch(batch).unwrap();
        state.messages().to_vec()
    }

    fn plain() -> RenderOptions {
        RenderOptions {
            show_timestamps: false,
        }
    }

    #[test]
    fn test_empty_timeline_shows_hint() {
        let out = render_timeline(&[], &plain());
        assert!(out.contains(EMPTY_TIMELINE_HINT));
    }

    #[test]
    fn test_round_separators_are_placed_before_each_round() {
        let out = render_timeline(&discussion_timeline(), &plain());

        assert_eq!(out.matches("Round 1").count(), 1);
        assert_eq!(out.matches("Round 2").count(), 1);

        let round_one = out.find("Round 1").unwrap();
        let round_two = out.find("Round 2").unwrap();
        let first_reply = out.find("    x").unwrap();
        let second_reply = out.find("    y").unwrap();
        let summary = out.find("    z").unwrap();
        assert!(out.find(DISCUSSION_START_NOTICE).unwrap() < round_one);
        assert!(round_one < first_reply);
        assert!(first_reply < second_reply && second_reply < round_two);
        assert!(round_two < summary);
    }

    #[test]
    fn test_summary_badge_only_on_summary() {
        let out = render_timeline(&discussion_timeline(), &plain());
        assert_eq!(out.matches("[summary]").count(), 1);
    }

    #[test]
    fn test_user_messages_render_as_you() {
        let out = render_timeline(&discussion_timeline(), &plain());
        assert!(out.contains("You"));
        assert!(out.contains("    Should we work remotely?"));
    }

    #[test]
    fn test_flat_replies_have_no_separators() {
        let clock = StepClock::default();
        let mut state = ConversationState::new();
        let batch = normalize(flat_payload(&["Advisor", "Critic"]), &clock, state.ids_mut());
        state.append_batch(batch).unwrap();

        let out = render_timeline(state.messages(), &plain());
        assert!(!out.contains("Round"));
        assert!(out.contains("Advisor says hello"));
    }

    #[test]
    fn test_incremental_render_matches_full_render() {
        let messages = discussion_timeline();
        let full = render_from(&messages, 0, &plain());

        for split in 0..=messages.len() {
            let head = render_from(&messages[..split], 0, &plain());
            let tail = render_from(&messages, split, &plain());
            assert_eq!(format!("{}{}", head, tail), full, "split at {}", split);
        }
    }

    #[test]
    fn test_timestamps_toggle() {
        let messages = discussion_timeline();
        let with = render_message(&messages[0], &RenderOptions::default());
        let without = render_message(&messages[0], &plain());
        assert!(with.len() > without.len());
        assert!(with.contains(':'));
    }

    #[test]
    fn test_multiline_content_is_indented() {
        let clock = StepClock::default();
        let mut state = ConversationState::new();
        state.append_user_message("line one\nline two", &clock);

        let out = render_message(&state.messages()[0], &plain());
        assert!(out.contains("    line one\n    line two\n"));
    }
}
