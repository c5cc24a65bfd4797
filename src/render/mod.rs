//! Terminal render layer
//!
//! Pure functions from conversation state to printable text. Nothing here
//! mutates state.

pub mod context;
pub mod palette;
pub mod timeline;

pub use context::render_context;
pub use timeline::{render_from, render_message, render_timeline, EMPTY_TIMELINE_HINT};

use crate::config::ChatConfig;
use crate::conversation::ConversationState;

/// Presentation switches
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Show receipt timestamps in message headers
    pub show_timestamps: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_timestamps: true,
        }
    }
}

impl From<&ChatConfig> for RenderOptions {
    fn from(config: &ChatConfig) -> Self {
        Self {
            show_timestamps: config.show_timestamps,
        }
    }
}

/// Render the open context panel (if it has content) followed by the timeline
pub fn render_state(state: &ConversationState, options: &RenderOptions) -> String {
    let mut out = String::new();
    if state.context().is_visible() {
        if let Some(view) = state.context().view() {
            out.push_str(&render_context(view));
            out.push('\n');
        }
    }
    out.push_str(&render_timeline(state.messages(), options));
    out
}

/// Render an opaque backend payload as plain text.
///
/// Top-level object fields become `key: value` lines, with strings unquoted
/// and nested values kept as compact JSON. Anything else is pretty-printed.
pub fn render_payload(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Object(fields) if !fields.is_empty() => fields
            .iter()
            .map(|(key, field)| match field {
                serde_json::Value::String(text) => format!("{}: {}\n", key, text),
                other => format!("{}: {}\n", key, other),
            })
            .collect(),
        other => format!(
            "{}\n",
            serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string())
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::ContextView;
    use crate::test_utils::StepClock;

    #[test]
    fn test_hidden_panel_is_not_rendered() {
        let mut state = ConversationState::new();
        state.set_context_snapshot(ContextView::Unavailable("Failed to fetch context".into()));

        let out = render_state(&state, &RenderOptions::default());
        assert!(!out.contains("Global context"));
        assert!(out.contains(EMPTY_TIMELINE_HINT));
    }

    #[test]
    fn test_visible_panel_precedes_timeline() {
        let mut state = ConversationState::new();
        state.append_user_message("hi", &StepClock::default());
        state.set_context_visible(true);
        state.set_context_snapshot(ContextView::Unavailable("Failed to fetch context".into()));

        let out = render_state(&state, &RenderOptions::default());
        let panel = out.find("Failed to fetch context").unwrap();
        let message = out.find("    hi").unwrap();
        assert!(panel < message);
    }

    #[test]
    fn test_payload_object_renders_as_fields() {
        let out = render_payload(&serde_json::json!({
            "status": "started",
            "round": 2,
            "agents": ["A", "B"]
        }));
        assert!(out.contains("status: started\n"));
        assert!(out.contains("round: 2\n"));
        assert!(out.contains("agents: [\"A\",\"B\"]\n"));
        assert!(!out.contains('{'));
    }

    #[test]
    fn test_payload_non_object_is_pretty_json() {
        assert_eq!(render_payload(&serde_json::json!("done")), "\"done\"\n");
        assert_eq!(render_payload(&serde_json::json!({})), "{}\n");
    }

    #[test]
    fn test_options_follow_chat_config() {
        let config = ChatConfig {
            show_timestamps: false,
            ..ChatConfig::default()
        };
        assert!(!RenderOptions::from(&config).show_timestamps);
    }
}
