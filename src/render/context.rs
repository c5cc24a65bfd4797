//! Context panel rendering

use colored::Colorize;

use crate::conversation::ContextView;

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}\n", prefix, line))
        .collect()
}

/// Render the context panel: the shared dump, then one block per agent.
///
/// After a failed fetch the error marker takes the place of the shared
/// dump and no agent blocks are shown.
pub fn render_context(view: &ContextView) -> String {
    let mut out = String::new();

    let (length, body) = match view {
        ContextView::Snapshot(snapshot) => (
            snapshot.global_context_length,
            pretty(&snapshot.global_context),
        ),
        ContextView::Unavailable(marker) => (0, marker.red().to_string()),
    };

    out.push_str(&format!(
        "{}\n",
        format!("Global context ({} messages)", length).bold()
    ));
    out.push_str(&indent(&body, "  "));
    out.push('\n');
    out.push_str(&format!("{}\n", "Agent private context".bold()));

    if let ContextView::Snapshot(snapshot) = view {
        for (name, agent) in &snapshot.agents {
            out.push_str(&format!(
                "  {}\n",
                format!("{} ({} messages)", name, agent.private_context_length).underline()
            ));
            out.push_str(&indent(&pretty(&agent.private_context), "    "));
        }
    }

    out
}
