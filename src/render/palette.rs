//! Sender display attributes
//!
//! A fixed table of known identities plus one fallback rule. The backend's
//! agents may be named in English or Chinese; both spellings map to the
//! same role.

use colored::Color;

use crate::conversation::Sender;

/// Display role resolved from a sender identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The person at the keyboard
    User,
    /// Client-generated notices
    System,
    /// Practical adviser agent
    Advisor,
    /// Agent that looks for weaknesses
    Critic,
    /// Agent that proposes new ideas
    Innovator,
    /// Agent that summarises and reconciles
    Mediator,
    /// Any agent not in the table
    Other,
}

impl Role {
    /// Resolve the role of a sender
    ///
    /// # Examples
    ///
    /// ```
    /// use roundtable::conversation::Sender;
    /// use roundtable::render::palette::Role;
    ///
    /// assert_eq!(Role::of(&Sender::Agent("顾问".to_string())), Role::Advisor);
    /// assert_eq!(Role::of(&Sender::Agent("Critic".to_string())), Role::Critic);
    /// assert_eq!(Role::of(&Sender::Agent("Historian".to_string())), Role::Other);
    /// ```
    pub fn of(sender: &Sender) -> Self {
        match sender {
            Sender::User => Self::User,
            Sender::System => Self::System,
            Sender::Agent(name) => match name.trim() {
                "顾问" | "Advisor" | "advisor" => Self::Advisor,
                "批评者" | "Critic" | "critic" => Self::Critic,
                "创新者" | "Innovator" | "innovator" => Self::Innovator,
                "协调者" | "Mediator" | "mediator" => Self::Mediator,
                _ => Self::Other,
            },
        }
    }

    /// Terminal color for this role
    pub fn color(self) -> Color {
        match self {
            Self::User => Color::Cyan,
            Self::System => Color::BrightBlack,
            Self::Advisor => Color::Green,
            Self::Critic => Color::Red,
            Self::Innovator => Color::Blue,
            Self::Mediator => Color::Yellow,
            Self::Other => Color::Magenta,
        }
    }
}

/// One-character avatar: the sender's first character
pub fn avatar(sender: &Sender) -> String {
    sender
        .as_str()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}
