//! Transport-neutral inbound events.
//!
//! The transport adapter turns whatever its platform delivers into an
//! [`Inbound`]; everything past that point only sees these types.

use crate::matching::SwipeAction;
use crate::models::Gender;

pub type UserId = i64;

pub const KEEP_CURRENT_LABEL: &str = "🟰 Keep current";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: UserId,
    pub first_name: String,
    pub username: Option<String>,
}

impl Sender {
    /// Readable name for logs.
    pub fn display(&self) -> String {
        match &self.username {
            Some(u) => format!("@{u}"),
            None => format!("{} ({})", self.first_name, self.id),
        }
    }

    /// Name shown to a match partner: `@username`, else `fallback`.
    pub fn handle_or(&self, fallback: &str) -> String {
        match &self.username {
            Some(u) => format!("@{u}"),
            None => fallback.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub sender: Sender,
    pub input: Input,
    /// Set when the event came from pressing a selectable option, which the
    /// transport wants acknowledged.
    pub callback_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Text(String),
    /// Opaque photo reference assigned by the transport.
    Photo(String),
    Choice(Choice),
    /// Anything the bot has no use for (stickers, unknown callbacks, ...).
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Find,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    KeepCurrent,
    Gender(Gender),
    Swipe(SwipeAction),
    Menu(MenuAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ViewProfile,
    EditProfile,
    FindMatch,
    DeleteProfile,
}

impl MenuAction {
    pub const ALL: [MenuAction; 4] = [
        MenuAction::ViewProfile,
        MenuAction::EditProfile,
        MenuAction::FindMatch,
        MenuAction::DeleteProfile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::ViewProfile => "View Profile",
            MenuAction::EditProfile => "Edit Profile",
            MenuAction::FindMatch => "Find a Match",
            MenuAction::DeleteProfile => "Delete Profile",
        }
    }

    fn from_label(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.label() == text)
    }
}

const CALLBACK_KEEP: &str = "keep";
const CALLBACK_GENDER_PREFIX: &str = "gender:";
const CALLBACK_SWIPE_PREFIX: &str = "swipe:";

impl Choice {
    pub fn callback_data(self) -> String {
        match self {
            Choice::KeepCurrent => CALLBACK_KEEP.to_string(),
            Choice::Gender(g) => format!("{CALLBACK_GENDER_PREFIX}{g}"),
            Choice::Swipe(a) => format!("{CALLBACK_SWIPE_PREFIX}{}", a.key()),
            Choice::Menu(a) => format!("menu:{}", a.label()),
        }
    }

    pub fn from_callback(data: &str) -> Option<Self> {
        if data == CALLBACK_KEEP {
            return Some(Choice::KeepCurrent);
        }
        if let Some(g) = data.strip_prefix(CALLBACK_GENDER_PREFIX) {
            return g.parse().ok().map(Choice::Gender);
        }
        if let Some(a) = data.strip_prefix(CALLBACK_SWIPE_PREFIX) {
            return SwipeAction::from_key(a).map(Choice::Swipe);
        }
        data.strip_prefix("menu:")
            .and_then(MenuAction::from_label)
            .map(Choice::Menu)
    }
}

impl Input {
    /// Classify a free-text message. Keep-current is deliberately not
    /// recognised here; it only arrives as a [`Choice`].
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();

        if let Some(command) = trimmed.strip_prefix('/') {
            // "/start@valour_bot extra" -> "start"
            let name = command
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .split('@')
                .next()
                .unwrap_or_default();
            return Input::Command(match name {
                "start" => Command::Start,
                "help" => Command::Help,
                "find" => Command::Find,
                _ => Command::Unknown,
            });
        }

        match MenuAction::from_label(trimmed) {
            Some(action) => Input::Choice(Choice::Menu(action)),
            None => Input::Text(trimmed.to_string()),
        }
    }

    /// Gender picked either as an option or typed exactly.
    pub fn as_gender(&self) -> Option<Gender> {
        match self {
            Input::Choice(Choice::Gender(g)) => Some(*g),
            Input::Text(t) => t.parse().ok(),
            _ => None,
        }
    }

    pub fn is_keep_current(&self) -> bool {
        matches!(self, Input::Choice(Choice::KeepCurrent))
    }
}
