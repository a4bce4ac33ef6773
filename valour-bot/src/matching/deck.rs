use crate::input::{Choice, Input};
use crate::models::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    Like,
    Skip,
    Stop,
}

impl SwipeAction {
    pub const ALL: [SwipeAction; 3] = [SwipeAction::Like, SwipeAction::Skip, SwipeAction::Stop];

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            SwipeAction::Like => "❤️ Like",
            SwipeAction::Skip => "👎 Skip",
            SwipeAction::Stop => "💤 Stop",
        }
    }

    /// Callback payload suffix.
    pub fn key(self) -> &'static str {
        match self {
            SwipeAction::Like => "like",
            SwipeAction::Skip => "skip",
            SwipeAction::Stop => "stop",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }

    pub fn from_input(input: &Input) -> Option<Self> {
        match input {
            Input::Choice(Choice::Swipe(action)) => Some(*action),
            Input::Text(text) => Self::from_text(text),
            _ => None,
        }
    }

    fn from_text(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(action) = Self::ALL.into_iter().find(|a| a.label() == text) {
            return Some(action);
        }
        match text.to_lowercase().as_str() {
            "like" | "👍 like" => Some(SwipeAction::Like),
            "skip" | "no" => Some(SwipeAction::Skip),
            "stop" => Some(SwipeAction::Stop),
            _ => None,
        }
    }
}

/// Candidates materialised once per browse, plus a cursor into them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwipeDeck {
    owner_name: String,
    candidates: Vec<Profile>,
    cursor: usize,
}

impl SwipeDeck {
    pub fn new(owner_name: impl Into<String>, candidates: Vec<Profile>) -> Self {
        Self { owner_name: owner_name.into(), candidates, cursor: 0 }
    }

    /// Stored profile name of the user browsing.
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn current(&self) -> Option<&Profile> {
        self.candidates.get(self.cursor)
    }

    pub fn advance(&mut self) {
        if self.cursor < self.candidates.len() {
            self.cursor += 1;
        }
    }

    pub fn remaining(&self) -> usize {
        self.candidates.len() - self.cursor
    }
}
