//! Browsing candidates and announcing mutual likes.

mod deck;
pub mod mutual;

pub use deck::{SwipeAction, SwipeDeck};
