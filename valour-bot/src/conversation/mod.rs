//! Profile registration and editing as an explicit step machine.
//!
//! A [`ProfileSession`] consumes one [`Input`](crate::input::Input) at a
//! time and either re-prompts, moves to the next [`Step`], or hands back the
//! finished [`ProfileFields`](crate::models::ProfileFields) for the store.

pub mod prompts;
mod session;

pub use session::{Advance, Draft, EditSession, NewSession, ProfileSession, Step, ValidationError};
