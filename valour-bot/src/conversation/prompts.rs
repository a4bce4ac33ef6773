use crate::bot::{Keyboard, Reply};
use crate::conversation::{ProfileSession, Step, ValidationError};
use crate::models::ProfileFields;

const TOTAL_STEPS: usize = Step::ALL.len();

fn question(step: Step) -> &'static str {
    match step {
        Step::Name => "What's your name?",
        Step::Age => "How old are you?",
        Step::Description => "Tell us a little about yourself.",
        Step::Photo => "Send a photo of yourself.",
        Step::Gender => "What's your gender?",
        Step::PreferredGender => "Who would you like to meet?",
    }
}

fn current_value(step: Step, current: &ProfileFields) -> String {
    match step {
        Step::Name => current.name.clone(),
        Step::Age => current.age.to_string(),
        Step::Description => current.description.clone(),
        Step::Photo => match current.photo_id.as_deref() {
            Some(p) if !p.is_empty() => "your current photo".to_string(),
            _ => "no photo".to_string(),
        },
        Step::Gender => current.gender.to_string(),
        Step::PreferredGender => current.preferred_gender.to_string(),
    }
}

fn keyboard(step: Step, editing: bool) -> Option<Keyboard> {
    let picks_gender = matches!(step, Step::Gender | Step::PreferredGender);
    match (picks_gender, editing) {
        (true, true) => Some(Keyboard::GendersOrKeep),
        (true, false) => Some(Keyboard::Genders),
        (false, true) => Some(Keyboard::KeepCurrent),
        (false, false) => None,
    }
}

/// Prompt for the step the session is waiting on.
pub fn step_prompt(session: &ProfileSession) -> Reply {
    let step = session.step();
    let mut text = format!("{}/{TOTAL_STEPS}: {}", step.number(), question(step));
    if let Some(current) = session.current() {
        text.push_str(&format!("\nCurrently: {}", current_value(step, current)));
    }

    let reply = Reply::text(text);
    match keyboard(step, session.is_editing()) {
        Some(k) => reply.with_keyboard(k),
        None => reply,
    }
}

/// Re-prompt after invalid input; the options stay the same.
pub fn rejection(session: &ProfileSession, err: &ValidationError) -> Reply {
    let reply = Reply::text(err.to_string());
    match keyboard(session.step(), session.is_editing()) {
        Some(k) => reply.with_keyboard(k),
        None => reply,
    }
}

pub fn registration_intro() -> Reply {
    Reply::text("👋 Welcome to ValourMatch! Let's set up your profile.").with_keyboard(Keyboard::Remove)
}

pub fn edit_intro() -> Reply {
    Reply::text("✏️ Let's update your profile. Tap \"Keep current\" to leave a field as it is.")
        .with_keyboard(Keyboard::Remove)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Input;
    use crate::models::fixtures::fields;
    use crate::models::Gender;

    #[test]
    fn registration_prompts_are_numbered() {
        let mut session = ProfileSession::register();
        let first = step_prompt(&session);
        assert_eq!(first.text, "1/6: What's your name?");
        assert_eq!(first.keyboard, None);

        for input in ["Al", "30", "hi"] {
            session.handle(&Input::Text(input.into()));
        }
        session.handle(&Input::Photo("p1".into()));
        let gender = step_prompt(&session);
        assert!(gender.text.starts_with("5/6"));
        assert_eq!(gender.keyboard, Some(Keyboard::Genders));
    }

    #[test]
    fn edit_prompts_show_current_value_and_keep_option() {
        let session = ProfileSession::edit(fields("Al", Gender::Male, Gender::Female, Some("p1")));
        let prompt = step_prompt(&session);
        assert_eq!(prompt.text, "1/6: What's your name?\nCurrently: Al");
        assert_eq!(prompt.keyboard, Some(Keyboard::KeepCurrent));
    }

    #[test]
    fn rejection_repeats_the_options() {
        let session = ProfileSession::edit(fields("Al", Gender::Male, Gender::Female, Some("p1")));
        let reply = rejection(&session, &ValidationError::NameRequired);
        assert_eq!(reply.text, "Please type your name.");
        assert_eq!(reply.keyboard, Some(Keyboard::KeepCurrent));
    }
}
