use crate::input::Input;
use crate::models::{Gender, ProfileFields, AGE_MAX, AGE_MIN, DESCRIPTION_MAX_CHARS, NAME_MAX_CHARS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Name,
    Age,
    Description,
    Photo,
    Gender,
    PreferredGender,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Name,
        Step::Age,
        Step::Description,
        Step::Photo,
        Step::Gender,
        Step::PreferredGender,
    ];

    /// 1-based position, as shown in prompts.
    pub fn number(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).map_or(0, |i| i + 1)
    }

    pub fn next(self) -> Option<Step> {
        Self::ALL.get(self.number()).copied()
    }
}

/// Input that was rejected. The message is the re-prompt shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please type your name.")]
    NameRequired,
    #[error("That name is too long, please keep it under 64 characters.")]
    NameTooLong,
    #[error("Please enter your age as a number.")]
    AgeNotNumeric,
    #[error("Age must be between 16 and 120.")]
    AgeOutOfRange,
    #[error("Please write a few words about yourself.")]
    DescriptionRequired,
    #[error("That description is too long, please keep it under 1000 characters.")]
    DescriptionTooLong,
    #[error("A profile photo is required. Please send a photo.")]
    PhotoRequired,
    #[error("Please choose Male or Female.")]
    GenderInvalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Input rejected; the session stays on the same step.
    Stay(ValidationError),
    Next(Step),
    /// Every field collected; the session is finished.
    Commit(ProfileFields),
}

/// Values collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub description: Option<String>,
    pub photo_id: Option<String>,
    pub gender: Option<Gender>,
    pub preferred_gender: Option<Gender>,
}

impl Draft {
    pub fn first_missing(&self) -> Option<Step> {
        Step::ALL.into_iter().find(|step| match step {
            Step::Name => self.name.is_none(),
            Step::Age => self.age.is_none(),
            Step::Description => self.description.is_none(),
            Step::Photo => self.photo_id.is_none(),
            Step::Gender => self.gender.is_none(),
            Step::PreferredGender => self.preferred_gender.is_none(),
        })
    }

    fn complete(&self) -> Option<ProfileFields> {
        Some(ProfileFields {
            name: self.name.clone()?,
            age: self.age?,
            description: self.description.clone()?,
            photo_id: Some(self.photo_id.clone()?),
            gender: self.gender?,
            preferred_gender: self.preferred_gender?,
        })
    }

    fn keep(&mut self, step: Step, current: &ProfileFields) {
        match step {
            Step::Name => self.name = Some(current.name.clone()),
            Step::Age => self.age = Some(current.age),
            Step::Description => self.description = Some(current.description.clone()),
            Step::Photo => self.photo_id = current.photo_id.clone(),
            Step::Gender => self.gender = Some(current.gender),
            Step::PreferredGender => self.preferred_gender = Some(current.preferred_gender),
        }
    }

    fn accept(&mut self, step: Step, input: &Input) -> Result<(), ValidationError> {
        match step {
            Step::Name => {
                self.name = Some(bounded_text(
                    input,
                    NAME_MAX_CHARS,
                    ValidationError::NameRequired,
                    ValidationError::NameTooLong,
                )?)
            }
            Step::Age => self.age = Some(parse_age(input)?),
            Step::Description => {
                self.description = Some(bounded_text(
                    input,
                    DESCRIPTION_MAX_CHARS,
                    ValidationError::DescriptionRequired,
                    ValidationError::DescriptionTooLong,
                )?)
            }
            Step::Photo => match input {
                Input::Photo(id) if !id.is_empty() => self.photo_id = Some(id.clone()),
                _ => return Err(ValidationError::PhotoRequired),
            },
            Step::Gender => self.gender = Some(input.as_gender().ok_or(ValidationError::GenderInvalid)?),
            Step::PreferredGender => {
                self.preferred_gender = Some(input.as_gender().ok_or(ValidationError::GenderInvalid)?)
            }
        }
        Ok(())
    }
}

fn bounded_text(
    input: &Input,
    max_chars: usize,
    empty: ValidationError,
    too_long: ValidationError,
) -> Result<String, ValidationError> {
    let text = match input {
        Input::Text(t) => t.trim(),
        _ => return Err(empty),
    };
    if text.is_empty() {
        return Err(empty);
    }
    if text.chars().count() > max_chars {
        return Err(too_long);
    }
    Ok(text.to_string())
}

fn parse_age(input: &Input) -> Result<i32, ValidationError> {
    let Input::Text(text) = input else {
        return Err(ValidationError::AgeNotNumeric);
    };
    let age: i64 = text.trim().parse().map_err(|_| ValidationError::AgeNotNumeric)?;
    if !(i64::from(AGE_MIN)..=i64::from(AGE_MAX)).contains(&age) {
        return Err(ValidationError::AgeOutOfRange);
    }
    Ok(age as i32)
}

/// First-time registration: nothing to keep, photo mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    step: Step,
    draft: Draft,
}

/// Editing an existing profile: every step also accepts "keep current".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    step: Step,
    draft: Draft,
    current: ProfileFields,
}

impl EditSession {
    pub fn current(&self) -> &ProfileFields {
        &self.current
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSession {
    New(NewSession),
    Edit(EditSession),
}

impl ProfileSession {
    pub fn register() -> Self {
        ProfileSession::New(NewSession { step: Step::Name, draft: Draft::default() })
    }

    pub fn edit(current: ProfileFields) -> Self {
        ProfileSession::Edit(EditSession { step: Step::Name, draft: Draft::default(), current })
    }

    pub fn step(&self) -> Step {
        match self {
            ProfileSession::New(s) => s.step,
            ProfileSession::Edit(s) => s.step,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, ProfileSession::Edit(_))
    }

    /// Stored values, when editing.
    pub fn current(&self) -> Option<&ProfileFields> {
        match self {
            ProfileSession::New(_) => None,
            ProfileSession::Edit(s) => Some(&s.current),
        }
    }

    pub fn handle(&mut self, input: &Input) -> Advance {
        let (step, draft) = match self {
            ProfileSession::New(s) => {
                if let Err(e) = s.draft.accept(s.step, input) {
                    return Advance::Stay(e);
                }
                (&mut s.step, &s.draft)
            }
            ProfileSession::Edit(s) => {
                if input.is_keep_current() {
                    s.draft.keep(s.step, &s.current);
                } else if let Err(e) = s.draft.accept(s.step, input) {
                    return Advance::Stay(e);
                }
                (&mut s.step, &s.draft)
            }
        };

        match step.next() {
            Some(next) => {
                *step = next;
                Advance::Next(next)
            }
            None => match draft.complete() {
                Some(fields) => Advance::Commit(fields),
                None => {
                    // Only reachable when an edited profile had no photo to keep.
                    let missing = draft.first_missing().unwrap_or(Step::Photo);
                    *step = missing;
                    Advance::Next(missing)
                }
            },
        }
    }
}
