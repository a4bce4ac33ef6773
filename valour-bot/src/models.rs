use std::fmt;
use std::str::FromStr;

use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde::Serialize;
use validator::Validate;

use crate::schema::{likes, skips, users};

pub const AGE_MIN: i32 = 16;
pub const AGE_MAX: i32 = 120;
pub const NAME_MAX_CHARS: usize = 64;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

// --- Gender ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow, Serialize)]
#[diesel(sql_type = Text)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gender {0:?}")]
pub struct ParseGenderError(pub String);

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(ParseGenderError(other.to_string())),
        }
    }
}

impl ToSql<Text, Sqlite> for Gender {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for Gender {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let raw = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        Ok(raw.parse()?)
    }
}

// --- Profile ---

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = users, primary_key(telegram_id), check_for_backend(Sqlite))]
pub struct Profile {
    pub telegram_id: i64,
    pub name: String,
    pub age: i32,
    pub description: String,
    pub photo_id: Option<String>,
    pub gender: Gender,
    pub preferred_gender: Gender,
}

impl Profile {
    pub fn fields(&self) -> ProfileFields {
        ProfileFields {
            name: self.name.clone(),
            age: self.age,
            description: self.description.clone(),
            photo_id: self.photo_id.clone(),
            gender: self.gender,
            preferred_gender: self.preferred_gender,
        }
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo_id.as_deref().filter(|p| !p.is_empty())
    }

    /// Caption shown to other users while browsing.
    pub fn card_caption(&self) -> String {
        format!("Name: {}\nAge: {}\nBio: {}", self.name, self.age, self.description)
    }

    /// Caption shown to the owner, including the matching preferences.
    pub fn owner_caption(&self) -> String {
        format!(
            "{}\nGender: {}\nPrefers: {}",
            self.card_caption(),
            self.gender,
            self.preferred_gender
        )
    }
}

/// Everything a user supplies about themselves; the identity is kept apart
/// because it is assigned by the transport and never edited.
#[derive(Debug, Clone, PartialEq, Eq, Insertable, AsChangeset, Validate)]
#[diesel(table_name = users, treat_none_as_null = true)]
pub struct ProfileFields {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(range(min = 16, max = 120))]
    pub age: i32,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    pub photo_id: Option<String>,
    pub gender: Gender,
    pub preferred_gender: Gender,
}

// --- Like / Skip ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = likes, check_for_backend(Sqlite))]
pub struct Like {
    pub liker_id: i64,
    pub liked_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = skips, check_for_backend(Sqlite))]
pub struct Skip {
    pub skipper_id: i64,
    pub skipped_id: i64,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_round_trips_through_text() {
        for g in Gender::ALL {
            assert_eq!(g.as_str().parse::<Gender>().unwrap(), g);
        }
        assert_eq!("male".parse::<Gender>(), Err(ParseGenderError("male".into())));
    }

    #[test]
    fn validation_bounds_match_constants() {
        let mut f = fixtures::fields("Al", Gender::Male, Gender::Female, Some("p1"));

        f.age = AGE_MIN;
        assert!(f.validate().is_ok());
        f.age = AGE_MAX;
        assert!(f.validate().is_ok());
        f.age = AGE_MIN - 1;
        assert!(f.validate().is_err());
        f.age = AGE_MAX + 1;
        assert!(f.validate().is_err());

        f.age = 30;
        f.name = "x".repeat(NAME_MAX_CHARS);
        assert!(f.validate().is_ok());
        f.name.push('x');
        assert!(f.validate().is_err());

        f.name = "Al".into();
        f.description = "d".repeat(DESCRIPTION_MAX_CHARS + 1);
        assert!(f.validate().is_err());
    }

    #[test]
    fn captions() {
        let profile = Profile {
            telegram_id: 1,
            name: "Bo".into(),
            age: 28,
            description: "hey".into(),
            photo_id: Some(String::new()),
            gender: Gender::Female,
            preferred_gender: Gender::Male,
        };

        assert_eq!(profile.card_caption(), "Name: Bo\nAge: 28\nBio: hey");
        assert!(profile.owner_caption().ends_with("Gender: Female\nPrefers: Male"));
        assert_eq!(profile.photo(), None);
        assert_eq!(profile.fields().name, "Bo");
    }
}
