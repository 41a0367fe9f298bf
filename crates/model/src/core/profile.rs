//! Payloads for completing and editing a user's profile.
//!
//! Rows are built as JSON objects ready for an insert or update. Optional
//! fields that are unset are left out of the row rather than written as `null`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[serde(rename = "Gender-fluid")]
    GenderFluid,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::GenderFluid => "Gender-fluid",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Federation membership of an athlete. Division and weight class, when
/// given, must belong to the federation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub federation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_class_id: Option<String>,
}

impl AthleteDetails {
    /// Row for the `athletes` table.
    pub fn row(&self, id: &str) -> Value {
        let mut row = Map::new();
        row.insert("id".into(), id.into());
        insert_some(&mut row, "federation_id", &self.federation_id);
        insert_some(&mut row, "division_id", &self.division_id);
        insert_some(&mut row, "weight_class_id", &self.weight_class_id);
        Value::Object(row)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoachDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<u32>,
}

impl CoachDetails {
    /// Row for the `coaches` table.
    pub fn row(&self, id: &str) -> Value {
        let mut row = Map::new();
        row.insert("id".into(), id.into());
        insert_some(&mut row, "biography", &self.biography);
        if let Some(years) = self.years_of_experience {
            row.insert("years_of_experience".into(), years.into());
        }
        Value::Object(row)
    }
}

/// Everything a user submits when completing their profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProfile {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub gender: Gender,
    /// ISO-8601 date, passed through as given.
    pub date_of_birth: String,
    pub is_athlete: bool,
    pub is_coach: bool,
    #[serde(flatten)]
    pub athlete: AthleteDetails,
    #[serde(flatten)]
    pub coach: CoachDetails,
}

impl CreateProfile {
    /// Changes applied to the existing `users` row.
    pub fn user_row(&self) -> Value {
        serde_json::json!({
            "first_name": self.first_name,
            "last_name": self.last_name,
            "username": self.username,
            "gender": self.gender.as_str(),
            "date_of_birth": self.date_of_birth,
            "is_athlete": self.is_athlete,
            "is_coach": self.is_coach,
        })
    }
}

/// Partial edit of the `users` row. Only the fields that are set change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl UpdateProfile {
    pub fn changes(&self) -> Value {
        let mut row = Map::new();
        insert_some(&mut row, "first_name", &self.first_name);
        insert_some(&mut row, "last_name", &self.last_name);
        insert_some(&mut row, "username", &self.username);
        Value::Object(row)
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.username.is_none()
    }
}

fn insert_some(row: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        row.insert(key.to_string(), Value::String(value.clone()));
    }
}
