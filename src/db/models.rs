//! Domain models for the user database.
//!
//! Temporal fields go through the fixed wire formats in [`crate::json::format`].
//! Field names are camelCase on the wire.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Row ID type for all entities.
pub type Id = i64;

/// A user record as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: Option<String>,
    #[serde(default, with = "crate::json::format::date_opt")]
    pub birthday: Option<NaiveDate>,
    /// Time of day of the most recent login.
    #[serde(default, with = "crate::json::format::time_opt")]
    pub login_time: Option<NaiveTime>,
    #[serde(with = "crate::json::format::datetime")]
    pub created_at: NaiveDateTime,
    #[serde(with = "crate::json::format::datetime")]
    pub updated_at: NaiveDateTime,
}

/// Input for creating a user. ID and timestamps are assigned on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    #[serde(default, with = "crate::json::format::date_opt")]
    pub birthday: Option<NaiveDate>,
    #[serde(default, with = "crate::json::format::time_opt")]
    pub login_time: Option<NaiveTime>,
}

impl NewUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    pub fn with_login_time(mut self, login_time: NaiveTime) -> Self {
        self.login_time = Some(login_time);
        self
    }
}
