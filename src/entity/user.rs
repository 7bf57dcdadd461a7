use crate::entity::{start_of_day, Identifiable, SearchAdapter};
use crate::query::filter::FilterField;
use crate::query::predicate::Value;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered marketplace user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    pub created: NaiveDate,
}

fn default_role() -> String {
    "user".to_string()
}

impl Identifiable for User {
    fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_name)?;
        if let Some(middle) = &self.middle_name {
            write!(f, " {}", middle)?;
        }
        write!(f, " {}", self.last_name)?;
        if let Some(nickname) = &self.nickname {
            write!(f, " ({})", nickname)?;
        }
        write!(f, " <{}>", self.email)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Id,
    FirstName,
    MiddleName,
    LastName,
    Nickname,
    Email,
    Role,
    Created,
}

/// Adapter for searching users by name
#[derive(Debug, Clone, Copy, Default)]
pub struct UserSearch;

impl SearchAdapter for UserSearch {
    type Record = User;
    type Field = UserField;

    fn name(&self) -> &'static str {
        "user"
    }

    fn searchable_fields(&self) -> &'static [UserField] {
        &[
            UserField::FirstName,
            UserField::MiddleName,
            UserField::LastName,
            UserField::Nickname,
        ]
    }

    fn sortable_columns(&self) -> &'static [(&'static str, UserField)] {
        &[
            ("nickname", UserField::Nickname),
            ("firstName", UserField::FirstName),
            ("middleName", UserField::MiddleName),
            ("lastName", UserField::LastName),
            ("email", UserField::Email),
            ("role", UserField::Role),
            ("created", UserField::Created),
        ]
    }

    fn default_sort_column(&self) -> UserField {
        UserField::Created
    }

    fn identity_field(&self) -> UserField {
        UserField::Id
    }

    fn filter_field(&self, _filter: FilterField) -> Option<UserField> {
        None
    }

    fn value<'r>(&self, user: &'r User, field: UserField) -> Value<'r> {
        match field {
            UserField::Id => Value::Id(user.id),
            UserField::FirstName => Value::Text(Some(&user.first_name)),
            UserField::MiddleName => Value::Text(user.middle_name.as_deref()),
            UserField::LastName => Value::Text(Some(&user.last_name)),
            UserField::Nickname => Value::Text(user.nickname.as_deref()),
            UserField::Email => Value::Text(Some(&user.email)),
            UserField::Role => Value::Text(Some(&user.role)),
            UserField::Created => Value::Time(Some(start_of_day(user.created))),
        }
    }
}
