use std::fmt;

use serde::{Deserialize, Serialize};
use tutorlink_core::serde::deserialize_string_or_number;

/// Account role as issued by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Tutor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Tutor => "tutor",
            Role::Admin => "admin",
        }
    }

    /// Roles a user may pick when creating an account.
    pub fn is_registrable(&self) -> bool {
        matches!(self, Role::Student | Role::Tutor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identity attached to a session.
///
/// The API sends more fields (`is_active`, `created_at`); only the ones the
/// client acts on are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub id: String,
    pub email: String,
    pub role: Role,
}
