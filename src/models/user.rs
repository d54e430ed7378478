//! User account models

use crate::models::common::string_or_i64;
use serde::{Deserialize, Serialize};

/// A user account as read from the account store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "string_or_i64")]
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Raw creation timestamp, e.g. "2013-01-14 09:12:45"
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub last_visited: Option<String>,
}

impl User {
    /// Display name used in logs and print metadata
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.surname.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !name.is_empty() {
            name
        } else if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            email.to_string()
        } else {
            format!("#{}", self.id)
        }
    }
}

/// The user requesting the report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    #[serde(deserialize_with = "string_or_i64")]
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

impl Actor {
    pub fn new(id: i64) -> Self {
        Self { id, name: None }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name to show in denials and print headers
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| format!("#{}", self.id))
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: Some(user.display_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_accepts_string_id() {
        let user: User = serde_json::from_str(
            r#"{"id": "7", "firstName": "Ada", "surname": "Lovelace", "created": "2013-01-01 10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.last_visited, None);
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_display_name_falls_back() {
        let user: User = serde_json::from_str(r#"{"id": 3, "email": "x@example.com"}"#).unwrap();
        assert_eq!(user.display_name(), "x@example.com");

        let user: User = serde_json::from_str(r#"{"id": 4}"#).unwrap();
        assert_eq!(user.display_name(), "#4");
    }

    #[test]
    fn test_actor_label() {
        assert_eq!(Actor::new(9).label(), "#9");
        assert_eq!(Actor::new(9).with_name("admin").label(), "admin");
    }
}
