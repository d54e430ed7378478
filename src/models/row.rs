//! The flattened report row

use serde::{Deserialize, Serialize};

use crate::models::Record;

/// One display-ready line of the users, groups and permissions report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ReportRow {
    #[serde(rename = "ID")]
    pub id: i64,
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub created: String,
    pub last_visited: String,
    pub groups: String,
    pub permissions: String,
}

impl Record for ReportRow {
    fn value(&self, key: &str) -> Option<String> {
        let value = match key {
            "ID" => return Some(self.id.to_string()),
            "FirstName" => &self.first_name,
            "Surname" => &self.surname,
            "Email" => &self.email,
            "Created" => &self.created,
            "LastVisited" => &self.last_visited,
            "Groups" => &self.groups,
            "Permissions" => &self.permissions,
            _ => return None,
        };
        Some(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ReportRow {
        ReportRow {
            id: 4,
            first_name: "Grace".into(),
            surname: "Hopper".into(),
            email: "grace@example.com".into(),
            created: "2013-01-01 09:00:00".into(),
            last_visited: "Never".into(),
            groups: "Administrators".into(),
            permissions: "Full administrative rights".into(),
        }
    }

    #[test]
    fn test_record_keys() {
        let row = row();
        assert_eq!(row.value("ID").as_deref(), Some("4"));
        assert_eq!(row.value("LastVisited").as_deref(), Some("Never"));
        assert_eq!(row.value("Permissions").as_deref(), Some("Full administrative rights"));
        assert_eq!(row.value("Password"), None);
    }

    #[test]
    fn test_serializes_with_column_keys() {
        let json = serde_json::to_value(row()).unwrap();
        assert_eq!(json["ID"], 4);
        assert_eq!(json["FirstName"], "Grace");
        assert_eq!(json["LastVisited"], "Never");
    }
}
