//! In-memory directory loaded from a JSON snapshot

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use super::store::{Authorizer, PermissionCatalogSource, UserIter, UserStore};
use crate::error::{Result, StoreError, StoreResult};
use crate::models::{Actor, Group, PermissionCatalog, User};

/// Permission code that satisfies every capability check
pub const ADMIN_CODE: &str = "ADMIN";

/// A user together with memberships and directly assigned codes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub group_ids: Vec<i64>,
    #[serde(default)]
    pub permission_codes: Vec<String>,
}

/// Serialized form of a [`Directory`]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySnapshot {
    #[serde(default)]
    pub users: Vec<UserAccount>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub catalog: PermissionCatalog,
}

/// Users, groups and the permission catalog held in memory
#[derive(Debug, Clone)]
pub struct Directory {
    accounts: Vec<UserAccount>,
    groups: HashMap<i64, Group>,
    catalog: PermissionCatalog,
}

impl Directory {
    /// Build a directory, checking that every membership points at a known group
    pub fn from_snapshot(snapshot: DirectorySnapshot) -> StoreResult<Self> {
        let groups: HashMap<i64, Group> = snapshot
            .groups
            .into_iter()
            .map(|g| (g.id, g))
            .collect();

        for account in &snapshot.users {
            if let Some(missing) = account.group_ids.iter().find(|id| !groups.contains_key(id)) {
                return Err(StoreError::InvalidData(format!(
                    "User {} is a member of unknown group {}",
                    account.user.id, missing
                )));
            }
        }

        let mut accounts = snapshot.users;
        accounts.sort_by_key(|a| a.user.id);

        tracing::debug!(
            "Loaded directory with {} users and {} groups",
            accounts.len(),
            groups.len()
        );

        Ok(Self {
            accounts,
            groups,
            catalog: snapshot.catalog,
        })
    }

    /// Parse a snapshot from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: DirectorySnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot)?)
    }

    /// Load a snapshot file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Loading directory snapshot from {:?}", path);
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn user(&self, id: i64) -> Option<&User> {
        self.account(id).map(|a| &a.user)
    }

    /// Find a user by email, ignoring case
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.accounts
            .iter()
            .map(|a| &a.user)
            .find(|u| u.email.as_deref().is_some_and(|e| e.eq_ignore_ascii_case(email)))
    }

    pub fn user_count(&self) -> usize {
        self.accounts.len()
    }

    fn account(&self, id: i64) -> Option<&UserAccount> {
        self.accounts
            .binary_search_by_key(&id, |a| a.user.id)
            .ok()
            .map(|idx| &self.accounts[idx])
    }

    /// The group followed by its ancestors, stopping at a repeated id
    fn lineage(&self, group_id: i64) -> Vec<&Group> {
        let mut seen = HashSet::new();
        let mut lineage = Vec::new();
        let mut next = Some(group_id);

        while let Some(id) = next {
            if !seen.insert(id) {
                tracing::warn!("Group hierarchy loops back to group {}", id);
                break;
            }
            match self.groups.get(&id) {
                Some(group) => {
                    lineage.push(group);
                    next = group.parent_id;
                }
                None => break,
            }
        }

        lineage
    }
}

impl UserStore for Directory {
    fn list_users(&self) -> StoreResult<UserIter<'_>> {
        Ok(Box::new(self.accounts.iter().map(|a| Ok(a.user.clone()))))
    }

    fn groups_of(&self, user: &User) -> StoreResult<Vec<Group>> {
        let account = self
            .account(user.id)
            .ok_or_else(|| StoreError::NotFound(format!("user {}", user.id)))?;

        Ok(account
            .group_ids
            .iter()
            .filter_map(|id| self.groups.get(id).cloned())
            .collect())
    }

    fn effective_permission_codes(&self, user_id: i64) -> StoreResult<Vec<String>> {
        let account = self
            .account(user_id)
            .ok_or_else(|| StoreError::NotFound(format!("user {}", user_id)))?;

        let inherited = account
            .group_ids
            .iter()
            .flat_map(|id| self.lineage(*id))
            .flat_map(|group| group.permission_codes.iter());

        let mut seen = HashSet::new();
        Ok(account
            .permission_codes
            .iter()
            .chain(inherited)
            .filter(|code| seen.insert(code.to_uppercase()))
            .cloned()
            .collect())
    }
}

impl PermissionCatalogSource for Directory {
    fn catalog(&self) -> StoreResult<PermissionCatalog> {
        Ok(self.catalog.clone())
    }
}

impl Authorizer for Directory {
    fn has_capability(&self, actor: &Actor, capability: &str) -> bool {
        match self.effective_permission_codes(actor.id) {
            Ok(codes) => codes
                .iter()
                .any(|code| code.eq_ignore_ascii_case(capability) || code.eq_ignore_ascii_case(ADMIN_CODE)),
            Err(e) => {
                tracing::debug!("Capability check for {} failed: {}", actor.label(), e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "users": [
            {"id": 3, "firstName": "Cy", "email": "cy@example.com", "groupIds": [20], "permissionCodes": ["cms_access_SecurityAdmin"]},
            {"id": 1, "firstName": "Al", "email": "Al@Example.com", "groupIds": [10]},
            {"id": "2", "firstName": "Bo", "permissionCodes": ["EDIT", "edit"]}
        ],
        "groups": [
            {"id": 10, "title": "Administrators", "permissionCodes": ["ADMIN"]},
            {"id": 20, "title": "Editors", "parentId": 30, "permissionCodes": ["EDIT", "CMS_ACCESS_SecurityAdmin"]},
            {"id": 30, "title": "Staff", "parentId": "", "permissionCodes": ["VIEW_DRAFTS"]}
        ]
    }"#;

    fn directory() -> Directory {
        Directory::from_json(SNAPSHOT).unwrap()
    }

    #[test]
    fn test_users_listed_by_id() {
        let directory = directory();
        let ids: Vec<i64> = directory
            .list_users()
            .unwrap()
            .map(|u| u.unwrap().id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(directory.user_count(), 3);
    }

    #[test]
    fn test_effective_codes_include_ancestors_and_dedupe() {
        let directory = directory();
        assert_eq!(
            directory.effective_permission_codes(3).unwrap(),
            vec!["cms_access_SecurityAdmin", "EDIT", "VIEW_DRAFTS"]
        );
        assert_eq!(directory.effective_permission_codes(2).unwrap(), vec!["EDIT"]);
        assert!(matches!(
            directory.effective_permission_codes(99),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_groups_of() {
        let directory = directory();
        let user = directory.user(3).unwrap().clone();
        let titles: Vec<String> = directory
            .groups_of(&user)
            .unwrap()
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, vec!["Editors"]);
    }

    #[test]
    fn test_capabilities() {
        let directory = directory();
        assert!(directory.has_capability(&Actor::new(1), "CMS_ACCESS_SecurityAdmin"));
        assert!(directory.has_capability(&Actor::new(3), "CMS_ACCESS_SecurityAdmin"));
        assert!(!directory.has_capability(&Actor::new(2), "CMS_ACCESS_SecurityAdmin"));
        assert!(!directory.has_capability(&Actor::new(42), "CMS_ACCESS_SecurityAdmin"));
    }

    #[test]
    fn test_lookup_by_email() {
        let directory = directory();
        assert_eq!(directory.user_by_email("al@example.com").map(|u| u.id), Some(1));
        assert!(directory.user_by_email("nobody@example.com").is_none());
    }

    #[test]
    fn test_unknown_group_rejected() {
        let err = Directory::from_json(r#"{"users": [{"id": 1, "groupIds": [5]}]}"#).unwrap_err();
        assert!(err.to_string().contains("unknown group 5"));
    }

    #[test]
    fn test_group_cycle_terminates() {
        let directory = Directory::from_json(
            r#"{
                "users": [{"id": 1, "groupIds": [1]}],
                "groups": [
                    {"id": 1, "title": "A", "parentId": 2, "permissionCodes": ["A"]},
                    {"id": 2, "title": "B", "parentId": 1, "permissionCodes": ["B"]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(directory.effective_permission_codes(1).unwrap(), vec!["A", "B"]);
    }
}
