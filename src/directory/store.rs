//! Collaborator contracts

use crate::error::StoreResult;
use crate::models::{Actor, Group, PermissionCatalog, User};

/// Lazily produced users
pub type UserIter<'a> = Box<dyn Iterator<Item = StoreResult<User>> + 'a>;

/// Read access to user accounts and their memberships
pub trait UserStore: Send + Sync {
    /// All users, ascending by id
    fn list_users(&self) -> StoreResult<UserIter<'_>>;

    /// Groups the user is a direct member of
    fn groups_of(&self, user: &User) -> StoreResult<Vec<Group>>;

    /// Direct and group-inherited permission codes, deduplicated
    fn effective_permission_codes(&self, user_id: i64) -> StoreResult<Vec<String>>;
}

/// Read access to the permission catalog
pub trait PermissionCatalogSource: Send + Sync {
    fn catalog(&self) -> StoreResult<PermissionCatalog>;
}

/// Capability checks for the acting user
pub trait Authorizer: Send + Sync {
    fn has_capability(&self, actor: &Actor, capability: &str) -> bool;
}
