//! Data models for users, groups, permissions and report rows

pub mod common;
pub mod group;
pub mod permission;
pub mod record;
pub mod row;
pub mod user;

pub use common::*;
pub use group::*;
pub use permission::*;
pub use record::*;
pub use row::*;
pub use user::*;
