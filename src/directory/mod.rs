//! Account, group and permission sources the report reads from

pub mod snapshot;
pub mod store;

pub use snapshot::*;
pub use store::*;
