//! Security group models

use crate::models::common::{option_string_or_i64, string_or_i64};
use serde::{Deserialize, Serialize};

/// A node in the security group hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(deserialize_with = "string_or_i64")]
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "option_string_or_i64")]
    pub parent_id: Option<i64>,
    /// Permission codes granted to members of this group
    #[serde(default)]
    pub permission_codes: Vec<String>,
}

impl Group {
    /// Title as shown in tree views. May carry inline markup.
    pub fn tree_title(&self) -> &str {
        &self.title
    }
}
