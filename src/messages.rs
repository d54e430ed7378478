//! User-visible strings with overridable translations

use std::collections::HashMap;

/// Stable identifiers for every translatable string the report emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    ReportTitle,
    NeverVisited,
    NoGroups,
    NoPermissions,
}

impl MessageKey {
    pub const ALL: [MessageKey; 4] = [
        MessageKey::ReportTitle,
        MessageKey::NeverVisited,
        MessageKey::NoGroups,
        MessageKey::NoPermissions,
    ];

    /// Identifier used in translation tables
    pub fn id(&self) -> &'static str {
        match self {
            Self::ReportTitle => "UserSecurityReport.REPORTTITLE",
            Self::NeverVisited => "UserSecurityReport_NEVER",
            Self::NoGroups => "UserSecurityReport_NOGROUPS",
            Self::NoPermissions => "UserSecurityReport_NOPERMISSIONS",
        }
    }

    /// English text used when no translation is loaded
    pub fn default_text(&self) -> &'static str {
        match self {
            Self::ReportTitle => "Users, Groups and Permissions",
            Self::NeverVisited => "Never",
            Self::NoGroups => "Not in a Security Group",
            Self::NoPermissions => "No Permissions",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.id() == id)
    }
}

/// Translation table keyed by message id
#[derive(Debug, Clone, Default)]
pub struct Messages {
    overrides: HashMap<String, String>,
}

impl Messages {
    /// Build from an id -> text map. Ids the report does not use are dropped.
    pub fn new(overrides: HashMap<String, String>) -> Self {
        let overrides = overrides
            .into_iter()
            .filter(|(id, text)| {
                let known = MessageKey::from_id(id).is_some();
                if !known {
                    tracing::warn!("Ignoring translation for unknown message id '{}'", id);
                }
                known && !text.is_empty()
            })
            .collect();
        Self { overrides }
    }

    pub fn translate(&self, key: MessageKey) -> &str {
        self.overrides
            .get(key.id())
            .map(String::as_str)
            .unwrap_or_else(|| key.default_text())
    }
}
