//! Per-user display values

use crate::messages::{MessageKey, Messages};
use crate::models::{Group, PermissionCatalog};

/// The raw last-visit timestamp, or the "never" sentinel when it is absent or empty
pub fn last_visited_status(last_visited: Option<&str>, messages: &Messages) -> String {
    match last_visited {
        Some(ts) if !ts.is_empty() => ts.to_string(),
        _ => messages.translate(MessageKey::NeverVisited).to_string(),
    }
}

/// Remove `<...>` runs. A `<` with no closing `>` is kept as text.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        match rest[open..].find('>') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}

/// Comma-separated group titles with markup removed
pub fn member_groups(groups: &[Group], messages: &Messages) -> String {
    if groups.is_empty() {
        return messages.translate(MessageKey::NoGroups).to_string();
    }

    // Markup is stripped from the joined string, not per title
    let joined = groups
        .iter()
        .map(Group::tree_title)
        .collect::<Vec<_>>()
        .join(", ");
    strip_tags(&joined)
}

/// Comma-separated catalog names for the given codes.
///
/// A code listed under several categories contributes one name per category.
pub fn member_permissions(codes: &[String], catalog: &PermissionCatalog, messages: &Messages) -> String {
    let names: Vec<String> = codes
        .iter()
        .map(|code| code.to_uppercase())
        .flat_map(|code| {
            catalog
                .entries_for(&code)
                .map(|entry| entry.display_name().to_string())
                .collect::<Vec<_>>()
        })
        .collect();

    if names.is_empty() {
        return messages.translate(MessageKey::NoPermissions).to_string();
    }

    names.join(", ")
}
