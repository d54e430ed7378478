//! The "Users, Groups and Permissions" report
//!
//! Lists every user with their group memberships and effective permissions,
//! one row per user in ascending id order. The row set is recomputed on every
//! call; nothing is cached between invocations.

pub mod columns;
pub mod list;
pub mod resolve;

pub use columns::*;
pub use list::*;
pub use resolve::*;

use chrono::{Local, NaiveDateTime};
use std::sync::Arc;

use crate::directory::{Authorizer, PermissionCatalogSource, UserStore};
use crate::error::{ReportError, Result};
use crate::export::{self, DelimitedOptions, PrintDocument, PrintMeta, TIMESTAMP_FORMAT};
use crate::messages::{MessageKey, Messages};
use crate::models::{Actor, PermissionCatalog, ReportRow, User};

/// Capability required to view the report
pub const SECURITY_ADMIN_CAPABILITY: &str = "CMS_ACCESS_SecurityAdmin";

/// Site URL used in the description when none is configured
pub const DEFAULT_SITE_URL: &str = "http://localhost";

/// The eight fixed report columns
pub fn user_security_columns() -> ColumnSet {
    ColumnSet::new(vec![
        Column::direct("ID", "User ID"),
        Column::direct("FirstName", "First Name"),
        Column::direct("Surname", "Surname"),
        Column::direct("Email", "Email"),
        Column::direct("Created", "Date Created"),
        Column::direct("LastVisited", "Last Visit"),
        Column::direct("Groups", "Groups"),
        Column::direct("Permissions", "Permissions"),
    ])
}

/// Strip an `http://` or `https://` scheme and any trailing slash
fn host_of(site_url: &str) -> &str {
    let host = site_url
        .strip_prefix("https://")
        .or_else(|| site_url.strip_prefix("http://"))
        .unwrap_or(site_url);
    host.trim_end_matches('/')
}

/// Report over users, their groups and their permissions
#[derive(Clone)]
pub struct UserSecurityReport {
    users: Arc<dyn UserStore>,
    catalog: Arc<dyn PermissionCatalogSource>,
    authorizer: Arc<dyn Authorizer>,
    messages: Messages,
    site_url: String,
    columns: ColumnSet,
}

impl UserSecurityReport {
    pub fn new(
        users: Arc<dyn UserStore>,
        catalog: Arc<dyn PermissionCatalogSource>,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        Self {
            users,
            catalog,
            authorizer,
            messages: Messages::default(),
            site_url: DEFAULT_SITE_URL.to_string(),
            columns: user_security_columns(),
        }
    }

    /// Use one collaborator for users, catalog and authorization
    pub fn from_source<S>(source: Arc<S>) -> Self
    where
        S: UserStore + PermissionCatalogSource + Authorizer + 'static,
    {
        Self::new(source.clone(), source.clone(), source)
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = site_url.into();
        self
    }

    pub fn title(&self) -> &str {
        self.messages.translate(MessageKey::ReportTitle)
    }

    /// Host and current local time, e.g. "example.com - 21/12/2112 10:00:00"
    pub fn description(&self) -> String {
        self.description_at(Local::now().naive_local())
    }

    pub fn description_at(&self, at: NaiveDateTime) -> String {
        format!("{} - {}", host_of(&self.site_url), at.format(TIMESTAMP_FORMAT))
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Every column can be sorted
    pub fn sortable_column_keys(&self) -> Vec<&str> {
        self.columns.keys()
    }

    pub fn last_visited_status(&self, last_visited: Option<&str>) -> String {
        resolve::last_visited_status(last_visited, &self.messages)
    }

    pub fn member_groups(&self, user: &User) -> Result<String> {
        let groups = self.users.groups_of(user)?;
        Ok(resolve::member_groups(&groups, &self.messages))
    }

    pub fn member_permissions(&self, user: &User) -> Result<String> {
        let catalog = self.catalog.catalog()?;
        self.permissions_with(user, &catalog)
    }

    fn permissions_with(&self, user: &User, catalog: &PermissionCatalog) -> Result<String> {
        let codes = self.users.effective_permission_codes(user.id)?;
        Ok(resolve::member_permissions(&codes, catalog, &self.messages))
    }

    fn build_row(&self, user: User, catalog: &PermissionCatalog) -> Result<ReportRow> {
        let groups = self.member_groups(&user)?;
        let permissions = self.permissions_with(&user, catalog)?;
        let last_visited = self.last_visited_status(user.last_visited.as_deref());

        tracing::debug!(user_id = user.id, %groups, %permissions, "Resolved report row");

        Ok(ReportRow {
            id: user.id,
            first_name: user.first_name.unwrap_or_default(),
            surname: user.surname.unwrap_or_default(),
            email: user.email.unwrap_or_default(),
            created: user.created,
            last_visited,
            groups,
            permissions,
        })
    }

    /// Rows produced one user at a time; the catalog is read once up front
    pub fn rows_iter(&self) -> Result<impl Iterator<Item = Result<ReportRow>> + '_> {
        let catalog = self.catalog.catalog()?;
        let users = self.users.list_users()?;

        Ok(users.map(move |user| self.build_row(user?, &catalog)))
    }

    /// All rows, ascending by user id. Any store failure fails the whole report.
    pub fn rows(&self) -> Result<Vec<ReportRow>> {
        let rows = self.rows_iter()?.collect::<Result<Vec<_>>>()?;
        tracing::info!("Generated {} report rows", rows.len());
        Ok(rows)
    }

    /// The complete row set wrapped for grid display
    pub fn source_records(&self) -> Result<RecordList<ReportRow>> {
        Ok(RecordList::new(self.rows()?))
    }

    pub fn can_view(&self, actor: &Actor) -> bool {
        self.authorizer
            .has_capability(actor, SECURITY_ADMIN_CAPABILITY)
    }

    pub fn ensure_can_view(&self, actor: &Actor) -> Result<()> {
        if self.can_view(actor) {
            return Ok(());
        }

        tracing::warn!("Denied report access to {}", actor.label());
        Err(ReportError::AuthorizationDenied {
            actor: actor.label(),
            capability: SECURITY_ADMIN_CAPABILITY.to_string(),
        })
    }

    /// Delimited text over every row, regardless of any grid state
    pub fn export_as_delimited_text(&self, columns: &ColumnSet, options: &DelimitedOptions) -> Result<String> {
        let records = self.source_records()?;
        export::export_as_delimited_text(&records, columns, options)
    }

    /// Print model over every row
    pub fn build_print_model(&self, columns: &ColumnSet, actor: Option<&Actor>) -> Result<PrintDocument> {
        let records = self.source_records()?;
        let mut meta = PrintMeta::new(self.title());
        if let Some(actor) = actor {
            meta = meta.printed_by(actor.label());
        }
        Ok(export::build_print_model(&records, columns, &meta))
    }
}
