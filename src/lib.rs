//! Users, Groups and Permissions report
//!
//! Builds an audit report listing every user, the security groups they belong
//! to and the human-readable names of their effective permissions, with
//! delimited-text export and a print model over the complete row set.

pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod export;
pub mod messages;
pub mod models;
pub mod report;

pub use error::{ReportError, Result, StoreError};
pub use report::UserSecurityReport;

/// Initialize logging
pub fn init_logging(default_level: tracing::Level) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(default_level.into()))
        .try_init();
}
