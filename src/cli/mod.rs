//! CLI interface for the user security report
//!
//! Provides command-line access to the report, its export and its print model.

pub mod runner;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Users, Groups and Permissions report
#[derive(Parser, Debug, Default)]
#[command(name = "user-security-report")]
#[command(author = "FrazierSystems")]
#[command(version)]
#[command(about = "Audit which users hold which groups and permissions", long_about = None)]
pub struct Cli {
    /// Directory snapshot (JSON) to report on
    #[arg(short, long, global = true, env = "USR_DATA")]
    pub data: Option<PathBuf>,

    /// Acting user, by id or email; must hold the security admin capability
    #[arg(short, long, global = true, env = "USR_ACTOR")]
    pub actor: Option<String>,

    /// Site URL shown in the report description
    #[arg(long, global = true)]
    pub site_url: Option<String>,

    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the report as the grid would, with optional filter, sort and paging
    Show(ShowArgs),

    /// Export every row to CSV and/or JSON files
    Export(ExportArgs),

    /// Write the print model as JSON
    Print(PrintArgs),
}

/// Arguments for the show command
#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Filter as KEY=TEXT (case-insensitive contains); may be repeated
    #[arg(short, long)]
    pub filter: Vec<String>,

    /// Column key to sort by
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Page number, starting at 1
    #[arg(long, requires = "page_size")]
    pub page: Option<usize>,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output directory for exported files
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export formats (csv, json)
    #[arg(short, long, value_delimiter = ',', default_value = "csv")]
    pub format: Vec<String>,

    /// Field delimiter for CSV output
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Omit the CSV header line
    #[arg(long)]
    pub no_header: bool,
}

/// Arguments for the print command
#[derive(Args, Debug)]
pub struct PrintArgs {
    /// Output file; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Omit the header row
    #[arg(long)]
    pub no_header: bool,
}
