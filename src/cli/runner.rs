//! CLI command runner

use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::directory::Directory;
use crate::export::{export_to_file, export_to_json, write_json, DelimitedOptions, PrintMeta};
use crate::models::{Actor, ExportFormat};
use crate::report::{ListState, SortDirection, UserSecurityReport};

use super::{Cli, Commands, ExportArgs, PrintArgs, ShowArgs};

/// File name stem for exported reports
const EXPORT_FILE_STEM: &str = "users_groups_permissions";

/// Everything a command needs: the report, its settings and who is asking
struct Session {
    report: UserSecurityReport,
    settings: Settings,
    actor: Actor,
}

/// Run the CLI application
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        println!("Users, Groups and Permissions report");
        println!("Use --help for usage information");
        return Ok(());
    };

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    let session = open_session(settings, cli.data, cli.actor, cli.site_url)?;

    match command {
        Commands::Show(args) => run_show(&session, args),
        Commands::Export(args) => run_export(&session, args),
        Commands::Print(args) => run_print(&session, args),
    }
}

/// Load the directory, build the report and check the actor may view it
fn open_session(
    settings: Settings,
    data: Option<PathBuf>,
    actor: Option<String>,
    site_url: Option<String>,
) -> anyhow::Result<Session> {
    let data = data
        .or_else(|| settings.snapshot_path.as_ref().map(PathBuf::from))
        .ok_or_else(|| anyhow::anyhow!("No directory snapshot given. Use --data or set snapshotPath in settings"))?;

    let directory = Arc::new(
        Directory::load(&data).with_context(|| format!("Failed to load {}", data.display()))?,
    );

    let actor = resolve_actor(&directory, actor.as_deref())?;

    let report = UserSecurityReport::from_source(directory)
        .with_messages(settings.messages())
        .with_site_url(site_url.unwrap_or_else(|| settings.site_url().to_string()));

    report.ensure_can_view(&actor)?;

    Ok(Session {
        report,
        settings,
        actor,
    })
}

/// Find the acting user by id or email
fn resolve_actor(directory: &Directory, actor: Option<&str>) -> anyhow::Result<Actor> {
    let actor = actor.ok_or_else(|| anyhow::anyhow!("No acting user given. Use --actor or set USR_ACTOR"))?;

    let user = match actor.parse::<i64>() {
        Ok(id) => directory.user(id),
        Err(_) => directory.user_by_email(actor),
    };

    user.map(Actor::from)
        .ok_or_else(|| anyhow::anyhow!("Unknown user '{}'", actor))
}

/// Turn show arguments into grid state
fn list_state(args: &ShowArgs) -> anyhow::Result<ListState> {
    let mut state = ListState::default();

    for filter in &args.filter {
        let (key, needle) = filter
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Filter '{}' must look like KEY=TEXT", filter))?;
        state = state.filter(key.trim(), needle);
    }

    if let Some(key) = &args.sort {
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        state = state.sort(key.as_str(), direction);
    }

    if let (Some(page), Some(size)) = (args.page, args.page_size) {
        anyhow::ensure!(page > 0, "Pages start at 1");
        state = state.page((page - 1) * size, size);
    }

    Ok(state)
}

/// Run the show command
fn run_show(session: &Session, args: ShowArgs) -> anyhow::Result<()> {
    let report = &session.report;

    if let Some(key) = &args.sort {
        if !report.sortable_column_keys().contains(&key.as_str()) {
            anyhow::bail!(
                "Cannot sort by '{}'. Sortable columns: {}",
                key,
                report.sortable_column_keys().join(", ")
            );
        }
    }

    let state = list_state(&args)?;
    let records = report.source_records()?.with_state(state);
    let visible = records.view();

    println!("{}", report.title());
    println!("{}", report.description());
    println!();
    println!(
        "{}",
        report
            .columns()
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join("\t")
    );
    for row in &visible {
        let cells: Vec<String> = report.columns().iter().map(|c| c.resolve(*row)).collect();
        println!("{}", cells.join("\t"));
    }
    println!("\n{} of {} users shown", visible.len(), records.len());

    Ok(())
}

/// Run the export command
fn run_export(session: &Session, args: ExportArgs) -> anyhow::Result<()> {
    let formats = args
        .format
        .iter()
        .map(|f| f.parse::<ExportFormat>().map_err(anyhow::Error::msg))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let output = args
        .output
        .or_else(|| session.settings.export_directory.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("./report_export"));

    let export = &session.settings.export;
    let options = DelimitedOptions::new(
        args.delimiter.unwrap_or(export.delimiter),
        export.include_header && !args.no_header,
    )?;

    let records = session.report.source_records()?;
    tracing::info!("{} exporting {} rows", session.actor.label(), records.len());

    for format in formats {
        let path = output.join(format!("{}.{}", EXPORT_FILE_STEM, format.extension()));
        let count = match format {
            ExportFormat::Csv => export_to_file(&records, session.report.columns(), &options, &path)?,
            ExportFormat::Json => export_to_json(&records, &path)?,
        };
        println!("✓ {} records to {}", count, path.display());
    }

    Ok(())
}

/// Run the print command
fn run_print(session: &Session, args: PrintArgs) -> anyhow::Result<()> {
    let records = session.report.source_records()?;

    let mut meta = PrintMeta::new(session.report.title()).printed_by(session.actor.label());
    if args.no_header {
        meta = meta.without_header();
    }
    let document = crate::export::build_print_model(&records, session.report.columns(), &meta);

    match args.output.as_deref() {
        Some(path) => {
            write_json(&document, path)?;
            println!("✓ Print model written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&document)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FIXTURE: &str = include_str!("../../tests/fixtures/directory.json");

    fn fixture_dir() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("directory.json");
        std::fs::write(&path, FIXTURE).unwrap();
        (dir, path)
    }

    #[test]
    fn test_session_requires_security_admin() {
        let (_dir, data) = fixture_dir();

        let session = open_session(Settings::default(), Some(data.clone()), Some("admin@example.com".into()), None);
        assert!(session.is_ok());

        let err = open_session(Settings::default(), Some(data.clone()), Some("2".into()), None)
            .err()
            .unwrap();
        assert!(err.to_string().contains("Access denied"));

        assert!(open_session(Settings::default(), Some(data), Some("nobody".into()), None).is_err());
    }

    #[test]
    fn test_session_needs_data() {
        assert!(open_session(Settings::default(), None, Some("1".into()), None).is_err());
    }

    #[test]
    fn test_list_state_from_args() {
        let args = ShowArgs {
            filter: vec!["Groups=Test".into()],
            sort: Some("Email".into()),
            desc: true,
            page: Some(2),
            page_size: Some(3),
        };
        let state = list_state(&args).unwrap();
        assert_eq!(state.filters.len(), 1);
        assert_eq!(state.sort.as_ref().map(|s| s.direction), Some(SortDirection::Descending));
        assert_eq!(state.page.map(|p| (p.offset, p.limit)), Some((3, 3)));

        let bad = ShowArgs {
            filter: vec!["Groups".into()],
            ..ShowArgs::default()
        };
        assert!(list_state(&bad).is_err());
    }

    #[test]
    fn test_export_writes_files() {
        let (dir, data) = fixture_dir();
        let session = open_session(Settings::default(), Some(data), Some("1".into()), None).unwrap();
        let output = dir.path().join("out");

        run_export(
            &session,
            ExportArgs {
                output: Some(output.clone()),
                format: vec!["csv".into(), "json".into()],
                delimiter: None,
                no_header: false,
            },
        )
        .unwrap();

        let csv = std::fs::read_to_string(output.join("users_groups_permissions.csv")).unwrap();
        assert!(csv.starts_with("\"User ID\",\"First Name\""));
        assert!(output.join("users_groups_permissions.json").exists());
    }

    #[test]
    fn test_print_writes_file() {
        let (dir, data) = fixture_dir();
        let session = open_session(Settings::default(), Some(data), Some("1".into()), None).unwrap();
        let output = dir.path().join("print.json");

        run_print(
            &session,
            PrintArgs {
                output: Some(output.clone()),
                no_header: true,
            },
        )
        .unwrap();

        let doc: crate::export::PrintDocument =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(doc.printed_by.as_deref(), Some("Admin User"));
        assert!(doc.header.is_none());
        assert_eq!(doc.rows.len(), 8);
    }
}
