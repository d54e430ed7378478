//! JSON export functionality

use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{ReportError, Result};
use crate::report::RecordList;

fn create_writer(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

/// Write every record of `list` to a JSON file, pretty-printed
pub fn export_to_json<R, P>(list: &RecordList<R>, path: P) -> Result<usize>
where
    R: crate::models::Record + Serialize,
    P: AsRef<Path>,
{
    let writer = create_writer(path.as_ref())?;

    serde_json::to_writer_pretty(writer, list.source())
        .map_err(|e| ReportError::Export(format!("JSON serialization error: {}", e)))?;

    Ok(list.len())
}

/// Write any serializable value (e.g. a print document) to a JSON file
pub fn write_json<T, P>(value: &T, path: P) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let writer = create_writer(path.as_ref())?;

    serde_json::to_writer_pretty(writer, value)
        .map_err(|e| ReportError::Export(format!("JSON serialization error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportRow;
    use tempfile::TempDir;

    fn row(id: i64) -> ReportRow {
        ReportRow {
            id,
            first_name: format!("User {}", id),
            surname: String::new(),
            email: String::new(),
            created: "2013-01-01 00:00:00".into(),
            last_visited: "Never".into(),
            groups: "Not in a Security Group".into(),
            permissions: "No Permissions".into(),
        }
    }

    #[test]
    fn test_export_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");

        let list = RecordList::new(vec![row(1), row(2)]);
        let count = export_to_json(&list, &path).unwrap();
        assert_eq!(count, 2);

        let written: Vec<ReportRow> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, vec![row(1), row(2)]);
    }

    #[test]
    fn test_write_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("value.json");

        write_json(&vec!["a", "b"], &path).unwrap();
        assert!(path.exists());
    }
}
