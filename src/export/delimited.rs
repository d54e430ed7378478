//! Delimited text export

use std::fs;
use std::path::Path;

use crate::error::{ReportError, Result};
use crate::models::Record;
use crate::report::{Column, ColumnSet, RecordList};

/// Options for delimited export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedOptions {
    pub delimiter: u8,
    pub include_header: bool,
}

impl Default for DelimitedOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_header: true,
        }
    }
}

impl DelimitedOptions {
    /// Build options from a configured delimiter character
    pub fn new(delimiter: char, include_header: bool) -> Result<Self> {
        if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
            return Err(ReportError::Config(format!(
                "Unsupported export delimiter {:?}",
                delimiter
            )));
        }
        Ok(Self {
            delimiter: delimiter as u8,
            include_header,
        })
    }
}

fn normalize_line_breaks(value: &str) -> String {
    value.replace('\r', "\n")
}

/// Render every record of `list` as delimited text.
///
/// Every field is quoted; embedded quotes are written as `\"`.
pub fn export_as_delimited_text<R: Record>(
    list: &RecordList<R>,
    columns: &ColumnSet,
    options: &DelimitedOptions,
) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .quote_style(csv::QuoteStyle::Always)
        .double_quote(false)
        .escape(b'\\')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if options.include_header {
        writer
            .write_record(columns.iter().map(Column::export_header))
            .map_err(|e| ReportError::Export(format!("CSV header error: {}", e)))?;
    }

    for record in list.source() {
        let fields = columns
            .iter()
            .map(|column| normalize_line_breaks(&column.resolve(record)));
        writer
            .write_record(fields)
            .map_err(|e| ReportError::Export(format!("CSV serialization error: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Export(format!("CSV flush error: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| ReportError::Export(format!("CSV encoding error: {}", e)))
}

/// Write the delimited export to a file, returning the number of records written
pub fn export_to_file<R, P>(
    list: &RecordList<R>,
    columns: &ColumnSet,
    options: &DelimitedOptions,
    path: P,
) -> Result<usize>
where
    R: Record,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let text = export_as_delimited_text(list, columns, options)?;
    fs::write(path, text)?;

    tracing::info!("Exported {} records to {:?}", list.len(), path);
    Ok(list.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ListState, SortDirection};
    use tempfile::TempDir;

    struct Note {
        id: i64,
        text: String,
    }

    impl Record for Note {
        fn value(&self, key: &str) -> Option<String> {
            match key {
                "ID" => Some(self.id.to_string()),
                "Text" => Some(self.text.clone()),
                _ => None,
            }
        }
    }

    fn notes() -> RecordList<Note> {
        RecordList::new(vec![
            Note { id: 1, text: "plain".into() },
            Note { id: 2, text: "say \"hi\"".into() },
            Note { id: 3, text: "line\r\nbreak".into() },
        ])
    }

    fn columns() -> ColumnSet {
        ColumnSet::new(vec![Column::direct("ID", "Note ID"), Column::direct("Text", "Text")])
    }

    #[test]
    fn test_header_and_quoting() {
        let text = export_as_delimited_text(&notes(), &columns(), &DelimitedOptions::default()).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();

        assert_eq!(lines[0], r#""Note ID","Text""#);
        assert_eq!(lines[1], r#""1","plain""#);
        assert_eq!(lines[2], r#""2","say \"hi\"""#);
        assert!(text.contains("\"3\",\"line\n\nbreak\"\n"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_delimiter_and_no_header() {
        let options = DelimitedOptions::new(';', false).unwrap();
        let text = export_as_delimited_text(&notes(), &columns(), &options).unwrap();
        assert!(text.starts_with(r#""1";"plain""#));
    }

    #[test]
    fn test_computed_column_header_uses_key() {
        let columns = ColumnSet::new(vec![
            Column::direct("ID", "Note ID"),
            Column::computed("Length", "Text length", |r: &dyn Record| {
                r.value("Text").map(|t| t.len()).unwrap_or(0).to_string()
            }),
        ]);
        let text = export_as_delimited_text(&notes(), &columns, &DelimitedOptions::default()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(r#""Note ID","Length""#));
        assert_eq!(lines.next(), Some(r#""1","5""#));
    }

    #[test]
    fn test_ignores_grid_state() {
        let state = ListState::default()
            .filter("Text", "plain")
            .sort("ID", SortDirection::Descending)
            .page(0, 1);
        let list = notes().with_state(state);
        assert_eq!(list.view().len(), 1);

        let options = DelimitedOptions::new(',', false).unwrap();
        let text = export_as_delimited_text(&list, &ColumnSet::new(vec![Column::direct("ID", "ID")]), &options).unwrap();
        assert_eq!(text, "\"1\"\n\"2\"\n\"3\"\n");
    }

    #[test]
    fn test_rejects_bad_delimiter() {
        assert!(DelimitedOptions::new('"', true).is_err());
        assert!(DelimitedOptions::new('é', true).is_err());
        assert_eq!(DelimitedOptions::new('\t', true).unwrap().delimiter, b'\t');
    }

    #[test]
    fn test_export_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("report.csv");

        let count = export_to_file(&notes(), &columns(), &DelimitedOptions::default(), &path).unwrap();
        assert_eq!(count, 3);
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("\"Note ID\""));
    }
}
