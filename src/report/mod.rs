//! Report formatting.
//!
//! Two output formats are supported:
//!
//! - **Table**: one fixed-width row per record, `key type count value`,
//!   prefixed by the file name when several files are reported
//! - **JSON**: a single array of row objects for all files, written when the
//!   report is finished

use std::io::{self, Write};

use serde::Serialize;

use crate::metadata::TagRecord;

/// Width of the key column.
const KEY_WIDTH: usize = 44;

/// Width of the type column.
const TYPE_WIDTH: usize = 9;

/// Width of the count column.
const COUNT_WIDTH: usize = 3;

/// Width of the file name prefix in multi-file reports.
const FILE_WIDTH: usize = 20;

// =============================================================================
// ReportWriter
// =============================================================================

/// Sink for the selected records of each file.
pub trait ReportWriter {
    /// Report the records of one file.
    fn write_records(
        &mut self,
        out: &mut dyn Write,
        file: &str,
        records: &[&TagRecord],
    ) -> io::Result<()>;

    /// Flush anything buffered once all files are reported.
    fn finish(&mut self, out: &mut dyn Write) -> io::Result<()>;
}

// =============================================================================
// Table
// =============================================================================

/// Fixed-width table, rows written as soon as a file is decoded.
#[derive(Debug, Clone, Default)]
pub struct TableWriter {
    show_binary: bool,
    prefix_files: bool,
}

impl TableWriter {
    pub fn new(show_binary: bool, prefix_files: bool) -> Self {
        Self {
            show_binary,
            prefix_files,
        }
    }

    /// Format one record as a table row, without trailing newline.
    pub fn format_row(&self, record: &TagRecord) -> String {
        format!(
            "{:<kw$} {:<tw$} {:>cw$}  {}",
            record.key().as_str(),
            record.type_id().name(),
            record.count(),
            record.display_value(self.show_binary),
            kw = KEY_WIDTH,
            tw = TYPE_WIDTH,
            cw = COUNT_WIDTH,
        )
    }
}

impl ReportWriter for TableWriter {
    fn write_records(
        &mut self,
        out: &mut dyn Write,
        file: &str,
        records: &[&TagRecord],
    ) -> io::Result<()> {
        for record in records {
            if self.prefix_files {
                write!(out, "{:<fw$} ", file, fw = FILE_WIDTH)?;
            }
            writeln!(out, "{}", self.format_row(record))?;
        }
        Ok(())
    }

    fn finish(&mut self, out: &mut dyn Write) -> io::Result<()> {
        out.flush()
    }
}

// =============================================================================
// JSON
// =============================================================================

/// One record as it appears in JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonRow {
    pub file: String,
    pub key: String,
    #[serde(rename = "type")]
    pub type_name: &'static str,
    pub count: u64,
    pub value: String,
}

/// JSON array of all rows, written on [`ReportWriter::finish`].
///
/// Nothing is written when no file was reported, so a run where every file
/// failed leaves stdout empty.
#[derive(Debug, Clone, Default)]
pub struct JsonWriter {
    show_binary: bool,
    files: usize,
    rows: Vec<JsonRow>,
}

impl JsonWriter {
    pub fn new(show_binary: bool) -> Self {
        Self {
            show_binary,
            files: 0,
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[JsonRow] {
        &self.rows
    }
}

impl ReportWriter for JsonWriter {
    fn write_records(
        &mut self,
        _out: &mut dyn Write,
        file: &str,
        records: &[&TagRecord],
    ) -> io::Result<()> {
        self.files += 1;
        self.rows.extend(records.iter().map(|record| JsonRow {
            file: file.to_string(),
            key: record.key().to_string(),
            type_name: record.type_id().name(),
            count: record.count(),
            value: record.display_value(self.show_binary),
        }));
        Ok(())
    }

    fn finish(&mut self, out: &mut dyn Write) -> io::Result<()> {
        if self.files == 0 {
            return Ok(());
        }
        serde_json::to_writer_pretty(&mut *out, &self.rows)?;
        writeln!(out)?;
        out.flush()
    }
}

// =============================================================================
// Tests
// =============================================================================
