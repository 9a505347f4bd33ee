//! Command-line application flow.
//!
//! [`run`] ties the pieces together: compile the selector, then for each
//! file load, decode, filter and report. Files are independent; a failing
//! file is reported on stderr and the remaining files are still processed.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::config::{Config, OutputFormat, PrintMode};
use crate::error::AppError;
use crate::format::{self, DecodeOptions};
use crate::io;
use crate::metadata::TagRecord;
use crate::report::{JsonWriter, ReportWriter, TableWriter};
use crate::select::Selector;

/// Program name used as the prefix of error messages.
pub const PROGRAM: &str = "imgmeta";

/// Run the application and return the process exit code.
///
/// Exit code is 0 when every file was reported and 1 otherwise. Report rows
/// go to `stdout`, one error line per failed file to `stderr`.
pub fn run(config: &Config, stdout: &mut dyn Write, stderr: &mut dyn Write) -> i32 {
    // Configuration and patterns fail before any file is read
    let selector = match prepare(config) {
        Ok(selector) => selector,
        Err(e) => {
            // Nothing sensible is left to do if stderr is gone
            let _ = writeln!(stderr, "{PROGRAM}: {e}");
            return 1;
        }
    };

    let options = DecodeOptions {
        max_depth: config.max_depth,
    };
    let mut writer: Box<dyn ReportWriter> = match config.format {
        OutputFormat::Table => Box::new(TableWriter::new(config.binary, config.prefix_files())),
        OutputFormat::Json => Box::new(JsonWriter::new(config.binary)),
    };

    let mut status = 0;
    for file in &config.files {
        let result = print_file(file, &options, &selector, config.print, writer.as_mut(), stdout);
        if let Err(e) = result {
            report_error(stderr, file, &e);
            status = 1;
        }
    }

    if let Err(e) = writer.finish(stdout) {
        report_error(stderr, "", &AppError::from(e));
        status = 1;
    }

    status
}

fn prepare(config: &Config) -> Result<Selector, AppError> {
    config.validate().map_err(AppError::Config)?;
    Ok(Selector::from_args(&config.greps, &config.keys, config.literal)?)
}

fn print_file(
    file: &str,
    options: &DecodeOptions,
    selector: &Selector,
    print: PrintMode,
    writer: &mut dyn ReportWriter,
    stdout: &mut dyn Write,
) -> Result<(), AppError> {
    let data = io::load(Path::new(file))?;
    let metadata = format::decode_with(&data, options)?;

    let selected: Vec<&TagRecord> = selector.apply(
        metadata
            .records()
            .iter()
            .filter(|record| print.includes(record.key().family())),
    );
    debug!(
        file,
        decoded = metadata.records().len(),
        selected = selected.len(),
        "Selected records"
    );

    writer.write_records(stdout, file, &selected)?;
    Ok(())
}

fn report_error(stderr: &mut dyn Write, file: &str, error: &AppError) {
    let line = match error {
        AppError::Decode(e) => {
            debug!(file, reason = e.reason(), "Decoding failed");
            format!("{PROGRAM}: Exception in print action for file {file}: {e}")
        }
        other => format!("{PROGRAM}: {other}"),
    };
    let _ = writeln!(stderr, "{line}");
}

// =============================================================================
// Tests
// =============================================================================
