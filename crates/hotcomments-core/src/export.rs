use hotcomments_models::{CommentRecord, FIELD_NAMES};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

/// UTF-8 byte-order mark, so spreadsheet tools detect the encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result of one export attempt. Exporters report through this instead of
/// returning errors, so one failed format never blocks the next.
#[derive(Debug)]
pub enum ExportOutcome {
    Written { path: PathBuf, records: usize },
    NothingToSave,
    Failed { path: PathBuf, error: ExportError },
}

impl ExportOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, ExportOutcome::Written { .. })
    }

    fn from_result(path: &Path, records: usize, result: Result<(), ExportError>) -> Self {
        match result {
            Ok(()) => ExportOutcome::Written { path: path.to_path_buf(), records },
            Err(error) => ExportOutcome::Failed { path: path.to_path_buf(), error },
        }
    }
}

/// Write records as a 4-space indented JSON array. Non-ASCII text is kept literal.
pub fn write_json(records: &[CommentRecord], path: &Path) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut serializer)?;
    writer.flush()?;
    Ok(())
}

/// Write records as BOM-prefixed UTF-8 CSV with a fixed header row.
pub fn write_csv(records: &[CommentRecord], path: &Path) -> Result<(), ExportError> {
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(file);
    writer.write_record(FIELD_NAMES)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read back a file produced by [`write_json`].
pub fn load_json(path: &Path) -> Result<Vec<CommentRecord>, ExportError> {
    let file = File::open(path)?;
    let records = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(records)
}

pub fn export_json(records: &[CommentRecord], path: &Path) -> ExportOutcome {
    let outcome = ExportOutcome::from_result(path, records.len(), write_json(records, path));
    log_outcome("json", &outcome);
    outcome
}

/// Export to CSV. An empty collection is reported and leaves `path` untouched.
pub fn export_csv(records: &[CommentRecord], path: &Path) -> ExportOutcome {
    let outcome = if records.is_empty() {
        ExportOutcome::NothingToSave
    } else {
        ExportOutcome::from_result(path, records.len(), write_csv(records, path))
    };
    log_outcome("csv", &outcome);
    outcome
}

fn log_outcome(format: &str, outcome: &ExportOutcome) {
    match outcome {
        ExportOutcome::Written { path, records } => {
            info!(format, path = %path.display(), records, "Saved comments");
        }
        ExportOutcome::NothingToSave => {
            warn!(format, "Nothing to save");
        }
        ExportOutcome::Failed { path, error } => {
            error!(format, path = %path.display(), error = %error, "Failed to save comments");
        }
    }
}

#[cfg(test)]
mod tests;
