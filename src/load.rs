//! Loader: header row plus one CSV line per validated row.

use crate::error::LoadError;
use crate::types::TabularRow;
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, instrument};

type Result<T> = std::result::Result<T, LoadError>;

/// Write `rows` to `path`, replacing any existing file. Returns the row count.
#[instrument(skip(path, rows), fields(path = %path.display(), rows = rows.len()))]
pub fn write_csv<R: TabularRow>(path: &Path, rows: &[R]) -> Result<usize> {
    let io_err = |source| LoadError::Io {
        path: path.display().to_string(),
        source,
    };
    let csv_err = |source| LoadError::Csv {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let file = File::create(path).map_err(io_err)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);

    writer.write_record(R::HEADER).map_err(csv_err)?;
    for row in rows {
        writer.write_record(row.to_record()).map_err(csv_err)?;
    }
    writer.flush().map_err(io_err)?;

    debug!("Wrote {} rows", rows.len());
    Ok(rows.len())
}
