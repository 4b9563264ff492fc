//! Writing extracted rows back out as CSV.

use std::io::Write;
use std::path::Path;

use mailsig_core::errors::IngestError;

use super::reader::Batch;

/// Write `batch` to `path` with its original header. The output reads back
/// through `read_batch` unchanged.
pub fn write_batch(path: &Path, batch: &Batch) -> Result<(), IngestError> {
    let io_err = |source: std::io::Error| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = std::fs::File::create(path).map_err(io_err)?;
    write_batch_to(file, path, batch)
}

/// Write `batch` as CSV into any writer. `target` is used in errors.
pub fn write_batch_to<W: Write>(writer: W, target: &Path, batch: &Batch) -> Result<(), IngestError> {
    let csv_err = |e: csv::Error| IngestError::Io {
        path: target.to_path_buf(),
        source: std::io::Error::other(e.to_string()),
    };
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(batch.schema().columns())
        .map_err(csv_err)?;
    for row in batch.rows() {
        csv_writer.write_record(row.raw_cells()).map_err(csv_err)?;
    }
    csv_writer.flush().map_err(|source| IngestError::Io {
        path: target.to_path_buf(),
        source,
    })?;
    Ok(())
}
