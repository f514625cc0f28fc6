//! CSV output sink
//!
//! Rows are flushed as soon as they are written so an interrupted run keeps
//! everything exported up to that point.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::core::models::MessageRecord;
use crate::errors::HistoryError;

pub const CSV_HEADER: [&str; 3] = ["timestamp", "user", "message"];

pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl CsvSink<File> {
    /// Create (or truncate) the output file and write the header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or the header cannot be written.
    pub fn create(path: &Path) -> Result<Self, HistoryError> {
        let file = File::create(path).map_err(|e| {
            HistoryError::IoError(std::io::Error::new(
                e.kind(),
                format!("cannot create file {}: {}", path.display(), e),
            ))
        })?;
        info!("Writing history to {}", path.display());
        Self::new(file)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap `inner` and write the header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be written or flushed.
    pub fn new(inner: W) -> Result<Self, HistoryError> {
        let mut writer = csv::WriterBuilder::new().from_writer(inner);
        writer.write_record(CSV_HEADER)?;
        writer.flush()?;

        Ok(Self { writer, rows: 0 })
    }

    /// Append one record and flush it through to the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be encoded or flushed.
    pub fn write_record(&mut self, record: &MessageRecord) -> Result<(), HistoryError> {
        self.writer.write_record(record.to_row())?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Data rows written so far, excluding the header.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    pub fn into_inner(self) -> Result<W, HistoryError> {
        self.writer
            .into_inner()
            .map_err(|e| {
                let inner = e.error();
                HistoryError::IoError(std::io::Error::new(inner.kind(), inner.to_string()))
            })
    }
}
