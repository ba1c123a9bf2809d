//! Delivery of rendered reports to files, terminals or other sinks.

use crate::error::ExportError;
use crate::render::ReportFormat;
use chrono::{DateTime, Utc};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Somewhere a rendered report document can be handed to.
pub trait ExportTarget {
    fn deliver(&mut self, document: &str) -> Result<(), ExportError>;

    /// Short human-readable name of the destination, for status messages.
    fn describe(&self) -> String;
}

/// Writes the document verbatim to a file, creating parent directories.
#[derive(Debug, Clone)]
pub struct FileTarget {
    path: PathBuf,
}

impl FileTarget {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// A timestamped file name inside `dir`.
    pub fn in_directory<P: AsRef<Path>>(
        dir: P,
        format: ReportFormat,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self::new(dir.as_ref().join(default_file_name(format, generated_at)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExportTarget for FileTarget {
    fn deliver(&mut self, document: &str) -> Result<(), ExportError> {
        let to_file_error = |source| ExportError::File {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(to_file_error)?;
            }
        }
        fs::write(&self.path, document).map_err(to_file_error)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Streams the document into any writer, e.g. stdout.
pub struct WriterTarget<W: Write> {
    writer: W,
    name: String,
}

impl<W: Write> WriterTarget<W> {
    pub fn new(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer,
            name: name.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ExportTarget for WriterTarget<W> {
    fn deliver(&mut self, document: &str) -> Result<(), ExportError> {
        self.writer.write_all(document.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Hands an already rendered document to `target` unchanged.
pub fn trigger_export(document: &str, target: &mut dyn ExportTarget) -> Result<(), ExportError> {
    target.deliver(document)?;
    tracing::info!(
        destination = %target.describe(),
        bytes = document.len(),
        "exported report"
    );
    Ok(())
}

pub fn default_file_name(format: ReportFormat, generated_at: DateTime<Utc>) -> String {
    format!(
        "credit-report-{}.{}",
        generated_at.format("%Y%m%d-%H%M%S"),
        format.extension()
    )
}
