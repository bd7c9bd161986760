//! File-backed collaborators.

use crate::error::StoreError;
use crate::traits::{DocumentSink, SchemaSink, SchemaSource};
use mediaprep_core::CanonicalDocument;
use mediaprep_schema::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A schema kept in a JSON file.
///
/// Applied payloads replace the file, so a later fetch sees them.
#[derive(Debug, Clone)]
pub struct FileSchemaStore {
    path: PathBuf,
}

impl FileSchemaStore {
    /// Uses the schema file at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the schema file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SchemaSource for FileSchemaStore {
    fn fetch_schema(&self) -> Result<JsonSchema, StoreError> {
        let text = fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&text)?;
        debug!(path = %self.path.display(), "read schema file");
        Ok(JsonSchema::from_value(value)?)
    }
}

impl SchemaSink for FileSchemaStore {
    fn apply_schema(&self, payload: &Value) -> Result<(), StoreError> {
        let mut text = serde_json::to_string_pretty(payload)?;
        text.push('\n');
        fs::write(&self.path, text)?;
        info!(path = %self.path.display(), "schema file updated");
        Ok(())
    }
}

/// Output layout of a [`JsonDocumentSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// One pretty-printed JSON array per batch.
    #[default]
    JsonArray,
    /// One compact document per line.
    JsonLines,
}

/// Writes canonical documents as JSON to any writer.
pub struct JsonDocumentSink<W: Write> {
    writer: W,
    format: DocumentFormat,
}

impl<W: Write> JsonDocumentSink<W> {
    /// Wraps `writer`.
    pub fn new(writer: W, format: DocumentFormat) -> Self {
        Self { writer, format }
    }

    /// Flushes and returns the writer.
    pub fn into_inner(mut self) -> Result<W, StoreError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl JsonDocumentSink<BufWriter<File>> {
    /// Creates (or truncates) the file at `path`.
    pub fn create<P: AsRef<Path>>(path: P, format: DocumentFormat) -> Result<Self, StoreError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file), format))
    }
}

impl<W: Write> DocumentSink for JsonDocumentSink<W> {
    fn write_documents(&mut self, documents: &[CanonicalDocument]) -> Result<usize, StoreError> {
        match self.format {
            DocumentFormat::JsonArray => {
                serde_json::to_writer_pretty(&mut self.writer, documents)?;
                self.writer.write_all(b"\n")?;
            }
            DocumentFormat::JsonLines => {
                for document in documents {
                    serde_json::to_writer(&mut self.writer, document)?;
                    self.writer.write_all(b"\n")?;
                }
            }
        }
        self.writer.flush()?;
        debug!(count = documents.len(), format = ?self.format, "documents written");
        Ok(documents.len())
    }
}
