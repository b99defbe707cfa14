//! Header-checked CSV tables
//!
//! Every input (claims upload and the three reference tables) is a
//! header-first CSV. `Table` reads the whole file up front so a missing
//! column is reported before any row is turned into a record.

use crate::error::{Error, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A fully read CSV table
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    headers: Vec<String>,
    records: Vec<StringRecord>,
}

impl Table {
    /// Read a table from any reader. `name` labels the table in errors.
    pub fn from_reader<R: Read>(reader: R, name: impl Into<String>) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(reader);

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.into(),
            headers,
            records,
        })
    }

    /// Read a table from disk. A missing file is `Error::MissingFile`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::MissingFile(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        Self::from_reader(file, path.display().to_string())
    }

    /// Label used in error messages
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of a required column
    pub fn column(&self, header: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == header)
            .ok_or_else(|| Error::MissingColumn {
                table: self.name.clone(),
                column: header.to_string(),
            })
    }

    /// Data rows in file order
    pub fn records(&self) -> impl Iterator<Item = &StringRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Cell text at `index`, empty when the row is short
pub fn cell(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}
