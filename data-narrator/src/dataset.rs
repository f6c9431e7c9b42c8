//! CSV dataset loading, fixed-width rendering and chunking.
//!
//! The rendered table is what the model sees: a header line followed by one
//! line per row, columns right-aligned to their widest cell.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::error::{Error, Result};

const COLUMN_GAP: &str = "  ";

/// A bounded prefix of a CSV file.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Read the header and at most `row_limit` data rows from `path`.
    pub fn read(path: &Path, row_limit: usize) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::file_access(path, e))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(String::is_empty) {
            return Err(Error::EmptyDataset(path.to_path_buf()));
        }
        let rows = reader
            .records()
            .take(row_limit)
            .map(|record| record.map(|r| record_to_row(&r)))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Read {} rows from {}", rows.len(), path.display());
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Render as fixed-width text. An empty table renders as "".
    pub fn render(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        let widths: Vec<usize> = (0..self.headers.len())
            .map(|col| {
                std::iter::once(&self.headers)
                    .chain(self.rows.iter())
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|row| render_line(row, &widths))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn record_to_row(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:>width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
}

/// Split `text` into consecutive pieces of `chunk_length` characters.
/// The last piece may be shorter.
pub fn chunk_text(text: &str, chunk_length: usize) -> Result<Vec<String>> {
    if chunk_length == 0 {
        return Err(Error::InvalidConfig("chunk length must be at least 1".into()));
    }

    let mut chunks = Vec::with_capacity(text.len() / chunk_length + 1);
    let mut start = 0;
    let mut count = 0;
    for (i, _) in text.char_indices() {
        if count == chunk_length {
            chunks.push(text[start..i].to_string());
            start = i;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(text[start..].to_string());
    }

    Ok(chunks)
}

/// Read, render and chunk a dataset in one step.
pub fn load(path: &Path, row_limit: usize, chunk_length: usize) -> Result<Vec<String>> {
    let dataset = Dataset::read(path, row_limit)?;
    let text = dataset.render();
    let chunks = chunk_text(&text, chunk_length)?;
    info!(
        "Loaded {} rows from {} ({} chars, {} chunks)",
        dataset.rows().len(),
        path.display(),
        text.chars().count(),
        chunks.len()
    );
    Ok(chunks)
}
