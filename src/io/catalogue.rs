//! Earthquake catalogue ingest.
//!
//! This module turns a catalogue file into the plain magnitude list the
//! estimation core consumes. Two layouts are recognised:
//!
//! - `*.cat`: whitespace-separated columns with a header row (NKUA-SL style,
//!   magnitude column `Mag`)
//! - anything else: CSV with a header row (magnitude column `Magnitude`)
//!
//! Design goals:
//! - **Strict schema** for the magnitude column (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Separation of concerns**: no binning or fitting here

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::StringRecord;

use crate::error::AppError;

/// Column names tried, in order, when no explicit column is given.
const DEFAULT_COLUMNS: [&str; 2] = ["magnitude", "mag"];

/// Physical layout of a catalogue file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogueFormat {
    /// Whitespace-separated columns (`.cat`).
    Whitespace,
    /// Comma-separated values.
    Csv,
}

impl CatalogueFormat {
    pub fn from_path(path: &Path) -> Self {
        let is_cat = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("cat"));
        if is_cat {
            CatalogueFormat::Whitespace
        } else {
            CatalogueFormat::Csv
        }
    }
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: magnitudes plus row diagnostics.
#[derive(Debug, Clone)]
pub struct Catalogue {
    pub format: CatalogueFormat,
    /// Header name of the column magnitudes were read from.
    pub column: String,
    pub magnitudes: Vec<f64>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Open and read a catalogue file, detecting the layout from its extension.
pub fn load_catalogue(path: &Path, column: Option<&str>) -> Result<Catalogue, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open catalogue '{}': {e}", path.display())))?;
    let format = CatalogueFormat::from_path(path);
    let catalogue = read_catalogue(file, format, column)?;

    log::info!(
        "read {} magnitudes from '{}' ({} rows, {} skipped)",
        catalogue.magnitudes.len(),
        path.display(),
        catalogue.rows_read,
        catalogue.row_errors.len()
    );
    Ok(catalogue)
}

/// Read a catalogue from any reader.
pub fn read_catalogue<R: Read>(reader: R, format: CatalogueFormat, column: Option<&str>) -> Result<Catalogue, AppError> {
    let (header_name, magnitudes, row_errors, rows_read) = match format {
        CatalogueFormat::Csv => read_csv(reader, column)?,
        CatalogueFormat::Whitespace => read_whitespace(reader, column)?,
    };

    if magnitudes.is_empty() {
        return Err(AppError::new(
            3,
            format!("No valid magnitudes in column `{header_name}` ({rows_read} rows read)."),
        ));
    }

    Ok(Catalogue {
        format,
        column: header_name,
        magnitudes,
        row_errors,
        rows_read,
    })
}

type Parsed = (String, Vec<f64>, Vec<RowError>, usize);

fn read_csv<R: Read>(reader: R, column: Option<&str>) -> Result<Parsed, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let names: Vec<&str> = headers.iter().collect();
    let (idx, header_name) = resolve_column(&names, column)?;

    let mut magnitudes = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (i, result) in reader.records().enumerate() {
        // +2: records start after the header and lines are 1-based.
        let line = i + 2;
        rows_read += 1;

        let record: StringRecord = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_magnitude(record.get(idx), &header_name) {
            Ok(m) => magnitudes.push(m),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    Ok((header_name, magnitudes, row_errors, rows_read))
}

fn read_whitespace<R: Read>(reader: R, column: Option<&str>) -> Result<Parsed, AppError> {
    let mut lines = BufReader::new(reader).lines().enumerate();

    // Header: first non-blank line that is not a `#` comment.
    let (idx, header_name) = loop {
        let Some((_, line)) = lines.next() else {
            return Err(AppError::new(2, "Catalogue is empty (no header row)."));
        };
        let line = line.map_err(|e| AppError::new(2, format!("Failed to read catalogue: {e}")))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let names: Vec<&str> = trimmed.split_whitespace().collect();
        break resolve_column(&names, column)?;
    };

    let mut magnitudes = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (i, line) in lines {
        let line_no = i + 1;
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                row_errors.push(RowError {
                    line: line_no,
                    message: format!("Read error: {e}"),
                });
                continue;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        rows_read += 1;

        match parse_magnitude(trimmed.split_whitespace().nth(idx), &header_name) {
            Ok(m) => magnitudes.push(m),
            Err(message) => row_errors.push(RowError { line: line_no, message }),
        }
    }

    Ok((header_name, magnitudes, row_errors, rows_read))
}

/// Find the magnitude column; returns its index and original header text.
fn resolve_column(names: &[&str], column: Option<&str>) -> Result<(usize, String), AppError> {
    let header_map: HashMap<String, usize> = names
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect();

    let candidates: Vec<String> = match column {
        Some(c) => vec![normalize_header_name(c)],
        None => DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
    };

    candidates
        .iter()
        .find_map(|c| header_map.get(c).copied())
        .map(|idx| (idx, names[idx].trim().trim_start_matches('\u{feff}').to_string()))
        .ok_or_else(|| {
            AppError::new(
                2,
                format!(
                    "Missing magnitude column (looked for {}; found: {}).",
                    candidates.join(", "),
                    names.join(", ")
                ),
            )
        })
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_magnitude(field: Option<&str>, column: &str) -> Result<f64, String> {
    let raw = field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing `{column}` value."))?;
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("Invalid `{column}` value: '{raw}'."))?;
    if !value.is_finite() {
        return Err(format!("Non-finite `{column}` value."));
    }
    Ok(value)
}
