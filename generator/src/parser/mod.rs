//! CSV input loading with BOM stripping and encoding detection.
//!
//! Turns the input file into ordered [`Record`]s. No monitor-specific logic
//! here: a record is just column name → cell text.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::Path;

use crate::error::{CsvError, CsvResult};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// One data row of the input table.
///
/// Columns keep header order. A column that is not in the header, or that
/// a short row does not reach, is absent: [`Record::get`] returns `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// 1-based line of the row in the source file
    pub line: u64,
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new(line: u64) -> Self {
        Self { line, fields: Vec::new() }
    }

    /// Builder-style insert, handy in tests.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.push((column.into(), value.into()));
    }

    /// Raw cell value. With duplicate column names the last one wins.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Cell value trimmed, `None` if absent or blank.
    pub fn get_non_blank(&self, column: &str) -> Option<&str> {
        self.get(column).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Parsed input table with metadata
#[derive(Debug, Clone)]
pub struct Table {
    /// Column headers (trimmed)
    pub headers: Vec<String>,
    /// Data rows
    pub records: Vec<Record>,
    /// Encoding the bytes were decoded with
    pub encoding: String,
}

/// Load a CSV file.
///
/// Fails with [`CsvError::NotFound`] before touching anything else when the
/// file is missing.
pub fn read_table<P: AsRef<Path>>(path: P, delimiter: u8) -> CsvResult<Table> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CsvError::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|source| CsvError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_bytes(&bytes, delimiter)
}

/// Parse raw CSV bytes: strip a UTF-8 BOM, decode, then parse.
pub fn parse_bytes(bytes: &[u8], delimiter: u8) -> CsvResult<Table> {
    let (body, encoding) = match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => (rest, "utf-8".to_string()),
        None => (bytes, detect_encoding(bytes)),
    };

    let content = decode_content(body, &encoding)?;
    parse_str(&content, delimiter, encoding)
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 is always reported as `utf-8`; anything else is handed to
/// chardet, which covers spreadsheet exports in Latin-1 or Windows-1252.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        "" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the given encoding label.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    if matches!(encoding, "utf-8" | "utf8" | "ascii") {
        return String::from_utf8(bytes.to_vec()).map_err(|e| CsvError::Encoding(e.to_string()));
    }

    let codec = encoding_rs::Encoding::for_label(encoding.as_bytes())
        .ok_or_else(|| CsvError::Encoding(format!("unsupported encoding '{}'", encoding)))?;

    let (text, _, had_errors) = codec.decode(bytes);
    if had_errors {
        return Err(CsvError::Encoding(format!(
            "input is not valid {}",
            codec.name()
        )));
    }

    Ok(text.trim_start_matches('\u{feff}').to_string())
}

/// Parse decoded CSV text.
///
/// Quoted cells may contain the delimiter. Rows shorter than the header
/// leave the trailing columns absent; extra cells are ignored.
pub fn parse_str(content: &str, delimiter: u8, encoding: String) -> CsvResult<Table> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        let line = row
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 2);

        let mut record = Record::new(line);
        for (header, value) in headers.iter().zip(row.iter()) {
            if header.is_empty() {
                continue;
            }
            record.insert(header.as_str(), value);
        }
        records.push(record);
    }

    Ok(Table {
        headers,
        records,
        encoding,
    })
}
