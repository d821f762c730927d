//! Generation run: input table → one directory per monitor.
//!
//! # Example
//!
//! ```rust,ignore
//! use synthgen::{generate, GeneratorConfig};
//!
//! let report = generate(&GeneratorConfig::default())?;
//! println!("Generated {} monitors", report.generated.len());
//! ```
//!
//! The whole input is loaded before anything is written, so a missing or
//! headerless file leaves the filesystem untouched. Rows are then processed
//! strictly in order; the first write failure stops the run and keeps what
//! was already written.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::GeneratorConfig;
use crate::error::{GenerateError, GenerateResult};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::{MonitorDefinition, ProjectDescriptor};
use crate::parser::{read_table, Record};

use super::fields::{FieldWarning, SkipReason};
use super::monitor::MonitorRow;

/// A monitor directory written during the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMonitor {
    pub id: String,
    pub dir: PathBuf,
    pub monitor_file: PathBuf,
    pub project_file: PathBuf,
}

/// A row that produced no output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: SkipReason,
}

/// A warning attached to a generated row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWarning {
    pub line: u64,
    pub id: String,
    pub warning: FieldWarning,
}

/// Outcome of a generation run
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Monitor directories in input order, each listed once
    pub generated: Vec<GeneratedMonitor>,
    pub skipped: Vec<SkippedRow>,
    pub warnings: Vec<RowWarning>,
    /// Identifiers seen more than once; later rows overwrite earlier files
    pub duplicates: Vec<String>,
}

impl GenerationReport {
    pub fn is_empty(&self) -> bool {
        self.generated.is_empty()
    }

    /// One-line count of generated, skipped and overwritten monitors plus warnings.
    pub fn summary(&self) -> String {
        format!(
            "Generated: {} monitors, {} rows skipped, {} duplicates, {} warnings",
            self.generated.len(),
            self.skipped.len(),
            self.duplicates.len(),
            self.warnings.len()
        )
    }
}

/// Read the configured input file and write every monitor it describes.
pub fn generate(config: &GeneratorConfig) -> GenerateResult<GenerationReport> {
    let table = read_table(&config.input_path, config.delimiter)?;
    log_info(format!(
        "Read {} rows from {} ({})",
        table.records.len(),
        config.input_path.display(),
        table.encoding
    ));

    generate_records(&table.records, config)
}

/// Write every monitor described by already-parsed records.
pub fn generate_records(records: &[Record], config: &GeneratorConfig) -> GenerateResult<GenerationReport> {
    ensure_dir(&config.output_dir, true)?;

    let mut report = GenerationReport::default();

    for record in records {
        let row = match MonitorRow::from_record(record) {
            Ok(row) => row,
            Err(reason) => {
                log_warning(format!(
                    "Skipping row {} due to {}: {}",
                    record.line,
                    reason,
                    serde_json::to_string(record).unwrap_or_default()
                ));
                report.skipped.push(SkippedRow { line: record.line, reason });
                continue;
            }
        };

        for warning in &row.warnings {
            log_warning(format!("{} (row {}, {})", warning, record.line, row.id));
            report.warnings.push(RowWarning {
                line: record.line,
                id: row.id.clone(),
                warning: warning.clone(),
            });
        }

        let monitor = write_monitor(&row, config)?;

        if report.generated.iter().any(|m| m.id == monitor.id) {
            log_warning(format!(
                "Duplicate monitor_id '{}' on row {} overwrote earlier files",
                monitor.id, record.line
            ));
            report.duplicates.push(monitor.id);
        } else {
            report.generated.push(monitor);
        }
    }

    Ok(report)
}

/// Render both documents of one row without touching the filesystem.
pub fn render_row(row: &MonitorRow, config: &GeneratorConfig) -> GenerateResult<(String, String)> {
    let monitor_json = MonitorDefinition::from_row(row).to_json()?;
    let project_yaml = ProjectDescriptor::from_row(row, config).to_yaml()?;
    Ok((monitor_json, project_yaml))
}

fn write_monitor(row: &MonitorRow, config: &GeneratorConfig) -> GenerateResult<GeneratedMonitor> {
    let dir = config.monitor_dir(&row.id);
    ensure_dir(&dir, false)?;

    let (monitor_json, project_yaml) = render_row(row, config)?;

    let monitor_file = dir.join(&config.monitor_file_name);
    write_file(&monitor_file, &monitor_json)?;

    let project_file = dir.join(&config.project_file_name);
    write_file(&project_file, &project_yaml)?;

    Ok(GeneratedMonitor {
        id: row.id.clone(),
        dir,
        monitor_file,
        project_file,
    })
}

fn ensure_dir(dir: &Path, announce: bool) -> GenerateResult<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| GenerateError::io(dir, e))?;
    if announce {
        log_success(format!("Created base directory: {}", dir.display()));
    }
    Ok(())
}

fn write_file(path: &Path, content: &str) -> GenerateResult<()> {
    fs::write(path, content).map_err(|e| GenerateError::io(path, e))?;
    log_info_indent(format!("Created {}", path.display()), 1);
    Ok(())
}
