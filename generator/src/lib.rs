//! # synthgen - Monaco synthetic-monitor projects from a CSV inventory
//!
//! Each CSV row describes one synthetic browser monitor. synthgen writes one
//! directory per row containing the monitor payload (`monitor.json`) and the
//! Monaco project file that deploys it (`project.yaml`).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│   Fields    │────▶│ <id>/monitor.json│
//! │ (BOM / enc) │     │  (records)  │     │ (defaults)  │     │ <id>/project.yaml│
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use synthgen::{generate, GeneratorConfig};
//!
//! fn main() {
//!     let config = GeneratorConfig::default().with_input("vars/monitors.csv");
//!     let report = generate(&config).unwrap();
//!     println!("Generated {} monitors", report.generated.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Paths, file names and delimiter
//! - [`logs`] - Console logging
//! - [`models`] - Monitor definition and project descriptor documents
//! - [`parser`] - CSV loading with BOM and encoding handling
//! - [`transform`] - Field resolution, document assembly and the generation run

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{
    ConfigError,
    CsvError,
    GenerateError,
    GenerateResult,
    RenderError,
};

// =============================================================================
// Re-exports - Configuration & Logging
// =============================================================================

pub use config::GeneratorConfig;
pub use logs::{LogEntry, LogFormat, LogLevel, LOGGER};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    MonitorDefinition,
    ProjectDescriptor,
    Tag,
    TagContext,
};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    read_table,
    parse_bytes,
    parse_str,
    detect_encoding,
    decode_content,
    Record,
    Table,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::{
    generate,
    generate_records,
    render_row,
    FieldWarning,
    GeneratedMonitor,
    GenerationReport,
    MonitorRow,
    RowWarning,
    SkipReason,
    SkippedRow,
};
