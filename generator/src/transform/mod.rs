//! Transformation module.
//!
//! - Fields: typed accessors with defaults over an input record
//! - Monitor: validated row and monitor definition assembly
//! - Project: Monaco project descriptor assembly
//! - Pipeline: directory creation and file writes for a whole table

pub mod fields;
pub mod monitor;
pub mod project;
pub mod pipeline;

pub use fields::{FieldWarning, Resolved, SkipReason};
pub use monitor::MonitorRow;
pub use pipeline::*;
