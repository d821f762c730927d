//! Typed field accessors over an input [`Record`].
//!
//! Each accessor returns the resolved value, falling back to a fixed default
//! when the input does not provide one. Accessors that can reject input return
//! a [`Resolved`] carrying the warnings raised along the way, so the caller
//! decides how to report them.
//!
//! Free-text fields (name, target, script kind, description) and the enabled
//! flag only take their default when the column is missing; a present empty
//! cell is kept as-is. The identifier, frequency, locations and tags treat a
//! blank cell the same as a missing one.

use std::fmt;

use crate::models::Tag;
use crate::parser::Record;

/// Column names of the input table.
pub mod columns {
    pub const MONITOR_ID: &str = "monitor_id";
    pub const MONITOR_NAME: &str = "monitor_name";
    pub const TARGET_URL: &str = "target_url";
    pub const SCRIPT_TYPE: &str = "script_type";
    pub const DESCRIPTION: &str = "description";
    pub const ENABLED: &str = "enabled";
    pub const FREQUENCY_MIN: &str = "frequencyMin";
    /// Location columns in lookup order.
    pub const LOCATIONS: [&str; 3] = ["locations", "location", "location_id"];
    pub const TAG_PURPOSE: &str = "tag_purpose";
    pub const TAG_INDUSTRY: &str = "tag_industry";
    pub const TAG_OWNER: &str = "tag_owner";
    pub const TAG_EXPIRY_DATE: &str = "tag_expiry_date";
    pub const TAG_CUSTOM: &str = "tag_custom";
}

pub const DEFAULT_MONITOR_NAME: &str = "Unnamed Monitor";
pub const DEFAULT_TARGET_URL: &str = "https://www.dynatrace.com";
pub const DEFAULT_SCRIPT_TYPE: &str = "availability";
pub const DEFAULT_FREQUENCY_MIN: u32 = 60;
pub const DEFAULT_LOCATION: &str = "GEOLOCATION-7F39AED31559436D";
/// Key of the tag added when a row defines no tag at all.
pub const SENTINEL_TAG_KEY: &str = "MonacoCsvGenerated";

/// Separator of list cells (locations, custom tags).
pub const LIST_SEPARATOR: char = ';';

/// Fixed-purpose tag columns and the tag key each one produces.
pub const FIXED_TAG_COLUMNS: [(&str, &str); 4] = [
    (columns::TAG_PURPOSE, "Purpose"),
    (columns::TAG_INDUSTRY, "Industry"),
    (columns::TAG_OWNER, "Owner"),
    (columns::TAG_EXPIRY_DATE, "ExpiryDate"),
];

// =============================================================================
// Outcomes
// =============================================================================

/// Why a record produced no monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `monitor_id` absent or blank.
    MissingIdentifier,
    /// `monitor_id` cannot be used as a directory name.
    UnsafeIdentifier(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingIdentifier => write!(f, "missing '{}'", columns::MONITOR_ID),
            Self::UnsafeIdentifier(id) => {
                write!(f, "'{}' value '{}' is not a valid directory name", columns::MONITOR_ID, id)
            }
        }
    }
}

/// A value that was replaced or dropped while resolving a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldWarning {
    /// `frequencyMin` is not a positive integer.
    InvalidFrequency { value: String },
    /// A `tag_custom` entry with nothing before the colon.
    EmptyTagKey { entry: String },
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFrequency { value } => write!(
                f,
                "Invalid {} '{}'. Using default {}.",
                columns::FREQUENCY_MIN,
                value,
                DEFAULT_FREQUENCY_MIN
            ),
            Self::EmptyTagKey { entry } => write!(
                f,
                "Ignoring {} entry '{}' with an empty key.",
                columns::TAG_CUSTOM,
                entry
            ),
        }
    }
}

/// Resolved field value plus what happened while resolving it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    /// The default was substituted.
    pub defaulted: bool,
    pub warnings: Vec<FieldWarning>,
}

impl<T> Resolved<T> {
    pub fn given(value: T) -> Self {
        Self { value, defaulted: false, warnings: Vec::new() }
    }

    pub fn default_to(value: T) -> Self {
        Self { value, defaulted: true, warnings: Vec::new() }
    }

    pub fn with_warning(mut self, warning: FieldWarning) -> Self {
        self.warnings.push(warning);
        self
    }
}

// =============================================================================
// Accessors
// =============================================================================

/// Trimmed identifier. Also used as the output directory name.
pub fn identifier(record: &Record) -> Result<String, SkipReason> {
    let id = record
        .get_non_blank(columns::MONITOR_ID)
        .ok_or(SkipReason::MissingIdentifier)?;

    if id == "." || id == ".." || id.contains(['/', '\\']) {
        return Err(SkipReason::UnsafeIdentifier(id.to_string()));
    }

    Ok(id.to_string())
}

pub fn display_name(record: &Record) -> Resolved<String> {
    text_or(record, columns::MONITOR_NAME, DEFAULT_MONITOR_NAME)
}

pub fn target_url(record: &Record) -> Resolved<String> {
    text_or(record, columns::TARGET_URL, DEFAULT_TARGET_URL)
}

pub fn script_type(record: &Record) -> Resolved<String> {
    text_or(record, columns::SCRIPT_TYPE, DEFAULT_SCRIPT_TYPE)
}

/// Script step description, `Navigate to <url>` by default.
pub fn description(record: &Record, target_url: &str) -> Resolved<String> {
    match record.get(columns::DESCRIPTION) {
        Some(text) => Resolved::given(text.to_string()),
        None => Resolved::default_to(format!("Navigate to {}", target_url)),
    }
}

/// `true` when the column is missing, otherwise a case-insensitive `"true"`.
pub fn enabled(record: &Record) -> Resolved<bool> {
    match record.get(columns::ENABLED) {
        Some(raw) => Resolved::given(raw.trim().eq_ignore_ascii_case("true")),
        None => Resolved::default_to(true),
    }
}

/// Polling frequency in minutes. Only an unparseable value warns.
pub fn frequency_min(record: &Record) -> Resolved<u32> {
    let Some(raw) = record.get_non_blank(columns::FREQUENCY_MIN) else {
        return Resolved::default_to(DEFAULT_FREQUENCY_MIN);
    };

    match raw.parse::<u32>() {
        Ok(minutes) if minutes > 0 => Resolved::given(minutes),
        _ => Resolved::default_to(DEFAULT_FREQUENCY_MIN).with_warning(FieldWarning::InvalidFrequency {
            value: raw.to_string(),
        }),
    }
}

/// Location ids from the first populated location column.
pub fn locations(record: &Record) -> Resolved<Vec<String>> {
    let listed = columns::LOCATIONS
        .iter()
        .find_map(|column| record.get_non_blank(column))
        .map(split_list)
        .unwrap_or_default();

    if listed.is_empty() {
        Resolved::default_to(vec![DEFAULT_LOCATION.to_string()])
    } else {
        Resolved::given(listed)
    }
}

/// Tags from the fixed-purpose columns, then `tag_custom`, else the sentinel.
pub fn tags(record: &Record) -> Resolved<Vec<Tag>> {
    let mut tags: Vec<Tag> = FIXED_TAG_COLUMNS
        .iter()
        .filter_map(|(column, key)| record.get_non_blank(column).map(|value| Tag::new(*key, value)))
        .collect();

    let mut warnings = Vec::new();
    if let Some(custom) = record.get_non_blank(columns::TAG_CUSTOM) {
        for entry in split_list(custom) {
            match parse_custom_tag(&entry) {
                Some(tag) => tags.push(tag),
                None => warnings.push(FieldWarning::EmptyTagKey { entry }),
            }
        }
    }

    let mut resolved = if tags.is_empty() {
        Resolved::default_to(vec![Tag::key_only(SENTINEL_TAG_KEY)])
    } else {
        Resolved::given(tags)
    };
    resolved.warnings = warnings;
    resolved
}

/// `key:value` (split at the first colon) or a bare `key`.
/// `None` when the key is empty.
pub fn parse_custom_tag(entry: &str) -> Option<Tag> {
    let tag = match entry.split_once(':') {
        Some((key, value)) => Tag::new(key.trim(), value.trim()),
        None => Tag::key_only(entry.trim()),
    };
    (!tag.key.is_empty()).then_some(tag)
}

/// Split a `;`-joined cell, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Cell text verbatim, or `default` when the column is missing.
fn text_or(record: &Record, column: &str, default: &str) -> Resolved<String> {
    match record.get(column) {
        Some(text) => Resolved::given(text.to_string()),
        None => Resolved::default_to(default.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Record {
        Record::new(2).with(columns::MONITOR_ID, "mon-1")
    }

    #[test]
    fn test_identifier_required() {
        assert_eq!(identifier(&row()).unwrap(), "mon-1");
        assert_eq!(identifier(&Record::new(2)), Err(SkipReason::MissingIdentifier));
        assert_eq!(
            identifier(&Record::new(2).with(columns::MONITOR_ID, "   ")),
            Err(SkipReason::MissingIdentifier)
        );
    }

    #[test]
    fn test_identifier_trimmed() {
        let record = Record::new(2).with(columns::MONITOR_ID, "  mon-2 ");
        assert_eq!(identifier(&record).unwrap(), "mon-2");
    }

    #[test]
    fn test_identifier_rejects_paths() {
        for id in ["..", ".", "a/b", "..\\x"] {
            let record = Record::new(2).with(columns::MONITOR_ID, id);
            assert!(matches!(identifier(&record), Err(SkipReason::UnsafeIdentifier(_))), "{}", id);
        }
    }

    #[test]
    fn test_text_defaults() {
        let record = row();
        assert_eq!(display_name(&record).value, "Unnamed Monitor");
        assert!(display_name(&record).defaulted);
        assert_eq!(target_url(&record).value, "https://www.dynatrace.com");
        assert_eq!(script_type(&record).value, "availability");
    }

    #[test]
    fn test_empty_text_cells_are_kept() {
        let record = row()
            .with(columns::MONITOR_NAME, "")
            .with(columns::TARGET_URL, "")
            .with(columns::SCRIPT_TYPE, "")
            .with(columns::DESCRIPTION, "");

        let name = display_name(&record);
        assert_eq!(name.value, "");
        assert!(!name.defaulted);
        assert_eq!(target_url(&record).value, "");
        assert_eq!(script_type(&record).value, "");
        assert_eq!(description(&record, "").value, "");
    }

    #[test]
    fn test_description_defaults_to_target() {
        let record = row();
        assert_eq!(
            description(&record, "https://example.com").value,
            "Navigate to https://example.com"
        );

        let record = row().with(columns::DESCRIPTION, "Open the shop");
        assert_eq!(description(&record, "https://example.com").value, "Open the shop");

        let record = row().with(columns::DESCRIPTION, " ");
        assert_eq!(description(&record, "https://example.com").value, " ");
    }

    #[test]
    fn test_enabled_case_insensitive() {
        for raw in ["TRUE", "true", "True", " true "] {
            let record = row().with(columns::ENABLED, raw);
            assert!(enabled(&record).value, "{}", raw);
        }
    }

    #[test]
    fn test_enabled_other_values_disable() {
        for raw in ["", "false", "yes", "1", "TRUE!"] {
            let record = row().with(columns::ENABLED, raw);
            assert!(!enabled(&record).value, "{}", raw);
        }
    }

    #[test]
    fn test_enabled_absent_is_true() {
        let resolved = enabled(&row());
        assert!(resolved.value);
        assert!(resolved.defaulted);
    }

    #[test]
    fn test_frequency_parsed() {
        let resolved = frequency_min(&row().with(columns::FREQUENCY_MIN, "45"));
        assert_eq!(resolved.value, 45);
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_frequency_invalid_warns() {
        let resolved = frequency_min(&row().with(columns::FREQUENCY_MIN, "abc"));
        assert_eq!(resolved.value, 60);
        assert_eq!(
            resolved.warnings,
            vec![FieldWarning::InvalidFrequency { value: "abc".into() }]
        );
    }

    #[test]
    fn test_frequency_non_positive_warns() {
        for raw in ["0", "-5"] {
            let resolved = frequency_min(&row().with(columns::FREQUENCY_MIN, raw));
            assert_eq!(resolved.value, 60);
            assert_eq!(resolved.warnings.len(), 1);
        }
    }

    #[test]
    fn test_frequency_absent_or_blank_is_silent() {
        for record in [row(), row().with(columns::FREQUENCY_MIN, " ")] {
            let resolved = frequency_min(&record);
            assert_eq!(resolved.value, 60);
            assert!(resolved.warnings.is_empty());
        }
    }

    #[test]
    fn test_locations_split_and_trimmed() {
        let record = row().with("locations", " GEO-A ;; GEO-B;");
        assert_eq!(locations(&record).value, vec!["GEO-A", "GEO-B"]);
    }

    #[test]
    fn test_locations_fallback_columns() {
        let record = row().with("location", "GEO-C");
        assert_eq!(locations(&record).value, vec!["GEO-C"]);

        let record = row().with("locations", "").with("location_id", "GEO-D");
        assert_eq!(locations(&record).value, vec!["GEO-D"]);
    }

    #[test]
    fn test_locations_default() {
        let resolved = locations(&row());
        assert_eq!(resolved.value, vec![DEFAULT_LOCATION]);
        assert!(resolved.defaulted);

        let resolved = locations(&row().with("locations", " ; "));
        assert_eq!(resolved.value, vec![DEFAULT_LOCATION]);
    }

    #[test]
    fn test_sentinel_tag_when_nothing_set() {
        let resolved = tags(&row().with(columns::TAG_OWNER, "  "));
        assert_eq!(resolved.value, vec![Tag::key_only(SENTINEL_TAG_KEY)]);
        assert!(resolved.defaulted);
    }

    #[test]
    fn test_fixed_tags_in_order() {
        let record = row()
            .with(columns::TAG_OWNER, " web-team ")
            .with(columns::TAG_PURPOSE, "Sales");
        assert_eq!(
            tags(&record).value,
            vec![Tag::new("Purpose", "Sales"), Tag::new("Owner", "web-team")]
        );
    }

    #[test]
    fn test_custom_tags() {
        let record = row().with(columns::TAG_CUSTOM, "env:prod;urgent");
        assert_eq!(
            tags(&record).value,
            vec![Tag::new("env", "prod"), Tag::key_only("urgent")]
        );
    }

    #[test]
    fn test_custom_tag_splits_at_first_colon() {
        assert_eq!(
            parse_custom_tag("url: https://x.example"),
            Some(Tag::new("url", "https://x.example"))
        );
        assert_eq!(parse_custom_tag("env:"), Some(Tag::new("env", "")));
    }

    #[test]
    fn test_tiers_are_additive() {
        let record = row()
            .with(columns::TAG_INDUSTRY, "Retail")
            .with(columns::TAG_CUSTOM, "tier:gold");
        let resolved = tags(&record);
        assert_eq!(
            resolved.value,
            vec![Tag::new("Industry", "Retail"), Tag::new("tier", "gold")]
        );
        assert!(!resolved.value.iter().any(|t| t.key == SENTINEL_TAG_KEY));
    }

    #[test]
    fn test_empty_custom_key_warns() {
        let resolved = tags(&row().with(columns::TAG_CUSTOM, ":orphan"));
        assert_eq!(resolved.value, vec![Tag::key_only(SENTINEL_TAG_KEY)]);
        assert_eq!(
            resolved.warnings,
            vec![FieldWarning::EmptyTagKey { entry: ":orphan".into() }]
        );
    }
}
