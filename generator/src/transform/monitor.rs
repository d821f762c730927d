//! Validated monitor row and monitor definition assembly.

use crate::error::RenderResult;
use crate::models::{
    AnomalyDetection, KeyPerformanceMetrics, MonitorDefinition, MonitorType, Script, Tag,
};
use crate::parser::Record;

use super::fields::{self, FieldWarning, SkipReason};

/// A record with every field resolved to its final value.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorRow {
    pub id: String,
    pub name: String,
    pub target_url: String,
    pub script_type: String,
    pub description: String,
    pub enabled: bool,
    pub frequency_min: u32,
    pub locations: Vec<String>,
    pub tags: Vec<Tag>,
    /// Values replaced or dropped while resolving
    pub warnings: Vec<FieldWarning>,
}

impl MonitorRow {
    /// Resolve a record, or explain why it cannot become a monitor.
    pub fn from_record(record: &Record) -> Result<Self, SkipReason> {
        let id = fields::identifier(record)?;
        let target_url = fields::target_url(record).value;
        let description = fields::description(record, &target_url).value;
        let frequency = fields::frequency_min(record);
        let tags = fields::tags(record);

        let mut warnings = frequency.warnings;
        warnings.extend(tags.warnings);

        Ok(Self {
            id,
            name: fields::display_name(record).value,
            target_url,
            script_type: fields::script_type(record).value,
            description,
            enabled: fields::enabled(record).value,
            frequency_min: frequency.value,
            locations: fields::locations(record).value,
            tags: tags.value,
            warnings,
        })
    }
}

impl MonitorDefinition {
    /// Fixed-shape browser monitor with the row's values filled in.
    pub fn from_row(row: &MonitorRow) -> Self {
        Self {
            anomaly_detection: AnomalyDetection::default(),
            automatically_assigned_apps: Vec::new(),
            enabled: row.enabled,
            events: Vec::new(),
            frequency_min: row.frequency_min,
            key_performance_metrics: KeyPerformanceMetrics::default(),
            locations: row.locations.clone(),
            management_zones: Vec::new(),
            manually_assigned_apps: Vec::new(),
            name: row.name.clone(),
            script: Script::navigate(&row.script_type, &row.target_url, &row.description),
            tags: row.tags.clone(),
            monitor_type: MonitorType::Browser,
        }
    }

    /// Pretty JSON with two-space indentation and no trailing newline.
    pub fn to_json(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;
    use crate::transform::fields::{columns, DEFAULT_LOCATION, SENTINEL_TAG_KEY};
    use serde_json::{json, Value};

    fn home_page() -> Record {
        Record::new(2)
            .with(columns::MONITOR_ID, "mon-1")
            .with(columns::MONITOR_NAME, "Home Page Check")
            .with(columns::TARGET_URL, "https://example.com")
    }

    #[test]
    fn test_row_defaults() {
        let row = MonitorRow::from_record(&home_page()).unwrap();

        assert_eq!(row.id, "mon-1");
        assert_eq!(row.name, "Home Page Check");
        assert!(row.enabled);
        assert_eq!(row.frequency_min, 60);
        assert_eq!(row.script_type, "availability");
        assert_eq!(row.description, "Navigate to https://example.com");
        assert_eq!(row.locations, vec![DEFAULT_LOCATION]);
        assert_eq!(row.tags, vec![Tag::key_only(SENTINEL_TAG_KEY)]);
        assert!(row.warnings.is_empty());
    }

    #[test]
    fn test_empty_cells_keep_empty_text() {
        let table = parse_str(
            "monitor_id,monitor_name,target_url,description,script_type\nmon-1,,,,\n",
            b',',
            "utf-8".into(),
        )
        .unwrap();
        let row = MonitorRow::from_record(&table.records[0]).unwrap();

        assert_eq!(row.name, "");
        assert_eq!(row.target_url, "");
        assert_eq!(row.description, "");
        assert_eq!(row.script_type, "");
        assert!(row.enabled);
        assert_eq!(row.frequency_min, 60);
    }

    #[test]
    fn test_row_collects_warnings() {
        let record = home_page()
            .with(columns::FREQUENCY_MIN, "often")
            .with(columns::TAG_CUSTOM, "env:prod; :x");
        let row = MonitorRow::from_record(&record).unwrap();

        assert_eq!(row.warnings.len(), 2);
        assert!(matches!(row.warnings[0], FieldWarning::InvalidFrequency { .. }));
        assert!(matches!(row.warnings[1], FieldWarning::EmptyTagKey { .. }));
        assert_eq!(row.tags, vec![Tag::new("env", "prod")]);
    }

    #[test]
    fn test_row_without_id_is_skipped() {
        let record = Record::new(3).with(columns::MONITOR_NAME, "Orphan");
        assert_eq!(MonitorRow::from_record(&record), Err(SkipReason::MissingIdentifier));
    }

    #[test]
    fn test_definition_document() {
        let row = MonitorRow::from_record(&home_page()).unwrap();
        let json: Value = serde_json::to_value(MonitorDefinition::from_row(&row)).unwrap();

        assert_eq!(json["enabled"], true);
        assert_eq!(json["frequencyMin"], 60);
        assert_eq!(json["locations"], json!(["GEOLOCATION-7F39AED31559436D"]));
        assert_eq!(json["tags"], json!([{"context": "CONTEXTLESS", "key": "MonacoCsvGenerated"}]));
        assert_eq!(json["name"], "Home Page Check");
        assert_eq!(json["type"], "BROWSER");
        assert_eq!(json["events"], json!([]));
        assert_eq!(json["script"]["events"][0]["url"], "https://example.com");
        assert_eq!(json["script"]["type"], "availability");
        assert_eq!(json["keyPerformanceMetrics"]["loadActionKpm"], "VISUALLY_COMPLETE");
    }

    #[test]
    fn test_json_key_order_and_indent() {
        let row = MonitorRow::from_record(&home_page()).unwrap();
        let text = MonitorDefinition::from_row(&row).to_json().unwrap();

        assert!(text.starts_with("{\n  \"anomalyDetection\": {"));
        assert!(text.ends_with("\"type\": \"BROWSER\"\n}"));

        let name_at = text.find("\"name\"").unwrap();
        let script_at = text.find("\"script\"").unwrap();
        let tags_at = text.rfind("\"tags\"").unwrap();
        assert!(name_at < script_at && script_at < tags_at);
    }
}
