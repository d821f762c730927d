//! Documents written for each monitor.
//!
//! - [`MonitorDefinition`] - Dynatrace browser monitor payload (`monitor.json`)
//! - [`Tag`] - tag entry attached to a monitor
//! - [`ProjectDescriptor`] - Monaco project entry (`project.yaml`)
//!
//! Field order of the structs is the serialized key order, so the generated
//! files are stable across runs.

use serde::{Deserialize, Serialize};

// =============================================================================
// Tags
// =============================================================================

/// Scope of a tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagContext {
    #[default]
    Contextless,
}

/// A monitor tag. `value` is omitted from the output when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub context: TagContext,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<String>,
}

impl Tag {
    /// Contextless tag with a value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            context: TagContext::Contextless,
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Contextless tag without a value.
    pub fn key_only(key: impl Into<String>) -> Self {
        Self {
            context: TagContext::Contextless,
            key: key.into(),
            value: None,
        }
    }
}

// =============================================================================
// Anomaly Detection
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyDetection {
    pub loading_time_thresholds: LoadingTimeThresholds,
    pub outage_handling: OutageHandling,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadingTimeThresholds {
    pub enabled: bool,
    pub thresholds: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutageHandling {
    pub global_outage: bool,
    pub global_outage_policy: GlobalOutagePolicy,
    pub local_outage: bool,
    pub local_outage_policy: LocalOutagePolicy,
    pub retry_on_error: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlobalOutagePolicy {
    pub consecutive_runs: u32,
}

/// Serialized with explicit `null`s; the API expects both keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LocalOutagePolicy {
    pub affected_locations: Option<u32>,
    pub consecutive_runs: Option<u32>,
}

impl Default for AnomalyDetection {
    /// Alert on a global outage after one failed run, retry on error,
    /// no loading-time thresholds.
    fn default() -> Self {
        Self {
            loading_time_thresholds: LoadingTimeThresholds {
                enabled: false,
                thresholds: Vec::new(),
            },
            outage_handling: OutageHandling {
                global_outage: true,
                global_outage_policy: GlobalOutagePolicy { consecutive_runs: 1 },
                local_outage: false,
                local_outage_policy: LocalOutagePolicy::default(),
                retry_on_error: true,
            },
        }
    }
}

// =============================================================================
// Key Performance Metrics
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyPerformanceMetrics {
    pub load_action_kpm: String,
    pub xhr_action_kpm: String,
}

impl Default for KeyPerformanceMetrics {
    fn default() -> Self {
        Self {
            load_action_kpm: "VISUALLY_COMPLETE".to_string(),
            xhr_action_kpm: "VISUALLY_COMPLETE".to_string(),
        }
    }
}

// =============================================================================
// Script
// =============================================================================

/// Browser script: a single navigate step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Script {
    pub configuration: ScriptConfiguration,
    pub events: Vec<ScriptEvent>,
    #[serde(rename = "type")]
    pub script_type: String,
    pub version: String,
}

impl Script {
    pub const VERSION: &'static str = "1.0";

    pub fn navigate(
        script_type: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            configuration: ScriptConfiguration::default(),
            events: vec![ScriptEvent::navigate(url, description)],
            script_type: script_type.into(),
            version: Self::VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScriptConfiguration {
    pub bandwidth: Bandwidth,
    pub chromium_startup_flags: ChromiumStartupFlags,
    pub device: Device,
}

impl Default for ScriptConfiguration {
    fn default() -> Self {
        Self {
            bandwidth: Bandwidth {
                network_type: "WiFi".to_string(),
            },
            chromium_startup_flags: ChromiumStartupFlags {
                disable_web_security: false,
            },
            device: Device {
                device_name: "Desktop".to_string(),
                orientation: "landscape".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bandwidth {
    pub network_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChromiumStartupFlags {
    #[serde(rename = "disable-web-security")]
    pub disable_web_security: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_name: String,
    pub orientation: String,
}

/// One step of a browser script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScriptEvent {
    pub description: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub url: String,
    pub wait: WaitPolicy,
}

impl ScriptEvent {
    pub fn navigate(url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            event_type: "navigate".to_string(),
            url: url.into(),
            wait: WaitPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WaitPolicy {
    pub wait_for: String,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            wait_for: "page_complete".to_string(),
        }
    }
}

// =============================================================================
// Monitor Definition
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonitorType {
    #[default]
    Browser,
}

/// A synthetic browser monitor as sent to the Dynatrace API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonitorDefinition {
    pub anomaly_detection: AnomalyDetection,
    pub automatically_assigned_apps: Vec<String>,
    pub enabled: bool,
    /// Always empty for browser monitors; steps live in `script.events`.
    pub events: Vec<serde_json::Value>,
    pub frequency_min: u32,
    pub key_performance_metrics: KeyPerformanceMetrics,
    pub locations: Vec<String>,
    pub management_zones: Vec<String>,
    pub manually_assigned_apps: Vec<String>,
    pub name: String,
    pub script: Script,
    pub tags: Vec<Tag>,
    #[serde(rename = "type")]
    pub monitor_type: MonitorType,
}

// =============================================================================
// Project Descriptor
// =============================================================================

/// Monaco project file listing the configs of one directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub configs: Vec<ProjectConfig>,
}

/// One Monaco config entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectConfig {
    pub id: String,
    pub config: ConfigTemplate,
    #[serde(rename = "type")]
    pub config_type: ConfigType,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigTemplate {
    pub name: String,
    /// File name of the JSON payload, relative to the project file.
    pub template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigType {
    pub api: String,
}
