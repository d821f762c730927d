//! Monaco project descriptor assembly.

use crate::config::GeneratorConfig;
use crate::error::RenderResult;
use crate::models::{ConfigTemplate, ConfigType, ProjectConfig, ProjectDescriptor};

use super::monitor::MonitorRow;

impl ProjectDescriptor {
    /// Project with a single config pointing at the monitor JSON file.
    pub fn for_monitor(
        id: impl Into<String>,
        name: impl Into<String>,
        template: impl Into<String>,
        api: impl Into<String>,
    ) -> Self {
        Self {
            configs: vec![ProjectConfig {
                id: id.into(),
                config: ConfigTemplate {
                    name: name.into(),
                    template: template.into(),
                },
                config_type: ConfigType { api: api.into() },
            }],
        }
    }

    /// Descriptor for a resolved row, using the configured file name and api.
    pub fn from_row(row: &MonitorRow, config: &GeneratorConfig) -> Self {
        Self::for_monitor(
            &row.id,
            &row.name,
            &config.monitor_file_name,
            &config.api_category,
        )
    }

    pub fn to_yaml(&self) -> RenderResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
