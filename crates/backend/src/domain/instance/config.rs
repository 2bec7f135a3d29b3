use contracts::instance::{Flavour, InstanceInfo, InstanceKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::events::EventLog;
use crate::shared::error::ApiError;

/// File inside the instance directory holding [`InstanceConfig`]
pub const INSTANCE_CONFIG_FILE: &str = "instance.json";

/// Game settings of a Minecraft instance
pub const SERVER_PROPERTIES_FILE: &str = "server.properties";

/// Persisted description of an instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceConfig {
    pub uuid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InstanceKind,
    pub flavour: Flavour,
    pub version: String,
    pub description: String,
    pub port: u32,
    pub min_ram: u32,
    pub max_ram: u32,
    pub creation_time: i64,
    #[serde(default)]
    pub auto_start: bool,
    #[serde(default)]
    pub restart_on_crash: bool,
}

impl InstanceConfig {
    pub fn to_info(&self, path: &Path) -> InstanceInfo {
        InstanceInfo {
            uuid: self.uuid.clone(),
            name: self.name.clone(),
            kind: self.kind,
            flavour: self.flavour,
            version: self.version.clone(),
            description: self.description.clone(),
            port: self.port,
            min_ram: self.min_ram,
            max_ram: self.max_ram,
            creation_time: self.creation_time,
            auto_start: self.auto_start,
            restart_on_crash: self.restart_on_crash,
            path: path.to_string_lossy().into_owned(),
        }
    }

    pub async fn load(dir: &Path) -> anyhow::Result<Self> {
        let contents = tokio::fs::read_to_string(dir.join(INSTANCE_CONFIG_FILE)).await?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub async fn save(&self, dir: &Path) -> Result<(), ApiError> {
        let contents = serde_json::to_string_pretty(self).map_err(anyhow::Error::from)?;
        tokio::fs::write(dir.join(INSTANCE_CONFIG_FILE), contents).await?;
        Ok(())
    }
}

/// An instance loaded into the registry
#[derive(Debug, Clone)]
pub struct Instance {
    pub config: InstanceConfig,
    pub path: PathBuf,
    pub events: EventLog,
}

impl Instance {
    pub fn info(&self) -> InstanceInfo {
        self.config.to_info(&self.path)
    }

    pub fn properties_path(&self) -> PathBuf {
        self.path.join(SERVER_PROPERTIES_FILE)
    }
}
