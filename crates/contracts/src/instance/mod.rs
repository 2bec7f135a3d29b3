//! Instance DTOs

pub mod event;
pub mod fs;
pub mod game_setting;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use event::{EventLevel, InstanceEvent};
pub use fs::{FileEntry, FileType, FsMoveQuery, FsQuery};
pub use game_setting::{known_game_settings, GameSettingEntry, GameSettingKey, GameSettingMeta};

/// Kind of game server an instance runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceKind {
    Minecraft,
}

impl InstanceKind {
    /// Identifier used in URLs, in `instance.json` and as the tab-table key
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceKind::Minecraft => "minecraft",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            InstanceKind::Minecraft => "Minecraft",
        }
    }
}

impl fmt::Display for InstanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstanceKind {
    type Err = String;

    /// Case-insensitive, like the `type` field of a create request
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minecraft" => Ok(InstanceKind::Minecraft),
            other => Err(format!("Unknown instance type: {other}")),
        }
    }
}

/// Server software flavour of a Minecraft instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavour {
    Vanilla,
    Fabric,
    Paper,
    Spigot,
}

impl Flavour {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flavour::Vanilla => "vanilla",
            Flavour::Fabric => "fabric",
            Flavour::Paper => "paper",
            Flavour::Spigot => "spigot",
        }
    }
}

/// Public description of an instance, as returned by `/instance/list` and `/instance/{uuid}/info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceInfo {
    pub uuid: String,
    pub name: String,
    pub kind: InstanceKind,
    pub flavour: Flavour,
    pub version: String,
    pub description: String,
    pub port: u32,
    pub min_ram: u32,
    pub max_ram: u32,
    /// Unix timestamp, seconds
    pub creation_time: i64,
    pub auto_start: bool,
    pub restart_on_crash: bool,
    pub path: String,
}

/// Body of `POST /instance/create`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateInstanceRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub port: Option<u32>,
    pub version: Option<String>,
    pub flavour: Option<String>,
    pub description: Option<String>,
    pub min_ram: Option<u32>,
    pub max_ram: Option<u32>,
    pub auto_start: Option<bool>,
    pub restart_on_crash: Option<bool>,
}
