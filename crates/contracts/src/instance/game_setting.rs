use serde::{Deserialize, Serialize};

use super::InstanceKind;
use crate::api::game_setting_path;

/// Identity of one game setting of one instance.
///
/// Used both as the request key in the dashboard and to build the request path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSettingKey {
    pub uuid: String,
    pub setting: String,
}

impl GameSettingKey {
    pub fn new(uuid: impl Into<String>, setting: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            setting: setting.into(),
        }
    }

    pub fn path(&self) -> String {
        game_setting_path(&self.uuid, &self.setting)
    }
}

/// One entry of `GET /instance/{uuid}/game`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettingEntry {
    pub name: String,
    pub value: String,
}

/// A setting the Settings tab knows how to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettingMeta {
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

const MINECRAFT_SETTINGS: &[GameSettingMeta] = &[
    GameSettingMeta {
        name: "motd",
        label: "Message of the day",
        description: "Shown in the server list of the client",
    },
    GameSettingMeta {
        name: "max-players",
        label: "Max players",
        description: "Maximum number of players online at once",
    },
    GameSettingMeta {
        name: "difficulty",
        label: "Difficulty",
        description: "peaceful, easy, normal or hard",
    },
    GameSettingMeta {
        name: "gamemode",
        label: "Game mode",
        description: "survival, creative, adventure or spectator",
    },
    GameSettingMeta {
        name: "pvp",
        label: "PvP",
        description: "Whether players can damage each other",
    },
    GameSettingMeta {
        name: "online-mode",
        label: "Online mode",
        description: "Verify connecting players against the account service",
    },
    GameSettingMeta {
        name: "white-list",
        label: "Whitelist",
        description: "Only allow players listed in whitelist.json",
    },
    GameSettingMeta {
        name: "view-distance",
        label: "View distance",
        description: "Chunks sent to the client in each direction",
    },
    GameSettingMeta {
        name: "level-seed",
        label: "Level seed",
        description: "Seed used when the world is generated",
    },
];

/// Settings shown on the Settings tab for an instance kind, in display order
pub fn known_game_settings(kind: InstanceKind) -> &'static [GameSettingMeta] {
    match kind {
        InstanceKind::Minecraft => MINECRAFT_SETTINGS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_builds_request_path() {
        let key = GameSettingKey::new("u-1", "motd");
        assert_eq!(key.path(), "/instance/u-1/game/motd");
    }

    #[test]
    fn keys_differ_by_setting() {
        assert_ne!(
            GameSettingKey::new("u-1", "motd"),
            GameSettingKey::new("u-1", "pvp")
        );
    }

    #[test]
    fn minecraft_settings_have_unique_names() {
        let settings = known_game_settings(InstanceKind::Minecraft);
        let mut names: Vec<_> = settings.iter().map(|s| s.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), settings.len());
        assert_eq!(settings[0].name, "motd");
    }
}
