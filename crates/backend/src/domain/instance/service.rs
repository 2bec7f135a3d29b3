//! Validation rules for instance creation and game settings

use chrono::Utc;
use contracts::instance::{CreateInstanceRequest, Flavour, InstanceInfo, InstanceKind};

use super::config::InstanceConfig;
use crate::shared::error::ApiError;
use crate::shared::properties::Properties;

const DEFAULT_DESCRIPTION: &str = "Pizza time";
const DEFAULT_MIN_RAM: u32 = 1024;
const DEFAULT_MAX_RAM: u32 = 2048;

/// Make `name` usable as a directory name on any platform.
///
/// Illegal and control characters are dropped; reserved device names such as
/// `CON` or `nul` become empty and are rejected by the caller.
pub fn sanitize_name(name: &str) -> String {
    let options = sanitize_filename::Options {
        windows: true,
        truncate: true,
        replacement: "",
    };
    sanitize_filename::sanitize_with_options(name, options)
        .trim()
        .to_string()
}

fn malformed(detail: impl Into<String>) -> ApiError {
    ApiError::MalformedRequest(detail.into())
}

/// Check a create request against the existing instances and build the config to persist
pub fn build_instance_config(
    req: CreateInstanceRequest,
    existing: &[InstanceInfo],
) -> Result<InstanceConfig, ApiError> {
    let kind: InstanceKind = req
        .kind
        .as_deref()
        .ok_or_else(|| malformed("Json must contain type"))?
        .parse()
        .map_err(malformed)?;

    let name = sanitize_name(
        req.name
            .as_deref()
            .ok_or_else(|| malformed("Json must contain name"))?,
    );
    if name.is_empty() {
        return Err(malformed("Name must not be empty"));
    }

    let port = req.port.ok_or_else(|| malformed("Json must contain port"))?;
    if port == 0 || port > u16::MAX as u32 {
        return Err(malformed(format!("Port {} is out of range", port)));
    }

    for other in existing {
        if other.name == name {
            return Err(malformed(format!("Instance with name {} already exists", name)));
        }
        if other.port == port {
            return Err(malformed(format!("Instance with port {} already exists", port)));
        }
    }

    let version = req
        .version
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| malformed("Json must contain version"))?;

    let flavour_raw = req
        .flavour
        .ok_or_else(|| malformed("Json must contain flavour"))?;
    let flavour: Flavour = serde_json::from_value(serde_json::Value::String(
        flavour_raw.to_ascii_lowercase(),
    ))
    .map_err(|_| {
        malformed(format!(
            "Flavour {} is not one of the valid options",
            flavour_raw
        ))
    })?;

    let min_ram = req.min_ram.unwrap_or(DEFAULT_MIN_RAM);
    let max_ram = req.max_ram.unwrap_or(DEFAULT_MAX_RAM);
    if min_ram > max_ram {
        return Err(malformed("min_ram must not exceed max_ram"));
    }

    Ok(InstanceConfig {
        uuid: uuid::Uuid::new_v4().to_string(),
        name,
        kind,
        flavour,
        version,
        description: req
            .description
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        port,
        min_ram,
        max_ram,
        creation_time: Utc::now().timestamp(),
        auto_start: req.auto_start.unwrap_or(false),
        restart_on_crash: req.restart_on_crash.unwrap_or(false),
    })
}

/// Initial `server.properties` of a new instance
pub fn default_game_settings(config: &InstanceConfig) -> Properties {
    let mut props = Properties::parse("#Minecraft server properties\n");
    props.set("server-port", &config.port.to_string());
    props.set("motd", &config.description);
    props.set("max-players", "20");
    props.set("difficulty", "easy");
    props.set("gamemode", "survival");
    props.set("pvp", "true");
    props.set("online-mode", "true");
    props.set("white-list", "false");
    props.set("view-distance", "10");
    props.set("level-seed", "");
    props
}

pub fn validate_setting_name(setting: &str) -> Result<(), ApiError> {
    if setting.is_empty() {
        return Err(malformed("Setting name must not be empty"));
    }
    if setting
        .chars()
        .any(|c| c == '=' || c == ':' || c.is_whitespace() || c.is_control())
    {
        return Err(malformed(format!("Invalid setting name: {}", setting)));
    }
    Ok(())
}

pub fn validate_setting_value(value: &str) -> Result<(), ApiError> {
    if value.contains(['\n', '\r']) {
        return Err(malformed("Setting value must be a single line"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateInstanceRequest {
        CreateInstanceRequest {
            kind: Some("minecraft".into()),
            name: Some("Survival".into()),
            port: Some(25565),
            version: Some("1.20.4".into()),
            flavour: Some("vanilla".into()),
            ..Default::default()
        }
    }

    fn existing(name: &str, port: u32) -> InstanceInfo {
        let mut config = build_instance_config(
            CreateInstanceRequest {
                name: Some(name.into()),
                port: Some(port),
                ..request()
            },
            &[],
        )
        .unwrap();
        config.creation_time = 0;
        config.to_info(std::path::Path::new("/tmp"))
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("My/World:1"), "MyWorld1");
        assert_eq!(sanitize_name("  ..  "), "");
        assert_eq!(sanitize_name("../etc"), "..etc");
        assert_eq!(sanitize_name("survival 2"), "survival 2");
        // Зарезервированные имена устройств Windows
        assert_eq!(sanitize_name("CON"), "");
        assert_eq!(sanitize_name("nul"), "");
        assert_eq!(sanitize_name("COM1"), "");
        assert_eq!(sanitize_name("con.txt"), "");
        assert_eq!(sanitize_name("Console"), "Console");
    }

    #[test]
    fn test_reserved_device_name_rejected() {
        for name in ["CON", "nul", "COM1"] {
            let req = CreateInstanceRequest {
                name: Some(name.into()),
                ..request()
            };
            assert!(
                matches!(
                    build_instance_config(req, &[]),
                    Err(ApiError::MalformedRequest(msg)) if msg == "Name must not be empty"
                ),
                "{name} accepted"
            );
        }
    }

    #[test]
    fn test_defaults_applied() {
        let config = build_instance_config(request(), &[]).unwrap();
        assert_eq!(config.kind, InstanceKind::Minecraft);
        assert_eq!(config.flavour, Flavour::Vanilla);
        assert_eq!(config.description, "Pizza time");
        assert_eq!(config.min_ram, 1024);
        assert_eq!(config.max_ram, 2048);
        assert!(!config.auto_start);
        assert!(uuid::Uuid::parse_str(&config.uuid).is_ok());
    }

    #[test]
    fn test_missing_fields_rejected() {
        let no_type = CreateInstanceRequest {
            kind: None,
            ..request()
        };
        assert!(matches!(
            build_instance_config(no_type, &[]),
            Err(ApiError::MalformedRequest(msg)) if msg == "Json must contain type"
        ));

        let empty_name = CreateInstanceRequest {
            name: Some("///".into()),
            ..request()
        };
        assert!(matches!(
            build_instance_config(empty_name, &[]),
            Err(ApiError::MalformedRequest(msg)) if msg == "Name must not be empty"
        ));

        let bad_flavour = CreateInstanceRequest {
            flavour: Some("forge".into()),
            ..request()
        };
        assert!(build_instance_config(bad_flavour, &[]).is_err());

        let unknown_kind = CreateInstanceRequest {
            kind: Some("terraria".into()),
            ..request()
        };
        assert!(build_instance_config(unknown_kind, &[]).is_err());
    }

    #[test]
    fn test_duplicates_rejected() {
        let taken = [existing("Survival", 25570)];
        let err = build_instance_config(request(), &taken).unwrap_err();
        assert_eq!(err.to_string(), "Instance with name Survival already exists");

        let taken = [existing("Creative", 25565)];
        let err = build_instance_config(request(), &taken).unwrap_err();
        assert_eq!(err.to_string(), "Instance with port 25565 already exists");
    }

    #[test]
    fn test_default_game_settings() {
        let config = build_instance_config(request(), &[]).unwrap();
        let props = default_game_settings(&config);
        assert_eq!(props.get("server-port"), Some("25565"));
        assert_eq!(props.get("motd"), Some("Pizza time"));
        assert_eq!(props.get("level-seed"), Some(""));
    }

    #[test]
    fn test_setting_validation() {
        assert!(validate_setting_name("max-players").is_ok());
        assert!(validate_setting_name("").is_err());
        assert!(validate_setting_name("a=b").is_err());
        assert!(validate_setting_name("level name").is_err());
        assert!(validate_setting_value("hello world").is_ok());
        assert!(validate_setting_value("two\nlines").is_err());
    }
}
