use contracts::instance::{CreateInstanceRequest, EventLevel, InstanceEvent, InstanceInfo};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::config::{Instance, InstanceConfig, INSTANCE_CONFIG_FILE};
use super::events::EventLog;
use super::service;
use crate::shared::error::ApiError;
use crate::shared::properties::Properties;

/// All instances known to the server, keyed by uuid
#[derive(Clone)]
pub struct InstanceRegistry {
    root: PathBuf,
    instances: Arc<RwLock<HashMap<String, Instance>>>,
}

impl InstanceRegistry {
    /// Scan `root` for instance directories; creates `root` when missing
    pub async fn load(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;

        let mut instances = HashMap::new();
        let mut read_dir = tokio::fs::read_dir(&root).await?;
        while let Some(entry) = read_dir.next_entry().await? {
            let path = entry.path();
            if !path.join(INSTANCE_CONFIG_FILE).is_file() {
                continue;
            }
            match InstanceConfig::load(&path).await {
                Ok(config) => {
                    tracing::info!("Loaded instance {} ({})", config.name, config.uuid);
                    let mut events = EventLog::default();
                    events.push(EventLevel::Info, "Instance loaded");
                    instances.insert(
                        config.uuid.clone(),
                        Instance {
                            config,
                            path,
                            events,
                        },
                    );
                }
                Err(e) => {
                    tracing::warn!("Skipping instance at {}: {:#}", path.display(), e);
                }
            }
        }

        tracing::info!(
            "Instance registry ready: {} instance(s) in {}",
            instances.len(),
            root.display()
        );
        Ok(Self {
            root,
            instances: Arc::new(RwLock::new(instances)),
        })
    }

    /// Instances sorted by creation time
    pub async fn list(&self) -> Vec<InstanceInfo> {
        let mut list: Vec<InstanceInfo> = self
            .instances
            .read()
            .await
            .values()
            .map(Instance::info)
            .collect();
        list.sort_by(|a, b| {
            a.creation_time
                .cmp(&b.creation_time)
                .then_with(|| a.name.cmp(&b.name))
        });
        list
    }

    pub async fn get_info(&self, uuid: &str) -> Result<InstanceInfo, ApiError> {
        self.instances
            .read()
            .await
            .get(uuid)
            .map(Instance::info)
            .ok_or_else(|| ApiError::instance_not_found(uuid))
    }

    /// Directory of the instance
    pub async fn instance_root(&self, uuid: &str) -> Result<PathBuf, ApiError> {
        self.instances
            .read()
            .await
            .get(uuid)
            .map(|i| i.path.clone())
            .ok_or_else(|| ApiError::instance_not_found(uuid))
    }

    pub async fn create(&self, req: CreateInstanceRequest) -> Result<String, ApiError> {
        // Блокировка на всё время создания: проверка уникальности имени/порта и запись на диск атомарны
        let mut instances = self.instances.write().await;
        let existing: Vec<InstanceInfo> = instances.values().map(Instance::info).collect();
        let config = service::build_instance_config(req, &existing)?;

        let path = self.root.join(&config.name);
        if tokio::fs::try_exists(&path).await? {
            return Err(ApiError::MalformedRequest(format!(
                "Directory for instance {} already exists",
                config.name
            )));
        }
        tokio::fs::create_dir_all(&path).await?;
        config.save(&path).await?;
        tokio::fs::write(
            path.join(super::config::SERVER_PROPERTIES_FILE),
            service::default_game_settings(&config).render(),
        )
        .await?;

        tracing::info!(
            "Created {} instance {} ({}) at {}",
            config.kind,
            config.name,
            config.uuid,
            path.display()
        );

        let uuid = config.uuid.clone();
        let mut events = EventLog::default();
        events.push(
            EventLevel::Info,
            format!("Instance {} created ({} {})", config.name, config.flavour.as_str(), config.version),
        );
        instances.insert(
            uuid.clone(),
            Instance {
                config,
                path,
                events,
            },
        );
        Ok(uuid)
    }

    pub async fn remove(&self, uuid: &str) -> Result<(), ApiError> {
        let mut instances = self.instances.write().await;
        let instance = instances
            .get(uuid)
            .ok_or_else(|| ApiError::instance_not_found(uuid))?;

        tokio::fs::remove_dir_all(&instance.path)
            .await
            .map_err(|e| anyhow::anyhow!("Could not remove instance: {}", e))?;
        if let Some(removed) = instances.remove(uuid) {
            tracing::info!("Removed instance {} ({})", removed.config.name, uuid);
        }
        Ok(())
    }

    async fn read_properties(&self, uuid: &str) -> Result<Properties, ApiError> {
        let path = {
            let instances = self.instances.read().await;
            instances
                .get(uuid)
                .ok_or_else(|| ApiError::instance_not_found(uuid))?
                .properties_path()
        };
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(Properties::parse(&text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Properties::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// All game settings, in file order
    pub async fn game_settings(&self, uuid: &str) -> Result<Vec<(String, String)>, ApiError> {
        let props = self.read_properties(uuid).await?;
        Ok(props
            .entries()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }

    /// Current value of one game setting, read from disk on every call
    pub async fn game_setting(&self, uuid: &str, setting: &str) -> Result<String, ApiError> {
        service::validate_setting_name(setting)?;
        let props = self.read_properties(uuid).await?;
        props.get(setting).map(str::to_string).ok_or_else(|| {
            ApiError::NotFound(format!("Setting {} not found for instance {}", setting, uuid))
        })
    }

    pub async fn set_game_setting(
        &self,
        uuid: &str,
        setting: &str,
        value: &str,
    ) -> Result<(), ApiError> {
        service::validate_setting_name(setting)?;
        service::validate_setting_value(value)?;

        let mut instances = self.instances.write().await;
        let instance = instances
            .get_mut(uuid)
            .ok_or_else(|| ApiError::instance_not_found(uuid))?;

        let path = instance.properties_path();
        let mut props = match tokio::fs::read_to_string(&path).await {
            Ok(text) => Properties::parse(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Properties::default(),
            Err(e) => return Err(e.into()),
        };
        props.set(setting, value);
        tokio::fs::write(&path, props.render()).await?;

        tracing::info!("Instance {}: {} = {:?}", uuid, setting, value);
        instance
            .events
            .push(EventLevel::Info, format!("Setting {} changed to \"{}\"", setting, value));
        Ok(())
    }

    pub async fn events(&self, uuid: &str) -> Result<Vec<InstanceEvent>, ApiError> {
        self.instances
            .read()
            .await
            .get(uuid)
            .map(|i| i.events.snapshot())
            .ok_or_else(|| ApiError::instance_not_found(uuid))
    }

    /// Append to the event log of the instance
    pub async fn record_event(
        &self,
        uuid: &str,
        level: EventLevel,
        message: impl Into<String>,
    ) -> Result<(), ApiError> {
        let mut instances = self.instances.write().await;
        let instance = instances
            .get_mut(uuid)
            .ok_or_else(|| ApiError::instance_not_found(uuid))?;
        instance.events.push(level, message);
        Ok(())
    }
}
