use anyhow::{Context, Result};
use std::sync::Arc;

use crate::domain::instance::InstanceRegistry;
use crate::shared::config::{self, Config};
use crate::state::AppState;
use crate::system::auth::jwt::JwtKeys;
use crate::system::auth::users::UserStore;
use crate::system::auth::AuthService;

/// Build the shared application state from the configuration
pub async fn build_state(config: &Config) -> Result<AppState> {
    let keys = match &config.auth.jwt_secret {
        Some(secret) if !secret.is_empty() => JwtKeys::from_secret(secret),
        _ => {
            tracing::warn!("auth.jwt_secret is not set, tokens will not survive a restart");
            JwtKeys::generate()
        }
    };

    let users = UserStore::from_config(&config.auth).context("admin user setup failed")?;
    tracing::info!("Admin user: {}", config.auth.admin_username);

    let root = config::get_instances_root(config);
    let instances = InstanceRegistry::load(&root)
        .await
        .with_context(|| format!("cannot load instances from {}", root.display()))?;

    Ok(AppState {
        instances,
        auth: Arc::new(AuthService { keys, users }),
    })
}
