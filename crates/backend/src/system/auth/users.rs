use anyhow::Result;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use contracts::system::auth::UserInfo;

use crate::shared::config::AuthConfig;

const ADMIN_USER_ID: &str = "1";

struct StoredUser {
    info: UserInfo,
    password_hash: String,
}

/// Dashboard users. Only the administrator from `config.toml` for now
pub struct UserStore {
    users: Vec<StoredUser>,
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

impl UserStore {
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        let password_hash = hash_password(&config.admin_password)?;
        Ok(Self {
            users: vec![StoredUser {
                info: UserInfo {
                    id: ADMIN_USER_ID.to_string(),
                    username: config.admin_username.clone(),
                    is_admin: true,
                },
                password_hash,
            }],
        })
    }

    /// Verify user credentials (for login)
    pub fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<UserInfo>> {
        let Some(user) = self.users.iter().find(|u| u.info.username == username) else {
            return Ok(None);
        };
        if !verify_password(password, &user.password_hash)? {
            return Ok(None);
        }
        Ok(Some(user.info.clone()))
    }

    pub fn get_by_id(&self, id: &str) -> Option<UserInfo> {
        self.users
            .iter()
            .find(|u| u.info.id == id)
            .map(|u| u.info.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            admin_username: "admin".into(),
            admin_password: "secret".into(),
            jwt_secret: None,
        }
    }

    #[test]
    fn test_verify_credentials() {
        let store = UserStore::from_config(&config()).unwrap();
        let user = store.verify_credentials("admin", "secret").unwrap().unwrap();
        assert!(user.is_admin);
        assert!(store.verify_credentials("admin", "wrong").unwrap().is_none());
        assert!(store.verify_credentials("guest", "secret").unwrap().is_none());
        assert_eq!(store.get_by_id(&user.id), Some(user));
    }
}
