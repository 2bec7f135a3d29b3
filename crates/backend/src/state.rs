use std::sync::Arc;

use crate::domain::instance::InstanceRegistry;
use crate::system::auth::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub instances: InstanceRegistry,
    pub auth: Arc<AuthService>,
}
