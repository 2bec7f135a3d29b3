pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod users;

use jwt::JwtKeys;
use users::UserStore;

/// Token keys and users, shared by the login handler and the auth middleware
pub struct AuthService {
    pub keys: JwtKeys,
    pub users: UserStore,
}
