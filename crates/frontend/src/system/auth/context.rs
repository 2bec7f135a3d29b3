use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    /// Token usable for requests: present and non-empty
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    // Токен из localStorage доступен сразу, user_info подтягивается ниже
    let (auth_state, set_auth_state) = signal(AuthState {
        access_token: storage::get_access_token(),
        user_info: None,
    });

    // Validate restored token once on mount
    Effect::new(move |_| {
        let Some(access_token) = storage::get_access_token() else {
            return;
        };
        spawn_local(async move {
            match api::get_current_user(&access_token).await {
                Ok(user_info) => {
                    set_auth_state.set(AuthState {
                        access_token: Some(access_token),
                        user_info: Some(user_info),
                    });
                }
                Err(e) => {
                    log::warn!("Stored session rejected: {}", e);
                    storage::clear_tokens();
                    set_auth_state.set(AuthState::default());
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state = expect_context::<ReadSignal<AuthState>>();
    let set_auth_state = expect_context::<WriteSignal<AuthState>>();

    (auth_state, set_auth_state)
}

/// Store a fresh session after login
pub fn start_session(set_auth_state: WriteSignal<AuthState>, token: String, user: UserInfo) {
    storage::save_access_token(&token);
    set_auth_state.set(AuthState {
        access_token: Some(token),
        user_info: Some(user),
    });
}

/// Drop the session. Tokens are stateless, nothing to revoke on the server.
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_no_token() {
        let state = AuthState {
            access_token: Some(String::new()),
            user_info: None,
        };
        assert_eq!(state.token(), None);
        assert_eq!(AuthState::default().token(), None);

        let state = AuthState {
            access_token: Some("abc".into()),
            user_info: None,
        };
        assert_eq!(state.token(), Some("abc"));
    }
}
