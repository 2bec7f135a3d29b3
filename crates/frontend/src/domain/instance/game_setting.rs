//! `use_game_setting`: one setting of one instance, fetched without any cache.
//!
//! The request goes out only when the session token is non-empty and the
//! caller's `enabled` flag is true. Each call of the hook owns its own
//! state, so every mount and every `refetch` is a real round trip.

use contracts::instance::GameSettingKey;
use futures::future::{FutureExt, LocalBoxFuture};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_utils::{get_text, HttpError};
use crate::shared::query::{should_fetch, QueryState};
use crate::system::auth::context::use_auth;

pub type SettingFuture = LocalBoxFuture<'static, Result<String, HttpError>>;

/// Where setting values come from
pub trait SettingSource: Clone + 'static {
    fn fetch(&self, key: GameSettingKey, token: String) -> SettingFuture;
}

/// `GET /instance/{uuid}/game/{setting}` against the backend
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpSettingSource;

impl SettingSource for HttpSettingSource {
    fn fetch(&self, key: GameSettingKey, token: String) -> SettingFuture {
        async move { get_text(&key.path(), &token).await }.boxed_local()
    }
}

/// Request for `key`, or `None` while the gate is closed
pub fn start_fetch<S: SettingSource>(
    source: &S,
    key: &GameSettingKey,
    token: Option<&str>,
    enabled: bool,
) -> Option<SettingFuture> {
    match token {
        Some(token) if should_fetch(Some(token), enabled) => {
            Some(source.fetch(key.clone(), token.to_string()))
        }
        _ => None,
    }
}

type SettingState = QueryState<GameSettingKey, String, HttpError>;

/// Handle returned by [`use_game_setting`]
#[derive(Clone, Copy)]
pub struct GameSettingQuery {
    state: RwSignal<SettingState>,
    trigger: RwSignal<u64>,
    key: Memo<GameSettingKey>,
    gate: Memo<bool>,
}

impl GameSettingQuery {
    // Состояние другого ключа не показываем, даже если эффект ещё не перезапустился
    fn current<R>(&self, f: impl FnOnce(&SettingState) -> R, other: R) -> R {
        self.key
            .with(|key| self.state.with(|s| if s.holds(key) { f(s) } else { other }))
    }

    /// Response body, unmodified
    pub fn data(&self) -> Option<String> {
        self.current(|s| s.data.clone(), None)
    }

    pub fn error(&self) -> Option<HttpError> {
        self.current(|s| s.error.clone(), None)
    }

    pub fn is_loading(&self) -> bool {
        let pending = self.gate.get();
        self.current(|s| s.is_loading(), pending)
    }

    pub fn is_fetching(&self) -> bool {
        let pending = self.gate.get();
        self.current(|s| s.is_fetching, pending)
    }

    /// Force another round trip (still subject to the gate)
    pub fn refetch(&self) {
        self.trigger.update(|n| *n += 1);
    }
}

pub fn use_game_setting(
    uuid: Signal<String>,
    setting: Signal<String>,
    enabled: Signal<bool>,
) -> GameSettingQuery {
    use_game_setting_with(HttpSettingSource, uuid, setting, enabled)
}

pub fn use_game_setting_with<S: SettingSource>(
    source: S,
    uuid: Signal<String>,
    setting: Signal<String>,
    enabled: Signal<bool>,
) -> GameSettingQuery {
    let (auth_state, _) = use_auth();
    let state = RwSignal::new(SettingState::default());
    let trigger = RwSignal::new(0u64);
    let key = Memo::new(move |_| GameSettingKey::new(uuid.get(), setting.get()));
    let gate = Memo::new(move |_| auth_state.with(|s| should_fetch(s.token(), enabled.get())));

    Effect::new(move |_| {
        trigger.track();
        let key = key.get();
        let token = auth_state.with(|s| s.token().map(str::to_string));

        let Some(request) = start_fetch(&source, &key, token.as_deref(), enabled.get()) else {
            state.update(|s| {
                s.retarget(key);
                s.cancel();
            });
            return;
        };
        let Some(ticket) = state.try_update(|s| s.begin(key.clone())) else {
            return;
        };
        spawn_local(async move {
            let result = request.await;
            if let Err(e) = &result {
                log::warn!("GET {} failed: {}", key.path(), e);
            }
            // После размонтирования сигнал уже удалён: ответ просто выбрасывается
            let _ = state.try_update(|s| s.settle(ticket, result));
        });
    });

    GameSettingQuery {
        state,
        trigger,
        key,
        gate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::context::AuthState;
    use any_spawner::Executor;
    use futures::executor::block_on;
    use leptos::reactive::owner::Owner;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Answers `value-of-{setting}`, or 404 for the setting `missing`
    #[derive(Clone, Default)]
    struct FakeSource {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl FakeSource {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl SettingSource for FakeSource {
        fn fetch(&self, key: GameSettingKey, _token: String) -> SettingFuture {
            self.calls.borrow_mut().push(key.path());
            let result = if key.setting == "missing" {
                Err(HttpError::Status {
                    status: 404,
                    detail: format!("Setting {} not found", key.setting),
                })
            } else {
                Ok(format!("value-of-{}", key.setting))
            };
            futures::future::ready(result).boxed_local()
        }
    }

    struct Harness {
        source: FakeSource,
        set_auth: WriteSignal<AuthState>,
        uuid: RwSignal<String>,
        setting: RwSignal<String>,
        enabled: RwSignal<bool>,
    }

    impl Harness {
        fn mount(&self) -> GameSettingQuery {
            use_game_setting_with(
                self.source.clone(),
                self.uuid.into(),
                self.setting.into(),
                self.enabled.into(),
            )
        }

        fn calls(&self) -> Vec<String> {
            self.source.calls()
        }
    }

    /// Runs `f` under a fresh owner with an auth context holding `token`
    fn with_runtime(token: Option<&str>, setting: &str, enabled: bool, f: impl FnOnce(Harness)) {
        let _ = Executor::init_futures_executor();
        let owner = Owner::new();
        owner.with(|| {
            let (auth, set_auth) = signal(AuthState {
                access_token: token.map(String::from),
                user_info: None,
            });
            provide_context(auth);
            provide_context(set_auth);
            f(Harness {
                source: FakeSource::default(),
                set_auth,
                uuid: RwSignal::new("u1".to_string()),
                setting: RwSignal::new(setting.to_string()),
                enabled: RwSignal::new(enabled),
            });
        });
    }

    fn settle() {
        Executor::poll_local();
    }

    #[test]
    fn test_fetch_on_mount() {
        with_runtime(Some("t"), "motd", true, |h| {
            let query = h.mount();
            assert!(query.is_loading());
            settle();

            assert_eq!(h.calls(), ["/instance/u1/game/motd"]);
            assert_eq!(query.data().as_deref(), Some("value-of-motd"));
            assert_eq!(query.error(), None);
            assert!(!query.is_loading());
            assert!(!query.is_fetching());
        });
    }

    #[test]
    fn test_disabled_until_enabled() {
        with_runtime(Some("t"), "motd", false, |h| {
            let query = h.mount();
            settle();
            assert!(h.calls().is_empty());
            assert_eq!(query.data(), None);
            assert!(!query.is_loading());

            h.enabled.set(true);
            settle();
            assert_eq!(h.calls().len(), 1);
            assert_eq!(query.data().as_deref(), Some("value-of-motd"));
        });
    }

    #[test]
    fn test_no_request_without_token() {
        with_runtime(None, "motd", true, |h| {
            let query = h.mount();
            settle();
            assert!(h.calls().is_empty());
            assert!(!query.is_loading());
        });
    }

    #[test]
    fn test_logout_closes_gate() {
        with_runtime(Some("t"), "motd", true, |h| {
            let query = h.mount();
            settle();
            assert_eq!(h.calls().len(), 1);

            h.set_auth.set(AuthState::default());
            settle();
            query.refetch();
            settle();
            assert_eq!(h.calls().len(), 1);
            assert!(!query.is_fetching());
        });
    }

    #[test]
    fn test_refetch_is_a_round_trip() {
        with_runtime(Some("t"), "motd", true, |h| {
            let query = h.mount();
            settle();
            query.refetch();
            settle();
            assert_eq!(h.calls().len(), 2);
            assert_eq!(query.data().as_deref(), Some("value-of-motd"));
        });
    }

    #[test]
    fn test_remount_fetches_again() {
        with_runtime(Some("t"), "motd", true, |h| {
            let first = Owner::new();
            first.with(|| h.mount());
            settle();
            first.cleanup();

            let second = Owner::new();
            let query = second.with(|| h.mount());
            settle();

            assert_eq!(h.calls().len(), 2);
            assert_eq!(query.data().as_deref(), Some("value-of-motd"));
        });
    }

    #[test]
    fn test_key_change_hides_previous_value() {
        with_runtime(Some("t"), "motd", true, |h| {
            let query = h.mount();
            settle();
            assert_eq!(query.data().as_deref(), Some("value-of-motd"));

            h.setting.set("pvp".to_string());
            assert_eq!(query.data(), None);
            assert!(query.is_loading());

            settle();
            assert_eq!(h.calls(), ["/instance/u1/game/motd", "/instance/u1/game/pvp"]);
            assert_eq!(query.data().as_deref(), Some("value-of-pvp"));
            assert!(!query.is_loading());
        });
    }

    #[test]
    fn test_uuid_change_refetches() {
        with_runtime(Some("t"), "motd", true, |h| {
            let query = h.mount();
            settle();
            h.uuid.set("u2".to_string());
            assert_eq!(query.data(), None);
            settle();
            assert_eq!(h.calls().last().map(String::as_str), Some("/instance/u2/game/motd"));
            assert_eq!(query.data().as_deref(), Some("value-of-motd"));
        });
    }

    #[test]
    fn test_error_leaves_data_unset() {
        with_runtime(Some("t"), "missing", true, |h| {
            let query = h.mount();
            settle();
            assert_eq!(query.data(), None);
            assert_eq!(
                query.error(),
                Some(HttpError::Status {
                    status: 404,
                    detail: "Setting missing not found".into(),
                })
            );
            assert!(!query.is_loading());
        });
    }

    #[test]
    fn test_request_path_is_uuid_and_setting_verbatim() {
        let source = FakeSource::default();
        let key = GameSettingKey::new("abc-123", "max-players");
        let request = start_fetch(&source, &key, Some("t"), true);
        assert!(request.is_some());
        assert_eq!(source.calls(), ["/instance/abc-123/game/max-players"]);
        let body = request.map(block_on);
        assert_eq!(body, Some(Ok("value-of-max-players".to_string())));
    }

    #[test]
    fn test_gate_requires_token_and_enabled() {
        let key = GameSettingKey::new("u1", "motd");
        let cases = [
            (Some("t"), true, 1),
            (Some("t"), false, 0),
            (Some(""), true, 0),
            (None, true, 0),
            (None, false, 0),
        ];
        for (token, enabled, expected) in cases {
            let source = FakeSource::default();
            let request = start_fetch(&source, &key, token, enabled);
            assert_eq!(request.is_some(), expected == 1);
            assert_eq!(
                source.calls().len(),
                expected,
                "token={token:?} enabled={enabled}"
            );
        }
    }
}
