//! Request state of a remote query, without any caching.
//!
//! Every consumer owns its [`QueryState`]: nothing is shared between two
//! mounts, so every activation is a fresh network round trip. The state
//! remembers which key it holds, data of another key is never exposed.

/// Whether a query may hit the network: a non-empty token AND `enabled`
pub fn should_fetch(token: Option<&str>, enabled: bool) -> bool {
    enabled && token.is_some_and(|t| !t.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<K, T, E> {
    key: Option<K>,
    pub data: Option<T>,
    pub error: Option<E>,
    pub is_fetching: bool,
    generation: u64,
}

impl<K, T, E> Default for QueryState<K, T, E> {
    fn default() -> Self {
        Self {
            key: None,
            data: None,
            error: None,
            is_fetching: false,
            generation: 0,
        }
    }
}

impl<K: PartialEq, T, E> QueryState<K, T, E> {
    /// Key the current data/error belong to
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    pub fn holds(&self, key: &K) -> bool {
        self.key.as_ref() == Some(key)
    }

    /// No data yet and a request in flight
    pub fn is_loading(&self) -> bool {
        self.is_fetching && self.data.is_none()
    }

    /// Point the state at `key`. Data, error and the in-flight request of
    /// another key are dropped; returns whether the key changed.
    pub fn retarget(&mut self, key: K) -> bool {
        if self.holds(&key) {
            return false;
        }
        self.key = Some(key);
        self.data = None;
        self.error = None;
        self.cancel();
        true
    }

    /// Mark a new request for `key` as started and return its ticket
    pub fn begin(&mut self, key: K) -> u64 {
        self.retarget(key);
        self.generation += 1;
        self.is_fetching = true;
        self.generation
    }

    /// Apply the result of request `ticket`.
    ///
    /// Results of superseded requests are ignored; returns whether the result was applied.
    pub fn settle(&mut self, ticket: u64, result: Result<T, E>) -> bool {
        if ticket != self.generation {
            return false;
        }
        self.is_fetching = false;
        match result {
            Ok(value) => {
                self.data = Some(value);
                self.error = None;
            }
            Err(e) => {
                self.data = None;
                self.error = Some(e);
            }
        }
        true
    }

    /// Forget the in-flight request, e.g. when the gate closes
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.is_fetching = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type State = QueryState<&'static str, String, String>;

    #[test]
    fn test_gate() {
        assert!(should_fetch(Some("token"), true));
        assert!(!should_fetch(Some("token"), false));
        assert!(!should_fetch(Some(""), true));
        assert!(!should_fetch(None, true));
        assert!(!should_fetch(None, false));
    }

    #[test]
    fn test_success_exposes_body() {
        let mut state = State::default();
        assert!(!state.is_loading());

        let ticket = state.begin("motd");
        assert!(state.is_loading());
        assert!(state.is_fetching);
        assert_eq!(state.key(), Some(&"motd"));

        assert!(state.settle(ticket, Ok("20".to_string())));
        assert_eq!(state.data.as_deref(), Some("20"));
        assert_eq!(state.error, None);
        assert!(!state.is_fetching);
    }

    #[test]
    fn test_failure_leaves_data_unset() {
        let mut state = State::default();
        let ticket = state.begin("motd");
        state.settle(ticket, Err("HTTP 500".to_string()));
        assert_eq!(state.data, None);
        assert_eq!(state.error.as_deref(), Some("HTTP 500"));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_refetch_keeps_data_until_resolved() {
        let mut state = State::default();
        let first = state.begin("motd");
        state.settle(first, Ok("a".into()));

        state.begin("motd");
        // Тот же ключ: данные остаются, идёт запрос, но это не "loading"
        assert!(state.is_fetching);
        assert!(!state.is_loading());
        assert_eq!(state.data.as_deref(), Some("a"));
    }

    #[test]
    fn test_new_key_starts_empty() {
        let mut state = State::default();
        let first = state.begin("motd");
        state.settle(first, Ok("hello".into()));

        state.begin("pvp");
        assert!(state.holds(&"pvp"));
        assert_eq!(state.data, None);
        assert!(state.is_loading());
    }

    #[test]
    fn test_retarget_drops_error_and_in_flight() {
        let mut state = State::default();
        let ticket = state.begin("motd");
        assert!(state.retarget("pvp"));
        assert!(!state.is_fetching);
        assert!(!state.settle(ticket, Err("late".into())));
        assert_eq!(state.error, None);

        assert!(!state.retarget("pvp"));
    }

    #[test]
    fn test_stale_response_ignored() {
        let mut state = State::default();
        let old = state.begin("motd");
        let new = state.begin("motd");

        assert!(state.settle(new, Ok("new".into())));
        assert!(!state.settle(old, Ok("old".into())));
        assert_eq!(state.data.as_deref(), Some("new"));
    }

    #[test]
    fn test_cancel_drops_in_flight() {
        let mut state = State::default();
        let ticket = state.begin("motd");
        state.cancel();
        assert!(!state.is_fetching);
        assert!(!state.settle(ticket, Ok("late".into())));
        assert_eq!(state.data, None);
    }
}
