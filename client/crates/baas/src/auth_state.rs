//! Persistent Auth State
//!
//! Holds the bearer token and authenticated user record between requests,
//! and notifies registered observers on every change (sign-in, sign-out,
//! external token invalidation). Exactly one instance exists per client.

use std::sync::{Arc, Mutex};

use kernel::id::UserId;
use serde::Deserialize;

/// Authenticated user record as returned by the service
///
/// Unknown record fields are ignored; only the stable identifier and the
/// email address matter to this application.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthModel {
    /// Stable record identifier
    pub id: UserId,
    /// Email address (the service may hide it)
    #[serde(default)]
    pub email: Option<String>,
}

/// Handle for removing a registered observer
pub type SubscriptionId = u64;

type Observer = Arc<dyn Fn(Option<&AuthModel>) + Send + Sync>;

#[derive(Default)]
struct Inner {
    token: Option<String>,
    model: Option<AuthModel>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: SubscriptionId,
}

/// Auth state store with change notification
///
/// Observers are invoked after the lock is released, so a callback may
/// freely read the store again.
#[derive(Default)]
pub struct AuthState {
    inner: Mutex<Inner>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current bearer token, if signed in
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    /// Current authenticated record, if signed in
    pub fn model(&self) -> Option<AuthModel> {
        self.lock().model.clone()
    }

    /// Whether a token is currently stored
    pub fn is_authenticated(&self) -> bool {
        self.lock().token.is_some()
    }

    /// Store a fresh token and record, notifying observers
    pub fn save(&self, token: String, model: AuthModel) {
        let (observers, current) = {
            let mut inner = self.lock();
            inner.token = Some(token);
            inner.model = Some(model);
            (snapshot_observers(&inner), inner.model.clone())
        };
        notify(&observers, current.as_ref());
    }

    /// Discard the stored token and record, notifying observers
    ///
    /// Clearing an already-empty store still notifies, mirroring the
    /// service SDK behavior the rest of the app is written against.
    pub fn clear(&self) {
        let observers = {
            let mut inner = self.lock();
            inner.token = None;
            inner.model = None;
            snapshot_observers(&inner)
        };
        notify(&observers, None);
    }

    /// Register a change observer
    ///
    /// The observer fires on every subsequent change until
    /// [`AuthState::unsubscribe`] is called with the returned id.
    pub fn on_change<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(Option<&AuthModel>) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = inner.next_subscription;
        inner.next_subscription += 1;
        inner.observers.push((id, Arc::new(observer)));
        id
    }

    /// Remove a previously registered observer
    ///
    /// Returns `true` if the observer was present; a second call with the
    /// same id returns `false`.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.observers.len();
        inner.observers.retain(|(sid, _)| *sid != id);
        inner.observers.len() != before
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("auth state lock poisoned")
    }
}

fn snapshot_observers(inner: &Inner) -> Vec<Observer> {
    inner.observers.iter().map(|(_, o)| Arc::clone(o)).collect()
}

fn notify(observers: &[Observer], model: Option<&AuthModel>) {
    for observer in observers {
        observer(model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn model(id: &str) -> AuthModel {
        AuthModel {
            id: UserId::from_raw(id),
            email: Some(format!("{id}@example.com")),
        }
    }

    #[test]
    fn test_save_and_clear() {
        let state = AuthState::new();
        assert!(!state.is_authenticated());

        state.save("token-a".into(), model("u1"));
        assert_eq!(state.token().as_deref(), Some("token-a"));
        assert_eq!(state.model().unwrap().id.as_str(), "u1");

        state.clear();
        assert!(state.token().is_none());
        assert!(state.model().is_none());
    }

    #[test]
    fn test_observer_fires_on_save_and_clear() {
        let state = AuthState::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        state.on_change(move |m| {
            sink.lock().unwrap().push(m.map(|m| m.id.as_str().to_string()));
        });

        state.save("t".into(), model("u1"));
        state.clear();

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![Some("u1".to_string()), None]);
    }

    #[test]
    fn test_unsubscribe_exactly_once() {
        let state = AuthState::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let id = state.on_change(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        state.save("t".into(), model("u1"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));

        state.clear();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_observer_may_read_store() {
        let state = Arc::new(AuthState::new());
        let observed = Arc::new(Mutex::new(None));

        let state_ref = Arc::clone(&state);
        let sink = Arc::clone(&observed);
        state.on_change(move |_| {
            *sink.lock().unwrap() = state_ref.token();
        });

        state.save("token-b".into(), model("u2"));
        assert_eq!(observed.lock().unwrap().as_deref(), Some("token-b"));
    }

    #[test]
    fn test_auth_model_decodes_wire_record() {
        let json = r#"{
            "id": "u1a2b3c4d5e6f7g",
            "collectionId": "xyz",
            "email": "user@example.com",
            "verified": true,
            "created": "2024-01-02 03:04:05.678Z"
        }"#;
        let model: AuthModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.id.as_str(), "u1a2b3c4d5e6f7g");
        assert_eq!(model.email.as_deref(), Some("user@example.com"));
    }
}
