//! Fault-injecting provider wrapper for session tests.
use super::*;
use folio_core::ID;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use tokio::sync::Notify;

/// Delegates to [`Memory`], but can hold profile fetches for one identity
/// until released, fail fetches or sign-outs, and counts profile writes.
#[derive(Default)]
pub struct Faulty {
    pub inner: Memory,
    held: Mutex<Option<ID<Identity>>>,
    gate: Notify,
    pub fail_profile: AtomicBool,
    pub fail_sign_out: AtomicBool,
    pub fail_insert: AtomicBool,
    pub writes: AtomicUsize,
}

impl Faulty {
    pub fn hold(&self, id: ID<Identity>) {
        *self.held.lock().unwrap() = Some(id);
    }
    pub fn release(&self) {
        self.gate.notify_one();
    }
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
    fn held(&self, id: ID<Identity>) -> bool {
        let mut held = self.held.lock().unwrap();
        match *held == Some(id) {
            true => held.take().is_some(),
            false => false,
        }
    }
    fn unavailable() -> ProviderError {
        ProviderError::Unavailable("injected fault".to_string())
    }
}

#[async_trait::async_trait]
impl Provider for Faulty {
    async fn subscribe(&self) -> Subscription {
        self.inner.subscribe().await
    }
    async fn sign_in(&self, email: &str, secret: &str) -> Result<Grant, ProviderError> {
        self.inner.sign_in(email, secret).await
    }
    async fn sign_up(&self, email: &str, secret: &str) -> Result<Grant, ProviderError> {
        self.inner.sign_up(email, secret).await
    }
    async fn sign_out(&self) -> Result<(), ProviderError> {
        match self.fail_sign_out.load(Ordering::SeqCst) {
            true => Err(Self::unavailable()),
            false => self.inner.sign_out().await,
        }
    }
    async fn profile(&self, id: ID<Identity>) -> Result<Option<Identity>, ProviderError> {
        if self.held(id) {
            self.gate.notified().await;
        }
        match self.fail_profile.load(Ordering::SeqCst) {
            true => Err(Self::unavailable()),
            false => self.inner.profile(id).await,
        }
    }
    async fn insert(&self, identity: &Identity) -> Result<Identity, ProviderError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        match self.fail_insert.load(Ordering::SeqCst) {
            true => Err(Self::unavailable()),
            false => self.inner.insert(identity).await,
        }
    }
    async fn update(&self, id: ID<Identity>, patch: &Patch) -> Result<Identity, ProviderError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.update(id, patch).await
    }
    async fn assign(&self, id: ID<Identity>, role: Role) -> Result<Identity, ProviderError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.assign(id, role).await
    }
    async fn members(&self, role: Role) -> Result<Vec<Identity>, ProviderError> {
        self.inner.members(role).await
    }
    async fn reset(&self, email: &str, redirect: &str) -> Result<(), ProviderError> {
        self.inner.reset(email, redirect).await
    }
    async fn password(&self, secret: &str) -> Result<(), ProviderError> {
        self.inner.password(secret).await
    }
}
