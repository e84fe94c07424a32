use super::*;
use folio_core::ID;
use folio_core::Unique;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedSender;

/// Recovery message the provider would have emailed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mail {
    pub to: String,
    pub link: String,
}

/// In-process provider: Argon2 accounts, JWT grants, profile table,
/// and a broadcast of session changes to every live subscriber.
#[derive(Default)]
pub struct Memory {
    tokens: Tokens,
    credentials: Credentials,
    profiles: RwLock<HashMap<ID<Identity>, Identity>>,
    current: RwLock<Option<Grant>>,
    recoveries: RwLock<HashMap<Digest, ID<Identity>>>,
    listeners: Mutex<Vec<UnboundedSender<Change>>>,
    outbox: Mutex<Vec<Mail>>,
}

impl Memory {
    pub fn new(tokens: Tokens) -> Self {
        Self {
            tokens,
            ..Self::default()
        }
    }
    pub fn from_env() -> Self {
        Self::new(Tokens::from_env())
    }
    /// Grant currently held by this provider, if any.
    pub async fn current(&self) -> Option<Grant> {
        self.current.read().await.clone()
    }
    /// Recovery mails sent so far.
    pub async fn outbox(&self) -> Vec<Mail> {
        self.outbox.lock().await.clone()
    }
    /// Number of live subscriptions.
    pub async fn listeners(&self) -> usize {
        let mut listeners = self.listeners.lock().await;
        listeners.retain(|tx| !tx.is_closed());
        listeners.len()
    }
    /// Redeem a recovery token once, signing its owner in.
    pub async fn recover(&self, token: &str) -> Result<Grant, ProviderError> {
        let user = self
            .recoveries
            .write()
            .await
            .remove(&Digest::of(token))
            .ok_or(ProviderError::Credentials)?;
        log::info!("[memory] recovery session for {}", user);
        self.establish(user, Event::Recovery).await
    }

    fn nonce() -> String {
        use rand::Rng;
        let ref mut bytes = [0u8; 24];
        rand::rng().fill(bytes);
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
    async fn announce(&self, change: Change) {
        self.listeners
            .lock()
            .await
            .retain(|tx| tx.send(change.clone()).is_ok());
    }
    async fn establish(&self, user: ID<Identity>, event: Event) -> Result<Grant, ProviderError> {
        let grant = self.tokens.issue(user)?;
        *self.current.write().await = Some(grant.clone());
        self.announce(Change::new(event, Some(grant.clone()))).await;
        Ok(grant)
    }
    async fn modify<F>(&self, id: ID<Identity>, f: F) -> Result<Identity, ProviderError>
    where
        F: FnOnce(&Identity) -> Identity + Send,
    {
        let mut profiles = self.profiles.write().await;
        let profile = profiles.get_mut(&id).ok_or(ProviderError::NotFound)?;
        let next = f(profile);
        *profile = next.clone();
        Ok(next)
    }
}

#[async_trait::async_trait]
impl Provider for Memory {
    async fn subscribe(&self) -> Subscription {
        let (tx, subscription) = Subscription::channel();
        let grant = self.current().await;
        let _ = tx.send(Change::new(Event::Initial, grant));
        self.listeners.lock().await.push(tx);
        subscription
    }

    async fn sign_in(&self, email: &str, secret: &str) -> Result<Grant, ProviderError> {
        let user = self.credentials.authenticate(email, secret).await?;
        self.establish(user, Event::SignedIn).await
    }

    async fn sign_up(&self, email: &str, secret: &str) -> Result<Grant, ProviderError> {
        let user = self.credentials.enroll(email, secret).await?;
        self.establish(user, Event::SignedIn).await
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        *self.current.write().await = None;
        self.announce(Change::new(Event::SignedOut, None)).await;
        Ok(())
    }

    async fn profile(&self, id: ID<Identity>) -> Result<Option<Identity>, ProviderError> {
        Ok(self.profiles.read().await.get(&id).cloned())
    }

    async fn insert(&self, identity: &Identity) -> Result<Identity, ProviderError> {
        self.profiles
            .write()
            .await
            .insert(identity.id(), identity.clone());
        Ok(identity.clone())
    }

    async fn update(&self, id: ID<Identity>, patch: &Patch) -> Result<Identity, ProviderError> {
        self.modify(id, |p| p.patched(patch)).await
    }

    async fn assign(&self, id: ID<Identity>, role: Role) -> Result<Identity, ProviderError> {
        self.modify(id, |p| p.with_role(role)).await
    }

    async fn members(&self, role: Role) -> Result<Vec<Identity>, ProviderError> {
        let mut members = self
            .profiles
            .read()
            .await
            .values()
            .filter(|p| p.role() == role)
            .cloned()
            .collect::<Vec<Identity>>();
        members.sort_by(|a, b| a.username().cmp(b.username()));
        Ok(members)
    }

    async fn reset(&self, email: &str, redirect: &str) -> Result<(), ProviderError> {
        match self.credentials.lookup(email).await {
            None => log::debug!("[memory] recovery requested for unknown address"),
            Some(user) => {
                let token = Self::nonce();
                self.recoveries.write().await.insert(Digest::of(&token), user);
                self.outbox.lock().await.push(Mail {
                    to: email.trim().to_lowercase(),
                    link: format!("{}?token={}", redirect, token),
                });
                log::info!("[memory] recovery mail queued for {}", user);
            }
        }
        Ok(())
    }

    async fn password(&self, secret: &str) -> Result<(), ProviderError> {
        let grant = self.current().await.ok_or(ProviderError::Unauthenticated)?;
        let user = self.tokens.holder(&grant)?;
        self.credentials.replace(user, secret).await
    }
}
