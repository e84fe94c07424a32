use super::*;
use folio_core::ID;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;

/// Hosted identity and profile store, treated as an opaque collaborator.
/// Abstracts the remote service away from the session logic.
#[async_trait::async_trait]
pub trait Provider: Send + Sync + 'static {
    /// Start receiving session-change notifications.
    async fn subscribe(&self) -> Subscription;
    async fn sign_in(&self, email: &str, secret: &str) -> Result<Grant, ProviderError>;
    async fn sign_up(&self, email: &str, secret: &str) -> Result<Grant, ProviderError>;
    async fn sign_out(&self) -> Result<(), ProviderError>;
    async fn profile(&self, id: ID<Identity>) -> Result<Option<Identity>, ProviderError>;
    /// Upsert a full profile record.
    async fn insert(&self, identity: &Identity) -> Result<Identity, ProviderError>;
    async fn update(&self, id: ID<Identity>, patch: &Patch) -> Result<Identity, ProviderError>;
    async fn assign(&self, id: ID<Identity>, role: Role) -> Result<Identity, ProviderError>;
    async fn members(&self, role: Role) -> Result<Vec<Identity>, ProviderError>;
    async fn reset(&self, email: &str, redirect: &str) -> Result<(), ProviderError>;
    /// Change the secret of the currently signed-in account.
    async fn password(&self, secret: &str) -> Result<(), ProviderError>;
}

/// Receiving end of a provider notification stream.
/// Dropping it unsubscribes; the provider prunes closed senders.
#[derive(Debug)]
pub struct Subscription {
    rx: UnboundedReceiver<Change>,
}

impl Subscription {
    pub fn channel() -> (UnboundedSender<Change>, Self) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (tx, Self { rx })
    }
    pub async fn recv(&mut self) -> Option<Change> {
        self.rx.recv().await
    }
    pub fn unsubscribe(mut self) {
        self.rx.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dropping_subscription_closes_sender() {
        let (tx, subscription) = Subscription::channel();
        assert!(!tx.is_closed());
        drop(subscription);
        assert!(tx.is_closed());
    }

    #[tokio::test]
    async fn unsubscribe_closes_sender() {
        let (tx, mut subscription) = Subscription::channel();
        tx.send(Change::new(Event::SignedOut, None)).unwrap();
        assert!(subscription.recv().await == Some(Change::new(Event::SignedOut, None)));
        subscription.unsubscribe();
        assert!(tx.is_closed());
    }
}
