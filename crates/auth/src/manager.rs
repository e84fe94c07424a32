use super::*;
use folio_core::ID;
use folio_core::Unique;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Where a state transition originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    /// Provider-pushed session change carrying a grant.
    Notice,
    /// Provider-pushed end of session; supersedes pending actions.
    Absence,
    /// Explicit caller operation.
    Action,
}

/// Counters observed when an operation starts.
/// A notification is stale once any transition has committed since;
/// an action is stale once another action or an absence has committed since.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Ticket {
    epoch: u64,
    actions: u64,
}

/// Shared state behind a [`Manager`], also owned by its listener task.
pub(crate) struct Core<P> {
    pub(crate) provider: Arc<P>,
    pub(crate) elevator: Elevator,
    pub(crate) redirect: String,
    state: watch::Sender<Session>,
    epoch: AtomicU64,
    actions: AtomicU64,
}

impl<P> Core<P>
where
    P: Provider,
{
    fn ticket(&self) -> Ticket {
        Ticket {
            epoch: self.epoch.load(Ordering::SeqCst),
            actions: self.actions.load(Ordering::SeqCst),
        }
    }

    /// Publish `session` unless the operation holding `ticket` went stale.
    /// Runs inside the watch lock, so commits are totally ordered.
    fn commit(&self, ticket: Ticket, source: Source, session: Session) -> bool {
        let mut fresh = false;
        self.state.send_if_modified(|current| {
            let stale = match source {
                Source::Notice | Source::Absence => self.epoch.load(Ordering::SeqCst) != ticket.epoch,
                Source::Action => self.actions.load(Ordering::SeqCst) != ticket.actions,
            };
            if stale {
                return false;
            }
            fresh = true;
            self.epoch.fetch_add(1, Ordering::SeqCst);
            if source != Source::Notice {
                self.actions.fetch_add(1, Ordering::SeqCst);
            }
            let modified = *current != session;
            *current = session;
            modified
        });
        fresh
    }

    /// Publish `session` unconditionally, invalidating everything in flight.
    fn force(&self, session: Session) {
        self.state.send_if_modified(|current| {
            self.epoch.fetch_add(1, Ordering::SeqCst);
            self.actions.fetch_add(1, Ordering::SeqCst);
            let modified = *current != session;
            *current = session;
            modified
        });
    }

    fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Resolve a raw provider session into the published state.
    /// Fetch failures degrade to anonymous and are only logged.
    async fn changed(&self, grant: Option<Grant>) {
        let ticket = self.ticket();
        let source = match grant {
            None => Source::Absence,
            Some(_) => Source::Notice,
        };
        let session = match grant {
            None => Session::Anon,
            Some(grant) => match self.provider.profile(grant.user()).await {
                Ok(Some(identity)) => Session::Auth(identity),
                Ok(None) => {
                    let e = AuthError::ProfileFetch(format!("no profile for {}", grant.user()));
                    log::warn!("[session] {}", e);
                    Session::Anon
                }
                Err(e) => {
                    log::warn!("[session] {}", AuthError::ProfileFetch(e.to_string()));
                    Session::Anon
                }
            },
        };
        match self.commit(ticket, source, session) {
            true => log::debug!("[session] now {}", self.session()),
            false => log::debug!("[session] discarded stale notification"),
        }
    }

    async fn listen(self: Arc<Self>, mut subscription: Subscription) {
        while let Some(change) = subscription.recv().await {
            log::debug!("[session] provider event {:?}", change.event);
            self.changed(change.grant).await;
        }
        log::debug!("[session] provider stream closed");
    }
}

/// Owns the single live [`Session`] of a runtime context and keeps it in
/// step with the provider. Cheap to share behind an `Arc`.
pub struct Manager<P>
where
    P: Provider,
{
    pub(crate) core: Arc<Core<P>>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl<P> Manager<P>
where
    P: Provider,
{
    pub fn new(provider: Arc<P>, settings: Settings) -> Self {
        let (state, _) = watch::channel(Session::Loading);
        Self {
            core: Arc::new(Core {
                provider,
                elevator: Elevator::from(settings.codes),
                redirect: settings.redirect,
                state,
                epoch: AtomicU64::new(0),
                actions: AtomicU64::new(0),
            }),
            listener: Mutex::new(None),
        }
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.core.provider
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.core.session()
    }

    /// Observe every published session.
    pub fn watch(&self) -> watch::Receiver<Session> {
        self.core.state.subscribe()
    }

    /// Re-enter `Loading` and start following provider notifications.
    /// Any earlier subscription is released first; exactly one is live after.
    pub async fn initialize(&self) {
        self.shutdown().await;
        self.core.force(Session::Loading);
        let subscription = self.core.provider.subscribe().await;
        let handle = tokio::spawn(self.core.clone().listen(subscription));
        let stale = self.slot().replace(handle);
        if let Some(stale) = stale {
            stale.abort();
        }
        log::info!("[session] listening for provider changes");
    }

    /// Stop listening and wait until the subscription has been released.
    pub async fn shutdown(&self) {
        let handle = self.slot().take();
        if let Some(handle) = handle {
            handle.abort();
            let _ = handle.await;
            log::info!("[session] listener released");
        }
    }

    /// Apply one provider session-change notification.
    pub async fn changed(&self, grant: Option<Grant>) {
        self.core.changed(grant).await
    }

    pub async fn login(&self, email: &str, secret: &str) -> Result<(), AuthError> {
        let ticket = self.ticket();
        let grant = self
            .core
            .provider
            .sign_in(email, secret)
            .await
            .map_err(|e| AuthError::Authentication(e.to_string()))?;
        let identity = self
            .core
            .provider
            .profile(grant.user())
            .await
            .map_err(|e| AuthError::Authentication(e.to_string()))?
            .ok_or_else(|| AuthError::Authentication("profile not found".to_string()))?;
        log::info!("[session] signed in {}", identity.id());
        self.settle(ticket, Session::Auth(identity));
        Ok(())
    }

    pub async fn register(&self, username: &str, email: &str, secret: &str) -> Result<(), AuthError> {
        let ticket = self.ticket();
        let username = username.trim();
        let length = username.chars().count();
        if length < folio_core::MIN_USERNAME_LENGTH || length > folio_core::MAX_USERNAME_LENGTH {
            return Err(AuthError::Registration(format!(
                "username must be {}-{} characters",
                folio_core::MIN_USERNAME_LENGTH,
                folio_core::MAX_USERNAME_LENGTH
            )));
        }
        let grant = self
            .core
            .provider
            .sign_up(email, secret)
            .await
            .map_err(|e| AuthError::Registration(e.to_string()))?;
        let fresh = Identity::fresh(grant.user(), username.to_string(), email.trim().to_string());
        let identity = match self.core.provider.insert(&fresh).await {
            Ok(identity) => identity,
            Err(e) => {
                if let Err(out) = self.core.provider.sign_out().await {
                    log::warn!("[session] could not drop half-registered session: {}", out);
                }
                return Err(AuthError::Registration(e.to_string()));
            }
        };
        log::info!("[session] registered {}", identity.id());
        self.settle(ticket, Session::Auth(identity));
        Ok(())
    }

    /// Ends the session locally no matter how the provider call goes.
    pub async fn logout(&self) {
        if let Err(e) = self.core.provider.sign_out().await {
            log::warn!("[session] provider sign-out failed, clearing locally: {}", e);
        }
        self.core.force(Session::Anon);
        log::info!("[session] signed out");
    }

    /// Write `patch` to the live identity's profile and adopt the stored record.
    pub async fn update_profile(&self, id: ID<Identity>, patch: Patch) -> Result<Identity, AuthError> {
        let ticket = self.ticket();
        let current = self.live()?;
        if current.id() != id {
            return Err(AuthError::NotAuthenticated);
        }
        let identity = self.core.provider.update(id, &patch).await?;
        self.settle(ticket, Session::Auth(identity.clone()));
        Ok(identity)
    }

    /// Elevate the live identity to `target` with a secret code.
    pub async fn promote(&self, code: &str, target: Role) -> Result<Identity, AuthError> {
        let ticket = self.ticket();
        let current = self.live()?;
        let identity = self
            .core
            .elevator
            .promote(self.core.provider.as_ref(), &current, code, target)
            .await?;
        self.settle(ticket, Session::Auth(identity.clone()));
        Ok(identity)
    }

    /// Boolean form of [`Manager::promote`] for generic denial messaging.
    pub async fn check(&self, code: &str, target: Role) -> bool {
        self.promote(code, target).await.is_ok()
    }

    /// Identity of the current session, if authenticated.
    pub fn live(&self) -> Result<Identity, AuthError> {
        self.session()
            .identity()
            .cloned()
            .ok_or(AuthError::NotAuthenticated)
    }

    /// Live identity, provided `guard` admits it.
    pub(crate) fn require(&self, guard: &Guard) -> Result<Identity, AuthError> {
        let session = self.session();
        match (guard.verdict(&session), session.identity()) {
            (Verdict::Allow, Some(identity)) => Ok(identity.clone()),
            (_, Some(_)) => Err(AuthError::Forbidden),
            (_, None) => Err(AuthError::NotAuthenticated),
        }
    }

    pub(crate) fn ticket(&self) -> Ticket {
        self.core.ticket()
    }

    /// Commit the outcome of an explicit operation unless it was superseded.
    pub(crate) fn settle(&self, ticket: Ticket, session: Session) {
        if !self.core.commit(ticket, Source::Action, session) {
            log::debug!("[session] discarded superseded result");
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.listener.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn detach(&self) {
        if let Some(handle) = self.slot().take() {
            handle.abort();
        }
    }
}

impl<P> Drop for Manager<P>
where
    P: Provider,
{
    fn drop(&mut self) {
        self.detach();
    }
}
