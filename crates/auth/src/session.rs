use super::*;
use folio_core::ID;

/// Live authentication state of one runtime context.
/// Starts out `Loading` until the provider reports in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Loading,
    Anon,
    Auth(Identity),
}

impl Session {
    pub fn loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Auth(identity) => Some(identity),
            Self::Loading | Self::Anon => None,
        }
    }
    pub fn role(&self) -> Option<Role> {
        self.identity().map(|identity| identity.role())
    }
}

impl From<Option<Identity>> for Session {
    fn from(identity: Option<Identity>) -> Self {
        match identity {
            Some(identity) => Self::Auth(identity),
            None => Self::Anon,
        }
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Anon => write!(f, "anonymous"),
            Self::Auth(identity) => write!(f, "{}", identity),
        }
    }
}

/// Raw provider session: the backing identifier plus an opaque access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    user: ID<Identity>,
    token: String,
}

impl Grant {
    pub fn new(user: ID<Identity>, token: String) -> Self {
        Self { user, token }
    }
    pub fn user(&self) -> ID<Identity> {
        self.user
    }
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Kind of provider-side session transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Initial,
    SignedIn,
    SignedOut,
    UserUpdated,
    Recovery,
}

/// Notification pushed by the provider to every subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub event: Event,
    pub grant: Option<Grant>,
}

impl Change {
    pub fn new(event: Event, grant: Option<Grant>) -> Self {
        Self { event, grant }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absence_is_never_a_record() {
        assert!(Session::Loading.identity().is_none());
        assert!(Session::Anon.identity().is_none());
        assert!(Session::from(None).role().is_none());
        assert!(!Session::Anon.loading());
        assert!(Session::default().loading());
    }

    #[test]
    fn authenticated_carries_role() {
        let identity = Identity::fresh(ID::default(), "morpheus".into(), "m@zion.io".into());
        let session = Session::from(Some(identity.with_role(Role::Owner)));
        assert!(session.role() == Some(Role::Owner));
        assert!(!session.loading());
    }
}
