use super::*;
use std::collections::BTreeSet;

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Session still loading; render a pending state.
    Pending,
    Allow,
    Deny,
}

/// Access requirement for a protected view.
/// Evaluated against the current session on every call, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guard {
    roles: BTreeSet<Role>,
}

impl Guard {
    pub fn roles<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        Self {
            roles: roles.into_iter().collect(),
        }
    }
    /// Every role ranking at or above `minimum`.
    pub fn at_least(minimum: Role) -> Self {
        Self::roles(Role::all().into_iter().filter(|r| r.at_least(minimum)))
    }
    /// Any signed-in identity.
    pub fn member() -> Self {
        Self::at_least(Role::User)
    }
    pub fn verdict(&self, session: &Session) -> Verdict {
        match session {
            Session::Loading => Verdict::Pending,
            Session::Anon => Verdict::Deny,
            Session::Auth(identity) if self.roles.contains(&identity.role()) => Verdict::Allow,
            Session::Auth(_) => Verdict::Deny,
        }
    }
    pub fn can_access(&self, session: &Session) -> bool {
        self.verdict(session) == Verdict::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::ID;

    fn session(role: Role) -> Session {
        let identity = Identity::fresh(ID::default(), "oracle".into(), "o@zion.io".into());
        Session::Auth(identity.with_role(role))
    }

    #[test]
    fn loading_is_never_allowed() {
        for guard in [
            Guard::member(),
            Guard::at_least(Role::Admin),
            Guard::roles([Role::Owner]),
            Guard::roles([]),
        ] {
            assert!(guard.verdict(&Session::Loading) == Verdict::Pending);
            assert!(!guard.can_access(&Session::Loading));
        }
    }

    #[test]
    fn admin_panel_admits_admin_and_owner() {
        let guard = Guard::roles([Role::Admin, Role::Owner]);
        assert!(!guard.can_access(&Session::Anon));
        assert!(!guard.can_access(&session(Role::User)));
        assert!(guard.can_access(&session(Role::Admin)));
        assert!(guard.can_access(&session(Role::Owner)));
        assert!(guard == Guard::at_least(Role::Admin));
    }

    #[test]
    fn member_requires_identity() {
        assert!(Guard::member().verdict(&Session::Anon) == Verdict::Deny);
        for role in Role::all() {
            assert!(Guard::member().can_access(&session(role)));
        }
    }

    #[test]
    fn explicit_set_is_not_ranked() {
        let guard = Guard::roles([Role::Admin]);
        assert!(guard.can_access(&session(Role::Admin)));
        assert!(!guard.can_access(&session(Role::Owner)));
    }
}
