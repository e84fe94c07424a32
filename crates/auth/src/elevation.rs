use super::*;
use folio_core::Unique;

/// Promotes identities to elevated roles when presented with the matching code.
#[derive(Debug, Clone, Default)]
pub struct Elevator {
    codes: Codes,
}

impl From<Codes> for Elevator {
    fn from(codes: Codes) -> Self {
        Self { codes }
    }
}

impl Elevator {
    /// True iff a reference code is configured for `target` and equals `code`.
    pub fn verify(&self, code: &str, target: Role) -> bool {
        self.codes
            .reference(target)
            .map(|reference| reference.matches(code))
            .unwrap_or(false)
    }

    /// Elevate `identity` to `target`.
    ///
    /// Wrong code, unconfigured reference and a `user` target all fail with the
    /// same [`AuthError::InvalidCode`]. An identity already at or above
    /// `target` is returned as-is without a write, so a role never drops.
    pub async fn promote<P>(
        &self,
        provider: &P,
        identity: &Identity,
        code: &str,
        target: Role,
    ) -> Result<Identity, AuthError>
    where
        P: Provider + ?Sized,
    {
        if !self.verify(code, target) {
            log::warn!("[elevation] rejected {} code for {}", target, identity.id());
            return Err(AuthError::InvalidCode);
        }
        if identity.role().at_least(target) {
            log::info!(
                "[elevation] {} already holds {}, nothing to write",
                identity.id(),
                identity.role()
            );
            return Ok(identity.clone());
        }
        provider
            .assign(identity.id(), target)
            .await
            .inspect(|_| log::info!("[elevation] promoted {} to {}", identity.id(), target))
            .map_err(AuthError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::ID;

    fn elevator() -> Elevator {
        Elevator::from(Codes::new(Some("ADMCODE".into()), Some("OWNCODE".into())))
    }

    #[test]
    fn only_exact_code_for_target_matches() {
        let elevator = elevator();
        assert!(elevator.verify("OWNCODE", Role::Owner));
        assert!(elevator.verify("ADMCODE", Role::Admin));
        assert!(!elevator.verify("ADMCODE", Role::Owner));
        assert!(!elevator.verify("OWNCODE", Role::Admin));
        assert!(!elevator.verify("owncode", Role::Owner));
        assert!(!elevator.verify("", Role::Owner));
        assert!(!elevator.verify("OWNCODE", Role::User));
    }

    #[test]
    fn unconfigured_never_matches() {
        let elevator = Elevator::default();
        for role in Role::all() {
            assert!(!elevator.verify("", role));
            assert!(!elevator.verify("anything", role));
        }
    }

    async fn member(memory: &Memory, role: Role) -> Identity {
        let identity = Identity::fresh(ID::default(), "switch".into(), "s@zion.io".into());
        memory.insert(&identity.with_role(role)).await.unwrap()
    }

    #[tokio::test]
    async fn failures_are_indistinguishable() {
        let memory = Memory::default();
        let user = member(&memory, Role::User).await;
        let configured = elevator();
        let unconfigured = Elevator::default();
        let messages = [
            configured.promote(&memory, &user, "WRONG", Role::Owner).await,
            unconfigured.promote(&memory, &user, "OWNCODE", Role::Owner).await,
            configured.promote(&memory, &user, "OWNCODE", Role::User).await,
        ]
        .into_iter()
        .map(|result| match result {
            Err(AuthError::InvalidCode) => AuthError::InvalidCode.to_string(),
            other => panic!("expected invalid code, got {:?}", other),
        })
        .collect::<Vec<String>>();
        assert!(messages.iter().all(|m| m == &messages[0]));
        let stored = memory.profile(user.id()).await.unwrap().unwrap();
        assert!(stored.role() == Role::User);
    }

    #[tokio::test]
    async fn matching_code_writes_role() {
        let memory = Memory::default();
        let user = member(&memory, Role::User).await;
        let promoted = elevator()
            .promote(&memory, &user, "OWNCODE", Role::Owner)
            .await
            .unwrap();
        assert!(promoted.role() == Role::Owner);
        assert!(memory.profile(user.id()).await.unwrap().unwrap().role() == Role::Owner);
    }

    #[tokio::test]
    async fn never_downgrades() {
        let memory = Memory::default();
        let owner = member(&memory, Role::Owner).await;
        let result = elevator()
            .promote(&memory, &owner, "ADMCODE", Role::Admin)
            .await
            .unwrap();
        assert!(result.role() == Role::Owner);
        assert!(memory.profile(owner.id()).await.unwrap().unwrap().role() == Role::Owner);
    }
}
