use super::*;
use folio_core::ID;
use folio_core::Unique;

/// Admin-panel role management.
impl<P> Manager<P>
where
    P: Provider,
{
    /// Every identity holding the `admin` role. Admins and owners only.
    pub async fn admins(&self) -> Result<Vec<Identity>, AuthError> {
        self.require(&Guard::at_least(Role::Admin))?;
        Ok(self.core.provider.members(Role::Admin).await?)
    }

    /// Set `target`'s role outright. Owners only; this is the one path
    /// that may lower a role.
    pub async fn assign(&self, target: ID<Identity>, role: Role) -> Result<Identity, AuthError> {
        let ticket = self.ticket();
        let actor = self.require(&Guard::roles([Role::Owner]))?;
        let identity = self.core.provider.assign(target, role).await?;
        log::info!("[roster] {} set {} to {}", actor.id(), target, role);
        if target == actor.id() {
            self.settle(ticket, Session::Auth(identity.clone()));
        }
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    async fn signed_in(role: Role) -> (Arc<Memory>, Manager<Memory>) {
        let memory = Arc::new(Memory::default());
        let manager = Manager::new(memory.clone(), Settings::default());
        manager.register("agent", "smith@matrix.io", "mr anderson").await.unwrap();
        let me = manager.session().identity().unwrap().id();
        memory.assign(me, role).await.unwrap();
        manager.changed(memory.current().await).await;
        (memory, manager)
    }

    #[tokio::test]
    async fn admins_listing_is_guarded() {
        let (_, manager) = signed_in(Role::User).await;
        assert!(matches!(manager.admins().await, Err(AuthError::Forbidden)));
        let (_, manager) = signed_in(Role::Admin).await;
        let admins = manager.admins().await.unwrap();
        assert!(admins.len() == 1);
        assert!(admins[0].role() == Role::Admin);
    }

    #[tokio::test]
    async fn anonymous_cannot_list() {
        let memory = Arc::new(Memory::default());
        let manager = Manager::new(memory, Settings::default());
        assert!(matches!(manager.admins().await, Err(AuthError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn only_owner_assigns() {
        let (memory, manager) = signed_in(Role::Admin).await;
        let other = Identity::fresh(ID::default(), "cypher".into(), "c@matrix.io".into());
        memory.insert(&other).await.unwrap();
        assert!(matches!(
            manager.assign(other.id(), Role::Admin).await,
            Err(AuthError::Forbidden)
        ));
        let (memory, manager) = signed_in(Role::Owner).await;
        memory.insert(&other).await.unwrap();
        let promoted = manager.assign(other.id(), Role::Admin).await.unwrap();
        assert!(promoted.role() == Role::Admin);
        assert!(manager.session().role() == Some(Role::Owner));
    }

    #[tokio::test]
    async fn self_assignment_updates_session() {
        let (_, manager) = signed_in(Role::Owner).await;
        let me = manager.session().identity().unwrap().id();
        manager.assign(me, Role::Admin).await.unwrap();
        assert!(manager.session().role() == Some(Role::Admin));
    }
}
