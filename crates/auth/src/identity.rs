use super::*;
use folio_core::ID;
use folio_core::Unique;
use serde::Deserialize;
use serde::Serialize;

/// Profile of an authenticated actor, as stored by the provider.
/// Replaced wholesale on every write; never merged locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    id: uuid::Uuid,
    username: String,
    email: String,
    avatar: String,
    bio: String,
    role: Role,
}

impl Identity {
    pub fn new(
        id: ID<Self>,
        username: String,
        email: String,
        avatar: String,
        bio: String,
        role: Role,
    ) -> Self {
        Self {
            id: id.inner(),
            username,
            email,
            avatar,
            bio,
            role,
        }
    }
    /// Profile for a brand new account: plain `user` role,
    /// generated avatar, stock biography.
    pub fn fresh(id: ID<Self>, username: String, email: String) -> Self {
        let avatar = format!(
            "{}{}{}",
            folio_core::AVATAR_SERVICE,
            urlencoding::encode(&username),
            folio_core::AVATAR_STYLE
        );
        Self::new(
            id,
            username,
            email,
            avatar,
            folio_core::DEFAULT_BIO.to_string(),
            Role::User,
        )
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn avatar(&self) -> &str {
        &self.avatar
    }
    pub fn bio(&self) -> &str {
        &self.bio
    }
    pub fn role(&self) -> Role {
        self.role
    }
    /// Record with the patched fields overwritten.
    pub fn patched(&self, patch: &Patch) -> Self {
        Self {
            username: patch.username.clone().unwrap_or_else(|| self.username.clone()),
            bio: patch.bio.clone().unwrap_or_else(|| self.bio.clone()),
            avatar: patch.avatar.clone().unwrap_or_else(|| self.avatar.clone()),
            ..self.clone()
        }
    }
    pub fn with_role(&self, role: Role) -> Self {
        Self {
            role,
            ..self.clone()
        }
    }
}

impl Unique for Identity {
    fn id(&self) -> ID<Self> {
        ID::from(self.id)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}> [{}]", self.username, self.email, self.role)
    }
}

/// Partial profile update. Only user-editable fields live here;
/// role changes go through [`Provider::assign`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

impl Patch {
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }
    pub fn avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.bio.is_none() && self.avatar.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_profiles_are_plain_users() {
        let id = ID::default();
        let identity = Identity::fresh(id, "Neo Anderson".into(), "neo@zion.io".into());
        assert!(identity.id() == id);
        assert!(identity.role() == Role::User);
        assert!(identity.bio() == folio_core::DEFAULT_BIO);
        assert!(
            identity.avatar()
                == "https://ui-avatars.com/api/?name=Neo%20Anderson&background=ff0000&color=fff"
        );
    }

    #[test]
    fn patch_touches_only_given_fields() {
        let before = Identity::fresh(ID::default(), "trinity".into(), "t@zion.io".into());
        let after = before.patched(&Patch::default().bio("follow the white rabbit"));
        assert!(after.bio() == "follow the white rabbit");
        assert!(after.username() == before.username());
        assert!(after.avatar() == before.avatar());
        assert!(after.role() == before.role());
        assert!(after.id() == before.id());
    }

    #[test]
    fn empty_patch() {
        assert!(Patch::default().is_empty());
        assert!(!Patch::default().avatar("x").is_empty());
    }
}
