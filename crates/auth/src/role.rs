use serde::Deserialize;
use serde::Serialize;

/// Ranked authority level of an identity.
/// Declaration order is the rank order: `User < Admin < Owner`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
    Owner,
}

impl Role {
    pub const fn all() -> [Self; 3] {
        [Self::User, Self::Admin, Self::Owner]
    }
    pub const fn rank(&self) -> u8 {
        match self {
            Self::User => 0,
            Self::Admin => 1,
            Self::Owner => 2,
        }
    }
    /// The single rank comparison every access check goes through.
    pub fn at_least(&self, other: Self) -> bool {
        self >= &other
    }
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "owner" => Ok(Self::Owner),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}
