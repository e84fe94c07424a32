use super::*;
use folio_core::ID;

/// JWT payload carried by a local-provider grant.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid,
    pub sid: uuid::Uuid,
    pub iat: i64,
    pub exp: i64,
}

fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

impl Claims {
    pub fn new(user: ID<Identity>) -> Self {
        let now = now();
        Self {
            sub: user.inner(),
            sid: uuid::Uuid::now_v7(),
            iat: now,
            exp: now + folio_core::ACCESS_TOKEN_DURATION.as_secs() as i64,
        }
    }
    pub fn expired(&self) -> bool {
        self.exp < now()
    }
    pub fn user(&self) -> ID<Identity> {
        ID::from(self.sub)
    }
}
