use super::*;
use folio_core::ID;

/// Issues and checks the signed grants handed out by [`Memory`].
pub struct Tokens {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
}

impl Default for Tokens {
    fn default() -> Self {
        use rand::Rng;
        let ref mut secret = [0u8; 32];
        rand::rng().fill(secret);
        Self::new(secret)
    }
}

impl Tokens {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
        }
    }
    /// Signs with `JWT_SECRET`, or a random key when it is unset or empty.
    pub fn from_env() -> Self {
        match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => Self::new(secret.as_bytes()),
            _ => Self::default(),
        }
    }
    /// Fresh grant for `user`, valid for [`folio_core::ACCESS_TOKEN_DURATION`].
    pub fn issue(&self, user: ID<Identity>) -> Result<Grant, ProviderError> {
        let header = jsonwebtoken::Header::default();
        let token = jsonwebtoken::encode(&header, &Claims::new(user), &self.encoding)?;
        Ok(Grant::new(user, token))
    }
    /// Owner of `grant`, provided it was signed here, names its holder,
    /// and has not expired.
    pub fn holder(&self, grant: &Grant) -> Result<ID<Identity>, ProviderError> {
        let validation = jsonwebtoken::Validation::default();
        let claims = jsonwebtoken::decode::<Claims>(grant.token(), &self.decoding, &validation)
            .map_err(|_| ProviderError::Unauthenticated)?
            .claims;
        match claims.expired() || claims.user() != grant.user() {
            true => Err(ProviderError::Unauthenticated),
            false => Ok(claims.user()),
        }
    }
}
