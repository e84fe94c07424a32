//! Account store of the local provider: normalized email to Argon2 hash.
use super::*;
use argon2::Argon2;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::password_hash::SaltString;
use folio_core::ID;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct Account {
    user: ID<Identity>,
    hashword: String,
}

#[derive(Debug, Default)]
pub struct Credentials {
    accounts: RwLock<HashMap<String, Account>>,
}

impl Credentials {
    /// Open a new account, returning the identifier minted for it.
    /// Email shape is checked before secret strength, then uniqueness.
    pub async fn enroll(&self, email: &str, secret: &str) -> Result<ID<Identity>, ProviderError> {
        let email = Self::normalize(email);
        if !email.contains('@') {
            return Err(ProviderError::InvalidEmail);
        }
        let hashword = Self::hash(secret)?;
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&email) {
            return Err(ProviderError::Conflict);
        }
        let user = ID::default();
        accounts.insert(email, Account { user, hashword });
        Ok(user)
    }

    /// Unknown address and wrong secret are the same failure.
    pub async fn authenticate(&self, email: &str, secret: &str) -> Result<ID<Identity>, ProviderError> {
        let account = self
            .accounts
            .read()
            .await
            .get(&Self::normalize(email))
            .cloned()
            .ok_or(ProviderError::Credentials)?;
        match Self::verify(secret, &account.hashword) {
            true => Ok(account.user),
            false => Err(ProviderError::Credentials),
        }
    }

    /// Swap the secret of `user`'s account.
    pub async fn replace(&self, user: ID<Identity>, secret: &str) -> Result<(), ProviderError> {
        let hashword = Self::hash(secret)?;
        self.accounts
            .write()
            .await
            .values_mut()
            .find(|account| account.user == user)
            .map(|account| account.hashword = hashword)
            .ok_or(ProviderError::NotFound)
    }

    pub async fn lookup(&self, email: &str) -> Option<ID<Identity>> {
        self.accounts
            .read()
            .await
            .get(&Self::normalize(email))
            .map(|account| account.user)
    }

    fn normalize(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Enforces the minimum length before hashing.
    fn hash(secret: &str) -> Result<String, ProviderError> {
        use rand::Rng;
        if secret.chars().count() < folio_core::MIN_SECRET_LENGTH {
            return Err(ProviderError::WeakSecret);
        }
        let ref mut bytes = [0u8; 16];
        rand::rng().fill(bytes);
        let salt = SaltString::encode_b64(bytes).map_err(|e| ProviderError::Hashing(e.to_string()))?;
        Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| ProviderError::Hashing(e.to_string()))
    }

    fn verify(secret: &str, hashword: &str) -> bool {
        PasswordHash::new(hashword)
            .map(|hash| {
                Argon2::default()
                    .verify_password(secret.as_bytes(), &hash)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}
