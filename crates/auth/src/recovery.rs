use super::*;

/// Password recovery and change.
impl<P> Manager<P>
where
    P: Provider,
{
    /// Ask the provider to mail a recovery link pointing at the configured redirect.
    pub async fn request_reset(&self, email: &str) -> Result<(), AuthError> {
        self.core
            .provider
            .reset(email, &self.core.redirect)
            .await
            .inspect(|_| log::info!("[recovery] reset requested"))
            .map_err(AuthError::from)
    }

    /// Replace the live identity's secret.
    pub async fn update_password(&self, secret: &str) -> Result<(), AuthError> {
        self.live()?;
        self.core
            .provider
            .password(secret)
            .await
            .inspect(|_| log::info!("[recovery] password updated"))
            .map_err(AuthError::from)
    }
}
