/// Failures reported by a [`Provider`](super::Provider).
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("invalid credentials")]
    Credentials,
    #[error("account already exists")]
    Conflict,
    #[error("secret must be at least {} characters", folio_core::MIN_SECRET_LENGTH)]
    WeakSecret,
    #[error("no active session")]
    Unauthenticated,
    #[error("record not found")]
    NotFound,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("hashing error: {0}")]
    Hashing(String),
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Failures surfaced to callers of the session manager.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("registration failed: {0}")]
    Registration(String),
    #[error("not authenticated")]
    NotAuthenticated,
    /// One variant for every elevation failure cause.
    #[error("invalid access code")]
    InvalidCode,
    /// Only ever logged; a failed profile fetch degrades the session to anonymous.
    #[error("profile fetch failed: {0}")]
    ProfileFetch(String),
    #[error("insufficient role")]
    Forbidden,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
