use super::*;

/// Runtime configuration, sourced from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub codes: Codes,
    pub redirect: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            codes: Codes::default(),
            redirect: folio_core::DEFAULT_RESET_REDIRECT.to_string(),
        }
    }
}

impl Settings {
    /// Reads `ADMIN_SECRET_KEY`, `OWNER_SECRET_KEY` and `RESET_REDIRECT`.
    pub fn from_env() -> Self {
        Self {
            codes: Codes::new(
                std::env::var("ADMIN_SECRET_KEY").ok(),
                std::env::var("OWNER_SECRET_KEY").ok(),
            ),
            redirect: std::env::var("RESET_REDIRECT")
                .ok()
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| folio_core::DEFAULT_RESET_REDIRECT.to_string()),
        }
    }
    pub fn codes(mut self, codes: Codes) -> Self {
        self.codes = codes;
        self
    }
    pub fn redirect(mut self, redirect: impl Into<String>) -> Self {
        self.redirect = redirect.into();
        self
    }
}

/// Reference codes for elevated roles, held only as digests.
/// Empty values are discarded so they can never match.
#[derive(Debug, Clone, Default)]
pub struct Codes {
    admin: Option<Digest>,
    owner: Option<Digest>,
}

impl Codes {
    pub fn new(admin: Option<String>, owner: Option<String>) -> Self {
        let digest = |code: Option<String>| code.filter(|c| !c.is_empty()).map(|c| Digest::of(&c));
        Self {
            admin: digest(admin),
            owner: digest(owner),
        }
    }
    pub fn reference(&self, target: Role) -> Option<&Digest> {
        match target {
            Role::User => None,
            Role::Admin => self.admin.as_ref(),
            Role::Owner => self.owner.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_codes_are_unset() {
        let codes = Codes::new(Some(String::new()), Some("OWNCODE".into()));
        assert!(codes.reference(Role::Admin).is_none());
        assert!(codes.reference(Role::Owner) == Some(&Digest::of("OWNCODE")));
        assert!(codes.reference(Role::User).is_none());
    }

    #[test]
    fn debug_hides_codes() {
        let codes = Codes::new(Some("ADMCODE".into()), None);
        let shown = format!("{:?}", codes);
        assert!(!shown.contains("ADMCODE"));
        assert!(shown.contains("owner: None"));
    }

    #[test]
    fn default_redirect() {
        assert!(Settings::default().redirect == folio_core::DEFAULT_RESET_REDIRECT);
    }
}
