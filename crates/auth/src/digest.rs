use sha2::Digest as _;

/// SHA-256 fingerprint of a secret value.
/// Access codes and recovery tokens are kept and compared only in this form.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    pub fn of(value: &str) -> Self {
        Self(sha2::Sha256::digest(value.as_bytes()).into())
    }
    /// Compare against a presented plaintext.
    pub fn matches(&self, value: &str) -> bool {
        *self == Self::of(value)
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_only_exact_value() {
        let digest = Digest::of("OWNCODE");
        assert!(digest.matches("OWNCODE"));
        assert!(!digest.matches("owncode"));
        assert!(!digest.matches("OWNCODE "));
        assert!(!digest.matches(""));
    }

    #[test]
    fn debug_shows_no_plaintext() {
        let shown = format!("{:?}", Digest::of("hunter22"));
        assert!(!shown.contains("hunter22"));
        assert!(shown.starts_with("Digest("));
    }
}
