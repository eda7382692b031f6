use crate::config::AUTH_TOKEN_STORAGE_KEY;

/// Bearer credential for every outbound request.
///
/// Read once when the dashboard boots and never refreshed. An empty token is
/// still sent as `Bearer ` so the backend decides how to treat anonymous
/// callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Loads the token from a store, treating a missing or unreadable entry
    /// as anonymous.
    pub fn load<S: TokenStore>(store: &S) -> Self {
        match store.load_token(AUTH_TOKEN_STORAGE_KEY) {
            Ok(Some(token)) => Self::new(token),
            Ok(None) => Self::anonymous(),
            Err(error) => {
                tracing::warn!(%error, "session token unreadable; continuing anonymously");
                Self::anonymous()
            }
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_anonymous(&self) -> bool {
        self.token.trim().is_empty()
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Persistent client-side storage the token is read from. This code never
/// writes to it; the login flow owns that.
pub trait TokenStore {
    type Error: std::fmt::Display;

    fn load_token(&self, key: &str) -> Result<Option<String>, Self::Error>;
}
