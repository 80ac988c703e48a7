//! Authentication collaborator.
//!
//! The console never implements an identity protocol itself; it only needs
//! a bearer token per request. [`TokenProvider`] is the seam an OAuth2 or
//! Firebase integration would plug into, and [`AuthSession`] is the
//! explicit login → refresh → logout lifecycle object injected into the
//! HTTP client (no ambient module state).

use async_trait::async_trait;
use std::sync::RwLock;

/// Source of bearer tokens for outgoing requests.
///
/// Returning `None` means "send the request unauthenticated"; the server
/// decides whether that is acceptable.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> Option<String>;
}

/// Fixed-token provider used by the CLI (token from flag/env/config).
#[derive(Debug, Default)]
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Provider that never attaches a token.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> Option<String> {
        self.token.clone()
    }
}

/// Mutable auth session with an explicit lifecycle.
///
/// `login` and `refresh` both install a new token; `logout` clears it.
/// The session is shared with the HTTP client behind an `Arc`, so a 401
/// handler can force a logout that every subsequent request observes.
#[derive(Debug, Default)]
pub struct AuthSession {
    token: RwLock<Option<String>>,
}

impl AuthSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&self, token: impl Into<String>) {
        self.set(Some(token.into()));
    }

    pub fn refresh(&self, token: impl Into<String>) {
        self.set(Some(token.into()));
    }

    pub fn logout(&self) {
        self.set(None);
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    fn set(&self, token: Option<String>) {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = token;
    }

    fn current(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl TokenProvider for AuthSession {
    async fn token(&self) -> Option<String> {
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticTokenProvider::new("tok-1");
        assert_eq!(provider.token().await.as_deref(), Some("tok-1"));
        assert!(StaticTokenProvider::anonymous().token().await.is_none());
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let session = AuthSession::new();
        assert!(!session.is_authenticated());

        session.login("first");
        assert_eq!(session.token().await.as_deref(), Some("first"));

        session.refresh("second");
        assert_eq!(session.token().await.as_deref(), Some("second"));

        session.logout();
        assert!(session.token().await.is_none());
        assert!(!session.is_authenticated());
    }
}
