//! Collaborator seams: authentication tokens and HTTP transport.
//!
//! The endpoint client never talks to an HTTP library directly. It builds an
//! [`HttpRequest`] and hands it to an [`HttpTransport`]; the bearer token comes from an
//! [`AuthTokenProvider`]. Production code plugs in [`super::ReqwestTransport`] and
//! [`StaticTokenProvider`]; tests plug in in-memory fakes.

use crate::domain::{MenuhubError, Result};
use crate::form::TransferPayload;
use async_trait::async_trait;
use std::fmt;
use url::Url;

/// Opaque bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw secret. Only the transport should need this.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Source of bearer tokens for authenticated endpoints.
#[async_trait]
pub trait AuthTokenProvider: Send + Sync {
    /// Fetches a currently valid token.
    ///
    /// # Errors
    ///
    /// Returns [`MenuhubError::Auth`] when no token can be obtained.
    async fn get_auth_token(&self) -> Result<AuthToken>;
}

/// Provider backed by a fixed, pre-issued token.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    token: Option<AuthToken>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()).map(AuthToken::new),
        }
    }
}

#[async_trait]
impl AuthTokenProvider for StaticTokenProvider {
    async fn get_auth_token(&self) -> Result<AuthToken> {
        self.token
            .clone()
            .ok_or_else(|| MenuhubError::Auth("no auth token configured".to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Multipart(TransferPayload),
}

/// Library-neutral outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_multipart(mut self, payload: TransferPayload) -> Self {
        self.body = RequestBody::Multipart(payload);
        self
    }

    /// First header called `name`, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Body as text, with invalid UTF-8 replaced.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends requests over the wire.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Performs `request` and returns the raw response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`MenuhubError::Transport`] when no response was received at all.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_debug_is_redacted() {
        let token = AuthToken::new("s3cret");
        assert_eq!(format!("{token:?}"), "AuthToken(<redacted>)");
        assert_eq!(token.bearer(), "Bearer s3cret");
    }

    #[tokio::test]
    async fn static_provider_without_token_is_auth_error() {
        let provider = StaticTokenProvider::new(Some("  ".into()));
        assert!(matches!(provider.get_auth_token().await, Err(MenuhubError::Auth(_))));

        let provider = StaticTokenProvider::new(Some("abc".into()));
        assert_eq!(provider.get_auth_token().await, Ok(AuthToken::new("abc")));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let request = HttpRequest::new(Method::Get, Url::parse("http://localhost/").unwrap())
            .with_header("Authorization", "Bearer x");
        assert_eq!(request.header("authorization"), Some("Bearer x"));
        assert_eq!(request.header("traceparent"), None);
    }

    #[test]
    fn success_range() {
        assert!(HttpResponse::new(204, Vec::new()).is_success());
        assert!(!HttpResponse::new(404, "missing").is_success());
    }
}
