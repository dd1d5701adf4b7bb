//! Bearer-token authentication for the Gappd API.
//!
//! The session/token lifecycle (login, storage, expiry) is owned by the
//! application; the client only needs a credential to attach, or nothing
//! for anonymous access. Anonymous feeds are legal; public endpoints like
//! the explore-events list work without a header.

/// Authentication credential attached to outgoing requests.
///
/// # Examples
///
/// ```rust
/// use gappd_link::AuthProvider;
///
/// // Logged-in session
/// let auth = AuthProvider::bearer("eyJhbGc...");
///
/// // Anonymous access (public feeds)
/// let auth = AuthProvider::none();
/// ```
#[derive(Debug, Clone, Default)]
pub enum AuthProvider {
    /// Bearer token from a logged-in session.
    Bearer(String),

    /// No authentication.
    #[default]
    None,
}

impl AuthProvider {
    /// Create a bearer-token credential.
    pub fn bearer(token: impl Into<String>) -> Self {
        AuthProvider::Bearer(token.into())
    }

    /// Create an anonymous credential.
    pub fn none() -> Self {
        AuthProvider::None
    }

    /// Whether a credential is present.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthProvider::Bearer(_))
    }

    /// Attach the `Authorization` header if a credential is present.
    pub fn apply_to_request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            AuthProvider::Bearer(token) => {
                builder.header("Authorization", format!("Bearer {}", token))
            }
            AuthProvider::None => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_authenticated() {
        assert!(AuthProvider::bearer("tok").is_authenticated());
        assert!(!AuthProvider::none().is_authenticated());
        assert!(!AuthProvider::default().is_authenticated());
    }

    #[test]
    fn test_bearer_header_applied() {
        let client = reqwest::Client::new();
        let request = AuthProvider::bearer("abc123")
            .apply_to_request(client.get("http://localhost/posts/feed"))
            .build()
            .unwrap();
        let header = request.headers().get("Authorization").unwrap();
        assert_eq!(header, "Bearer abc123");
    }

    #[test]
    fn test_anonymous_sends_no_header() {
        let client = reqwest::Client::new();
        let request = AuthProvider::none()
            .apply_to_request(client.get("http://localhost/events"))
            .build()
            .unwrap();
        assert!(request.headers().get("Authorization").is_none());
    }
}
