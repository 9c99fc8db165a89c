use std::fmt;

use http::HeaderMap;
use http::header::COOKIE;

/// The authenticated user associated with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub email: String,
}

/// The display string is the email, which is what guestbook entries record
/// as the author.
impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}

/// Current-principal lookup for a request.
pub trait IdentityProvider: Send + Sync {
    /// The authenticated principal the request carries, or `None` for an
    /// anonymous request.
    fn current(&self, headers: &HeaderMap) -> Option<Principal>;
}

/// Cookie-backed identity in the dev-login style: the configured cookie
/// holds `{id}:{email}`.
pub struct CookieIdentity {
    cookie_name: String,
}

impl CookieIdentity {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }

    fn parse(value: &str) -> Option<Principal> {
        let (id, email) = value.split_once(':')?;
        if id.is_empty() || email.is_empty() {
            return None;
        }
        Some(Principal {
            id: id.to_string(),
            email: email.to_string(),
        })
    }
}

impl IdentityProvider for CookieIdentity {
    fn current(&self, headers: &HeaderMap) -> Option<Principal> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|header| header.to_str().ok())
            .flat_map(cookie::Cookie::split_parse)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == self.cookie_name)
            .and_then(|cookie| Self::parse(cookie.value()))
    }
}
