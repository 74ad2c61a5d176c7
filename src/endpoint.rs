//! Resolution of the RPC endpoint from a configured base URL.

use crate::error::RequestError;

use tracing::debug;
use url::Url;

/// The resolved target of a client: the final RPC URL plus an optional precomputed Basic-auth
/// credential.
///
/// An `Endpoint` is built once when the client is created and never mutated afterwards; it is the
/// only state shared between calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
    credentials: Option<String>,
}

impl Endpoint {
    /// Resolves the RPC endpoint under `base_url`.
    ///
    /// The base URL is normalized to end with a trailing slash before the RPC path is appended.
    /// With a non-empty `username` the authenticated `login/rpc` path is used and a Basic-auth
    /// credential is precomputed from `username` and `password`; otherwise the anonymous `rpc`
    /// path is used and `password` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Endpoint`] if `base_url` is not a valid absolute URL.
    pub fn new(
        base_url: &str,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, RequestError> {
        let mut base = base_url.to_owned();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base)?;

        let username = username.filter(|user| !user.is_empty());
        let (path, credentials) = match username {
            Some(user) => {
                let token = base64::encode(format!("{}:{}", user, password.unwrap_or("")));
                ("login/rpc", Some(token))
            }
            None => ("rpc", None),
        };
        let url = base.join(path)?;

        debug!(%url, authenticated = credentials.is_some(), "resolved RPC endpoint");

        Ok(Endpoint { url, credentials })
    }

    /// The URL requests are POSTed to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The precomputed Basic-auth credential (base64 of `user:password`), if any.
    pub fn credentials(&self) -> Option<&str> {
        self.credentials.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_to_login_rpc_with_username() {
        let endpoint =
            Endpoint::new("http://tracsv/trac/Project", Some("alice"), Some("secret")).unwrap();

        assert_eq!(endpoint.url().as_str(), "http://tracsv/trac/Project/login/rpc");
        assert_eq!(endpoint.credentials(), Some("YWxpY2U6c2VjcmV0"));
    }

    #[test]
    fn routes_to_rpc_without_username() {
        let endpoint = Endpoint::new("http://tracsv/trac/Project", None, None).unwrap();

        assert_eq!(endpoint.url().as_str(), "http://tracsv/trac/Project/rpc");
        assert_eq!(endpoint.credentials(), None);
    }

    #[test]
    fn keeps_an_existing_trailing_slash() {
        let endpoint = Endpoint::new("http://tracsv/trac/Project/", None, None).unwrap();

        assert_eq!(endpoint.url().as_str(), "http://tracsv/trac/Project/rpc");
    }

    #[test]
    fn empty_username_is_anonymous() {
        let endpoint =
            Endpoint::new("http://tracsv/trac/Project", Some(""), Some("ignored")).unwrap();

        assert_eq!(endpoint.url().as_str(), "http://tracsv/trac/Project/rpc");
        assert_eq!(endpoint.credentials(), None);
    }

    #[test]
    fn missing_password_defaults_to_empty() {
        let endpoint = Endpoint::new("http://tracsv/", Some("bob"), None).unwrap();

        assert_eq!(endpoint.credentials(), Some("Ym9iOg=="));
    }

    #[test]
    fn rejects_invalid_base_urls() {
        assert!(matches!(
            Endpoint::new("not a url", None, None),
            Err(RequestError::Endpoint(_))
        ));
    }
}
