//! The blocking client call surface.

use crate::endpoint::Endpoint;
use crate::error::RequestError;
use crate::{Request, Value};

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use tracing::debug;

/// A synchronous XML-RPC client bound to one endpoint.
///
/// Apart from the immutable [`Endpoint`], the client holds no state across calls: each
/// [`invoke`] materializes its own request and response buffers, so a shared instance can serve
/// overlapping calls from multiple threads.
///
/// [`invoke`]: #method.invoke
#[derive(Debug)]
pub struct RpcClient {
    endpoint: Endpoint,
    http: Client,
}

impl RpcClient {
    /// Creates a client for the RPC service under `base_url`.
    ///
    /// The endpoint is resolved here, once; see [`Endpoint::new`] for the routing and
    /// authentication rules.
    pub fn new(
        base_url: &str,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, RequestError> {
        Ok(RpcClient {
            endpoint: Endpoint::new(base_url, username, password)?,
            http: Client::new(),
        })
    }

    /// Creates a client that POSTs to an already resolved [`Endpoint`].
    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        RpcClient {
            endpoint,
            http: Client::new(),
        }
    }

    /// The endpoint this client POSTs to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Invokes `method` with the given arguments, blocking until the response is decoded.
    ///
    /// Returns the decoded first response parameter, or `None` when the server answered without
    /// any parameters. An explicit `<nil/>` result is `Some(Value::Nil)`, not `None`.
    ///
    /// # Errors
    ///
    /// Failures to reach the server (or a non-success HTTP status) surface as
    /// [`RequestError::Transport`]; responses that cannot be decoded surface as
    /// [`RequestError::Parse`]. The call is not retried either way.
    pub fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Option<Value>, RequestError> {
        let mut request = Request::new(method);
        for arg in args {
            request = request.arg(arg);
        }

        debug!(method, url = %self.endpoint.url(), "invoking remote method");

        let mut builder = self.http.post(self.endpoint.url().clone());
        if let Some(token) = self.endpoint.credentials() {
            // Pre-authenticate instead of waiting for a challenge
            builder = builder.header(AUTHORIZATION, format!("Basic {}", token));
        }

        request.call(builder)
    }
}
